// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, BufRead};

use crate::component::Component;
use crate::options::ParseOptions;
use crate::syntax::{LineReader, TreeBuildError, TreeBuildWarning, TreeBuilder};

/// Parse every top-level component from iCalendar source text
///
/// ## Errors
///
/// Returns a [`ParseError`] on a fatal structural problem. Recoverable
/// problems are reported in [`Parsed::warnings`].
///
/// ## Examples
///
/// ```
/// # use icalcodec::parse_str;
/// let ical_src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let parsed = parse_str(ical_src).unwrap();
/// assert_eq!(parsed.components.len(), 1);
/// assert!(parsed.warnings.is_empty());
/// ```
pub fn parse_str(src: &str) -> Result<Parsed, ParseError> {
    parse(src.as_bytes(), ParseOptions::default())
}

/// Parse every top-level component from a buffered reader with default options.
///
/// ## Errors
///
/// Same as [`parse`], plus I/O errors from the reader.
pub fn parse_reader(reader: impl BufRead) -> Result<Parsed, ParseError> {
    parse(reader, ParseOptions::default())
}

/// Parse every top-level component from a buffered reader.
///
/// ## Errors
///
/// Returns [`ParseError::Io`] if reading fails and [`ParseError::Tree`] on a
/// fatal structural problem.
pub fn parse(reader: impl BufRead, options: ParseOptions) -> Result<Parsed, ParseError> {
    let mut builder = TreeBuilder::new(options);
    for line in LineReader::new(reader) {
        builder.feed(&line?)?;
    }
    let result = builder.finish()?;
    tracing::debug!(
        components = result.roots.len(),
        warnings = result.warnings.len(),
        "parsed iCalendar stream"
    );
    Ok(Parsed {
        components: result.roots,
        warnings: result.warnings,
    })
}

/// Parse source text that must contain exactly one top-level component
///
/// ## Errors
///
/// Same as [`parse_str`], plus [`ParseError::NoComponent`] and
/// [`ParseError::MultipleRoots`].
///
/// ## Examples
///
/// ```
/// # use icalcodec::{ParseError, parse_calendar_str};
/// let src = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";
/// assert!(matches!(
///     parse_calendar_str(src),
///     Err(ParseError::MultipleRoots { count: 2 })
/// ));
/// ```
pub fn parse_calendar_str(src: &str) -> Result<Component, ParseError> {
    parse_calendar(src.as_bytes(), ParseOptions::default())
}

/// Parse a buffered reader that must contain exactly one top-level component.
///
/// Warnings are logged and otherwise discarded; use [`parse`] to inspect them.
///
/// ## Errors
///
/// Same as [`parse`], plus [`ParseError::NoComponent`] and
/// [`ParseError::MultipleRoots`].
pub fn parse_calendar(reader: impl BufRead, options: ParseOptions) -> Result<Component, ParseError> {
    let Parsed { mut components, .. } = parse(reader, options)?;
    match components.len() {
        0 => Err(ParseError::NoComponent),
        1 => components.pop().ok_or(ParseError::NoComponent),
        count => Err(ParseError::MultipleRoots { count }),
    }
}

/// Result of a successful parse
#[derive(Debug, Clone)]
pub struct Parsed {
    /// Top-level components in stream order
    pub components: Vec<Component>,
    /// Recoverable problems, in the order they were found
    pub warnings: Vec<TreeBuildWarning>,
}

/// Errors that can occur during parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Reading the source failed
    #[error("failed to read iCalendar source: {0}")]
    Io(#[from] io::Error),

    /// Fatal structural error
    #[error(transparent)]
    Tree(#[from] TreeBuildError),

    /// The source has no top-level component
    #[error("no component found")]
    NoComponent,

    /// The source has more than one top-level component
    #[error("expected a single top-level component, found {count}")]
    MultipleRoots {
        /// Number of top-level components found
        count: usize,
    },
}
