// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! This module writes component trees back to the RFC 5545 text format,
//! to any `std::io::Write` implementer. Every physical line is terminated with
//! CRLF and content lines longer than the folding width are folded.
//!
//! # Example
//!
//! ```
//! use icalcodec::{Component, Property, formatter::format};
//!
//! let calendar = Component::new("VCALENDAR")
//!     .with_property(Property::new("VERSION", "2.0"));
//!
//! let ics = format(&calendar).unwrap();
//! assert_eq!(ics, "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
//! ```

pub(crate) mod component;
mod fold;
pub(crate) mod property;

use std::io::{self, Write};

use crate::component::Component;
use crate::formatter::component::write_component;

pub use crate::formatter::fold::fold_line;

/// Convenience function to format a component tree to a `String` (uses default options).
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format(component: &Component) -> io::Result<String> {
    FormatOptions::default().write_to_string(component)
}

/// Format several top-level components back to back (uses default options).
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format_all(components: &[Component]) -> io::Result<String> {
    let mut buffer = Vec::new();
    let mut formatter = Formatter::new(&mut buffer, FormatOptions::default());
    for component in components {
        formatter.write(component)?;
    }
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Convenience method to write a component tree to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, component: &Component, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        formatter.write(component)
    }

    /// Convenience method to write a component tree to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_to_string(&self, component: &Component) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(component, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    /// Get the folding sequence for this style.
    #[must_use]
    pub(crate) const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }
}

/// iCalendar formatter that writes to any `Write` implementer.
///
/// # Example
///
/// ```
/// use icalcodec::formatter::{FormatOptions, Formatter};
///
/// let mut buffer = Vec::new();
/// let mut formatter = Formatter::new(&mut buffer, FormatOptions::default());
/// formatter.write_content_line("BEGIN:VCALENDAR").unwrap();
/// formatter.write_content_line("END:VCALENDAR").unwrap();
/// assert_eq!(buffer, b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
/// ```
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self { writer, options }
    }

    /// Get a mutable reference to the underlying writer.
    #[must_use]
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get a reference to the underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a component tree to the underlying writer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&mut self, component: &Component) -> io::Result<()> {
        write_component(self, component)
    }

    /// Write one logical line, folded according to the options and
    /// terminated with CRLF.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_content_line(&mut self, line: &str) -> io::Result<()> {
        for (i, piece) in fold_line(line, self.options.folding).into_iter().enumerate() {
            if i > 0 {
                self.writer
                    .write_all(self.options.folding_style.as_bytes())?;
            }
            self.writer.write_all(piece.as_bytes())?;
        }
        self.writer.write_all(b"\r\n")
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
