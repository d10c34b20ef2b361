// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! This module converts the token stream of one unfolded logical line into a
//! [`Property`].
//!
//! # Architecture
//!
//! ```text
//! Source Text → Line Reader → Content Line → Lexer → Token Stream → Scanner → Property
//! ```
//!
//! # Content Line Format
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! param       = param-name "=" param-value *("," param-value)
//! param-value = paramtext / quoted-string
//! ```
//!
//! # Example
//!
//! ```
//! use icalcodec::syntax::{ContentLine, scan_content_line};
//!
//! let line = ContentLine::new("DTSTART;TZID=America/New_York:20250101T090000", 1);
//! let property = scan_content_line(&line).unwrap();
//!
//! assert_eq!(property.name, "DTSTART");
//! assert_eq!(property.parameter("TZID"), Some("America/New_York"));
//! assert_eq!(property.value, "20250101T090000");
//! ```

use std::iter::Peekable;

use crate::parameter::Parameters;
use crate::property::Property;
use crate::syntax::framer::ContentLine;
use crate::syntax::lexer::{SpannedToken, Token, tokenize};
use crate::text::ValueEncoding;

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLineError {
    /// No property name at the start of the line.
    ///
    /// Example: `:value` or `;PARAM=x:value`
    #[error("empty property name")]
    EmptyName,

    /// Missing colon separator.
    ///
    /// Example: `PROPNAME value` instead of `PROPNAME:value`
    #[error("missing colon in property, expected at byte {position}")]
    MissingColon {
        /// Byte offset where the colon was expected
        position: usize,
    },

    /// Invalid parameter syntax.
    #[error("{kind} at byte {position}")]
    InvalidParameter {
        /// Byte offset of the semicolon introducing the parameter
        position: usize,
        /// Specific error details
        kind: ParameterErrorKind,
    },
}

/// Specific parameter parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterErrorKind {
    /// Missing equals sign.
    ///
    /// Example: `TZID America/New_York`
    #[error("missing equals in parameter")]
    MissingEquals,

    /// Missing parameter value.
    ///
    /// Example: `TZID=`
    #[error("missing parameter value")]
    MissingValue,

    /// Empty parameter name.
    ///
    /// Example: `;=value`
    #[error("empty parameter name")]
    EmptyName,

    /// Unterminated quoted string.
    ///
    /// Example: `PARAM="unclosed value`
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// Scan one logical line into a property.
///
/// The property name is upper-cased, parameter values keep their casing with
/// surrounding quotes removed, and the value is decoded according to its
/// [`ValueEncoding`].
///
/// # Errors
///
/// Returns a [`ContentLineError`] if the line does not follow the content line
/// grammar.
pub fn scan_content_line(line: &ContentLine) -> Result<Property, ContentLineError> {
    scan_str(line.as_str())
}

/// Scan a content line given as text.
pub(crate) fn scan_str(src: &str) -> Result<Property, ContentLineError> {
    let mut tokens = tokenize(src).peekable();

    let name = match tokens.next_if(|t| matches!(t.0, Token::Word(_))) {
        Some(SpannedToken(Token::Word(name), _)) => name,
        _ => return Err(ContentLineError::EmptyName),
    };

    let mut parameters = Parameters::new();
    let value_start = loop {
        match tokens.next() {
            Some(SpannedToken(Token::Semicolon, span)) => {
                let (param_name, values) = parse_parameter(src, &mut tokens).map_err(|kind| {
                    ContentLineError::InvalidParameter {
                        position: span.start,
                        kind,
                    }
                })?;
                parameters.push(param_name, values);
            }
            Some(SpannedToken(Token::Colon, span)) => break span.end,
            Some(SpannedToken(_, span)) => {
                return Err(ContentLineError::MissingColon {
                    position: span.start,
                });
            }
            None => {
                return Err(ContentLineError::MissingColon {
                    position: src.len(),
                });
            }
        }
    };

    let raw = src.get(value_start..).unwrap_or_default();
    let value = ValueEncoding::of(name, &parameters).decode(raw).into_owned();
    Ok(Property {
        name: name.to_ascii_uppercase(),
        parameters,
        value,
    })
}

/// Parse a single parameter after its semicolon.
///
/// Format: `name=value` or `name=value1,value2`
fn parse_parameter<'src>(
    src: &'src str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<(&'src str, Vec<String>), ParameterErrorKind> {
    let name = match tokens.next_if(|t| matches!(t.0, Token::Word(_))) {
        Some(SpannedToken(Token::Word(name), _)) => name,
        _ => return Err(ParameterErrorKind::EmptyName),
    };

    match tokens.next() {
        Some(SpannedToken(Token::Equal, _)) => {}
        Some(_) | None => return Err(ParameterErrorKind::MissingEquals),
    }

    let mut values = Vec::new();
    loop {
        values.push(parse_parameter_value(src, tokens)?.to_string());
        if tokens.next_if(|t| t.0 == Token::Comma).is_none() {
            break;
        }
    }
    Ok((name, values))
}

/// Parse a single parameter value, quoted or not.
fn parse_parameter_value<'src>(
    src: &'src str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<&'src str, ParameterErrorKind> {
    if let Some(SpannedToken(_, open)) = tokens.next_if(|t| t.0 == Token::DQuote) {
        // Collect until closing quote, separators included
        for SpannedToken(token, span) in tokens.by_ref() {
            if token == Token::DQuote {
                return Ok(src.get(open.end..span.start).unwrap_or_default());
            }
        }
        return Err(ParameterErrorKind::UnterminatedQuote);
    }

    let start = tokens.peek().map_or(src.len(), |t| t.1.start);
    let mut end = start;
    while let Some(SpannedToken(_, span)) = tokens.next_if(|t| {
        !matches!(t.0, Token::Semicolon | Token::Colon | Token::Comma)
    }) {
        end = span.end;
    }

    if end == start {
        return Err(ParameterErrorKind::MissingValue);
    }
    Ok(src.get(start..end).unwrap_or_default())
}
