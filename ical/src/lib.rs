// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read, write and resolve iCalendar (RFC 5545) content.
//!
//! The crate is schema-less: a document is a tree of [`Component`]s holding
//! [`Property`] values as strings. On top of that it unfolds and folds content
//! lines, escapes TEXT values, and resolves the UTC offset of a TZID using the
//! VTIMEZONE definitions embedded in the document.
//!
//! ```
//! use icalcodec::{FormatOptions, parse_calendar_str};
//!
//! let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\n\
//!            SUMMARY:Lunch\\, then a walk\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let calendar = parse_calendar_str(src).unwrap();
//!
//! let event = calendar.children_named("VEVENT").next().unwrap();
//! assert_eq!(event.value("SUMMARY"), Some("Lunch, then a walk"));
//!
//! let out = FormatOptions::default().write_to_string(&calendar).unwrap();
//! assert_eq!(out, src);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod component;
pub mod formatter;
pub mod keyword;
pub mod options;
pub mod parameter;
mod parser;
pub mod property;
pub mod syntax;
pub mod text;
pub mod tz;
pub mod value;

pub use crate::component::Component;
pub use crate::formatter::{FoldingStyle, FormatOptions, Formatter, format, format_all};
pub use crate::options::ParseOptions;
pub use crate::parameter::{Parameter, Parameters};
pub use crate::parser::{
    ParseError, Parsed, parse, parse_calendar, parse_calendar_str, parse_reader, parse_str,
};
pub use crate::property::Property;
pub use crate::syntax::{ContentLine, LineReader, TreeBuildError, TreeBuildWarning};
pub use crate::tz::{Resolution, ResolutionSource, ResolveError, ResolverOptions, TzResolver};
