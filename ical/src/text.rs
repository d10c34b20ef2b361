// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! TEXT value escaping as defined in RFC 5545 Section 3.3.11.
//!
//! ```txt
//! ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
//!    ; \\ encodes \, \N or \n encodes newline
//!    ; \; encodes ;, \, encodes ,
//! ```
//!
//! Only TEXT values are escaped. Structured values (recurrence rules, date
//! lists, URIs, ...) use `;` and `,` as separators and are kept verbatim, see
//! [`ValueEncoding`].

use std::borrow::Cow;

use crate::keyword::{
    KW_ATTACH, KW_ATTENDEE, KW_BINARY, KW_BOOLEAN, KW_CAL_ADDRESS, KW_CATEGORIES, KW_COMPLETED,
    KW_CREATED, KW_DATE, KW_DATETIME, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE, KW_DURATION,
    KW_DURATION_TYPE, KW_EXDATE, KW_EXRULE, KW_FLOAT, KW_FREEBUSY, KW_GEO, KW_INTEGER,
    KW_LAST_MODIFIED, KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PERIOD, KW_PRIORITY, KW_RDATE,
    KW_RECUR, KW_RECURRENCE_ID, KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE,
    KW_SEQUENCE, KW_TEXT, KW_TIME, KW_TRIGGER, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_URI,
    KW_URL, KW_UTC_OFFSET, KW_VALUE,
};
use crate::parameter::Parameters;

/// Properties whose default value type is not TEXT, or whose TEXT value is a
/// separator-delimited list.
const RAW_PROPERTIES: &[&str] = &[
    KW_ATTACH,
    KW_ATTENDEE,
    KW_CATEGORIES,
    KW_COMPLETED,
    KW_CREATED,
    KW_DTEND,
    KW_DTSTAMP,
    KW_DTSTART,
    KW_DUE,
    KW_DURATION,
    KW_EXDATE,
    KW_EXRULE,
    KW_FREEBUSY,
    KW_GEO,
    KW_LAST_MODIFIED,
    KW_ORGANIZER,
    KW_PERCENT_COMPLETE,
    KW_PRIORITY,
    KW_RDATE,
    KW_RECURRENCE_ID,
    KW_REPEAT,
    KW_REQUEST_STATUS,
    KW_RESOURCES,
    KW_RRULE,
    KW_SEQUENCE,
    KW_TRIGGER,
    KW_TZOFFSETFROM,
    KW_TZOFFSETTO,
    KW_TZURL,
    KW_URL,
];

/// Value types that never carry TEXT escapes.
const RAW_VALUE_TYPES: &[&str] = &[
    KW_BINARY,
    KW_BOOLEAN,
    KW_CAL_ADDRESS,
    KW_DATE,
    KW_DATETIME,
    KW_DURATION_TYPE,
    KW_FLOAT,
    KW_INTEGER,
    KW_PERIOD,
    KW_RECUR,
    KW_TIME,
    KW_URI,
    KW_UTC_OFFSET,
];

/// How a property value is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueEncoding {
    /// TEXT value: escaped on output, unescaped on input
    Text,
    /// Structured value: written and read verbatim, except for newlines
    Raw,
}

impl ValueEncoding {
    /// Decide the encoding for a property from its name and `VALUE` parameter.
    ///
    /// An explicit `VALUE=TEXT` forces [`ValueEncoding::Text`], any other
    /// known value type forces [`ValueEncoding::Raw`]. Without a `VALUE`
    /// parameter the property name decides; unknown and `X-` properties are
    /// treated as TEXT.
    #[must_use]
    pub fn of(name: &str, parameters: &Parameters) -> Self {
        if let Some(value_type) = parameters.first(KW_VALUE) {
            if value_type.eq_ignore_ascii_case(KW_TEXT) {
                return Self::Text;
            }
            if RAW_VALUE_TYPES
                .iter()
                .any(|t| t.eq_ignore_ascii_case(value_type))
            {
                return Self::Raw;
            }
        }

        if RAW_PROPERTIES.iter().any(|p| p.eq_ignore_ascii_case(name)) {
            Self::Raw
        } else {
            Self::Text
        }
    }

    /// Decode a wire value.
    #[must_use]
    pub fn decode(self, raw: &str) -> Cow<'_, str> {
        match self {
            Self::Text => unescape(raw),
            Self::Raw => unescape_newlines(raw),
        }
    }

    /// Encode a value for the wire.
    #[must_use]
    pub fn encode(self, value: &str) -> Cow<'_, str> {
        match self {
            Self::Text => escape(value),
            Self::Raw => escape_newlines(value),
        }
    }
}

/// Only `\n` and `\N` are decoded in structured values, everything else is
/// kept as is.
fn unescape_newlines(raw: &str) -> Cow<'_, str> {
    if !raw.contains("\\n") && !raw.contains("\\N") {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(raw.replace("\\n", "\n").replace("\\N", "\n"))
}

/// A content line cannot hold a line break, so newlines in structured values
/// are escaped and CR is dropped.
fn escape_newlines(value: &str) -> Cow<'_, str> {
    if !value.contains(['\n', '\r']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace('\r', "").replace('\n', "\\n"))
}

/// Unescape a TEXT value.
///
/// Unknown escapes drop the backslash; a trailing lone backslash is kept.
#[must_use]
pub fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(other) => result.push(other), // covers \\ \; \, and unknown escapes
            None => result.push('\\'),
        }
    }
    Cow::Owned(result)
}

/// Escape a TEXT value.
///
/// Backslash, semicolon, comma and newline are escaped; CR is dropped.
#[must_use]
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', ';', ',', '\n', '\r']) {
        return Cow::Borrowed(value);
    }

    let mut result = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {} // Skip CR characters
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
