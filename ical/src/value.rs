// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed parsing of the property values the timezone resolver relies on.
//!
//! The syntax layer keeps every value as a string. The parsers here turn the
//! few value types needed for offset resolution into `jiff` types, as defined
//! in RFC 5545 Section 3.3.

mod datetime;
mod miscellaneous;
mod rrule;

pub use datetime::{DateOrDateTime, ValueDateTime};
pub use rrule::{RecurrenceFrequency, ValueRecurrenceRule, WeekDay, WeekDayNum};

use chumsky::prelude::*;
use jiff::civil::Date;
use jiff::tz::Offset;

use crate::value::datetime::{
    value_date, value_date_or_date_time, value_date_time, value_utc_offset, values_rdate,
};
use crate::value::rrule::value_rrule;

/// Parse a DATE value, e.g. `19970714`
///
/// ## Errors
///
/// Returns [`ValueError`] if the input is not a valid date.
pub fn parse_date(src: &str) -> Result<Date, ValueError> {
    value_date::<'_, &str, extra::Err<Rich<'_, char>>>()
        .parse(src)
        .into_result()
        .map_err(|errs| ValueError::new("DATE", src, &errs))
}

/// Parse a DATE-TIME value, e.g. `19980119T070000Z`
///
/// ## Errors
///
/// Returns [`ValueError`] if the input is not a valid date-time.
pub fn parse_date_time(src: &str) -> Result<ValueDateTime, ValueError> {
    value_date_time::<'_, &str, extra::Err<Rich<'_, char>>>()
        .parse(src)
        .into_result()
        .map_err(|errs| ValueError::new("DATE-TIME", src, &errs))
}

/// Parse a value that is either a DATE or a DATE-TIME
///
/// ## Errors
///
/// Returns [`ValueError`] if the input is neither.
pub fn parse_date_or_date_time(src: &str) -> Result<DateOrDateTime, ValueError> {
    value_date_or_date_time::<'_, &str, extra::Err<Rich<'_, char>>>()
        .parse(src)
        .into_result()
        .map_err(|errs| ValueError::new("DATE-TIME", src, &errs))
}

/// Parse a comma separated RDATE value list. PERIOD values yield their start.
///
/// ## Errors
///
/// Returns [`ValueError`] if any item is malformed.
pub fn parse_rdate_list(src: &str) -> Result<Vec<DateOrDateTime>, ValueError> {
    values_rdate::<'_, &str, extra::Err<Rich<'_, char>>>()
        .parse(src)
        .into_result()
        .map_err(|errs| ValueError::new("RDATE", src, &errs))
}

/// Parse a UTC-OFFSET value, e.g. `-0500`
///
/// ## Errors
///
/// Returns [`ValueError`] if the input is not a valid offset.
///
/// ## Examples
///
/// ```
/// # use icalcodec::value::parse_utc_offset;
/// let offset = parse_utc_offset("+0530").unwrap();
/// assert_eq!(offset.seconds(), 5 * 3600 + 30 * 60);
/// assert!(parse_utc_offset("0530").is_err());
/// ```
pub fn parse_utc_offset(src: &str) -> Result<Offset, ValueError> {
    value_utc_offset::<'_, &str, extra::Err<Rich<'_, char>>>()
        .parse(src)
        .into_result()
        .map_err(|errs| ValueError::new("UTC-OFFSET", src, &errs))
}

/// Parse a RECUR value, e.g. `FREQ=YEARLY;BYMONTH=3;BYDAY=2SU`
///
/// ## Errors
///
/// Returns [`ValueError`] if the rule is malformed.
pub fn parse_recurrence_rule(src: &str) -> Result<ValueRecurrenceRule, ValueError> {
    value_rrule::<'_, &str, extra::Err<Rich<'_, char>>>()
        .parse(src)
        .into_result()
        .map_err(|errs| ValueError::new("RECUR", src, &errs))
}

/// A value string that does not match its expected value type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value {value:?}: {reason}")]
pub struct ValueError {
    /// Name of the expected value type
    pub kind: &'static str,
    /// The offending value
    pub value: String,
    /// Human readable parser diagnostics
    pub reason: String,
}

impl ValueError {
    fn new(kind: &'static str, value: &str, errs: &[Rich<'_, char>]) -> Self {
        let reason = errs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            kind,
            value: value.to_owned(),
            reason,
        }
    }
}
