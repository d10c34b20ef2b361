// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for date and time values as defined in RFC 5545 Section 3.3.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use jiff::civil::{Date, DateTime, Time};
use jiff::tz::Offset;

use crate::value::miscellaneous::{
    ValueExpected, i8_0_1, i8_0_2, i8_0_9, i8_1_2, i8_1_9, i16_0_9, u8_0_1, u8_0_3, u8_0_5,
    u8_0_9,
};

/// Date-Time value defined in the RFC 5545 Section 3.3.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDateTime {
    /// Wall clock date and time; a leap second 60 is contracted to 59
    pub civil: DateTime,

    /// Whether the value is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
}

/// A DATE or a DATE-TIME value, e.g. in RDATE or a recurrence rule UNTIL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    /// DATE value
    Date(Date),
    /// DATE-TIME value
    DateTime(ValueDateTime),
}

impl DateOrDateTime {
    /// Start of the value as wall clock time, midnight for a DATE.
    #[must_use]
    pub fn civil(self) -> DateTime {
        match self {
            Self::Date(date) => date.to_datetime(Time::midnight()),
            Self::DateTime(dt) => dt.civil,
        }
    }

    /// Whether the value is a UTC DATE-TIME.
    #[must_use]
    pub const fn is_utc(self) -> bool {
        matches!(self, Self::DateTime(ValueDateTime { utc: true, .. }))
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub fn value_date<'src, I, E>() -> impl Parser<'src, I, Date, E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            Date::new(year, month, day)
                .map_err(|_| E::Error::expected_found([ValueExpected::Date], None, span))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
pub fn value_date_time<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, (time, utc))| ValueDateTime {
            civil: date.to_datetime(time),
            utc,
        })
}

/// ```txt
/// enddate     = date / date-time
/// ```
pub fn value_date_or_date_time<'src, I, E>() -> impl Parser<'src, I, DateOrDateTime, E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then(just('T').ignore_then(value_time()).or_not())
        .map(|(date, time)| match time {
            Some((time, utc)) => DateOrDateTime::DateTime(ValueDateTime {
                civil: date.to_datetime(time),
                utc,
            }),
            None => DateOrDateTime::Date(date),
        })
}

/// RDATE multiple values parser.
///
/// ```txt
/// rdtval     = date-time / date / period
/// period     = date-time "/" ( date-time / dur-value )
/// ```
///
/// Only the start of a period is kept.
pub fn values_rdate<'src, I, E>() -> impl Parser<'src, I, Vec<DateOrDateTime>, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let period_end = just('/').then(none_of(',').repeated().at_least(1)).ignored();

    value_date_or_date_time()
        .then_ignore(period_end.or_not())
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
fn value_time<'src, I, E>() -> impl Parser<'src, I, (Time, bool), E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| {
            // NOTE: We contract leap second 60 to 59 for simplicity
            #[expect(clippy::cast_possible_wrap)]
            let time = jiff::civil::time(hour as i8, minute as i8, second.min(59) as i8, 0);
            (time, utc.is_some())
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// utc-offset = time-numzone
///
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
pub fn value_utc_offset<'src, I, E>() -> impl Parser<'src, I, Offset, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    select! { c @ ('+' | '-') => c }
        .then(time_hour())
        .then(time_minute())
        .then(time_second().or_not())
        .try_map(|(((sign, hour), minute), second), span| {
            let seconds = i32::from(hour) * 3600
                + i32::from(minute) * 60
                + i32::from(second.unwrap_or(0).min(59));
            let seconds = if sign == '-' { -seconds } else { seconds };
            Offset::from_seconds(seconds)
                .map_err(|_| E::Error::expected_found([ValueExpected::UtcOffset], None, span))
        })
}

fn time_hour<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').then(just('0')).to(60), // leap second
    ))
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use chumsky::input::Stream;
    use jiff::civil::{date, datetime};

    use super::*;

    #[test]
    fn parses_date() {
        fn parse(src: &str) -> Result<Date, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            value_date::<'_, _, extra::Err<_>>()
                .parse(stream)
                .into_result()
        }

        let success_cases = [
            // examples from RFC 5545 Section 3.3.4
            ("19970714", date(1997, 7, 14)),
            // extra tests
            ("20240101", date(2024, 1, 1)),
            ("20000229", date(2000, 2, 29)), // leap year
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected);
        }

        let fail_cases = [
            "20241301",  // invalid month
            "20240001",  // invalid month
            "19970230",  // invalid date
            "abcd1234",  // invalid characters
            "2024011",   // invalid length
            "202401011", // invalid length
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_date_time() {
        fn parse(src: &str) -> Result<ValueDateTime, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            value_date_time::<'_, _, extra::Err<_>>()
                .parse(stream)
                .into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.5
            ("19980118T230000",  datetime(1998, 1, 18, 23, 0, 0, 0), false),
            ("19980119T070000Z", datetime(1998, 1, 19, 7, 0, 0, 0), true),
            ("19970630T235960Z", datetime(1997, 6, 30, 23, 59, 59, 0), true), // leap second
        ];
        for (src, civil, utc) in success_cases {
            assert_eq!(parse(src).unwrap(), ValueDateTime { civil, utc }, "Failed for {src}");
        }

        let fail_cases = [
            "19980119T230000-0800", // invalid time format
            "19970714 133000",      // missing 'T'
            "19970714T250000",      // invalid hour
            "19970714T126000",      // invalid minute
            "19970714",             // date only
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_rdate_list() {
        fn parse(src: &str) -> Result<Vec<DateOrDateTime>, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            values_rdate::<'_, _, extra::Err<_>>()
                .parse(stream)
                .into_result()
        }

        let values = parse("19970714T123000Z,19970101,19960403T020000Z/PT2H").unwrap();
        assert_eq!(
            values,
            [
                DateOrDateTime::DateTime(ValueDateTime {
                    civil: datetime(1997, 7, 14, 12, 30, 0, 0),
                    utc: true,
                }),
                DateOrDateTime::Date(date(1997, 1, 1)),
                DateOrDateTime::DateTime(ValueDateTime {
                    civil: datetime(1996, 4, 3, 2, 0, 0, 0),
                    utc: true,
                }),
            ]
        );
        assert_eq!(values[1].civil(), datetime(1997, 1, 1, 0, 0, 0, 0));
        assert!(values[0].is_utc());

        for src in ["", "1997", "19970714T1230", "19970714,"] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_utc_offset() {
        fn parse(src: &str) -> Result<Offset, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            value_utc_offset::<'_, _, extra::Err<_>>()
                .parse(stream)
                .into_result()
        }

        let success_cases = [
            // examples from RFC 5545 Section 3.3.14
            ("-0500", -5 * 3600),
            ("+0100", 3600),
            // extra tests
            ("+0000", 0),
            ("-123456", -(12 * 3600 + 34 * 60 + 56)),
            ("+0530", 5 * 3600 + 30 * 60),
        ];
        for (src, seconds) in success_cases {
            assert_eq!(parse(src).unwrap().seconds(), seconds, "Failed for {src}");
        }

        let fail_cases = [
            "0500",     // missing sign
            "+2400",    // invalid hour
            "-1260",    // invalid minute
            "+120",     // missing digit
            "+120000Z", // extra character
            "",         // empty string
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }
}
