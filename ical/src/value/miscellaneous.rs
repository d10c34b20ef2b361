// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared building blocks for the value parsers.

use std::borrow::Cow;

use chumsky::Parser;
use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Failure reasons when a specific value type was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A date value was expected
    Date,
    /// A UTC offset within range was expected
    UtcOffset,
    /// A 32-bit unsigned integer value was expected
    U32,
    /// A positive 32-bit unsigned integer value was expected
    PositiveU32,
    /// A known recurrence frequency was expected
    RRuleFreq,
    /// A known weekday was expected
    RRuleWeekDay,
    /// A well-formed value for a known rule part was expected
    RRulePart,
    /// Each rule part may appear at most once
    RRuleDuplicatePart,
    /// FREQ rule part is required
    RRuleRequiredFreq,
    /// UNTIL and COUNT must not appear together
    RRuleCountUntilExclusion,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::UtcOffset => Self::Label(Cow::Borrowed("utc offset out of range")),
            ValueExpected::U32 => Self::Label(Cow::Borrowed("u32 out of range")),
            ValueExpected::PositiveU32 => Self::Label(Cow::Borrowed("positive u32")),
            ValueExpected::RRuleFreq => Self::Label(Cow::Borrowed("recurrence frequency")),
            ValueExpected::RRuleWeekDay => Self::Label(Cow::Borrowed("weekday")),
            ValueExpected::RRulePart => Self::Label(Cow::Borrowed("valid rule part value")),
            ValueExpected::RRuleDuplicatePart => {
                Self::Label(Cow::Borrowed("rule part must not occur more than once"))
            }
            ValueExpected::RRuleRequiredFreq => {
                Self::Label(Cow::Borrowed("FREQ rule part is required"))
            }
            ValueExpected::RRuleCountUntilExclusion => Self::Label(Cow::Borrowed(
                "UNTIL and COUNT must not occur in the same rule",
            )),
        }
    }
}

/// One or more ASCII letters, as used by rule part names and enumerated values.
pub(crate) fn ascii_word<'src, I, E>() -> impl Parser<'src, I, String, E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('A'..='Z' | 'a'..='z') => c }
        .repeated()
        .at_least(1)
        .collect::<String>()
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        pub(crate) const fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: ValueInput<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(u8_0_1 : u8 => { '0', '1' });
define_digit_select!(u8_0_2 : u8 => { '0', '1', '2' });
define_digit_select!(u8_0_3 : u8 => { '0', '1', '2', '3' });
define_digit_select!(u8_0_5 : u8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(u8_0_9 : u8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(u8_1_9 : u8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_3 : i8 => { '0', '1', '2', '3' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_4 : i8 => { '1', '2', '3', '4' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
