// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule values, as far as timezone observances need them.

use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{DateOrDateTime, value_date_or_date_time};
use crate::value::miscellaneous::{
    ValueExpected, ascii_word, i8_0_1, i8_0_3, i8_0_9, i8_1_2, i8_1_4, i8_1_9, u8_0_2, u8_1_9,
};

/// Recurrence rule
///
/// Rule parts without a typed field are kept by name in
/// [`ValueRecurrenceRule::other_parts`], so callers can refuse rules they
/// cannot expand faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRecurrenceRule {
    /// Frequency of recurrence
    pub freq: RecurrenceFrequency,
    /// Until date for recurrence
    pub until: Option<DateOrDateTime>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Month specifier
    pub by_month: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Start day of week
    pub wkst: Option<WeekDay>,
    /// Names of the remaining rule parts, e.g. `BYHOUR`
    pub other_parts: Vec<String>,
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Occurrence in month (optional)
    pub occurrence: Option<i8>,
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[expect(missing_docs)]
pub enum WeekDay {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

impl From<WeekDay> for jiff::civil::Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => Self::Sunday,
            WeekDay::Monday => Self::Monday,
            WeekDay::Tuesday => Self::Tuesday,
            WeekDay::Wednesday => Self::Wednesday,
            WeekDay::Thursday => Self::Thursday,
            WeekDay::Friday => Self::Friday,
            WeekDay::Saturday => Self::Saturday,
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
pub fn value_rrule<'src, I, E>() -> impl Parser<'src, I, ValueRecurrenceRule, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    recur_rrule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .try_map(build_from_parts::<I, E::Error>)
}

fn build_from_parts<'src, I, Err>(
    parts: Vec<Part>,
    span: I::Span,
) -> Result<ValueRecurrenceRule, Err>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    Err: LabelError<'src, I, ValueExpected>,
{
    fn set_once<'src, I, Err, T>(slot: &mut Option<T>, value: T, span: SimpleSpan) -> Result<(), Err>
    where
        I: ValueInput<'src, Token = char, Span = SimpleSpan>,
        Err: LabelError<'src, I, ValueExpected>,
    {
        match slot {
            Some(_) => Err(Err::expected_found(
                [ValueExpected::RRuleDuplicatePart],
                None,
                span,
            )),
            None => {
                *slot = Some(value);
                Ok(())
            }
        }
    }

    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut by_month = None;
    let mut by_day = None;
    let mut by_month_day = None;
    let mut wkst = None;
    let mut other_parts: Vec<String> = Vec::new();

    for part in parts {
        match part {
            Part::Freq(v) => set_once::<I, Err, _>(&mut freq, v, span)?,
            Part::Until(v) => set_once::<I, Err, _>(&mut until, v, span)?,
            Part::Count(v) => set_once::<I, Err, _>(&mut count, v, span)?,
            Part::Interval(v) => set_once::<I, Err, _>(&mut interval, v, span)?,
            Part::ByMonth(v) => set_once::<I, Err, _>(&mut by_month, v, span)?,
            Part::ByDay(v) => set_once::<I, Err, _>(&mut by_day, v, span)?,
            Part::ByMonthDay(v) => set_once::<I, Err, _>(&mut by_month_day, v, span)?,
            Part::Wkst(v) => set_once::<I, Err, _>(&mut wkst, v, span)?,
            Part::Other(name) => {
                if other_parts.contains(&name) {
                    return Err(Err::expected_found(
                        [ValueExpected::RRuleDuplicatePart],
                        None,
                        span,
                    ));
                }
                other_parts.push(name);
            }
        }
    }

    let freq =
        freq.ok_or_else(|| Err::expected_found([ValueExpected::RRuleRequiredFreq], None, span))?;

    if until.is_some() && count.is_some() {
        return Err(Err::expected_found(
            [ValueExpected::RRuleCountUntilExclusion],
            None,
            span,
        ));
    }

    Ok(ValueRecurrenceRule {
        freq,
        until,
        count,
        interval,
        by_month: by_month.unwrap_or_default(),
        by_day: by_day.unwrap_or_default(),
        by_month_day: by_month_day.unwrap_or_default(),
        wkst,
        other_parts,
    })
}

#[derive(Debug, Clone)]
enum Part {
    Freq(RecurrenceFrequency),
    Until(DateOrDateTime),
    Count(u32),
    Interval(u32),
    ByMonth(Vec<u8>),
    ByDay(Vec<WeekDayNum>),
    ByMonthDay(Vec<i8>),
    Wkst(WeekDay),
    Other(String),
}

const TYPED_PARTS: [&str; 8] = [
    KW_RRULE_FREQ,
    KW_RRULE_UNTIL,
    KW_RRULE_COUNT,
    KW_RRULE_INTERVAL,
    KW_RRULE_BYMONTH,
    KW_RRULE_BYDAY,
    KW_RRULE_BYMONTHDAY,
    KW_RRULE_WKST,
];

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "WKST" "=" weekday )
///                 / ( other-name "=" *( any char except ";" ) )
/// ```
fn recur_rrule_part<'src, I, E>() -> impl Parser<'src, I, Part, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let kw = |kw| just(kw).ignore_then(just('='));

    let freq = kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq);

    let until = kw(KW_RRULE_UNTIL)
        .ignore_then(value_date_or_date_time())
        .map(Part::Until);

    let count = kw(KW_RRULE_COUNT)
        .ignore_then(u32_non_zero())
        .map(Part::Count);

    let interval = kw(KW_RRULE_INTERVAL)
        .ignore_then(u32_non_zero())
        .map(Part::Interval);

    let by_day = kw(KW_RRULE_BYDAY)
        .ignore_then(bywdaylist())
        .map(Part::ByDay);

    // BYMONTHDAY must be tried before BYMONTH shares its prefix
    let by_month_day = kw(KW_RRULE_BYMONTHDAY)
        .ignore_then(bymodaylist())
        .map(Part::ByMonthDay);

    let by_month = kw(KW_RRULE_BYMONTH)
        .ignore_then(bymolist())
        .map(Part::ByMonth);

    let wkst = kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst);

    let other = ascii_word()
        .try_map(|name: String, span| {
            if TYPED_PARTS.contains(&name.as_str()) {
                Err(E::Error::expected_found([ValueExpected::RRulePart], None, span))
            } else {
                Ok(name)
            }
        })
        .then_ignore(just('='))
        .then_ignore(none_of(';').repeated().at_least(1))
        .map(Part::Other);

    choice((
        freq,
        until,
        count,
        interval,
        by_day,
        by_month_day,
        by_month,
        wkst,
        other,
    ))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src, I, E>() -> impl Parser<'src, I, RecurrenceFrequency, E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    ascii_word().try_map(|word: String, span| {
        word.parse::<RecurrenceFrequency>()
            .map_err(|_| E::Error::expected_found([ValueExpected::RRuleFreq], None, span))
    })
}

/// ```txt
/// bywdaylist  = ( weekdaynum *("," weekdaynum) )
/// ```
fn bywdaylist<'src, I, E>() -> impl Parser<'src, I, Vec<WeekDayNum>, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    weekdaynum().separated_by(just(',')).at_least(1).collect()
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// plus        = "+"
/// minus       = "-"
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDayNum, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    is_positive()
        .then(ordwk())
        .map(|(positive, n)| if positive { n } else { -n })
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
}

/// ```txt
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn ordwk<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_1_4().then(i8_0_9()).map(|(a, b)| a * 10 + b), // 10-49
        just('5').ignore_then(i8_0_3()).map(|a| 50 + a),  // 50-53
        just('0').ignore_then(i8_1_9()),                  // 01-09
        i8_1_9(),                                         // 1-9
    ))
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, WeekDay, E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    ascii_word().try_map(|word: String, span| {
        word.parse::<WeekDay>()
            .map_err(|_| E::Error::expected_found([ValueExpected::RRuleWeekDay], None, span))
    })
}

/// ```txt
/// bymodaylist = ( monthdaynum *("," monthdaynum) )
/// monthdaynum = [plus / minus] ordmoday
/// ```
fn bymodaylist<'src, I, E>() -> impl Parser<'src, I, Vec<i8>, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordmoday())
        .map(|(positive, n)| if positive { n } else { -n })
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// ```txt
/// ordmoday    = 1*2DIGIT       ;1 to 31
/// ```
fn ordmoday<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_1_2().then(i8_0_9()).map(|(a, b)| a * 10 + b), // 10-29
        just('3').ignore_then(i8_0_1()).map(|a| 30 + a),  // 30-31
        just('0').or_not().ignore_then(i8_1_9()),         // 1-9 / 01-09
    ))
}

/// ```txt
/// bymolist    = ( monthnum *("," monthnum) )
/// monthnum    = 1*2DIGIT       ;1 to 12
/// ```
fn bymolist<'src, I, E>() -> impl Parser<'src, I, Vec<u8>, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just('0').ignore_then(u8_1_9()),                 // 01-09
        just('1').ignore_then(u8_0_2()).map(|a| 10 + a), // 10-12
        u8_1_9(),                                        // 1-9
    ))
    .separated_by(just(','))
    .at_least(1)
    .collect()
}

fn is_positive<'src, I, E>() -> impl Parser<'src, I, bool, E> + Copy
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}

/// Parse u32 (1 or more digits)
fn u32_non_zero<'src, I, E>() -> impl Parser<'src, I, u32, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits
        .collect::<String>()
        .try_map_with(|str, e| {
            lexical::parse_partial::<u32, _>(&str)
                .map_err(|_| E::Error::expected_found([ValueExpected::U32], None, e.span()))
                .and_then(|(v, _)| match v {
                    0 => Err(E::Error::expected_found(
                        [ValueExpected::PositiveU32],
                        None,
                        e.span(),
                    )),
                    v => Ok(v),
                })
        })
}
