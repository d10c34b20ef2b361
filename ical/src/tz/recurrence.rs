// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, DateTime, Time, Weekday};
use jiff::tz::Offset;

use crate::tz::definition::{TimezoneError, to_local};
use crate::value::{DateOrDateTime, RecurrenceFrequency, ValueRecurrenceRule};

/// The yearly recurrence subset timezone observances are written in, e.g.
/// `FREQ=YEARLY;BYMONTH=3;BYDAY=2SU`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyRule {
    /// Month of each onset; the DTSTART month when absent
    pub month: Option<i8>,
    /// Day of each onset within the month; the DTSTART day when absent
    pub day: Option<RuleDay>,
    /// Years between onsets
    pub interval: i16,
    /// Last permitted onset, inclusive, in local wall time
    pub until: Option<DateTime>,
    /// Number of onsets including DTSTART
    pub count: Option<u32>,
}

/// Day selector of a [`YearlyRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleDay {
    /// The nth weekday of the month, negative counts from the end
    Weekday {
        /// Occurrence within the month, `1..=5` or `-5..=-1`
        nth: i8,
        /// Day of the week
        weekday: Weekday,
    },
    /// Fixed day of the month, negative counts from the end
    MonthDay(i8),
}

impl YearlyRule {
    /// Narrow a parsed recurrence rule to the yearly subset.
    ///
    /// A UTC `UNTIL` is converted to local wall time with `offset_from`.
    ///
    /// ## Errors
    ///
    /// Returns [`TimezoneError::RecurrenceRuleUnsupported`] for any rule part
    /// the subset cannot express faithfully.
    pub fn from_rule(
        rule: &ValueRecurrenceRule,
        offset_from: Offset,
    ) -> Result<Self, TimezoneError> {
        let unsupported = |reason: String| TimezoneError::RecurrenceRuleUnsupported { reason };

        if rule.freq != RecurrenceFrequency::Yearly {
            return Err(unsupported(format!("frequency {} is not YEARLY", rule.freq)));
        }
        if let Some(part) = rule.other_parts.first() {
            return Err(unsupported(format!("rule part {part} is not supported")));
        }

        let month = match rule.by_month.as_slice() {
            [] => None,
            [month] => Some(
                i8::try_from(*month).map_err(|_| unsupported("BYMONTH out of range".into()))?,
            ),
            _ => return Err(unsupported("more than one BYMONTH value".into())),
        };

        let day = match (rule.by_day.as_slice(), rule.by_month_day.as_slice()) {
            ([], []) => None,
            ([day], []) => {
                if month.is_none() {
                    return Err(unsupported("BYDAY requires a single BYMONTH".into()));
                }
                let nth = day.occurrence.unwrap_or(1);
                if !(1..=5).contains(&nth.abs()) {
                    return Err(unsupported(format!("BYDAY ordinal {nth} is outside a month")));
                }
                Some(RuleDay::Weekday {
                    nth,
                    weekday: day.day.into(),
                })
            }
            ([], [day]) => Some(RuleDay::MonthDay(*day)),
            ([_, ..], [_, ..]) => return Err(unsupported("both BYDAY and BYMONTHDAY".into())),
            _ => return Err(unsupported("more than one day selector".into())),
        };

        let interval = match rule.interval {
            None => 1,
            Some(n) => {
                i16::try_from(n).map_err(|_| unsupported(format!("INTERVAL {n} too large")))?
            }
        };

        let until = match rule.until {
            None => None,
            Some(DateOrDateTime::Date(date)) => Some(date.to_datetime(Time::MAX)),
            Some(until) => Some(to_local(until, offset_from)?),
        };

        Ok(Self {
            month,
            day,
            interval,
            until,
            count: rule.count,
        })
    }

    /// Onsets after `start` up to and including the year `horizon_year`.
    ///
    /// `start` itself is the first onset and is not repeated. Years in which
    /// the selected day does not exist (e.g. a fifth Sunday) are skipped.
    ///
    /// ## Errors
    ///
    /// Returns [`TimezoneError::OutOfRange`] if a year leaves the range
    /// supported by `jiff`.
    pub fn onsets_after(
        &self,
        start: DateTime,
        horizon_year: i16,
    ) -> Result<Vec<DateTime>, TimezoneError> {
        let month = self.month.unwrap_or_else(|| start.month());
        let mut remaining = self.count.map(|count| count.saturating_sub(1));
        let mut onsets = Vec::new();

        let mut year = start.year();
        while year <= horizon_year && remaining != Some(0) {
            if let Some(date) = self.date_in(year, month, start.day())? {
                let onset = date.to_datetime(start.time());
                if self.until.is_some_and(|until| onset > until) {
                    break;
                }
                if onset > start {
                    onsets.push(onset);
                    remaining = remaining.map(|n| n - 1);
                }
            }

            year = match year.checked_add(self.interval) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(onsets)
    }

    fn date_in(&self, year: i16, month: i8, start_day: i8) -> Result<Option<Date>, TimezoneError> {
        let first = Date::new(year, month, 1)?;
        let date = match self.day {
            Some(RuleDay::Weekday { nth, weekday }) => {
                first.nth_weekday_of_month(nth, weekday).ok()
            }
            Some(RuleDay::MonthDay(day)) => month_day(first, day),
            None => month_day(first, start_day),
        };
        Ok(date)
    }
}

fn month_day(first: Date, day: i8) -> Option<Date> {
    let days = first.days_in_month();
    let day = if day < 0 { days + day + 1 } else { day };
    if (1..=days).contains(&day) {
        Date::new(first.year(), first.month(), day).ok()
    } else {
        None
    }
}
