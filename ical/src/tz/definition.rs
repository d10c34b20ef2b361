// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::DateTime;
use jiff::tz::Offset;

use crate::component::Component;
use crate::keyword::{
    KW_DTSTART, KW_LAST_MODIFIED, KW_RDATE, KW_RRULE, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM,
    KW_TZOFFSETTO, KW_TZURL, KW_VTIMEZONE,
};
use crate::tz::recurrence::YearlyRule;
use crate::value::{
    DateOrDateTime, ValueError, parse_date_or_date_time, parse_rdate_list, parse_recurrence_rule,
    parse_utc_offset,
};

/// Typed view over a VTIMEZONE component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneDefinition {
    /// Value of the TZID property
    pub tzid: String,
    /// Value of the TZURL property
    pub url: Option<String>,
    /// Raw value of the LAST-MODIFIED property
    pub last_modified: Option<String>,
    /// STANDARD and DAYLIGHT sub-components in document order
    pub observances: Vec<Observance>,
}

impl TimezoneDefinition {
    /// Convert a VTIMEZONE component.
    ///
    /// Sub-components other than STANDARD and DAYLIGHT are ignored.
    ///
    /// ## Errors
    ///
    /// Returns [`TimezoneError`] if the component is not a VTIMEZONE, lacks a
    /// TZID, or any observance cannot be converted.
    pub fn from_component(component: &Component) -> Result<Self, TimezoneError> {
        if !component.is(KW_VTIMEZONE) {
            return Err(TimezoneError::UnexpectedComponent {
                name: component.name.clone(),
            });
        }

        let tzid = component
            .value(KW_TZID)
            .ok_or_else(|| TimezoneError::MissingProperty {
                component: component.name.clone(),
                property: KW_TZID,
            })?;

        let observances = component
            .children
            .iter()
            .filter_map(|child| {
                let kind = child.name.parse::<ObservanceKind>().ok()?;
                Some(Observance::from_component(kind, child))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tzid: tzid.to_owned(),
            url: component.value(KW_TZURL).map(ToOwned::to_owned),
            last_modified: component.value(KW_LAST_MODIFIED).map(ToOwned::to_owned),
            observances,
        })
    }
}

impl TryFrom<&Component> for TimezoneDefinition {
    type Error = TimezoneError;

    fn try_from(component: &Component) -> Result<Self, Self::Error> {
        Self::from_component(component)
    }
}

/// Kind of a timezone observance sub-component
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ObservanceKind {
    /// STANDARD sub-component
    Standard,
    /// DAYLIGHT sub-component
    Daylight,
}

/// One STANDARD or DAYLIGHT rule of a timezone.
///
/// All instants are local wall-clock times, i.e. expressed in the offset in
/// force before the observance takes effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observance {
    /// Whether this is a standard or a daylight observance
    pub kind: ObservanceKind,
    /// First onset, from DTSTART
    pub start: DateTime,
    /// Offset in force before each onset, from TZOFFSETFROM
    pub offset_from: Offset,
    /// Offset in force after each onset, from TZOFFSETTO
    pub offset_to: Offset,
    /// First TZNAME, if any
    pub name: Option<String>,
    /// Yearly recurrence of the onset, from RRULE
    pub rule: Option<YearlyRule>,
    /// Additional onsets, from every RDATE property
    pub rdates: Vec<DateTime>,
}

impl Observance {
    /// Convert a STANDARD or DAYLIGHT component.
    ///
    /// A missing TZOFFSETFROM falls back to TZOFFSETTO.
    ///
    /// ## Errors
    ///
    /// Returns [`TimezoneError`] on a missing DTSTART or TZOFFSETTO, on an
    /// unparsable value, or on a recurrence rule outside the yearly subset.
    pub fn from_component(
        kind: ObservanceKind,
        component: &Component,
    ) -> Result<Self, TimezoneError> {
        let required = |property: &'static str| {
            component
                .value(property)
                .ok_or_else(|| TimezoneError::MissingProperty {
                    component: component.name.clone(),
                    property,
                })
        };
        let invalid = |property: &'static str| {
            move |source: ValueError| TimezoneError::InvalidValue { property, source }
        };

        let offset_to =
            parse_utc_offset(required(KW_TZOFFSETTO)?).map_err(invalid(KW_TZOFFSETTO))?;
        let offset_from = match component.value(KW_TZOFFSETFROM) {
            Some(value) => parse_utc_offset(value).map_err(invalid(KW_TZOFFSETFROM))?,
            None => offset_to,
        };

        let start = parse_date_or_date_time(required(KW_DTSTART)?).map_err(invalid(KW_DTSTART))?;
        let start = to_local(start, offset_from)?;

        let rule = match component.value(KW_RRULE) {
            Some(value) => {
                let rule = parse_recurrence_rule(value).map_err(invalid(KW_RRULE))?;
                Some(YearlyRule::from_rule(&rule, offset_from)?)
            }
            None => None,
        };

        let mut rdates = Vec::new();
        for property in component.properties_named(KW_RDATE) {
            for value in parse_rdate_list(&property.value).map_err(invalid(KW_RDATE))? {
                rdates.push(to_local(value, offset_from)?);
            }
        }

        Ok(Self {
            kind,
            start,
            offset_from,
            offset_to,
            name: component.value(KW_TZNAME).map(ToOwned::to_owned),
            rule,
            rdates,
        })
    }
}

/// Local wall time of a DATE or DATE-TIME, where a UTC value is shifted into
/// the offset in force before the onset.
pub(crate) fn to_local(
    value: DateOrDateTime,
    offset_from: Offset,
) -> Result<DateTime, TimezoneError> {
    if value.is_utc() {
        let instant = Offset::UTC.to_timestamp(value.civil())?;
        Ok(offset_from.to_datetime(instant))
    } else {
        Ok(value.civil())
    }
}

/// Errors converting a VTIMEZONE component into a [`TimezoneDefinition`]
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimezoneError {
    /// The component is not a VTIMEZONE
    #[error("expected a VTIMEZONE component, found {name}")]
    UnexpectedComponent {
        /// Name of the component found
        name: String,
    },

    /// A required property is absent
    #[error("{component} is missing required property {property}")]
    MissingProperty {
        /// Component lacking the property
        component: String,
        /// Name of the missing property
        property: &'static str,
    },

    /// A property value could not be parsed
    #[error("invalid {property} value: {source}")]
    InvalidValue {
        /// Name of the offending property
        property: &'static str,
        /// Underlying value error
        source: ValueError,
    },

    /// The recurrence rule is outside the yearly subset used by timezones
    #[error("unsupported recurrence rule: {reason}")]
    RecurrenceRuleUnsupported {
        /// Why the rule was refused
        reason: String,
    },

    /// A date computation left the supported range
    #[error("date out of range: {0}")]
    OutOfRange(#[from] jiff::Error),
}
