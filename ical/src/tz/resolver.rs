// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::OnceLock;

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::{Offset, TimeZone};

use crate::component::Component;
use crate::keyword::KW_TZID;
use crate::property::Property;
use crate::tz::definition::{TimezoneDefinition, TimezoneError};
use crate::tz::timeline::OffsetTimeline;
use crate::value::{ValueError, parse_date_time};

/// Default last year timezone recurrences are expanded to.
pub const DEFAULT_HORIZON_YEAR: i16 = 2100;

/// Options for [`TzResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverOptions {
    /// Last year recurrence rules without UNTIL or COUNT are expanded to.
    ///
    /// Default: `2100`.
    pub horizon_year: i16,

    /// Consult the host timezone database for identifiers without an
    /// embedded VTIMEZONE.
    ///
    /// Default: `true`.
    pub system_fallback: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            horizon_year: DEFAULT_HORIZON_YEAR,
            system_fallback: true,
        }
    }
}

impl ResolverOptions {
    /// Set the expansion horizon year.
    #[must_use]
    pub const fn horizon_year(mut self, year: i16) -> Self {
        self.horizon_year = year;
        self
    }

    /// Enable or disable the host timezone database fallback.
    #[must_use]
    pub const fn system_fallback(mut self, enabled: bool) -> Self {
        self.system_fallback = enabled;
        self
    }
}

/// Where a [`Resolution`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// A VTIMEZONE registered with the resolver
    Embedded,
    /// The host timezone database
    System,
}

/// Offset in force for a timezone at a local date-time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// UTC offset
    pub offset: Offset,
    /// Display name, e.g. `EST`
    pub name: Option<String>,
    /// Where the answer came from
    pub source: ResolutionSource,
}

#[derive(Debug)]
struct Entry {
    definition: TimezoneDefinition,
    timeline: OnceLock<Result<OffsetTimeline, TimezoneError>>,
}

/// Answers which UTC offset applies to a timezone at a local date-time.
///
/// Definitions are registered up front; each offset timeline is built on
/// first use and cached. Queries take `&self` and may run concurrently.
///
/// ## Examples
///
/// ```
/// # use icalcodec::{TzResolver, parse_calendar_str};
/// # use jiff::civil::datetime;
/// let calendar = parse_calendar_str("\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VTIMEZONE\r\n\
/// TZID:Fixed/Plus8\r\n\
/// BEGIN:STANDARD\r\n\
/// DTSTART:16010101T000000\r\n\
/// TZOFFSETFROM:+0800\r\n\
/// TZOFFSETTO:+0800\r\n\
/// TZNAME:CST\r\n\
/// END:STANDARD\r\n\
/// END:VTIMEZONE\r\n\
/// END:VCALENDAR\r\n\
/// ").unwrap();
///
/// let resolver = TzResolver::from_tree(&calendar);
/// let resolution = resolver.resolve("Fixed/Plus8", datetime(2021, 11, 12, 0, 0, 0, 0)).unwrap();
/// assert_eq!(resolution.offset.seconds(), 8 * 3600);
/// assert_eq!(resolution.name.as_deref(), Some("CST"));
/// ```
#[derive(Debug, Default)]
pub struct TzResolver {
    options: ResolverOptions,
    entries: HashMap<String, Entry>,
}

impl TzResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
        }
    }

    /// Create a resolver with default options holding every VTIMEZONE of
    /// `tree`. Definitions that cannot be converted are logged and skipped.
    #[must_use]
    pub fn from_tree(tree: &Component) -> Self {
        let mut resolver = Self::default();
        resolver.register(tree);
        resolver
    }

    /// Options in use.
    #[must_use]
    pub const fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Register every VTIMEZONE found in `tree`, in preorder.
    ///
    /// A later definition replaces an earlier one with the same TZID.
    /// Definitions that cannot be converted are skipped and returned; the
    /// remaining ones are still registered.
    #[tracing::instrument(skip_all, fields(root = %tree.name))]
    pub fn register(&mut self, tree: &Component) -> Vec<TimezoneError> {
        let mut errors = Vec::new();
        for vtimezone in tree.timezones() {
            match TimezoneDefinition::from_component(vtimezone) {
                Ok(definition) => self.insert(definition),
                Err(error) => {
                    tracing::warn!(tzid = vtimezone.value(KW_TZID), %error, "skipping VTIMEZONE");
                    errors.push(error);
                }
            }
        }
        errors
    }

    /// Register the VTIMEZONEs of several top-level components.
    pub fn register_all(&mut self, trees: &[Component]) -> Vec<TimezoneError> {
        trees.iter().flat_map(|tree| self.register(tree)).collect()
    }

    /// Register a converted definition, replacing any with the same TZID.
    pub fn insert(&mut self, definition: TimezoneDefinition) {
        let tzid = definition.tzid.clone();
        let entry = Entry {
            definition,
            timeline: OnceLock::new(),
        };
        if self.entries.insert(tzid.clone(), entry).is_some() {
            tracing::warn!(%tzid, "duplicate TZID, replacing earlier VTIMEZONE");
        }
    }

    /// Registered definitions, in no particular order.
    pub fn definitions(&self) -> impl Iterator<Item = &TimezoneDefinition> {
        self.entries.values().map(|entry| &entry.definition)
    }

    /// Look up a registered definition.
    ///
    /// ## Errors
    ///
    /// Returns [`ResolveError::UnknownTimezone`] if no VTIMEZONE with this
    /// TZID was registered.
    pub fn find(&self, tzid: &str) -> Result<&TimezoneDefinition, ResolveError> {
        self.entries
            .get(tzid)
            .map(|entry| &entry.definition)
            .ok_or_else(|| ResolveError::UnknownTimezone {
                tzid: tzid.to_owned(),
            })
    }

    /// Offset in force for `tzid` at the local date-time `local`.
    ///
    /// Registered definitions take precedence over the host timezone
    /// database. Before its first onset a definition resolves to the
    /// observance with the earliest onset.
    ///
    /// ## Errors
    ///
    /// Returns [`ResolveError::UnknownTimezone`] if `tzid` is neither
    /// registered nor known to the host database, and
    /// [`ResolveError::EmptyDefinition`] for a VTIMEZONE without observances.
    pub fn resolve(&self, tzid: &str, local: DateTime) -> Result<Resolution, ResolveError> {
        if let Some(entry) = self.entries.get(tzid) {
            return self.resolve_embedded(entry, local);
        }

        if self.options.system_fallback {
            match TimeZone::get(tzid) {
                Ok(tz) => return resolve_system(&tz, local),
                Err(error) => tracing::debug!(tzid, %error, "not in host timezone database"),
            }
        }

        Err(ResolveError::UnknownTimezone {
            tzid: tzid.to_owned(),
        })
    }

    /// Absolute instant of the local date-time `local` in `tzid`.
    ///
    /// ## Errors
    ///
    /// Same as [`TzResolver::resolve`], plus [`ResolveError::Arithmetic`] if
    /// the instant is out of range.
    pub fn resolve_instant(
        &self,
        tzid: &str,
        local: DateTime,
    ) -> Result<Timestamp, ResolveError> {
        let resolution = self.resolve(tzid, local)?;
        Ok(resolution.offset.to_timestamp(local)?)
    }

    /// Absolute instant of a DATE-TIME property such as DTSTART.
    ///
    /// A `Z` suffix means UTC; otherwise the TZID parameter names the
    /// timezone.
    ///
    /// ## Errors
    ///
    /// Returns [`ResolveError::InvalidDateTime`] if the value is not a
    /// DATE-TIME and [`ResolveError::Floating`] if it has neither a `Z`
    /// suffix nor a TZID parameter.
    pub fn resolve_property(&self, property: &Property) -> Result<Timestamp, ResolveError> {
        let value = parse_date_time(&property.value)?;
        if value.utc {
            return Ok(Offset::UTC.to_timestamp(value.civil)?);
        }

        match property.parameter(KW_TZID) {
            Some(tzid) => self.resolve_instant(tzid, value.civil),
            None => Err(ResolveError::Floating {
                property: property.name.clone(),
            }),
        }
    }

    fn resolve_embedded(
        &self,
        entry: &Entry,
        local: DateTime,
    ) -> Result<Resolution, ResolveError> {
        let definition = &entry.definition;
        let timeline = entry
            .timeline
            .get_or_init(|| OffsetTimeline::build(definition, self.options.horizon_year))
            .as_ref()
            .map_err(|error| ResolveError::InvalidTimezone(error.clone()))?;

        let observance = timeline
            .observance_at(local)
            .and_then(|idx| definition.observances.get(idx))
            .ok_or_else(|| ResolveError::EmptyDefinition {
                tzid: definition.tzid.clone(),
            })?;

        tracing::debug!(
            tzid = %definition.tzid,
            %local,
            offset = %observance.offset_to,
            kind = %observance.kind,
            "resolved from embedded VTIMEZONE"
        );
        Ok(Resolution {
            offset: observance.offset_to,
            name: observance.name.clone(),
            source: ResolutionSource::Embedded,
        })
    }
}

fn resolve_system(tz: &TimeZone, local: DateTime) -> Result<Resolution, ResolveError> {
    let zoned = tz.to_zoned(local)?;
    let info = tz.to_offset_info(zoned.timestamp());
    tracing::debug!(
        tzid = tz.iana_name(),
        %local,
        offset = %info.offset(),
        "resolved from host timezone database"
    );
    Ok(Resolution {
        offset: info.offset(),
        name: Some(info.abbreviation().to_owned()),
        source: ResolutionSource::System,
    })
}

/// Errors from [`TzResolver`] queries
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// Neither a registered VTIMEZONE nor the host database knows the TZID
    #[error("unknown timezone: {tzid}")]
    UnknownTimezone {
        /// The TZID looked up
        tzid: String,
    },

    /// The VTIMEZONE has no STANDARD or DAYLIGHT sub-component
    #[error("timezone {tzid} has no observances")]
    EmptyDefinition {
        /// The TZID looked up
        tzid: String,
    },

    /// The registered VTIMEZONE could not be expanded
    #[error("invalid timezone definition: {0}")]
    InvalidTimezone(TimezoneError),

    /// The property value is not a DATE-TIME
    #[error(transparent)]
    InvalidDateTime(#[from] ValueError),

    /// The date-time has no timezone to resolve against
    #[error("{property} is a floating date-time")]
    Floating {
        /// Name of the property
        property: String,
    },

    /// The instant is out of the supported range
    #[error("date-time arithmetic failed: {0}")]
    Arithmetic(#[from] jiff::Error),
}
