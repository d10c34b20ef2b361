// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Timezone resolution for date-time properties carrying a TZID parameter.
//!
//! ```text
//! VTIMEZONE → TimezoneDefinition → OffsetTimeline (memoized) → Resolution
//! ```
//!
//! Embedded VTIMEZONE definitions win over the host timezone database, which
//! is only consulted when an identifier is not defined in the calendar.

mod definition;
mod recurrence;
mod resolver;
mod timeline;

pub use crate::tz::definition::{Observance, ObservanceKind, TimezoneDefinition, TimezoneError};
pub use crate::tz::recurrence::{RuleDay, YearlyRule};
pub use crate::tz::resolver::{
    DEFAULT_HORIZON_YEAR, Resolution, ResolutionSource, ResolveError, ResolverOptions, TzResolver,
};
pub use crate::tz::timeline::{OffsetTimeline, Transition};
