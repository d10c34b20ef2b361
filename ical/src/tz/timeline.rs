// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::DateTime;

use crate::tz::definition::{TimezoneDefinition, TimezoneError};

/// One onset of an observance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Transition {
    /// Local wall time of the onset
    pub at: DateTime,
    /// Index into [`TimezoneDefinition::observances`]
    pub observance: usize,
}

/// Sorted onsets of every observance of one timezone definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTimeline {
    transitions: Vec<Transition>,
}

impl OffsetTimeline {
    /// Expand every observance of `definition` up to `horizon_year`.
    ///
    /// ## Errors
    ///
    /// Returns [`TimezoneError::OutOfRange`] if a recurrence leaves the
    /// calendar range supported by `jiff`.
    pub fn build(
        definition: &TimezoneDefinition,
        horizon_year: i16,
    ) -> Result<Self, TimezoneError> {
        let mut transitions = Vec::new();
        for (observance, obs) in definition.observances.iter().enumerate() {
            let onsets = match &obs.rule {
                Some(rule) => rule.onsets_after(obs.start, horizon_year)?,
                None => Vec::new(),
            };
            transitions.extend(
                std::iter::once(obs.start)
                    .chain(onsets)
                    .chain(obs.rdates.iter().copied())
                    .map(|at| Transition { at, observance }),
            );
        }

        // Equal instants keep document order, so the later observance wins
        transitions.sort();
        transitions.dedup();

        let timeline = Self { transitions };
        timeline.check_offsets(definition);
        Ok(timeline)
    }

    /// All transitions, sorted by onset.
    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Index of the observance in force at `local`.
    ///
    /// This is the observance of the latest transition at or before `local`.
    /// Before the first transition the earliest observance applies. Returns
    /// `None` only for an empty timeline.
    #[must_use]
    pub fn observance_at(&self, local: DateTime) -> Option<usize> {
        let first = self.transitions.first()?;
        let local = local.max(first.at);
        let idx = self.transitions.partition_point(|t| t.at <= local);
        let found = self.transitions.get(idx.checked_sub(1)?)?;
        Some(found.observance)
    }

    /// Log observances whose TZOFFSETFROM disagrees with the offset in force
    /// just before their first onset.
    fn check_offsets(&self, definition: &TimezoneDefinition) {
        let mut seen = vec![false; definition.observances.len()];
        let mut previous: Option<&Transition> = None;
        for transition in &self.transitions {
            let first = seen
                .get_mut(transition.observance)
                .is_some_and(|seen| !std::mem::replace(seen, true));
            let before = previous
                .filter(|prev| first && prev.at < transition.at)
                .and_then(|prev| definition.observances.get(prev.observance));

            if let (Some(before), Some(current)) =
                (before, definition.observances.get(transition.observance))
                && before.offset_to != current.offset_from
            {
                tracing::debug!(
                    tzid = %definition.tzid,
                    at = %transition.at,
                    expected = %before.offset_to,
                    found = %current.offset_from,
                    "TZOFFSETFROM disagrees with the preceding observance"
                );
            }
            previous = Some(transition);
        }
    }
}
