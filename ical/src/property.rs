// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Schema-less iCalendar property.
//!
//! A property is a name, an ordered parameter mapping and a single value
//! string. Typed accessors for well-known properties are meant to be built on
//! top of this type, not into it, so unrecognized IANA and `X-` properties
//! round-trip unchanged.

use std::fmt::{self, Display};

use crate::parameter::Parameters;

/// A parsed or constructed iCalendar property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name, upper-cased (e.g., "DTSTART", "X-WR-CALNAME")
    pub name: String,
    /// Property parameters in insertion order
    pub parameters: Parameters,
    /// Property value, unescaped for TEXT values
    pub value: String,
}

impl Property {
    /// Create a property without parameters.
    #[must_use]
    pub fn new(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self {
            name: name.as_ref().to_ascii_uppercase(),
            parameters: Parameters::new(),
            value: value.into(),
        }
    }

    /// Builder-style: append values to a parameter.
    #[must_use]
    pub fn with_parameter<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.parameters.push(name, values);
        self
    }

    /// Whether the property has the given name (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First value of a parameter.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.first(name)
    }
}

impl Display for Property {
    /// Writes the unfolded content line, without line terminator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::formatter::property::content_line(self))
    }
}
