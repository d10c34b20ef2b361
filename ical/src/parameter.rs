// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters as defined in RFC 5545 Section 3.2.
//!
//! Parameters are kept schema-less: an insertion-ordered mapping from an
//! upper-cased parameter name to the list of its values. Unknown IANA and
//! `X-` parameters are stored exactly like the well-known ones.

use std::slice;

/// A single named parameter with one or more values (e.g., `TZID=America/New_York`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name, upper-cased (e.g., "TZID", "VALUE", "CN")
    pub name: String,
    /// Parameter values in source order, quotes stripped
    pub values: Vec<String>,
}

impl Parameter {
    /// Create a parameter, canonicalizing the name to upper case.
    #[must_use]
    pub fn new<N, I, V>(name: N, values: I) -> Self
    where
        N: AsRef<str>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.as_ref().to_ascii_uppercase(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// First value of the parameter, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Insertion-ordered parameter mapping.
///
/// A parameter name appears at most once regardless of the casing it was
/// written with; adding values under an existing name appends to that entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    /// Create an empty parameter mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of distinct parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a parameter by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// All values of a parameter, or an empty slice when absent.
    #[must_use]
    pub fn values(&self, name: &str) -> &[String] {
        self.get(name).map_or(&[], |p| p.values.as_slice())
    }

    /// First value of a parameter.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Parameter::first)
    }

    /// Whether a parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append values to a parameter, creating it at the end if absent.
    pub fn push<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        match self.0.iter_mut().find(|p| p.name.eq_ignore_ascii_case(name)) {
            Some(existing) => existing.values.extend(values.into_iter().map(Into::into)),
            None => self.0.push(Parameter::new(name, values)),
        }
    }

    /// Replace a parameter's values, keeping its position if it already exists.
    pub fn set<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        match self.0.iter_mut().find(|p| p.name.eq_ignore_ascii_case(name)) {
            Some(existing) => existing.values = values,
            None => self.0.push(Parameter::new(name, values)),
        }
    }

    /// Remove a parameter, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let index = self
            .0
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))?;
        Some(self.0.remove(index))
    }

    /// Iterate parameters in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Parameter> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Parameters {
    type Item = Parameter;
    type IntoIter = std::vec::IntoIter<Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<T: IntoIterator<Item = Parameter>>(iter: T) -> Self {
        let mut params = Parameters::new();
        for param in iter {
            params.push(&param.name, param.values);
        }
        params
    }
}
