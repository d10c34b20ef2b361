// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component tree for iCalendar content.
//!
//! Each [`Component`] owns its properties and its child components; there is
//! no back reference from child to parent. Properties and children keep the
//! order they were parsed or inserted in, which is also the order they are
//! serialized in.

use std::fmt::{self, Display};

use crate::formatter::FormatOptions;
use crate::keyword::KW_VTIMEZONE;
use crate::property::Property;

/// A BEGIN/END delimited block (e.g., VCALENDAR, VEVENT, VTIMEZONE, STANDARD)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Component name, upper-cased
    pub name: String,
    /// Properties in original order, duplicates allowed
    pub properties: Vec<Property>,
    /// Nested child components in original order
    pub children: Vec<Component>,
}

impl Component {
    /// Create an empty component.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_ascii_uppercase(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style: append a property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Builder-style: append a child component.
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Append a property.
    pub fn push_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Append a child component.
    pub fn push_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Whether the component has the given name (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.is(name))
    }

    /// All properties with the given name, in order.
    pub fn properties_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> {
        self.properties.iter().filter(move |p| p.is(name))
    }

    /// Value of the first property with the given name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.property(name).map(|p| p.value.as_str())
    }

    /// Direct children with the given name, in order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Component> {
        self.children.iter().filter(move |c| c.is(name))
    }

    /// This component and all of its descendants, depth-first preorder.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// All VTIMEZONE components anywhere in this tree.
    pub fn timezones(&self) -> impl Iterator<Item = &Component> {
        self.descendants().filter(|c| c.is(KW_VTIMEZONE))
    }
}

impl Display for Component {
    /// Serializes with the default [`FormatOptions`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = FormatOptions::default()
            .write_to_string(self)
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Preorder iterator over a component tree, see [`Component::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
