// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing component hierarchy from content lines.
//!
//! This module provides a stack-based tree builder that converts flat content lines
//! into a hierarchical component tree structure.
//!
//! # Architecture
//!
//! ```text
//! Content Lines → Scanner → Tree Builder → Component Tree
//! ```
//!
//! # Algorithm
//!
//! The tree builder uses a stack-based algorithm:
//! 1. On BEGIN:X, push a new component onto the stack
//! 2. On property, add to the current component (top of stack)
//! 3. On END:X, pop from stack and add to parent component
//!
//! Problems that leave the tree usable (a malformed line, a stray END, ...)
//! are collected as [`TreeBuildWarning`]s; only the ones that would produce a
//! wrong tree abort with a [`TreeBuildError`].

use crate::component::Component;
use crate::keyword::{KW_BEGIN, KW_END};
use crate::options::ParseOptions;
use crate::property::Property;
use crate::syntax::framer::ContentLine;
use crate::syntax::scanner::{ContentLineError, scan_content_line};

/// Build a component tree from content lines.
///
/// # Errors
///
/// Returns a [`TreeBuildError`] on the first fatal structural problem.
///
/// # Example
///
/// ```
/// use icalcodec::ParseOptions;
/// use icalcodec::syntax::{ContentLine, build_tree};
///
/// let lines = ["BEGIN:VCALENDAR", "VERSION:2.0", "END:VCALENDAR"]
///     .into_iter()
///     .enumerate()
///     .map(|(i, text)| ContentLine::new(text, i + 1));
/// let result = build_tree(lines, ParseOptions::default()).unwrap();
///
/// assert_eq!(result.roots.len(), 1);
/// assert_eq!(result.roots[0].name, "VCALENDAR");
/// ```
pub fn build_tree(
    lines: impl IntoIterator<Item = ContentLine>,
    options: ParseOptions,
) -> Result<TreeBuilderResult, TreeBuildError> {
    let mut builder = TreeBuilder::new(options);
    for line in lines {
        builder.feed(&line)?;
    }
    builder.finish()
}

/// Incremental stack-based tree builder.
#[derive(Debug)]
pub struct TreeBuilder {
    options: ParseOptions,
    /// Open components with the line their BEGIN was on
    stack: Vec<(Component, usize)>,
    roots: Vec<Component>,
    warnings: Vec<TreeBuildWarning>,
}

impl TreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            roots: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Feed one logical line.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeBuildError`] if the nesting limit is exceeded, or on a
    /// mismatched END in strict mode.
    pub fn feed(&mut self, line: &ContentLine) -> Result<(), TreeBuildError> {
        match scan_content_line(line) {
            Ok(property) => self.feed_property(property, line.line_number()),
            Err(error) => {
                tracing::warn!(line = line.line_number(), %error, "skipping malformed content line");
                self.warnings.push(TreeBuildWarning::MalformedLine {
                    line: line.line_number(),
                    error,
                    raw: line.as_str().to_owned(),
                });
                Ok(())
            }
        }
    }

    /// Feed an already scanned property found on the given line.
    ///
    /// # Errors
    ///
    /// Same as [`TreeBuilder::feed`].
    pub fn feed_property(&mut self, property: Property, line: usize) -> Result<(), TreeBuildError> {
        if property.is(KW_BEGIN) {
            self.check_no_parameters(&property, line);
            if self.stack.len() >= self.options.max_depth {
                return Err(TreeBuildError::NestingTooDeep {
                    max_depth: self.options.max_depth,
                    line,
                });
            }
            self.stack.push((Component::new(&property.value), line));
        } else if property.is(KW_END) {
            self.check_no_parameters(&property, line);
            self.close(&property.value, line)?;
        } else if let Some((current, _)) = self.stack.last_mut() {
            current.push_property(property);
        } else {
            tracing::warn!(line, name = %property.name, "dropping property outside of any component");
            self.warnings.push(TreeBuildWarning::OrphanProperty {
                name: property.name,
                line,
            });
        }
        Ok(())
    }

    /// Finish building, returning the root components in stream order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeBuildError::UnterminatedComponent`] if a component is still
    /// open, naming the innermost one.
    pub fn finish(mut self) -> Result<TreeBuilderResult, TreeBuildError> {
        if let Some((component, line)) = self.stack.pop() {
            return Err(TreeBuildError::UnterminatedComponent {
                name: component.name,
                line,
            });
        }

        Ok(TreeBuilderResult {
            roots: self.roots,
            warnings: self.warnings,
        })
    }

    fn close(&mut self, name: &str, line: usize) -> Result<(), TreeBuildError> {
        let Some((component, _)) = self.stack.pop() else {
            tracing::warn!(line, name, "ignoring END without matching BEGIN");
            self.warnings.push(TreeBuildWarning::UnmatchedEnd {
                name: name.to_ascii_uppercase(),
                line,
            });
            return Ok(());
        };

        if !component.is(name) {
            let expected = component.name.clone();
            let found = name.to_ascii_uppercase();
            if self.options.strict_nesting {
                return Err(TreeBuildError::MismatchedEnd {
                    expected,
                    found,
                    line,
                });
            }
            tracing::warn!(line, %expected, %found, "mismatched END, closing open component");
            self.warnings.push(TreeBuildWarning::MismatchedEnd {
                expected,
                found,
                line,
            });
        }

        match self.stack.last_mut() {
            Some((parent, _)) => parent.push_child(component),
            None => self.roots.push(component),
        }
        Ok(())
    }

    fn check_no_parameters(&mut self, property: &Property, line: usize) {
        if !property.parameters.is_empty() {
            tracing::warn!(line, name = %property.name, "ignoring parameters on BEGIN/END");
            self.warnings.push(TreeBuildWarning::BeginEndWithParameters {
                name: property.name.clone(),
                line,
            });
        }
    }
}

/// Fatal errors that can occur during tree building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeBuildError {
    /// Component still open at end of input
    #[error("unterminated BEGIN:{name} at line {line}")]
    UnterminatedComponent {
        /// Name of the innermost open component
        name: String,
        /// Line of its BEGIN
        line: usize,
    },

    /// Too many nested components
    #[error("nesting deeper than {max_depth} components at line {line}")]
    NestingTooDeep {
        /// The configured limit
        max_depth: usize,
        /// Line of the offending BEGIN
        line: usize,
    },

    /// Mismatched BEGIN/END names, in strict mode
    #[error("mismatched nesting at line {line}: expected END:{expected}, found END:{found}")]
    MismatchedEnd {
        /// Name of the open component
        expected: String,
        /// Name on the END line
        found: String,
        /// Line of the END
        line: usize,
    },
}

/// Recoverable problems found during tree building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeBuildWarning {
    /// Line that does not follow the content line grammar, skipped
    #[error("malformed content line at line {line}: {error}")]
    MalformedLine {
        /// Line where the logical line started
        line: usize,
        /// What is wrong with it
        error: ContentLineError,
        /// The unfolded line, verbatim
        raw: String,
    },

    /// Mismatched BEGIN/END names, the open component was closed anyway
    #[error("mismatched nesting at line {line}: expected END:{expected}, found END:{found}")]
    MismatchedEnd {
        /// Name of the open component
        expected: String,
        /// Name on the END line
        found: String,
        /// Line of the END
        line: usize,
    },

    /// END without an open component, ignored
    #[error("unmatched END:{name} at line {line} (no corresponding BEGIN)")]
    UnmatchedEnd {
        /// Name on the END line
        name: String,
        /// Line of the END
        line: usize,
    },

    /// Property outside of any component, dropped
    #[error("property {name} at line {line} outside of any component")]
    OrphanProperty {
        /// Property name
        name: String,
        /// Line of the property
        line: usize,
    },

    /// BEGIN or END line with parameters (not allowed per RFC 5545)
    #[error("{name} line with parameters at line {line} (not allowed per RFC 5545)")]
    BeginEndWithParameters {
        /// Either `BEGIN` or `END`
        name: String,
        /// Line of the BEGIN or END
        line: usize,
    },
}

/// Result of building a tree.
#[derive(Debug, Clone)]
pub struct TreeBuilderResult {
    /// The root components (typically one VCALENDAR)
    pub roots: Vec<Component>,
    /// Recoverable problems encountered during tree building
    pub warnings: Vec<TreeBuildWarning>,
}
