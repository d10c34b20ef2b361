// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing options.

/// Default limit for nested BEGIN blocks.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling how content lines are assembled into a component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Maximum number of simultaneously open components.
    ///
    /// Default: `64`.
    pub max_depth: usize,

    /// Treat an END whose name differs from the open component as fatal.
    ///
    /// Default: `false`, the mismatch is reported as a warning and the open
    /// component is closed anyway.
    pub strict_nesting: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_nesting: false,
        }
    }
}

impl ParseOptions {
    /// Set the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set strict BEGIN/END name matching.
    #[must_use]
    pub const fn strict_nesting(mut self, strict: bool) -> Self {
        self.strict_nesting = strict;
        self
    }
}
