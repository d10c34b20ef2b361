// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax layer of iCalendar as defined in RFC 5545, no typed values.
//!
//! ```text
//! Source → LineReader → ContentLine → scan_content_line → Property → TreeBuilder → Component
//! ```

mod framer;
pub mod lexer;
mod scanner;
mod tree_builder;

pub use crate::syntax::framer::{ContentLine, LineReader};
pub use crate::syntax::scanner::{ContentLineError, ParameterErrorKind, scan_content_line};
pub use crate::syntax::tree_builder::{
    TreeBuildError, TreeBuildWarning, TreeBuilder, TreeBuilderResult, build_tree,
};
