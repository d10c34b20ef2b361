// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component formatting for iCalendar components.

use std::io::{self, Write};

use crate::component::Component;
use crate::formatter::Formatter;
use crate::formatter::property::write_property;
use crate::keyword::{KW_BEGIN, KW_END};

/// Format a component: its properties in stored order, then its children.
pub fn write_component<W: Write>(f: &mut Formatter<W>, component: &Component) -> io::Result<()> {
    with_block(f, &component.name, |f| {
        for property in &component.properties {
            write_property(f, property)?;
        }
        for child in &component.children {
            write_component(f, child)?;
        }
        Ok(())
    })
}

/// Helper to write a BEGIN/END block.
fn with_block<W: Write, F: FnOnce(&mut Formatter<W>) -> io::Result<()>>(
    f: &mut Formatter<W>,
    name: &str,
    write_content: F,
) -> io::Result<()> {
    f.write_content_line(&format!("{KW_BEGIN}:{name}"))?;
    write_content(f)?;
    f.write_content_line(&format!("{KW_END}:{name}"))
}
