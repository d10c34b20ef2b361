// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property formatting for iCalendar properties.
//!
//! ```txt
//! contentline = name *(";" param ) ":" value CRLF
//! param       = param-name "=" param-value *("," param-value)
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::parameter::Parameter;
use crate::property::Property;
use crate::text::ValueEncoding;

/// Format a single property as a folded content line.
pub fn write_property<W: Write>(f: &mut Formatter<W>, property: &Property) -> io::Result<()> {
    f.write_content_line(&content_line(property))
}

/// Build the unfolded content line of a property, without line terminator.
pub(crate) fn content_line(property: &Property) -> String {
    let mut line = String::with_capacity(property.name.len() + property.value.len() + 16);
    line.push_str(&property.name);
    for param in &property.parameters {
        write_parameter(&mut line, param);
    }
    line.push(':');
    let encoding = ValueEncoding::of(&property.name, &property.parameters);
    line.push_str(&encoding.encode(&property.value));
    line
}

/// Append a parameter with its semicolon prefix: `;NAME=v1,v2`.
fn write_parameter(line: &mut String, param: &Parameter) {
    let _ = write!(line, ";{}=", param.name);
    for (i, value) in param.values.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push_str(&quote_if_needed(value));
    }
}

/// Quote a parameter value if it is empty or contains `:`, `;` or `,`.
///
/// DQUOTE, CR and LF are not allowed inside a parameter value and are dropped.
fn quote_if_needed(value: &str) -> String {
    let value: String = value
        .chars()
        .filter(|c| !matches!(c, '"' | '\r' | '\n'))
        .collect();

    if value.is_empty() || value.contains([':', ';', ',']) {
        format!("\"{value}\"")
    } else {
        value
    }
}
