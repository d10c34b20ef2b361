// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for loading options from configuration files.

#![cfg(feature = "serde")]

use icalcodec::{FoldingStyle, FormatOptions, ParseOptions, ResolverOptions};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default)]
    parse: ParseOptions,
    #[serde(default)]
    format: FormatOptions,
    #[serde(default)]
    timezone: ResolverOptions,
}

#[test]
fn options_from_toml() {
    let config: Config = toml::from_str(
        r#"
[parse]
max_depth = 8
strict_nesting = true

[format]
folding = 60
folding_style = "tab"

[timezone]
horizon_year = 2050
system_fallback = false
"#,
    )
    .unwrap();

    assert_eq!(
        config.parse,
        ParseOptions::default().max_depth(8).strict_nesting(true)
    );
    assert_eq!(
        config.format,
        FormatOptions::default()
            .folding(Some(60))
            .folding_style(FoldingStyle::Tab)
    );
    assert_eq!(
        config.timezone,
        ResolverOptions::default()
            .horizon_year(2050)
            .system_fallback(false)
    );
}

#[test]
fn options_missing_fields_use_defaults() {
    let config: Config = toml::from_str(
        r"
[format]
folding_style = 'space'

[timezone]
system_fallback = false
",
    )
    .unwrap();

    assert_eq!(config.parse, ParseOptions::default());
    assert_eq!(config.format, FormatOptions::default());
    assert_eq!(config.format.folding, Some(75));
    assert_eq!(config.timezone.horizon_year, 2100);
    assert!(!config.timezone.system_fallback);
}

#[test]
fn options_reject_unknown_folding_style() {
    let result = toml::from_str::<Config>(
        r#"
[format]
folding_style = "newline"
"#,
    );
    assert!(result.is_err());
}
