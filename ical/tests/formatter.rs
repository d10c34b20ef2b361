// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for serializing component trees, line folding included.

use icalcodec::formatter::fold_line;
use icalcodec::{
    Component, FoldingStyle, FormatOptions, LineReader, Property, format, format_all,
};

fn calendar_with_description(description: &str) -> Component {
    Component::new("VCALENDAR")
        .with_property(Property::new("VERSION", "2.0"))
        .with_property(Property::new("PRODID", "-//Example Corp.//icalcodec//EN"))
        .with_property(Property::new("DESCRIPTION", description))
}

/// Serialize with default options and normalize CRLF to LF for comparison.
fn serialize(description: &str) -> String {
    let out = format(&calendar_with_description(description)).unwrap();
    assert!(!out.replace("\r\n", "").contains('\n'), "bare LF in output");
    out.replace("\r\n", "\n")
}

#[test]
fn folds_at_nearest_space() {
    let text = serialize("some really long line with spaces to fold on and the line should fold");
    assert_eq!(
        text,
        "\
BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Example Corp.//icalcodec//EN
DESCRIPTION:some really long line with spaces to fold on and the line
  should fold
END:VCALENDAR
"
    );
}

#[test]
fn folds_at_octet_limit_without_space() {
    let text =
        serialize("somereallylonglinewithnospacestofoldonandthelineshouldfoldtothenextline");
    assert_eq!(
        text,
        "\
BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Example Corp.//icalcodec//EN
DESCRIPTION:somereallylonglinewithnospacestofoldonandthelineshouldfoldtothe
 nextline
END:VCALENDAR
"
    );
}

#[test]
fn folds_at_space_then_at_octet_limit() {
    let text = serialize(
        "some really long line with spaces \
         howeverthelastpartofthelineisactuallytoolongtofitonsowehavetofoldpartwaythrough",
    );
    assert_eq!(
        text,
        "\
BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Example Corp.//icalcodec//EN
DESCRIPTION:some really long line with spaces
  howeverthelastpartofthelineisactuallytoolongtofitonsowehavetofoldpartwayt
 hrough
END:VCALENDAR
"
    );
}

#[test]
fn line_of_exactly_75_octets_is_not_folded() {
    let text = serialize(" this line is exactly 75 characters long with the property name");
    assert!(text.contains(
        "\nDESCRIPTION: this line is exactly 75 characters long with the property name\n"
    ));
}

#[test]
fn never_splits_a_multibyte_character() {
    // the 75 octet mark falls inside a three-octet character
    let text = serialize("éé界世界世界世界世界世界世界世界世界世界世界世界世界");
    assert!(text.contains("\nDESCRIPTION:éé界世界世界世界世界世界世界世界世界世界\n 世界世界世界\n"));
}

#[test]
fn fold_then_unfold_is_identity() {
    let samples = [
        "ASCII ".repeat(40),
        "é".repeat(100),
        "日本語のテキスト".repeat(12),
        "🎉 party ".repeat(20),
        "x".repeat(300),
    ];
    for width in [8, 20, 75] {
        for sample in &samples {
            let line = format!("DESCRIPTION:{sample}");
            let pieces = fold_line(&line, Some(width));
            assert_eq!(pieces.concat(), line);

            let first = pieces.first().unwrap();
            assert!(first.len() <= width.max(first.chars().next().unwrap().len_utf8()));
            for piece in pieces.iter().skip(1) {
                assert!(!piece.is_empty());
                assert!(piece.len() <= (width - 1).max(4));
            }

            let physical = pieces.join("\r\n ") + "\r\n";
            let unfolded: Vec<_> = LineReader::new(physical.as_bytes())
                .map(|line| line.unwrap().into_inner())
                .collect();
            assert_eq!(unfolded, [line.clone()], "width {width}");
        }
    }
}

#[test]
fn tab_folding_style() {
    let options = FormatOptions::default()
        .folding(Some(20))
        .folding_style(FoldingStyle::Tab);
    let component = Component::new("VEVENT").with_property(Property::new(
        "SUMMARY",
        "abcdefghijklmnopqrstuvwxyz",
    ));
    let out = options.write_to_string(&component).unwrap();
    assert_eq!(
        out,
        "BEGIN:VEVENT\r\nSUMMARY:abcdefghijkl\r\n\tmnopqrstuvwxyz\r\nEND:VEVENT\r\n"
    );
}

#[test]
fn folding_can_be_disabled() {
    let description = "word ".repeat(40);
    let out = FormatOptions::default()
        .folding(None)
        .write_to_string(&calendar_with_description(description.trim_end()))
        .unwrap();
    assert_eq!(out.lines().count(), 5);
}

#[test]
fn writes_children_depth_first_in_order() {
    let calendar = Component::new("VCALENDAR")
        .with_property(Property::new("VERSION", "2.0"))
        .with_child(
            Component::new("VEVENT")
                .with_property(Property::new("UID", "1"))
                .with_child(Component::new("VALARM").with_property(Property::new("ACTION", "DISPLAY"))),
        )
        .with_child(Component::new("VTODO").with_property(Property::new("UID", "2")));

    assert_eq!(
        calendar.to_string(),
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         BEGIN:VEVENT\r\n\
         UID:1\r\n\
         BEGIN:VALARM\r\n\
         ACTION:DISPLAY\r\n\
         END:VALARM\r\n\
         END:VEVENT\r\n\
         BEGIN:VTODO\r\n\
         UID:2\r\n\
         END:VTODO\r\n\
         END:VCALENDAR\r\n"
    );
}

#[test]
fn escapes_text_and_quotes_parameters() {
    let event = Component::new("VEVENT")
        .with_property(Property::new("SUMMARY", "a, b; c\\d\nnext"))
        .with_property(
            Property::new("ATTENDEE", "mailto:a@example.com")
                .with_parameter("CN", ["Doe, Jane"])
                .with_parameter("DELEGATED-FROM", ["mailto:b@example.com", "mailto:c@example.com"]),
        )
        .with_property(Property::new("RRULE", "FREQ=WEEKLY;BYDAY=MO,WE"));

    let out = FormatOptions::default()
        .folding(None)
        .write_to_string(&event)
        .unwrap();
    assert!(out.contains("SUMMARY:a\\, b\\; c\\\\d\\nnext\r\n"));
    assert!(out.contains(
        "ATTENDEE;CN=\"Doe, Jane\";DELEGATED-FROM=\"mailto:b@example.com\",\"mailto:c@example.com\":mailto:a@example.com\r\n"
    ));
    assert!(out.contains("RRULE:FREQ=WEEKLY;BYDAY=MO,WE\r\n"));
}

#[test]
fn formats_multiple_roots() {
    let roots = [Component::new("VCALENDAR"), Component::new("VCALENDAR")];
    assert_eq!(
        format_all(&roots).unwrap(),
        "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
    );
}
