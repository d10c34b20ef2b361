// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for unfolding physical lines into logical lines.

use std::io::{BufReader, Read};

use icalcodec::syntax::{ContentLine, LineReader};

fn unfold(src: &[u8]) -> Vec<String> {
    LineReader::new(src)
        .map(|line| line.unwrap().into_inner())
        .collect()
}

#[test]
fn unfolds_continuations_with_bare_lf() {
    let src = "
ATTENDEE;RSVP=TRUE;ROLE=REQ-PARTICIPANT;CUTYPE=GROUP:
 mailto:employee-A@example.com
DESCRIPTION:Project XYZ Review Meeting
CATEGORIES:MEETING
CLASS:PUBLIC
";
    assert_eq!(
        unfold(src.as_bytes()),
        [
            "ATTENDEE;RSVP=TRUE;ROLE=REQ-PARTICIPANT;CUTYPE=GROUP:mailto:employee-A@example.com",
            "DESCRIPTION:Project XYZ Review Meeting",
            "CATEGORIES:MEETING",
            "CLASS:PUBLIC",
        ]
    );
}

#[test]
fn unfolds_crlf_and_mixed_terminators() {
    let src = b"SUMMARY:Board\r\n  meeting\r\nLOCATION:Room\n\t42\r\nUID:1";
    assert_eq!(
        unfold(src),
        ["SUMMARY:Board meeting", "LOCATION:Room42", "UID:1"]
    );
}

#[test]
fn blank_line_inside_a_fold_is_skipped() {
    let src = b"DESCRIPTION:first\r\n\r\n second\r\n\r\nSUMMARY:x\r\n";
    assert_eq!(unfold(src), ["DESCRIPTION:firstsecond", "SUMMARY:x"]);
}

#[test]
fn reports_starting_line_numbers() {
    let src = b"\nBEGIN:VCALENDAR\nDESCRIPTION:a\n b\n c\nEND:VCALENDAR\n";
    let lines: Vec<ContentLine> = LineReader::new(&src[..]).map(Result::unwrap).collect();
    let numbers: Vec<_> = lines.iter().map(ContentLine::line_number).collect();
    assert_eq!(numbers, [2, 3, 6]);
}

#[test]
fn replaces_invalid_utf8_and_keeps_going() {
    let src = b"SUMMARY:caf\xC3\r\nUID:ok\r\n";
    assert_eq!(unfold(src), ["SUMMARY:caf\u{FFFD}", "UID:ok"]);
}

#[test]
fn multibyte_character_split_across_a_fold() {
    // "é" is 0xC3 0xA9; the fold falls between its two octets
    let src = b"SUMMARY:caf\xC3\r\n \xA9 au lait\r\n";
    assert_eq!(unfold(src), ["SUMMARY:café au lait"]);
}

#[test]
fn flushes_last_line_without_terminator() {
    assert_eq!(unfold(b"A:1\r\nB:2\r\n 3"), ["A:1", "B:23"]);
    assert!(unfold(b"").is_empty());
    assert!(unfold(b"\r\n\r\n").is_empty());
}

/// Yields one byte per read call, to exercise buffering at every offset.
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match (self.0.split_first(), buf.first_mut()) {
            (Some((&byte, rest)), Some(slot)) => {
                *slot = byte;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn independent_of_read_boundaries() {
    let src = "DESCRIPTION:日本語の\r\n テキスト\r\nSUMMARY:ok\r\n";
    let reader = BufReader::with_capacity(1, Trickle(src.as_bytes()));
    let lines: Vec<_> = LineReader::new(reader)
        .map(|line| line.unwrap().into_inner())
        .collect();
    assert_eq!(lines, ["DESCRIPTION:日本語のテキスト", "SUMMARY:ok"]);
}
