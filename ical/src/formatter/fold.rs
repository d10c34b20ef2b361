// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line folding as defined in RFC 5545 Section 3.1.

/// Split a logical line into the pieces of its physical lines.
///
/// The first piece holds at most `width` octets, every following piece at most
/// `width - 1` octets so that the folding character fits in. A line is broken
/// before the right-most SPACE within the budget, which then becomes part of
/// the next piece; without such a space it is broken at the last UTF-8
/// character boundary within the budget. Each piece is therefore valid UTF-8
/// and joining the pieces yields the original line.
///
/// With `folding` set to `None` the line is returned as a single piece.
///
/// ```
/// use icalcodec::formatter::fold_line;
///
/// let pieces = fold_line("SUMMARY:Team meeting", Some(15));
/// assert_eq!(pieces, ["SUMMARY:Team", " meeting"]);
/// ```
#[must_use]
pub fn fold_line(line: &str, folding: Option<usize>) -> Vec<&str> {
    let Some(width) = folding else {
        return vec![line];
    };

    let mut pieces = Vec::with_capacity(line.len() / width.max(1) + 1);
    let mut rest = line;
    let mut budget = width;
    while rest.len() > budget {
        let (head, tail) = rest.split_at(split_point(rest, budget));
        pieces.push(head);
        rest = tail;
        budget = width.saturating_sub(1);
    }
    if !rest.is_empty() || pieces.is_empty() {
        pieces.push(rest);
    }
    pieces
}

/// Byte index to break `s` at, where `s.len() > budget`.
///
/// Never returns 0, so folding always makes progress.
fn split_point(s: &str, budget: usize) -> usize {
    // a space at index 0 would produce an empty piece
    let window = s.as_bytes().get(1..=budget).unwrap_or_default();
    if let Some(pos) = window.iter().rposition(|&b| b == b' ') {
        return pos + 1;
    }

    let mut cut = budget;
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    if cut == 0 {
        // budget smaller than the first character
        s.chars().next().map_or(s.len(), char::len_utf8)
    } else {
        cut
    }
}
