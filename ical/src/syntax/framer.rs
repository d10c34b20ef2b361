// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line unfolding as defined in RFC 5545 Section 3.1.
//!
//! ```txt
//! Lines of text SHOULD NOT be longer than 75 octets, excluding the line
//! break. Long content lines SHOULD be split into a multiple line
//! representations using a line "folding" technique. That is, a long
//! line can be split between any two characters by inserting a CRLF
//! immediately followed by a single linear white-space character (i.e.,
//! SPACE or HTAB).
//! ```
//!
//! The reader is lenient: bare LF is accepted as a line terminator and blank
//! lines are skipped.

use std::fmt::{self, Display};
use std::io::{self, BufRead};

/// One unfolded logical line, without line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    text: String,
    line: usize,
}

impl ContentLine {
    /// Create a content line starting at the given 1-based physical line.
    #[must_use]
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }

    /// The unfolded text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 1-based physical line number where this logical line started.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line
    }

    /// Consumes the content line, returning the unfolded text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.text
    }
}

impl Display for ContentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for ContentLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Reads logical lines from a buffered source, joining folded continuations.
///
/// Continuations are joined as raw octets before decoding, so a multi-byte
/// character folded between two of its octets survives. Invalid UTF-8 is
/// replaced with U+FFFD.
///
/// # Example
///
/// ```
/// use icalcodec::syntax::LineReader;
///
/// let src = "DESCRIPTION:This is a lo\r\n ng description\r\nSUMMARY:x\r\n";
/// let lines: Vec<_> = LineReader::new(src.as_bytes())
///     .map(|line| line.unwrap().into_inner())
///     .collect();
/// assert_eq!(lines, ["DESCRIPTION:This is a long description", "SUMMARY:x"]);
/// ```
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    /// Physical line consumed so far
    line: usize,
    /// Octets of the logical line being accumulated, with its first line
    pending: Option<(Vec<u8>, usize)>,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Create a reader over any buffered source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            pending: None,
            buffer: Vec::new(),
            done: false,
        }
    }

    /// Read the next logical line.
    ///
    /// Returns `Ok(None)` once the source is exhausted; the last pending line
    /// is returned exactly once before that.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the underlying source fails.
    pub fn read_logical_line(&mut self) -> io::Result<Option<ContentLine>> {
        if self.done {
            return Ok(None);
        }

        loop {
            self.buffer.clear();
            if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
                self.done = true;
                return Ok(self.pending.take().map(decode));
            }
            self.line += 1;

            let physical = strip_terminator(&self.buffer);
            let Some(&first) = physical.first() else {
                continue;
            };

            // SPACE and HTAB are both one octet
            if matches!(first, b' ' | b'\t')
                && let Some((pending, _)) = self.pending.as_mut()
            {
                pending.extend_from_slice(physical.get(1..).unwrap_or_default());
                continue;
            }

            let next = (physical.to_vec(), self.line);
            if let Some(finished) = self.pending.replace(next) {
                return Ok(Some(decode(finished)));
            }
        }
    }

    /// Consumes the reader, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<ContentLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_logical_line().transpose()
    }
}

fn decode((octets, line): (Vec<u8>, usize)) -> ContentLine {
    let text = match String::from_utf8(octets) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(line, "invalid UTF-8 replaced");
            String::from_utf8_lossy(error.as_bytes()).into_owned()
        }
    };
    ContentLine::new(text, line)
}

/// Strip the trailing LF, then a trailing CR if present.
fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
