//! Immutable text snapshots and offset arithmetic.
//!
//! Every range the engine produces is a byte [`Span`] into a [`Document`]. Conversion to
//! editor coordinates (0-based line, UTF-16 column) happens only here.

mod continuation;

#[cfg(test)]
mod text_test;

pub use continuation::{DEFAULT_ESCAPE, continuation_len, is_continuation, newline_len};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Editor position: 0-based line and UTF-16 code unit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}-{}", self.start, self.end.character + 1)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Half-open byte range into the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive of the end offset, so a cursor sitting right after a token still hits it.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn cover(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// A buffer snapshot with precomputed line starts.
///
/// `\r\n`, `\n` and a lone `\r` all terminate a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    line_starts: Vec<usize>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 2;
                    line_starts.push(i);
                }
                b'\r' | b'\n' => {
                    i += 1;
                    line_starts.push(i);
                }
                _ => i += 1,
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// End of the line's content, excluding its terminator.
    pub fn line_end(&self, line: usize) -> usize {
        let next = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        let start = self.line_start(line);
        let content = &self.text.as_bytes()[start..next];
        let mut end = next;
        if content.ends_with(b"\r\n") {
            end -= 2;
        } else if content.ends_with(b"\n") || content.ends_with(b"\r") {
            end -= 1;
        }
        end
    }

    pub fn line_text(&self, line: usize) -> &str {
        &self.text[self.line_start(line)..self.line_end(line)]
    }

    pub fn line_span(&self, line: usize) -> Span {
        Span::new(self.line_start(line), self.line_end(line))
    }

    /// Line containing `offset`; offsets past the end map to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }

    pub fn position_at(&self, offset: usize) -> Position {
        let offset = self.floor_char_boundary(offset.min(self.text.len()));
        let line = self.line_of(offset);
        let start = self.line_start(line);
        let upto = offset.min(self.line_end(line)).max(start);
        let character: usize = self.text[start..upto].chars().map(char::len_utf16).sum();
        Position::new(line as u32, character as u32)
    }

    /// Byte offset of an editor position, clamped to the line content and the buffer.
    pub fn offset_at(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_starts.len() {
            return self.text.len();
        }
        let start = self.line_start(line);
        let end = self.line_end(line);
        let mut units = 0usize;
        for (idx, ch) in self.text[start..end].char_indices() {
            if units >= position.character as usize {
                return start + idx;
            }
            units += ch.len_utf16();
        }
        end
    }

    pub fn range(&self, span: Span) -> Range {
        Range::new(self.position_at(span.start), self.position_at(span.end))
    }

    /// Converts an editor range back into a byte span, normalising reversed ranges.
    pub fn span_of(&self, range: Range) -> Span {
        let a = self.offset_at(range.start);
        let b = self.offset_at(range.end);
        Span::new(a.min(b), a.max(b))
    }

    /// Widens an empty span by one character so editors can render it.
    ///
    /// Extends forward over the next character unless that is a line terminator or the end
    /// of the buffer, in which case it extends backwards.
    pub fn widen(&self, span: Span) -> Span {
        let start = self.floor_char_boundary(span.start.min(self.text.len()));
        let end = self.floor_char_boundary(span.end.min(self.text.len())).max(start);
        if start != end {
            return Span::new(start, end);
        }
        match self.text[start..].chars().next() {
            Some(ch) if ch != '\n' && ch != '\r' => Span::new(start, start + ch.len_utf8()),
            _ => match self.text[..start].chars().next_back() {
                Some(ch) if ch != '\n' && ch != '\r' => Span::new(start - ch.len_utf8(), start),
                _ => Span::empty(start),
            },
        }
    }

    pub fn slice(&self, span: Span) -> &str {
        let start = self.floor_char_boundary(span.start.min(self.text.len()));
        let end = self.floor_char_boundary(span.end.min(self.text.len())).max(start);
        &self.text[start..end]
    }

    fn floor_char_boundary(&self, mut offset: usize) -> usize {
        while offset > 0 && !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}
