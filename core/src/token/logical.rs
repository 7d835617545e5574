use crate::text::Span;

/// Continuation-resolved text with a byte-for-byte map back to raw buffer offsets.
///
/// Continuations, empty continuation lines and interior comment lines are removed; every
/// remaining byte remembers where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogicalText {
    text: String,
    offsets: Vec<usize>,
    end: usize,
}

impl LogicalText {
    pub fn new(end: usize) -> Self {
        Self {
            text: String::new(),
            offsets: Vec::new(),
            end,
        }
    }

    pub fn push_char(&mut self, ch: char, raw: usize) {
        let len = ch.len_utf8();
        self.text.push(ch);
        self.offsets.extend((0..len).map(|i| raw + i));
        self.end = raw + len;
    }

    /// Moves the raw end forward without adding content, e.g. past trailing continuations.
    pub fn set_end(&mut self, end: usize) {
        self.end = end;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Raw offset of the logical byte `index`; one past the end maps to the raw end.
    pub fn raw_offset(&self, index: usize) -> usize {
        self.offsets.get(index).copied().unwrap_or(self.end)
    }

    /// Raw span covering logical bytes `start..end`.
    pub fn span(&self, start: usize, end: usize) -> Span {
        let start_raw = self.raw_offset(start);
        if end <= start {
            return Span::empty(start_raw);
        }
        let end_raw = self
            .offsets
            .get(end - 1)
            .map(|raw| raw + 1)
            .unwrap_or(self.end);
        Span::new(start_raw, end_raw.max(start_raw))
    }

    pub fn full_span(&self) -> Span {
        self.span(0, self.text.len())
    }

    /// Sub-text over logical bytes `start..end`, keeping raw offsets.
    pub fn slice(&self, start: usize, end: usize) -> LogicalText {
        let end = end.min(self.text.len());
        let start = start.min(end);
        let raw_end = if end > start {
            self.offsets[end - 1] + 1
        } else {
            self.raw_offset(start)
        };
        LogicalText {
            text: self.text[start..end].to_string(),
            offsets: self.offsets[start..end].to_vec(),
            end: raw_end,
        }
    }

    /// Logical bounds with surrounding spaces and tabs removed.
    pub fn trimmed_bounds(&self) -> (usize, usize) {
        let is_blank = |c: char| c == ' ' || c == '\t';
        let start = self.text.len() - self.text.trim_start_matches(is_blank).len();
        let end = self.text.trim_end_matches(is_blank).len();
        (start, end.max(start))
    }

    pub fn trim(&self) -> LogicalText {
        let (start, end) = self.trimmed_bounds();
        self.slice(start, end)
    }
}
