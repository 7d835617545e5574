//! Instruction tokenizer.
//!
//! Walks the raw buffer once, resolving continuations as it goes. Empty continuation lines
//! and comment lines inside an instruction are recorded but do not end it.

use tracing::trace;

use crate::text::{Span, continuation_len, newline_len};

use super::{Comment, Instruction, LogicalText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    LineStart,
    InKeyword,
    InArgumentRegion,
    InComment,
    Eof,
}

pub(crate) struct Lexer<'a> {
    text: &'a str,
    escape: char,
    pos: usize,
    state: State,
    pub(crate) instructions: Vec<Instruction>,
    pub(crate) comments: Vec<Comment>,
}

struct Pending {
    keyword: LogicalText,
    region: LogicalText,
    empty_lines: Vec<Span>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(text: &'a str, escape: char, start: usize) -> Self {
        Self {
            text,
            escape,
            pos: start.min(text.len()),
            state: State::LineStart,
            instructions: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> Self {
        let mut pending: Option<Pending> = None;
        loop {
            self.state = match self.state {
                State::LineStart => self.line_start(),
                State::InComment => {
                    self.comment_line();
                    State::LineStart
                }
                State::InKeyword => {
                    let mut p = Pending {
                        keyword: LogicalText::new(self.pos),
                        region: LogicalText::new(self.pos),
                        empty_lines: Vec::new(),
                    };
                    let next = self.keyword(&mut p);
                    pending = Some(p);
                    next
                }
                State::InArgumentRegion => {
                    if let Some(mut p) = pending.take() {
                        self.region(&mut p);
                        self.finish(p);
                    }
                    State::LineStart
                }
                State::Eof => {
                    if let Some(p) = pending.take() {
                        self.finish(p);
                    }
                    break;
                }
            };
        }
        trace!(
            instructions = self.instructions.len(),
            comments = self.comments.len(),
            "tokenized"
        );
        self
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn line_start(&mut self) -> State {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' => self.pos += 1,
                '\r' | '\n' => self.pos += newline_len(self.text, self.pos).unwrap_or(1),
                '#' => return State::InComment,
                _ => return State::InKeyword,
            }
        }
        State::Eof
    }

    /// Consumes a `#` line up to (and including) its terminator.
    fn comment_line(&mut self) {
        let start = self.pos;
        let end = self.text[start..]
            .find(['\r', '\n'])
            .map_or(self.text.len(), |i| start + i);
        let body = &self.text[start + 1..end];
        let lead = body.len() - body.trim_start_matches([' ', '\t']).len();
        let content = body.trim_matches([' ', '\t']);
        let content_start = start + 1 + lead;
        self.comments.push(Comment {
            span: Span::new(start, end),
            content_span: Span::new(content_start, content_start + content.len()),
            text: content.to_string(),
        });
        self.pos = end + newline_len(self.text, end).unwrap_or(0);
    }

    /// Skips what follows a continuation: whitespace-only lines and comment lines.
    fn after_continuation(&mut self, pending: &mut Pending) {
        loop {
            let line_start = self.pos;
            let rest = &self.text[line_start..];
            let blank = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            let first = line_start + blank;
            match self.text[first..].chars().next() {
                Some('\r') | Some('\n') => {
                    pending.empty_lines.push(Span::new(line_start, first));
                    self.pos = first + newline_len(self.text, first).unwrap_or(1);
                }
                Some('#') => {
                    self.pos = first;
                    self.comment_line();
                }
                _ => return,
            }
        }
    }

    fn keyword(&mut self, pending: &mut Pending) -> State {
        while let Some(ch) = self.peek() {
            if let Some(len) = continuation_len(self.text, self.pos, self.escape) {
                self.pos += len;
                self.after_continuation(pending);
                continue;
            }
            match ch {
                ' ' | '\t' => return State::InArgumentRegion,
                '\r' | '\n' => return State::InArgumentRegion,
                _ => {
                    pending.keyword.push_char(ch, self.pos);
                    self.pos += ch.len_utf8();
                }
            }
        }
        State::Eof
    }

    fn region(&mut self, pending: &mut Pending) {
        pending.region.set_end(self.pos);
        while let Some(ch) = self.peek() {
            if let Some(len) = continuation_len(self.text, self.pos, self.escape) {
                self.pos += len;
                self.after_continuation(pending);
                continue;
            }
            if let Some(len) = newline_len(self.text, self.pos) {
                self.pos += len;
                return;
            }
            pending.region.push_char(ch, self.pos);
            self.pos += ch.len_utf8();
        }
    }

    fn finish(&mut self, pending: Pending) {
        if pending.keyword.is_empty() {
            return;
        }
        let instruction = Instruction::new(
            pending.keyword,
            pending.region,
            pending.empty_lines,
            self.escape,
        );
        self.instructions.push(instruction);
    }
}
