use crate::text::Span;

use super::args::{Argument, Flag, Property, split_arguments};
use super::{Keyword, LogicalText};

/// A `#` line. `text` excludes the marker and surrounding blanks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub span: Span,
    pub content_span: Span,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Keyword as written.
    pub keyword: String,
    pub kind: Keyword,
    pub keyword_span: Span,
    /// From the keyword to the last non-blank character of the arguments.
    pub span: Span,
    pub region: LogicalText,
    pub arguments: Vec<Argument>,
    pub empty_continuation_lines: Vec<Span>,
    pub escape: char,
}

impl Instruction {
    pub(crate) fn new(
        keyword: LogicalText,
        mut region: LogicalText,
        empty_continuation_lines: Vec<Span>,
        escape: char,
    ) -> Self {
        let keyword_span = keyword.full_span();
        if region.is_empty() && region.raw_offset(0) < keyword_span.end {
            region.set_end(keyword_span.end);
        }
        let arguments = split_arguments(&region, escape);
        let (_, content_end) = region.trimmed_bounds();
        let end = if content_end > 0 {
            region.span(0, content_end).end
        } else {
            keyword_span.end
        };
        Self {
            kind: Keyword::parse(keyword.as_str()),
            keyword: keyword.as_str().to_string(),
            keyword_span,
            span: Span::new(keyword_span.start, end.max(keyword_span.end)),
            region,
            arguments,
            empty_continuation_lines,
            escape,
        }
    }

    /// Leading `--` arguments, for flag-bearing kinds only.
    pub fn flags(&self) -> Vec<Flag> {
        if !self.kind.is_flag_bearing() {
            return Vec::new();
        }
        self.arguments
            .iter()
            .enumerate()
            .map_while(|(i, arg)| Flag::from_argument(arg, i))
            .collect()
    }

    /// Arguments after any leading flags.
    pub fn positional(&self) -> &[Argument] {
        let skip = if self.kind.is_flag_bearing() {
            self.arguments
                .iter()
                .take_while(|arg| arg.text().starts_with("--"))
                .count()
        } else {
            0
        };
        &self.arguments[skip..]
    }

    /// Region text after any leading flags, trimmed.
    pub fn positional_region(&self) -> LogicalText {
        let start = match self.positional().first() {
            Some(arg) => arg.start,
            None => self.region.len(),
        };
        self.region.slice(start, self.region.len()).trim()
    }

    /// `name=value` pairs of `ENV`, `LABEL` and `ARG`.
    ///
    /// `ENV key value` and `LABEL key value` yield a single legacy pair whose value is the
    /// rest of the line.
    pub fn properties(&self) -> Vec<Property> {
        let Some(first) = self.arguments.first() else {
            return Vec::new();
        };
        let legacy = matches!(self.kind, Keyword::Env | Keyword::Label)
            && self.arguments.len() > 1
            && !first.text().contains('=');
        if legacy {
            let value_start = self.arguments[1].start;
            let value = self.region.slice(value_start, self.region.len()).trim();
            return vec![Property {
                name: first.text().to_string(),
                name_span: first.span(),
                value: Some(value.as_str().to_string()),
                value_span: Some(value.full_span()),
                span: first.span().cover(value.full_span()),
                legacy: true,
            }];
        }
        self.arguments.iter().map(Property::from_argument).collect()
    }

    /// The instruction an `ONBUILD` wraps.
    pub fn onbuild_trigger(&self) -> Option<Instruction> {
        if self.kind != Keyword::Onbuild {
            return None;
        }
        let (start, end) = self.region.trimmed_bounds();
        if start >= end {
            return None;
        }
        let text = self.region.as_str();
        let keyword_end = text[start..end]
            .find([' ', '\t'])
            .map_or(end, |i| start + i);
        Some(Instruction::new(
            self.region.slice(start, keyword_end),
            self.region.slice(keyword_end, self.region.len()),
            Vec::new(),
            self.escape,
        ))
    }

    pub fn has_keyword_at(&self, offset: usize) -> bool {
        self.keyword_span.contains(offset)
    }
}
