use crate::text::Span;

use super::LogicalText;

/// Where an unterminated quote opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenQuote {
    pub quote: char,
    /// Raw offset of the opening quote.
    pub offset: usize,
}

/// One whitespace-delimited token of an argument region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    logical: LogicalText,
    /// Logical byte bounds inside the owning instruction's region.
    pub start: usize,
    pub end: usize,
    pub open_quote: Option<OpenQuote>,
}

impl Argument {
    /// Token text as written, quotes kept, continuations removed.
    pub fn text(&self) -> &str {
        self.logical.as_str()
    }

    pub fn span(&self) -> Span {
        self.logical.full_span()
    }

    /// Raw span of the token bytes `start..end`.
    pub fn span_of(&self, start: usize, end: usize) -> Span {
        self.logical.span(start, end)
    }

    pub fn raw_offset(&self, index: usize) -> usize {
        self.logical.raw_offset(index)
    }

    /// Logical index matching a raw offset, clamped to the token.
    pub fn index_at(&self, offset: usize) -> usize {
        (0..self.text().len())
            .find(|&i| self.logical.raw_offset(i) >= offset)
            .unwrap_or(self.text().len())
    }

    /// Token text before the raw `offset`; used for completion prefixes.
    pub fn prefix_at(&self, offset: usize) -> &str {
        let mut idx = self.index_at(offset);
        while !self.text().is_char_boundary(idx) {
            idx -= 1;
        }
        &self.text()[..idx]
    }
}

/// Splits `region` into arguments on runs of spaces and tabs.
///
/// Double quotes honour `escape`; single quotes only end at the next single quote. An
/// escape outside quotes keeps the following character in the token.
pub fn split_arguments(region: &LogicalText, escape: char) -> Vec<Argument> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mode {
        Between,
        Token,
        Double,
        Single,
    }

    let text = region.as_str();
    let mut args = Vec::new();
    let mut mode = Mode::Between;
    let mut start = 0;
    let mut quote_open: Option<(char, usize)> = None;
    let mut chars = text.char_indices().peekable();

    let finish = |start: usize, end: usize, open: Option<(char, usize)>| Argument {
        logical: region.slice(start, end),
        start,
        end,
        open_quote: open.map(|(quote, idx)| OpenQuote {
            quote,
            offset: region.raw_offset(idx),
        }),
    };

    while let Some((idx, ch)) = chars.next() {
        match mode {
            Mode::Between => {
                if ch == ' ' || ch == '\t' {
                    continue;
                }
                start = idx;
                mode = Mode::Token;
                match ch {
                    '"' => {
                        mode = Mode::Double;
                        quote_open = Some(('"', idx));
                    }
                    '\'' => {
                        mode = Mode::Single;
                        quote_open = Some(('\'', idx));
                    }
                    c if c == escape => {
                        chars.next();
                    }
                    _ => {}
                }
            }
            Mode::Token => match ch {
                ' ' | '\t' => {
                    args.push(finish(start, idx, None));
                    mode = Mode::Between;
                }
                '"' => {
                    mode = Mode::Double;
                    quote_open = Some(('"', idx));
                }
                '\'' => {
                    mode = Mode::Single;
                    quote_open = Some(('\'', idx));
                }
                c if c == escape => {
                    chars.next();
                }
                _ => {}
            },
            Mode::Double => match ch {
                '"' => {
                    mode = Mode::Token;
                    quote_open = None;
                }
                c if c == escape => {
                    chars.next();
                }
                _ => {}
            },
            Mode::Single => {
                if ch == '\'' {
                    mode = Mode::Token;
                    quote_open = None;
                }
            }
        }
    }
    if mode != Mode::Between {
        args.push(finish(start, text.len(), quote_open));
    }
    args
}

/// A leading `--name[=value]` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub name_span: Span,
    /// `None` when no `=` was written; `Some("")` for `--name=`.
    pub value: Option<String>,
    pub value_span: Option<Span>,
    pub span: Span,
    /// Index of the argument this flag was read from.
    pub argument: usize,
}

impl Flag {
    pub fn from_argument(arg: &Argument, argument: usize) -> Option<Flag> {
        let text = arg.text();
        if !text.starts_with("--") {
            return None;
        }
        let (name_end, value) = match text.find('=') {
            Some(eq) => (eq, Some((eq + 1, text.len()))),
            None => (text.len(), None),
        };
        Some(Flag {
            name: text[2..name_end].to_string(),
            name_span: arg.span_of(2, name_end),
            value: value.map(|(s, e)| text[s..e].to_string()),
            value_span: value.map(|(s, e)| arg.span_of(s, e)),
            span: arg.span(),
            argument,
        })
    }
}

/// A `name=value` pair from `ENV`, `LABEL` or `ARG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub name_span: Span,
    /// `None` when no `=` was written.
    pub value: Option<String>,
    pub value_span: Option<Span>,
    pub span: Span,
    /// Written as `KEY value` rather than `KEY=value`.
    pub legacy: bool,
}

impl Property {
    pub fn from_argument(arg: &Argument) -> Property {
        let text = arg.text();
        match text.find('=') {
            Some(eq) => Property {
                name: text[..eq].to_string(),
                name_span: arg.span_of(0, eq),
                value: Some(text[eq + 1..].to_string()),
                value_span: Some(arg.span_of(eq + 1, text.len())),
                span: arg.span(),
                legacy: false,
            },
            None => Property {
                name: text.to_string(),
                name_span: arg.span(),
                value: None,
                value_span: None,
                span: arg.span(),
                legacy: false,
            },
        }
    }

    /// The value with surrounding quotes removed and `escape` sequences resolved.
    pub fn unquoted_value(&self, escape: char) -> Option<String> {
        self.value.as_deref().map(|value| unquote(value, escape))
    }
}

/// Strips one level of matching quotes from each quoted segment.
///
/// Outside quotes and inside double quotes `escape` keeps the next character
/// literally; single quotes take everything up to the closing quote as written.
pub fn unquote(text: &str, escape: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match quote {
            Some('\'') if ch == '\'' => quote = None,
            Some('\'') => out.push(ch),
            Some(q) if ch == q => quote = None,
            _ if ch == escape => match chars.next() {
                Some(next) => out.push(next),
                None => out.push(ch),
            },
            Some(_) => out.push(ch),
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None => out.push(ch),
        }
    }
    out
}
