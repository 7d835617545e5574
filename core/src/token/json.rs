//! The JSON string-array grammar shared by exec-form instructions.
//!
//! Parses `[ "a", "b" ]` over continuation-resolved text. The string delimiter is a
//! parameter so the same grammar can recognise single-quoted look-alikes. Inside strings
//! the active escape character escapes the next character; with the default `\` the JSON
//! escapes `\n`, `\t`, `\r`, `\b`, `\f` and `\uXXXX` are decoded as well.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::text::Span;

use super::LogicalText;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonString {
    pub value: String,
    /// Raw span including the quotes.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonArray {
    pub strings: Vec<JsonString>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// The text does not start with `[`.
    NotAnArray,
    /// An unexpected character, or `None` for end of input.
    Unexpected { span: Span, found: Option<char> },
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::NotAnArray => write!(f, "not a JSON array"),
            JsonError::Unexpected { found: Some(c), .. } => write!(f, "unexpected '{c}'"),
            JsonError::Unexpected { found: None, .. } => write!(f, "unexpected end of input"),
        }
    }
}

impl std::error::Error for JsonError {}

#[derive(Clone, Copy, PartialEq)]
enum State {
    ValueOrClose,
    Value,
    CommaOrClose,
    End,
}

fn is_json_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn decode_escape(next: char, escape: char, chars: &mut Peekable<CharIndices<'_>>, value: &mut String) {
    if escape != '\\' {
        value.push(next);
        return;
    }
    match next {
        'n' => value.push('\n'),
        't' => value.push('\t'),
        'r' => value.push('\r'),
        'b' => value.push('\u{8}'),
        'f' => value.push('\u{c}'),
        'u' => {
            let hex: String = chars.clone().take(4).map(|(_, h)| h).collect();
            let valid = hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit());
            match u32::from_str_radix(&hex, 16).ok().filter(|_| valid) {
                Some(code) => {
                    chars.nth(3);
                    value.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                }
                None => value.push('u'),
            }
        }
        other => value.push(other),
    }
}

/// Parses a string array whose strings are delimited by `quote`; `escape` escapes the
/// character after it inside strings.
pub fn parse_string_array(
    text: &LogicalText,
    quote: char,
    escape: char,
) -> Result<JsonArray, JsonError> {
    let src = text.as_str();
    let mut chars = src.char_indices().peekable();
    let unexpected = |idx: usize, c: Option<char>| {
        let span = match c {
            Some(c) => text.span(idx, idx + c.len_utf8()),
            None => text.span(idx, idx),
        };
        JsonError::Unexpected { span, found: c }
    };

    while chars.next_if(|&(_, c)| is_json_space(c)).is_some() {}
    let open = match chars.next() {
        Some((idx, '[')) => idx,
        _ => return Err(JsonError::NotAnArray),
    };

    let mut strings = Vec::new();
    let mut state = State::ValueOrClose;
    let mut close = src.len();
    while let Some((idx, ch)) = chars.next() {
        if is_json_space(ch) {
            continue;
        }
        match state {
            State::ValueOrClose | State::Value => {
                if ch == ']' && state == State::ValueOrClose {
                    close = idx + 1;
                    state = State::End;
                } else if ch == quote {
                    let mut value = String::new();
                    let mut end = None;
                    while let Some((i, c)) = chars.next() {
                        if c == quote {
                            end = Some(i + c.len_utf8());
                            break;
                        }
                        if c == escape {
                            match chars.next() {
                                Some((_, next)) => decode_escape(next, escape, &mut chars, &mut value),
                                None => return Err(unexpected(src.len(), None)),
                            }
                            continue;
                        }
                        value.push(c);
                    }
                    let Some(end) = end else {
                        return Err(unexpected(src.len(), None));
                    };
                    strings.push(JsonString {
                        value,
                        span: text.span(idx, end),
                    });
                    state = State::CommaOrClose;
                } else {
                    return Err(unexpected(idx, Some(ch)));
                }
            }
            State::CommaOrClose => match ch {
                ',' => state = State::Value,
                ']' => {
                    close = idx + 1;
                    state = State::End;
                }
                _ => return Err(unexpected(idx, Some(ch))),
            },
            State::End => return Err(unexpected(idx, Some(ch))),
        }
    }
    if state != State::End {
        return Err(unexpected(src.len(), None));
    }
    Ok(JsonArray {
        strings,
        span: text.span(open, close),
    })
}

/// True when the trimmed text starts with `[`.
pub fn looks_like_array(text: &LogicalText) -> bool {
    text.as_str().trim_start().starts_with('[')
}
