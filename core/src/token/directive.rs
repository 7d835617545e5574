use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{DEFAULT_ESCAPE, Document, Span, newline_len};

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*#[ \t]*([a-zA-Z][a-zA-Z0-9]*)[ \t]*=[ \t]*(.*)$")
        .expect("directive pattern is valid")
});

pub const KNOWN_DIRECTIVES: [&str; 3] = ["escape", "syntax", "check"];

/// A `# name=value` parser directive from the leading comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub name_span: Span,
    pub value: String,
    pub value_span: Span,
    pub span: Span,
}

impl Directive {
    pub fn is_known(&self) -> bool {
        KNOWN_DIRECTIVES.contains(&self.name.to_ascii_lowercase().as_str())
    }

    pub fn is_escape(&self) -> bool {
        self.name.eq_ignore_ascii_case("escape")
    }

    /// The escape character this directive selects, if it is a valid escape directive.
    pub fn escape_char(&self) -> Option<char> {
        if !self.is_escape() {
            return None;
        }
        match self.value.as_str() {
            "\\" => Some('\\'),
            "`" => Some('`'),
            _ => None,
        }
    }
}

/// Reads parser directives from the top of the document.
///
/// Returns the directives and the offset where instruction scanning should resume. The
/// first line that is not a directive ends the block for good.
pub fn read_directives(document: &Document) -> (Vec<Directive>, usize) {
    let text = document.text();
    let mut directives = Vec::new();
    let mut line = 0;
    let mut resume = 0;
    while line < document.line_count() {
        let line_start = document.line_start(line);
        let line_end = document.line_end(line);
        if line_start >= text.len() {
            break;
        }
        let Some(caps) = DIRECTIVE_RE.captures(&text[line_start..line_end]) else {
            break;
        };
        let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
            break;
        };
        let hash = text[line_start..line_end].find('#').unwrap_or(0);
        let name_span = Span::new(line_start + name.start(), line_start + name.end());
        let mut value_text = value.as_str().trim_end_matches([' ', '\t']).to_string();
        let mut value_span = Span::new(
            line_start + value.start(),
            line_start + value.start() + value_text.len(),
        );
        let mut end = line_end;

        // A trailing escape continues the value onto the next physical line, unless the
        // escape is the whole value (`# escape=\`).
        while value_text.len() > 1
            && value_text.ends_with(DEFAULT_ESCAPE)
            && newline_len(text, end).is_some()
            && line + 1 < document.line_count()
        {
            value_text.pop();
            line += 1;
            let next = document.line_text(line).trim_end_matches([' ', '\t']);
            value_text.push_str(next);
            end = document.line_end(line);
            value_span = Span::new(value_span.start, document.line_start(line) + next.len());
        }

        directives.push(Directive {
            name: name.as_str().to_string(),
            name_span,
            value: value_text,
            value_span,
            span: Span::new(line_start + hash, end),
        });
        line += 1;
        resume = document.line_start(line);
    }
    (directives, resume)
}
