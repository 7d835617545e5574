use dockerls_core::text::{Document, Span};
use dockerls_core::token::{Argument, Instruction, Keyword};
use dockerls_core::Analysis;
use tower_lsp::lsp_types::{SemanticToken, SemanticTokenModifier, SemanticTokenType};

use super::DockerAnalyzer;

/// Legend order; the indices below refer to it.
pub const TOKEN_TYPES: [SemanticTokenType; 7] = [
    SemanticTokenType::KEYWORD,
    SemanticTokenType::COMMENT,
    SemanticTokenType::MACRO,
    SemanticTokenType::PARAMETER,
    SemanticTokenType::VARIABLE,
    SemanticTokenType::STRING,
    SemanticTokenType::NAMESPACE,
];

pub const TOKEN_MODIFIERS: [SemanticTokenModifier; 2] = [
    SemanticTokenModifier::DECLARATION,
    SemanticTokenModifier::DEPRECATED,
];

const KEYWORD_IDX: u32 = 0;
const COMMENT_IDX: u32 = 1;
const DIRECTIVE_IDX: u32 = 2;
const FLAG_IDX: u32 = 3;
const VARIABLE_IDX: u32 = 4;
const STRING_IDX: u32 = 5;
const STAGE_IDX: u32 = 6;

const DECLARATION: u32 = 1;
const DEPRECATED: u32 = 1 << 1;

#[derive(Debug, Clone, Copy)]
struct Raw {
    span: Span,
    token_type: u32,
    modifiers: u32,
}

impl DockerAnalyzer {
    /// Full-document semantic tokens, delta-encoded.
    pub fn semantic_tokens(&self, model: &Analysis) -> Vec<SemanticToken> {
        // Higher-priority kinds first: a later token overlapping an accepted one is dropped.
        let mut raw = Vec::new();
        let scopes = &model.scopes;
        for directive in &model.dockerfile.directives {
            raw.push(token(directive.name_span, DIRECTIVE_IDX, 0));
            raw.push(token(directive.value_span, STRING_IDX, 0));
        }
        for inst in &model.dockerfile.instructions {
            keyword_tokens(inst, &mut raw);
        }
        for stage in &scopes.stages {
            if let Some(span) = stage.name_span {
                raw.push(token(span, STAGE_IDX, DECLARATION));
            }
        }
        for reference in &scopes.stage_references {
            raw.push(token(reference.span, STAGE_IDX, 0));
        }
        for binding in &scopes.bindings {
            raw.push(token(binding.name_span, VARIABLE_IDX, DECLARATION));
        }
        for reference in &scopes.references {
            raw.push(token(reference.full_span, VARIABLE_IDX, 0));
        }
        for inst in &model.dockerfile.instructions {
            for flag in inst.flags() {
                raw.push(token(Span::new(flag.span.start, flag.name_span.end), FLAG_IDX, 0));
            }
            for arg in &inst.arguments {
                string_tokens(arg, &mut raw);
            }
        }
        let directive_spans: Vec<Span> = model.dockerfile.directives.iter().map(|d| d.span).collect();
        for comment in &model.dockerfile.comments {
            if !directive_spans.contains(&comment.span) {
                raw.push(token(comment.span, COMMENT_IDX, 0));
            }
        }

        let mut accepted: Vec<Raw> = Vec::with_capacity(raw.len());
        for candidate in raw {
            if candidate.span.is_empty() {
                continue;
            }
            let overlaps = accepted.iter().any(|t| {
                candidate.span.start < t.span.end && t.span.start < candidate.span.end
            });
            if !overlaps {
                accepted.push(candidate);
            }
        }
        accepted.sort_by_key(|t| t.span.start);
        encode(&model.document, &accepted)
    }
}

fn token(span: Span, token_type: u32, modifiers: u32) -> Raw {
    Raw {
        span,
        token_type,
        modifiers,
    }
}

fn keyword_tokens(inst: &Instruction, raw: &mut Vec<Raw>) {
    if inst.kind == Keyword::Unknown {
        return;
    }
    let modifiers = if inst.kind == Keyword::Maintainer {
        DEPRECATED
    } else {
        0
    };
    raw.push(token(inst.keyword_span, KEYWORD_IDX, modifiers));
    if let Some(trigger) = inst.onbuild_trigger() {
        keyword_tokens(&trigger, raw);
    }
    if inst.kind == Keyword::From {
        if let [_, as_kw, _, ..] = inst.positional() {
            if as_kw.text().eq_ignore_ascii_case("as") {
                raw.push(token(as_kw.span(), KEYWORD_IDX, 0));
            }
        }
    }
    if inst.kind == Keyword::Healthcheck {
        if let Some(first) = inst.positional().first() {
            if first.text().eq_ignore_ascii_case("cmd") || first.text().eq_ignore_ascii_case("none") {
                raw.push(token(first.span(), KEYWORD_IDX, 0));
            }
        }
    }
}

/// Quoted segments of an argument.
fn string_tokens(arg: &Argument, raw: &mut Vec<Raw>) {
    let text = arg.text();
    let mut open: Option<(char, usize)> = None;
    for (i, ch) in text.char_indices() {
        match open {
            Some((quote, start)) if ch == quote => {
                raw.push(token(arg.span_of(start, i + 1), STRING_IDX, 0));
                open = None;
            }
            Some(_) => {}
            None if ch == '"' || ch == '\'' => open = Some((ch, i)),
            None => {}
        }
    }
    if let Some((_, start)) = open {
        raw.push(token(arg.span_of(start, text.len()), STRING_IDX, 0));
    }
}

/// Splits spans at line breaks and delta-encodes them.
fn encode(document: &Document, tokens: &[Raw]) -> Vec<SemanticToken> {
    let mut result: Vec<SemanticToken> = Vec::with_capacity(tokens.len());
    let mut prev_line: u32 = 0;
    let mut prev_start: u32 = 0;
    let mut first = true;

    for t in tokens {
        let first_line = document.line_of(t.span.start);
        let last_line = document.line_of(t.span.end);
        for line in first_line..=last_line {
            let line_span = document.line_span(line);
            let start = t.span.start.max(line_span.start);
            let end = t.span.end.min(line_span.end);
            if end <= start {
                continue;
            }
            let start_pos = document.position_at(start);
            let end_pos = document.position_at(end);
            let length = end_pos.character.saturating_sub(start_pos.character);
            if length == 0 {
                continue;
            }
            let line = start_pos.line;
            let col = start_pos.character;
            let delta_line = if first { line } else { line.saturating_sub(prev_line) };
            let delta_start = if first || delta_line != 0 {
                col
            } else {
                col.saturating_sub(prev_start)
            };
            result.push(SemanticToken {
                delta_line,
                delta_start,
                length,
                token_type: t.token_type,
                token_modifiers_bitset: t.modifiers,
            });
            prev_line = line;
            prev_start = col;
            first = false;
        }
    }
    result
}
