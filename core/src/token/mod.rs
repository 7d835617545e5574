//! Dockerfile tokenization: directives, comments, instructions and their arguments.

pub mod args;
mod directive;
mod instruction;
pub mod json;
mod keyword;
mod lexer;
mod logical;

#[cfg(test)]
mod args_test;
#[cfg(test)]
mod json_test;
#[cfg(test)]
mod token_test;

pub use args::{Argument, Flag, OpenQuote, Property, unquote};
pub use directive::{Directive, KNOWN_DIRECTIVES, read_directives};
pub use instruction::{Comment, Instruction};
pub use keyword::Keyword;
pub use logical::LogicalText;

use crate::text::{DEFAULT_ESCAPE, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeDirective {
    pub character: char,
    pub declared_explicitly: bool,
}

impl Default for EscapeDirective {
    fn default() -> Self {
        Self {
            character: DEFAULT_ESCAPE,
            declared_explicitly: false,
        }
    }
}

/// The tokenized form of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dockerfile {
    pub escape: EscapeDirective,
    pub directives: Vec<Directive>,
    /// Every comment line, directive lines included, in document order.
    pub comments: Vec<Comment>,
    pub instructions: Vec<Instruction>,
}

impl Dockerfile {
    pub fn parse(document: &Document) -> Dockerfile {
        let (directives, resume) = read_directives(document);
        let escape = directives
            .iter()
            .filter(|d| d.is_escape())
            .find_map(|d| d.escape_char())
            .map(|character| EscapeDirective {
                character,
                declared_explicitly: true,
            })
            .unwrap_or_default();

        let lexer = lexer::Lexer::new(document.text(), escape.character, resume).run();
        let mut comments: Vec<Comment> = directives
            .iter()
            .map(|d| {
                let body = document.slice(d.span);
                let content = body.trim_start_matches('#').trim_matches([' ', '\t']);
                let content_start = d.span.start + body.find(content).unwrap_or(0);
                Comment {
                    span: d.span,
                    content_span: crate::text::Span::new(
                        content_start,
                        content_start + content.len(),
                    ),
                    text: content.to_string(),
                }
            })
            .collect();
        comments.extend(lexer.comments);

        Dockerfile {
            escape,
            directives,
            comments,
            instructions: lexer.instructions,
        }
    }

    /// The instruction whose span (or keyword) contains `offset`.
    pub fn instruction_at(&self, offset: usize) -> Option<(usize, &Instruction)> {
        self.instructions
            .iter()
            .enumerate()
            .find(|(_, inst)| inst.span.contains(offset))
    }

    pub fn first_from(&self) -> Option<&Instruction> {
        self.instructions.iter().find(|i| i.kind == Keyword::From)
    }
}
