//! Build stages and variable scoping.
//!
//! One forward pass over the instructions records stages, `ARG`/`ENV` bindings and every
//! `$var` reference. A binding is visible from the instruction after the one declaring it.
//! References resolve against the current stage first and then the global `ARG`s declared
//! before the first `FROM`; references inside `FROM` see only the global table.

mod variables;

#[cfg(test)]
mod scope_test;

pub use variables::{RawReference, scan_references};

use crate::text::Span;
use crate::token::{Argument, Dockerfile, Instruction, Keyword};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Stage(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Arg,
    Env,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStage {
    pub index: usize,
    pub from_image: String,
    pub image_span: Option<Span>,
    pub name: Option<String>,
    pub name_span: Option<Span>,
    /// Index of the `FROM` instruction.
    pub instruction: usize,
    /// From the `FROM` keyword to the end of the stage's last instruction.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    pub name: String,
    pub value: Option<String>,
    pub name_span: Span,
    pub span: Span,
    pub scope: Scope,
    pub kind: BindingKind,
    pub instruction: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    pub name: String,
    pub span: Span,
    pub full_span: Span,
    pub instruction: usize,
    pub scope: Scope,
    pub in_from: bool,
    /// Index into [`ScopeTable::bindings`].
    pub binding: Option<usize>,
}

/// A use of a stage name: `COPY --from=name` or `FROM name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReference {
    pub name: String,
    pub span: Span,
    pub instruction: usize,
    pub stage: Option<usize>,
}

/// A renameable entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A variable family: every binding of `name` in `scope` and the references resolving
    /// to one of them.
    Variable { name: String, scope: Scope },
    Stage(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub span: Span,
    pub declaration: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTable {
    pub stages: Vec<BuildStage>,
    pub bindings: Vec<VariableBinding>,
    pub references: Vec<VariableReference>,
    pub stage_references: Vec<StageReference>,
    instruction_scopes: Vec<Scope>,
    instruction_spans: Vec<Span>,
}

impl ScopeTable {
    pub fn build(file: &Dockerfile) -> ScopeTable {
        let mut table = ScopeTable::default();
        let mut scope = Scope::Global;

        for (idx, inst) in file.instructions.iter().enumerate() {
            if inst.kind == Keyword::From {
                let stage = table.stages.len();
                scope = Scope::Stage(stage);
                table.push_stage(idx, inst, stage);
            } else if let Scope::Stage(stage) = scope {
                let last = &mut table.stages[stage];
                last.span = last.span.cover(inst.span);
            }
            table.instruction_scopes.push(scope);
            table.instruction_spans.push(inst.span);

            match inst.onbuild_trigger() {
                Some(trigger) => table.collect_references(idx, &trigger, scope),
                None => table.collect_references(idx, inst, scope),
            }
            table.collect_bindings(idx, inst, scope);
            table.collect_stage_flags(idx, inst);
        }
        table.resolve_stage_references();
        tracing::trace!(
            stages = table.stages.len(),
            bindings = table.bindings.len(),
            references = table.references.len(),
            "scopes built"
        );
        table
    }

    fn push_stage(&mut self, idx: usize, inst: &Instruction, stage: usize) {
        let positional = inst.positional();
        let image = positional.first();
        let (name, name_span) = match positional {
            [_, as_kw, name, ..] if as_kw.text().eq_ignore_ascii_case("as") => {
                (Some(name.text().to_string()), Some(name.span()))
            }
            _ => (None, None),
        };
        if let Some(image) = image {
            let earlier = self.stages.iter().find(|s| {
                s.name
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(image.text()))
            });
            if let Some(earlier) = earlier {
                self.stage_references.push(StageReference {
                    name: image.text().to_string(),
                    span: image.span(),
                    instruction: idx,
                    stage: Some(earlier.index),
                });
            }
        }
        self.stages.push(BuildStage {
            index: stage,
            from_image: image.map(|a| a.text().to_string()).unwrap_or_default(),
            image_span: image.map(Argument::span),
            name,
            name_span,
            instruction: idx,
            span: inst.span,
        });
    }

    fn collect_references(&mut self, idx: usize, inst: &Instruction, scope: Scope) {
        let in_from = inst.kind == Keyword::From;
        let declares = inst.kind.declares_variables() || inst.kind == Keyword::Label;
        let legacy = declares
            && inst.kind != Keyword::Arg
            && inst.properties().first().is_some_and(|p| p.legacy);
        for (pos, arg) in inst.arguments.iter().enumerate() {
            let text = arg.text();
            let from = if declares && !(legacy && pos > 0) {
                match text.find('=') {
                    Some(eq) => eq + 1,
                    None => continue,
                }
            } else {
                0
            };
            for raw in scan_references(&text[from..], inst.escape) {
                let name = &text[from + raw.name_start..from + raw.name_end];
                let binding = self.resolve(name, idx, scope, in_from);
                self.references.push(VariableReference {
                    name: name.to_string(),
                    span: arg.span_of(from + raw.name_start, from + raw.name_end),
                    full_span: arg.span_of(from + raw.start, from + raw.end),
                    instruction: idx,
                    scope,
                    in_from,
                    binding,
                });
            }
        }
    }

    fn collect_bindings(&mut self, idx: usize, inst: &Instruction, scope: Scope) {
        let kind = match inst.kind {
            Keyword::Arg => BindingKind::Arg,
            Keyword::Env => BindingKind::Env,
            _ => return,
        };
        let mut properties = inst.properties();
        if kind == BindingKind::Arg {
            properties.truncate(1);
        }
        for prop in properties {
            if prop.name.is_empty() {
                continue;
            }
            self.bindings.push(VariableBinding {
                value: prop.unquoted_value(inst.escape),
                name: prop.name,
                name_span: prop.name_span,
                span: prop.span,
                scope,
                kind,
                instruction: idx,
            });
        }
    }

    fn collect_stage_flags(&mut self, idx: usize, inst: &Instruction) {
        if inst.kind != Keyword::Copy {
            return;
        }
        for flag in inst.flags() {
            if flag.name != "from" {
                continue;
            }
            if let (Some(value), Some(span)) = (flag.value, flag.value_span) {
                if !value.is_empty() {
                    self.stage_references.push(StageReference {
                        name: value,
                        span,
                        instruction: idx,
                        stage: None,
                    });
                }
            }
        }
    }

    fn resolve_stage_references(&mut self) {
        for reference in &mut self.stage_references {
            if reference.stage.is_some() {
                continue;
            }
            reference.stage = self
                .stages
                .iter()
                .find(|s| {
                    s.name
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(&reference.name))
                })
                .map(|s| s.index)
                .or_else(|| {
                    reference
                        .name
                        .parse::<usize>()
                        .ok()
                        .filter(|&i| i < self.stages.len())
                });
        }
    }

    /// Latest binding of `name` visible to instruction `idx`.
    fn resolve(&self, name: &str, idx: usize, scope: Scope, in_from: bool) -> Option<usize> {
        let latest_in = |wanted: Scope| {
            self.bindings
                .iter()
                .enumerate()
                .rev()
                .find(|(_, b)| b.scope == wanted && b.instruction < idx && b.name == name)
                .map(|(i, _)| i)
        };
        if in_from || scope == Scope::Global {
            return latest_in(Scope::Global);
        }
        latest_in(scope).or_else(|| latest_in(Scope::Global))
    }

    pub fn scope_of(&self, instruction: usize) -> Scope {
        self.instruction_scopes
            .get(instruction)
            .copied()
            .unwrap_or(Scope::Global)
    }

    pub fn stage(&self, index: usize) -> Option<&BuildStage> {
        self.stages.get(index)
    }

    pub fn find_stage(&self, name: &str) -> Option<&BuildStage> {
        self.stages.iter().find(|s| {
            s.name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    /// Stage names declared so far, in order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().filter_map(|s| s.name.as_deref())
    }

    /// Bindings visible at `offset`, one per name, latest declaration first.
    pub fn visible_at(&self, offset: usize) -> Vec<&VariableBinding> {
        let count = self.instruction_spans.partition_point(|s| s.start < offset);
        let Some(current) = count.checked_sub(1) else {
            return Vec::new();
        };
        let inside = self.instruction_spans[current].contains(offset);
        let scope = self.scope_of(current);
        let in_from = inside && self.stages.iter().any(|s| s.instruction == current);
        let scopes: &[Scope] = if in_from || scope == Scope::Global {
            &[Scope::Global]
        } else {
            &[scope, Scope::Global]
        };

        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for wanted in scopes {
            for binding in self.bindings.iter().rev() {
                let declared_before =
                    binding.instruction < current || (binding.instruction == current && !inside);
                if binding.scope == *wanted
                    && declared_before
                    && seen.insert(binding.name.as_str())
                {
                    out.push(binding);
                }
            }
        }
        out
    }

    pub fn reference_at(&self, offset: usize) -> Option<&VariableReference> {
        self.references.iter().find(|r| r.span.contains(offset))
    }

    pub fn binding_at(&self, offset: usize) -> Option<(usize, &VariableBinding)> {
        self.bindings
            .iter()
            .enumerate()
            .find(|(_, b)| b.name_span.contains(offset))
    }

    /// The symbol under `offset` and the span of the name there.
    pub fn symbol_at(&self, offset: usize) -> Option<(Symbol, Span)> {
        if let Some((_, binding)) = self.binding_at(offset) {
            let symbol = Symbol::Variable {
                name: binding.name.clone(),
                scope: binding.scope,
            };
            return Some((symbol, binding.name_span));
        }
        if let Some(reference) = self.reference_at(offset) {
            let scope = reference
                .binding
                .map(|b| self.bindings[b].scope)
                .unwrap_or(reference.scope);
            let symbol = Symbol::Variable {
                name: reference.name.clone(),
                scope,
            };
            return Some((symbol, reference.span));
        }
        if let Some(stage) = self
            .stages
            .iter()
            .find(|s| s.name_span.is_some_and(|span| span.contains(offset)))
        {
            return stage.name_span.map(|span| (Symbol::Stage(stage.index), span));
        }
        self.stage_references
            .iter()
            .find(|r| r.span.contains(offset))
            .and_then(|r| r.stage.map(|stage| (Symbol::Stage(stage), r.span)))
    }

    /// Every occurrence of `symbol`, in document order.
    pub fn occurrences(&self, symbol: &Symbol) -> Vec<Occurrence> {
        let mut out = Vec::new();
        match symbol {
            Symbol::Variable { name, scope } => {
                for binding in &self.bindings {
                    if &binding.name == name && binding.scope == *scope {
                        out.push(Occurrence {
                            span: binding.name_span,
                            declaration: true,
                        });
                    }
                }
                for reference in &self.references {
                    if &reference.name != name {
                        continue;
                    }
                    let matches = match reference.binding {
                        Some(b) => self.bindings[b].scope == *scope,
                        None => reference.scope == *scope,
                    };
                    if matches {
                        out.push(Occurrence {
                            span: reference.span,
                            declaration: false,
                        });
                    }
                }
            }
            Symbol::Stage(index) => {
                if let Some(span) = self.stages.get(*index).and_then(|s| s.name_span) {
                    out.push(Occurrence {
                        span,
                        declaration: true,
                    });
                }
                for reference in &self.stage_references {
                    if reference.stage == Some(*index)
                        && !reference.name.chars().all(|c| c.is_ascii_digit())
                    {
                        out.push(Occurrence {
                            span: reference.span,
                            declaration: false,
                        });
                    }
                }
            }
        }
        out.sort_by_key(|o| o.span.start);
        out
    }

    /// Where the symbol under `offset` is declared.
    pub fn definition_at(&self, offset: usize) -> Option<Span> {
        if let Some((_, binding)) = self.binding_at(offset) {
            return Some(binding.name_span);
        }
        if let Some(reference) = self.reference_at(offset) {
            return reference.binding.map(|b| self.bindings[b].name_span);
        }
        match self.symbol_at(offset)? {
            (Symbol::Stage(index), _) => self.stages.get(index).and_then(|s| s.name_span),
            _ => None,
        }
    }

    /// Value a reference expands to, following a bare stage `ARG` to its global default.
    pub fn effective_value(&self, reference: &VariableReference) -> Option<String> {
        let binding = &self.bindings[reference.binding?];
        if binding.value.is_some() {
            return binding.value.clone();
        }
        if binding.kind == BindingKind::Arg && binding.scope != Scope::Global {
            return self
                .bindings
                .iter()
                .rev()
                .find(|b| b.scope == Scope::Global && b.name == binding.name)
                .and_then(|b| b.value.clone());
        }
        None
    }
}
