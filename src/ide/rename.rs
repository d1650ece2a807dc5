//! Rename — every span that has to change when a declaration (or one of
//! its members) gets a new name.
//!
//! The engine never sees source text, so the result is a set of spans per
//! module; the front end replaces the text at each one.

use indexmap::IndexMap;
use smol_str::SmolStr;
use thiserror::Error;

use super::references::find_references;
use crate::base::{ModuleId, Span};
use crate::hir::{AnalysisResult, Binding, Declaration, DefId, ResolveResult};
use crate::syntax::ImportSpecifier;

/// Why a rename was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("'{0}' is not a valid name")]
    InvalidName(SmolStr),

    #[error("nothing to rename")]
    NotFound,

    #[error("'{name}' is already declared or imported in {module:?}")]
    Conflict { name: SmolStr, module: ModuleId },
}

/// Spans to replace with `new_name`, grouped by module in module order and
/// sorted within each module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceChange {
    pub new_name: SmolStr,
    pub edits: IndexMap<ModuleId, Vec<Span>>,
}

impl SourceChange {
    /// Total number of spans touched.
    pub fn occurrences(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }

    fn push(&mut self, module: ModuleId, span: Span) {
        self.edits.entry(module).or_default().push(span);
    }

    fn finish(mut self) -> Self {
        self.edits.sort_keys();
        for spans in self.edits.values_mut() {
            spans.sort();
            spans.dedup();
        }
        self
    }
}

/// Rename `target`, or its member `member`, to `new_name`.
///
/// Import specifiers naming the declaration are renamed along with it.
/// Modules that only bind it under an alias or as a default import keep
/// their local name, so their uses are left alone.
pub fn rename(
    result: &AnalysisResult,
    target: DefId,
    member: Option<&str>,
    new_name: &str,
) -> Result<SourceChange, RenameError> {
    if new_name.is_empty() || new_name.contains('.') {
        return Err(RenameError::InvalidName(new_name.into()));
    }
    let graph = result.graph();
    let decl = graph.declaration(target).ok_or(RenameError::NotFound)?;

    let mut change = SourceChange {
        new_name: new_name.into(),
        edits: IndexMap::new(),
    };

    if let Some(member) = member {
        let own = decl.member(member).ok_or(RenameError::NotFound)?;
        if graph.find_member(decl, new_name).is_some() {
            return Err(RenameError::Conflict {
                name: new_name.into(),
                module: target.module,
            });
        }
        change.push(target.module, own.span);
        for reference in find_references(result, target, Some(member)) {
            change.push(reference.module, reference.span);
        }
        tracing::debug!("rename {}.{} -> {}: {} spans", decl.name, member, new_name, change.occurrences());
        return Ok(change.finish());
    }

    // Enum members are renamed through their parent's qualified name
    if decl.name.contains('.') {
        return Err(RenameError::NotFound);
    }

    check_free(result, target.module, decl, new_name)?;
    change.push(target.module, decl.span);

    let mut aliased: Vec<ModuleId> = Vec::new();
    for module in graph.module_ids() {
        let (Some(entry), Some(analysis)) = (graph.module(module), result.module(module)) else {
            continue;
        };
        for import in &entry.source.imports {
            for spec in &import.specifiers {
                let bound = analysis
                    .imports
                    .get(spec.local())
                    .is_some_and(|b| b.binding == Some(Binding::Decl(target)));
                if !bound {
                    continue;
                }
                match spec {
                    ImportSpecifier::Named { imported, local, span } if imported == local => {
                        check_free(result, module, decl, new_name)?;
                        change.push(module, *span);
                    }
                    ImportSpecifier::Named { span, .. } => {
                        change.push(module, *span);
                        aliased.push(module);
                    }
                    ImportSpecifier::Default { .. } | ImportSpecifier::Namespace { .. } => {
                        aliased.push(module);
                    }
                }
            }
        }
    }

    for reference in find_references(result, target, None) {
        if aliased.contains(&reference.module) {
            continue;
        }
        change.push(reference.module, reference.span);
    }

    tracing::debug!("rename {} -> {}: {} spans", decl.name, new_name, change.occurrences());
    Ok(change.finish())
}

/// `new_name` must not already mean something else in `module`.
fn check_free(result: &AnalysisResult, module: ModuleId, decl: &Declaration, new_name: &str) -> Result<(), RenameError> {
    match result.graph().resolve_in_module(module, new_name) {
        ResolveResult::NotFound => Ok(()),
        ResolveResult::Found(id) if id == decl.id => Ok(()),
        _ => Err(RenameError::Conflict {
            name: new_name.into(),
            module,
        }),
    }
}
