//! Go-to-definition — from a name to the declaration it denotes.

use crate::base::ModuleId;
use crate::hir::{Declaration, ModuleGraph, ResolveResult};

/// Resolve a name as written at the top level of `module`.
///
/// Accepts simple names (`SharedClass`), enum members (`Color.Red`),
/// namespace members (`ns.helper`) and class or interface members
/// (`Person.getName`, resolving to the declaring class or interface).
pub fn goto_definition<'a>(graph: &'a ModuleGraph, module: ModuleId, name: &str) -> Option<&'a Declaration> {
    let (head, rest) = match name.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (name, None),
    };

    match (graph.resolve_in_module(module, head), rest) {
        (ResolveResult::Found(id), None) => graph.declaration(id),
        (ResolveResult::Found(id), Some(member)) => {
            let decl = graph.declaration(id)?;
            graph
                .enum_member(decl, member)
                .or_else(|| graph.find_member(decl, member).map(|m| m.owner))
        }
        (ResolveResult::Namespace(target), Some(member)) => graph.resolve_export(target, member),
        _ => None,
    }
}
