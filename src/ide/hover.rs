//! Hover — a one-line summary of the declaration a name denotes.

use smol_str::SmolStr;

use super::goto::goto_definition;
use crate::base::{ModuleId, Span};
use crate::hir::{DeclKind, Declaration, ModuleGraph, Shape, Visibility};
use crate::syntax::MemberKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverInfo {
    pub name: SmolStr,
    pub kind: DeclKind,
    pub visibility: Visibility,
    /// Module declaring the symbol.
    pub module: ModuleId,
    pub span: Span,
    /// `export function SharedFunction(0)`, `export class SharedClass(1) { name, getName(0), .. }`
    pub signature: String,
    /// Member names, own first, then inherited; enum member names for enums.
    pub members: Vec<SmolStr>,
}

/// Describe `name` as written at the top level of `module`.
pub fn hover(graph: &ModuleGraph, module: ModuleId, name: &str) -> Option<HoverInfo> {
    let decl = goto_definition(graph, module, name)?;
    Some(describe(graph, decl))
}

fn describe(graph: &ModuleGraph, decl: &Declaration) -> HoverInfo {
    let members: Vec<SmolStr> = match &decl.shape {
        Shape::Enum { members } => members.clone(),
        _ => graph.collect_members(decl).into_iter().map(|m| m.member.name.clone()).collect(),
    };

    let mut signature = format!("{} {}", decl.kind.display(), decl.name);
    match &decl.shape {
        Shape::Function { arity } => signature.push_str(&format!("({})", arity.describe())),
        Shape::Class { constructor, .. } => signature.push_str(&format!("({})", constructor.describe())),
        _ => {}
    }
    if !members.is_empty() {
        let listed: Vec<String> = match &decl.shape {
            Shape::Enum { .. } => members.iter().map(ToString::to_string).collect(),
            _ => graph
                .collect_members(decl)
                .into_iter()
                .map(|m| match m.member.kind {
                    MemberKind::Method { params } => format!("{}({})", m.member.name, params),
                    MemberKind::Property if m.member.optional => format!("{}?", m.member.name),
                    MemberKind::Property => m.member.name.to_string(),
                })
                .collect(),
        };
        signature.push_str(&format!(" {{ {} }}", listed.join(", ")));
    }
    if decl.is_exported() {
        signature.insert_str(0, "export ");
    }

    HoverInfo {
        name: decl.name.clone(),
        kind: decl.kind,
        visibility: decl.visibility,
        module: decl.id.module,
        span: decl.span,
        signature,
        members,
    }
}
