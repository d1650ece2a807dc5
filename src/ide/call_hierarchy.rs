//! Call hierarchy — who calls a declaration, and what it calls.
//!
//! Built from call and instantiation references. Calls from top-level
//! statements have no caller.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{ModuleId, Span};
use crate::hir::{AnalysisResult, Caller, DefId};

/// A caller of some declaration, with every call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingCall {
    /// `None` for calls from top-level statements.
    pub from: Option<Caller>,
    pub module: ModuleId,
    pub sites: Vec<Span>,
}

/// Something a declaration calls or instantiates, with every call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingCall {
    pub to: DefId,
    /// Called method, for method calls.
    pub member: Option<SmolStr>,
    pub sites: Vec<Span>,
}

/// Callers of `target` (the declaration itself, not its members).
pub fn incoming_calls(result: &AnalysisResult, target: DefId) -> Vec<IncomingCall> {
    let mut grouped: IndexMap<(ModuleId, Option<Caller>), Vec<Span>> = IndexMap::new();
    for reference in result.references() {
        if reference.kind.is_call() && reference.target == target && reference.member.is_none() {
            grouped
                .entry((reference.module, reference.caller.clone()))
                .or_default()
                .push(reference.span);
        }
    }
    grouped
        .into_iter()
        .map(|((module, from), sites)| IncomingCall { from, module, sites })
        .collect()
}

/// Calls made from inside `source`, including its members' bodies.
pub fn outgoing_calls(result: &AnalysisResult, source: DefId) -> Vec<OutgoingCall> {
    let mut grouped: IndexMap<(DefId, Option<SmolStr>), Vec<Span>> = IndexMap::new();
    let calls = result.references().filter(|r| {
        r.kind.is_call() && r.caller.as_ref().is_some_and(|caller| caller.decl == source)
    });
    for reference in calls {
        grouped
            .entry((reference.target, reference.member.clone()))
            .or_default()
            .push(reference.span);
    }
    grouped
        .into_iter()
        .map(|((to, member), sites)| OutgoingCall { to, member, sites })
        .collect()
}
