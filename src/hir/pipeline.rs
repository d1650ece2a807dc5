//! Runs every analysis phase over one module set.
//!
//! ```text
//! build_symbol_table   ← per module, parallel
//!     │
//!     ▼  (barrier: ModuleGraph assembled, read-only from here)
//! resolve_imports      ← per module, parallel
//! check_module         ←   "
//! analyze_module       ←   "   (reachability)
//!     │
//!     ▼
//! aggregate            ← per module, in module order
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;

use super::config::AnalysisConfig;
use super::diagnostics::{Diagnostic, Severity, aggregate};
use super::reachability;
use super::resolve::{ImportResolution, ModuleEntry, ModuleGraph, resolve_imports};
use super::symbols::build_symbol_table;
use super::usage::{Reference, check_module};
use crate::base::ModuleId;
use crate::syntax::SourceModule;

/// Everything one run produced for one module.
#[derive(Clone, Debug, Default)]
pub struct ModuleAnalysis {
    /// Ordered by category, then position.
    pub diagnostics: Vec<Diagnostic>,
    pub references: Vec<Reference>,
    pub imports: ImportResolution,
}

/// Output of [`analyze_workspace`].
#[derive(Clone, Debug, Default)]
pub struct AnalysisResult {
    graph: ModuleGraph,
    modules: IndexMap<ModuleId, ModuleAnalysis>,
}

impl AnalysisResult {
    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    pub fn module(&self, module: ModuleId) -> Option<&ModuleAnalysis> {
        self.modules.get(&module)
    }

    /// Diagnostics of one module; empty for unknown modules.
    pub fn diagnostics(&self, module: ModuleId) -> &[Diagnostic] {
        self.modules
            .get(&module)
            .map(|m| m.diagnostics.as_slice())
            .unwrap_or(&[])
    }

    /// Per-module diagnostics in module order.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = (ModuleId, &[Diagnostic])> {
        self.modules
            .iter()
            .map(|(&id, m)| (id, m.diagnostics.as_slice()))
    }

    /// Every reference, in module then source order.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.modules.values().flat_map(|m| m.references.iter())
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.modules
            .values()
            .flat_map(|m| m.diagnostics.iter())
            .filter(|d| d.severity == severity)
            .count()
    }

    /// A module is clean when it has no diagnostics at all.
    pub fn is_clean(&self, module: ModuleId) -> bool {
        self.diagnostics(module).is_empty()
    }
}

/// Run `f` over every item, on the rayon pool when `parallel` is set.
///
/// Output order always matches input order.
fn per_module<I, T, F>(items: &[I], parallel: bool, f: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> T + Sync + Send,
{
    if parallel {
        items.par_iter().map(f).collect()
    } else {
        items.iter().map(f).collect()
    }
}

/// Analyze a set of parsed modules.
///
/// Module ids must be unique. Output is independent of `config.parallel`.
pub fn analyze_workspace(modules: &[(ModuleId, Arc<SourceModule>)], config: &AnalysisConfig) -> AnalysisResult {
    // Phase 1: symbol tables
    let tables = per_module(modules, config.parallel, |(id, source)| {
        build_symbol_table(*id, source)
    });

    let mut symbol_diagnostics = Vec::with_capacity(modules.len());
    let entries: Vec<ModuleEntry> = modules
        .iter()
        .zip(tables)
        .map(|((id, source), (table, diagnostics))| {
            symbol_diagnostics.push(diagnostics);
            ModuleEntry {
                id: *id,
                source: Arc::clone(source),
                table,
            }
        })
        .collect();

    // Barrier
    let graph = ModuleGraph::new(entries, config);
    let ids = graph.module_ids();

    // Phase 2: imports and usages
    let checked = per_module(&ids, config.parallel, |&id| {
        let imports = resolve_imports(&graph, id);
        let usage = check_module(&graph, id, &imports, config);
        (imports, usage)
    });

    // Phase 3: reachability
    let unreachable = per_module(modules, config.parallel, |(id, source)| {
        reachability::analyze_module(*id, source, config)
    });

    // Phase 4: aggregation
    let mut results = IndexMap::with_capacity(ids.len());
    for (((id, symbols), (mut imports, usage)), unreachable) in ids
        .iter()
        .zip(symbol_diagnostics)
        .zip(checked)
        .zip(unreachable)
    {
        let import_diagnostics = std::mem::take(&mut imports.diagnostics);
        let diagnostics = aggregate([symbols, import_diagnostics, usage.diagnostics, unreachable]);
        results.insert(
            *id,
            ModuleAnalysis {
                diagnostics,
                references: usage.references,
                imports,
            },
        );
    }

    let result = AnalysisResult {
        graph,
        modules: results,
    };
    tracing::info!(
        "analyzed {} modules: {} errors, {} warnings",
        result.modules.len(),
        result.error_count(),
        result.warning_count()
    );
    result
}
