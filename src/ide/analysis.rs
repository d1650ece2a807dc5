//! Analysis host and snapshots.

use std::sync::Arc;

use super::call_hierarchy::{self, IncomingCall, OutgoingCall};
use super::goto;
use super::hover::{self, HoverInfo};
use super::references;
use super::rename::{self, RenameError, SourceChange};
use crate::base::ModuleId;
use crate::hir::{
    AnalysisConfig, AnalysisResult, Declaration, DefId, Diagnostic, ModuleGraph, ModuleSet,
    Reference, analyze_workspace,
};
use crate::syntax::{InputError, SourceModule, validate_module};

/// Owns the module set and configuration.
///
/// Modules are added with [`set_module`](Self::set_module); a snapshot of
/// the analysis of the current set comes from [`analysis`](Self::analysis).
/// The last snapshot is reused until the module set or configuration
/// changes.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    modules: ModuleSet,
    config: AnalysisConfig,
    cached: Option<Arc<AnalysisResult>>,
}

impl AnalysisHost {
    /// Create a new host with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
        self.cached = None;
    }

    /// Add or replace a module (keyed by path) after validating it.
    pub fn set_module(&mut self, module: SourceModule) -> Result<ModuleId, InputError> {
        validate_module(&module)?;
        let id = self.modules.insert(module);
        tracing::debug!("set module {} as {:?}", self.modules.path(id).unwrap_or_default(), id);
        self.cached = None;
        Ok(id)
    }

    /// Remove a module. Returns whether it was present.
    pub fn remove_module(&mut self, module: ModuleId) -> bool {
        let removed = self.modules.remove(module).is_some();
        if removed {
            self.cached = None;
        }
        removed
    }

    /// Id of a module currently in the host.
    pub fn module_id(&self, path: &str) -> Option<ModuleId> {
        self.modules.lookup(path)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Analyze the current module set.
    pub fn analysis(&mut self) -> Analysis {
        let result = match &self.cached {
            Some(result) => Arc::clone(result),
            None => {
                let result = Arc::new(analyze_workspace(&self.modules.snapshot(), &self.config));
                self.cached = Some(Arc::clone(&result));
                result
            }
        };
        Analysis { result }
    }
}

/// Immutable result of one analysis run, answering queries.
#[derive(Clone, Debug)]
pub struct Analysis {
    result: Arc<AnalysisResult>,
}

impl Analysis {
    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    pub fn graph(&self) -> &ModuleGraph {
        self.result.graph()
    }

    /// Ordered diagnostics of one module.
    pub fn diagnostics(&self, module: ModuleId) -> &[Diagnostic] {
        self.result.diagnostics(module)
    }

    /// Diagnostics of every module, in module order.
    pub fn all_diagnostics(&self) -> Vec<(ModuleId, &[Diagnostic])> {
        self.result.all_diagnostics().collect()
    }

    pub fn is_clean(&self, module: ModuleId) -> bool {
        self.result.is_clean(module)
    }

    pub fn error_count(&self) -> usize {
        self.result.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.result.warning_count()
    }

    pub fn declaration(&self, def: DefId) -> Option<&Declaration> {
        self.graph().declaration(def)
    }

    /// The declaration `name` denotes at the top level of `module`.
    pub fn goto_definition(&self, module: ModuleId, name: &str) -> Option<&Declaration> {
        goto::goto_definition(self.graph(), module, name)
    }

    /// Every use of a declaration, or of one of its members.
    pub fn find_references(&self, def: DefId, member: Option<&str>) -> Vec<&Reference> {
        references::find_references(&self.result, def, member)
    }

    /// Kind, visibility and shape of what `name` denotes in `module`.
    pub fn hover(&self, module: ModuleId, name: &str) -> Option<HoverInfo> {
        hover::hover(self.graph(), module, name)
    }

    /// Spans to rewrite for renaming a declaration or one of its members.
    pub fn rename(&self, def: DefId, member: Option<&str>, new_name: &str) -> Result<SourceChange, RenameError> {
        rename::rename(&self.result, def, member, new_name)
    }

    pub fn incoming_calls(&self, def: DefId) -> Vec<IncomingCall> {
        call_hierarchy::incoming_calls(&self.result, def)
    }

    pub fn outgoing_calls(&self, def: DefId) -> Vec<OutgoingCall> {
        call_hierarchy::outgoing_calls(&self.result, def)
    }

    /// Modules `module` imports or re-exports from.
    pub fn dependencies(&self, module: ModuleId) -> Vec<ModuleId> {
        self.graph().dependencies(module)
    }

    /// Modules importing or re-exporting from `module`.
    pub fn dependents(&self, module: ModuleId) -> Vec<ModuleId> {
        self.graph().dependents(module)
    }
}
