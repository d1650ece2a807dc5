//! Name resolution — linking imports to the declarations they name.
//!
//! Resolution runs after every module's [`SymbolTable`] exists. From then on
//! the [`ModuleGraph`] is read-only and shared by all per-module passes.
//!
//! # Lookup order
//!
//! Inside a module a name resolves to:
//!
//! 1. a declaration in the module scope (a local declaration shadows an import),
//! 2. an import binding,
//! 3. nothing; builtins are the usage checker's concern.
//!
//! An export namespace resolves a name to the module's own exports first,
//! then to its re-export statements in source order. The first match wins,
//! silently. Re-export chains are followed with a visited set, so import
//! cycles between modules are fine and a cyclic re-export chain resolves
//! to nothing.

use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::config::AnalysisConfig;
use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::ids::DefId;
use super::symbols::{Declaration, Member, SymbolTable};
use crate::base::{ModuleId, Span};
use crate::syntax::{ExportDecl, ImportDecl, ImportSpecifier, SourceModule};

// ============================================================================
// MODULE GRAPH
// ============================================================================

/// A module together with its symbol table.
#[derive(Clone, Debug)]
pub struct ModuleEntry {
    pub id: ModuleId,
    pub source: Arc<SourceModule>,
    pub table: SymbolTable,
}

impl ModuleEntry {
    pub fn path(&self) -> &str {
        &self.source.path
    }
}

/// All modules of a run plus everything needed to resolve across them.
#[derive(Clone, Debug, Default)]
pub struct ModuleGraph {
    modules: IndexMap<ModuleId, ModuleEntry>,
    /// Normalized path → module.
    by_path: FxHashMap<String, ModuleId>,
    extensions: Vec<SmolStr>,
}

impl ModuleGraph {
    /// Assemble the graph. Entries keep their given order.
    pub fn new(entries: impl IntoIterator<Item = ModuleEntry>, config: &AnalysisConfig) -> Self {
        let mut modules = IndexMap::new();
        let mut by_path = FxHashMap::default();
        for entry in entries {
            by_path.insert(normalize_path(entry.path()), entry.id);
            modules.insert(entry.id, entry);
        }
        Self {
            modules,
            by_path,
            extensions: config.extensions.clone(),
        }
    }

    pub fn module(&self, id: ModuleId) -> Option<&ModuleEntry> {
        self.modules.get(&id)
    }

    pub fn table(&self, id: ModuleId) -> Option<&SymbolTable> {
        self.modules.get(&id).map(|entry| &entry.table)
    }

    /// All modules in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.modules.values()
    }

    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.keys().copied().collect()
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the graph has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn declaration(&self, id: DefId) -> Option<&Declaration> {
        self.table(id.module).and_then(|table| table.get(id.local))
    }

    /// Find a module by its exact (normalized) path.
    pub fn module_by_path(&self, path: &str) -> Option<ModuleId> {
        self.by_path.get(&normalize_path(path)).copied()
    }

    /// Resolve an import specifier written in `from`.
    ///
    /// Relative specifiers are joined to the importing module's directory.
    /// The path itself, then the path with each configured extension, then
    /// `path/index` with each extension are tried.
    pub fn resolve_specifier(&self, from: ModuleId, specifier: &str) -> Option<ModuleId> {
        let base = if specifier.starts_with("./") || specifier.starts_with("../") {
            let dir = self
                .module(from)
                .map(|entry| parent_dir(entry.path()))
                .unwrap_or("");
            normalize_path(&format!("{}/{}", dir, specifier))
        } else {
            normalize_path(specifier)
        };

        if let Some(&id) = self.by_path.get(&base) {
            return Some(id);
        }
        for ext in &self.extensions {
            if let Some(&id) = self.by_path.get(&format!("{}{}", base, ext)) {
                return Some(id);
            }
        }
        for ext in &self.extensions {
            if let Some(&id) = self.by_path.get(&format!("{}/index{}", base, ext)) {
                return Some(id);
            }
        }
        None
    }

    /// Resolve a name in a module's export namespace, following re-exports.
    ///
    /// `"default"` names the default export.
    pub fn resolve_export(&self, module: ModuleId, name: &str) -> Option<&Declaration> {
        let mut visited = FxHashSet::default();
        self.resolve_export_in(module, name, &mut visited)
            .and_then(|id| self.declaration(id))
    }

    fn resolve_export_in(
        &self,
        module: ModuleId,
        name: &str,
        visited: &mut FxHashSet<(ModuleId, SmolStr)>,
    ) -> Option<DefId> {
        if !visited.insert((module, SmolStr::new(name))) {
            tracing::trace!("[RESOLVE] re-export cycle at {:?} '{}'", module, name);
            return None;
        }
        let entry = self.modules.get(&module)?;

        if name == "default" {
            if let Some(decl) = entry.table.default_export() {
                return Some(decl.id);
            }
        } else if let Some(decl) = entry.table.lookup_export(name) {
            return Some(decl.id);
        }

        for export in &entry.source.exports {
            match export {
                ExportDecl::From { source, specifiers, .. } => {
                    let Some(spec) = specifiers.iter().find(|s| s.exported == name) else {
                        continue;
                    };
                    if let Some(target) = self.resolve_specifier(module, source) {
                        if let Some(id) = self.resolve_export_in(target, &spec.local, visited) {
                            return Some(id);
                        }
                    }
                }
                // `export *` never forwards the default export
                ExportDecl::All { source, .. } if name != "default" => {
                    if let Some(target) = self.resolve_specifier(module, source) {
                        if let Some(id) = self.resolve_export_in(target, name, visited) {
                            return Some(id);
                        }
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Resolve one import specifier of `module` to what it binds.
    pub fn bind(&self, module: ModuleId, import: &ImportDecl, spec: &ImportSpecifier) -> Result<Binding, BindError> {
        let target = self
            .resolve_specifier(module, &import.source)
            .ok_or(BindError::UnknownModule)?;
        match spec {
            ImportSpecifier::Named { imported, .. } => self
                .resolve_export(target, imported)
                .map(|decl| Binding::Decl(decl.id))
                .ok_or(BindError::MissingExport),
            ImportSpecifier::Default { .. } => self
                .resolve_export(target, "default")
                .map(|decl| Binding::Decl(decl.id))
                .ok_or(BindError::MissingExport),
            ImportSpecifier::Namespace { .. } => Ok(Binding::Namespace(target)),
        }
    }

    /// Resolve a name from a module's top-level scope, computing import
    /// bindings on demand.
    ///
    /// Used when checking needs another module's view of a name (for
    /// example a supertype written in the module that declares a class).
    pub fn resolve_in_module(&self, module: ModuleId, name: &str) -> ResolveResult {
        let Some(entry) = self.modules.get(&module) else {
            return ResolveResult::NotFound;
        };
        if let Some(decl) = entry.table.lookup(name) {
            return ResolveResult::Found(decl.id);
        }
        for import in &entry.source.imports {
            // First binding of a local name wins, as in `resolve_imports`
            if let Some(spec) = import.specifiers.iter().find(|s| s.local() == name) {
                return match self.bind(module, import, spec) {
                    Ok(binding) => binding.into(),
                    Err(_) => ResolveResult::FailedImport,
                };
            }
        }
        ResolveResult::NotFound
    }

    /// `Enum.member` sub-symbol of an enum declaration.
    pub fn enum_member(&self, decl: &Declaration, member: &str) -> Option<&Declaration> {
        self.table(decl.id.module)?.enum_member(&decl.name, member)
    }

    /// Find a member of a class or interface, searching supertypes.
    pub fn find_member<'a>(&'a self, owner: &'a Declaration, member: &str) -> Option<MemberRef<'a>> {
        self.collect_members(owner)
            .into_iter()
            .find(|m| m.member.name == member)
    }

    /// All members visible on a class or interface: own members first, then
    /// inherited ones. A name already seen hides later ones.
    pub fn collect_members<'a>(&'a self, owner: &'a Declaration) -> Vec<MemberRef<'a>> {
        let mut members: Vec<MemberRef<'a>> = Vec::new();
        let mut seen_names: FxHashSet<&str> = FxHashSet::default();
        let mut visited: FxHashSet<DefId> = FxHashSet::default();
        let mut queue = VecDeque::from([owner]);

        while let Some(decl) = queue.pop_front() {
            if !visited.insert(decl.id) {
                continue;
            }
            for member in decl.members() {
                if seen_names.insert(member.name.as_str()) {
                    members.push(MemberRef { owner: decl, member });
                }
            }
            for supertype in decl.supertypes() {
                if let ResolveResult::Found(id) = self.resolve_in_module(decl.id.module, &supertype.name) {
                    if let Some(base) = self.declaration(id) {
                        if base.kind.has_members() {
                            queue.push_back(base);
                        }
                    }
                }
            }
        }
        members
    }

    /// Modules a module imports or re-exports from, in source order.
    pub fn dependencies(&self, module: ModuleId) -> Vec<ModuleId> {
        let Some(entry) = self.modules.get(&module) else {
            return Vec::new();
        };
        let sources = entry
            .source
            .imports
            .iter()
            .map(|import| &import.source)
            .chain(entry.source.exports.iter().filter_map(|export| match export {
                ExportDecl::From { source, .. } | ExportDecl::All { source, .. } => Some(source),
                _ => None,
            }));

        let mut deps = Vec::new();
        for source in sources {
            if let Some(target) = self.resolve_specifier(module, source) {
                if !deps.contains(&target) {
                    deps.push(target);
                }
            }
        }
        deps
    }

    /// Modules that depend on `module`, in module order.
    pub fn dependents(&self, module: ModuleId) -> Vec<ModuleId> {
        self.modules
            .keys()
            .copied()
            .filter(|&other| self.dependencies(other).contains(&module))
            .collect()
    }
}

/// A member found on a class or interface, with the declaration that
/// declares it.
#[derive(Clone, Copy, Debug)]
pub struct MemberRef<'a> {
    pub owner: &'a Declaration,
    pub member: &'a Member,
}

/// Collapse `.` and `..` segments, drop a leading `./`.
fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(&last) if last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

// ============================================================================
// IMPORT RESOLUTION
// ============================================================================

/// What an import specifier binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    Decl(DefId),
    Namespace(ModuleId),
}

/// Why an import specifier failed to bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindError {
    UnknownModule,
    MissingExport,
}

/// A local name introduced by an import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportBinding {
    /// `None` when resolution failed (already reported).
    pub binding: Option<Binding>,
    pub span: Span,
    /// Target module, when it exists.
    pub target: Option<ModuleId>,
}

/// Result of resolving one module's imports.
#[derive(Clone, Debug, Default)]
pub struct ImportResolution {
    pub bindings: IndexMap<SmolStr, ImportBinding>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ImportResolution {
    pub fn get(&self, local: &str) -> Option<&ImportBinding> {
        self.bindings.get(local)
    }
}

/// Resolve every import specifier of a module.
///
/// Each specifier that cannot be resolved produces exactly one
/// UnresolvedImport diagnostic at the specifier, and its local name is
/// bound to "failed" so later uses are not reported again.
pub fn resolve_imports(graph: &ModuleGraph, module: ModuleId) -> ImportResolution {
    let mut resolution = ImportResolution::default();
    let Some(entry) = graph.module(module) else {
        return resolution;
    };
    let mut diagnostics = DiagnosticCollector::new(module);

    for import in &entry.source.imports {
        let target = graph.resolve_specifier(module, &import.source);
        for spec in &import.specifiers {
            let local = spec.local();
            let span = spec.span();
            if let Some(previous) = resolution.bindings.get(local) {
                diagnostics.duplicate_declaration(span, local, previous.span);
                continue;
            }

            let binding = match graph.bind(module, import, spec) {
                Ok(binding) => {
                    tracing::trace!("[RESOLVE] {:?} imports '{}' -> {:?}", module, local, binding);
                    Some(binding)
                }
                Err(BindError::UnknownModule) => {
                    tracing::debug!("[RESOLVE] {:?}: module '{}' not found", module, import.source);
                    diagnostics.unresolved_module(span, requested_name(spec), &import.source);
                    None
                }
                Err(BindError::MissingExport) => {
                    tracing::debug!(
                        "[RESOLVE] {:?}: '{}' not exported by '{}'",
                        module,
                        requested_name(spec),
                        import.source
                    );
                    diagnostics.unresolved_import(span, requested_name(spec), &import.source);
                    None
                }
            };

            resolution.bindings.insert(
                local.clone(),
                ImportBinding {
                    binding,
                    span,
                    target,
                },
            );
        }
    }

    resolution.diagnostics = diagnostics.finish();
    resolution
}

fn requested_name(spec: &ImportSpecifier) -> &str {
    match spec {
        ImportSpecifier::Named { imported, .. } => imported,
        ImportSpecifier::Default { .. } => "default",
        ImportSpecifier::Namespace { local, .. } => local,
    }
}

// ============================================================================
// RESOLUTION RESULT
// ============================================================================

/// Result of resolving a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Resolved to a declaration.
    Found(DefId),
    /// Resolved to a namespace import.
    Namespace(ModuleId),
    /// Bound by an import that failed to resolve; already reported.
    FailedImport,
    /// Not visible at all.
    NotFound,
}

impl ResolveResult {
    pub fn def(&self) -> Option<DefId> {
        match self {
            ResolveResult::Found(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_) | ResolveResult::Namespace(_))
    }
}

impl From<Binding> for ResolveResult {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::Decl(id) => ResolveResult::Found(id),
            Binding::Namespace(module) => ResolveResult::Namespace(module),
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolver for one module's top-level scope, using its resolved imports.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    graph: &'a ModuleGraph,
    module: ModuleId,
    imports: &'a ImportResolution,
}

impl<'a> Resolver<'a> {
    pub fn new(graph: &'a ModuleGraph, module: ModuleId, imports: &'a ImportResolution) -> Self {
        Self {
            graph,
            module,
            imports,
        }
    }

    pub fn graph(&self) -> &'a ModuleGraph {
        self.graph
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Resolve a simple name: module scope first, then imports.
    pub fn resolve(&self, name: &str) -> ResolveResult {
        if let Some(decl) = self.graph.table(self.module).and_then(|t| t.lookup(name)) {
            return ResolveResult::Found(decl.id);
        }
        match self.imports.get(name) {
            Some(ImportBinding {
                binding: Some(binding),
                ..
            }) => (*binding).into(),
            Some(_) => ResolveResult::FailedImport,
            None => ResolveResult::NotFound,
        }
    }

    /// Resolve a name straight to its declaration.
    pub fn resolve_decl(&self, name: &str) -> Option<&'a Declaration> {
        self.resolve(name).def().and_then(|id| self.graph.declaration(id))
    }
}
