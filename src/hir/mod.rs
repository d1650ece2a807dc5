//! High-level IR (HIR) — Semantic model and cross-module checks.
//!
//! Everything here runs over already-parsed [`SourceModule`]s. Tables are
//! built once per run and read-only afterward; diagnostics are regenerated
//! in full every run.
//!
//! [`SourceModule`]: crate::syntax::SourceModule
//!
//! ## Key Types
//!
//! - [`SymbolTable`] — Declarations of one module, with its export namespace
//! - [`ModuleGraph`] — All modules and tables; resolves specifiers and exports
//! - [`Resolver`] — Name resolver for one module's scope
//! - [`UsageSite`] / [`Reference`] — Uses of names, before and after resolution
//! - [`Diagnostic`] — A finding, with category and severity
//!
//! ## Phases
//!
//! ```text
//! build_symbol_table(module)    ← Extract declarations (per module)
//!     │
//!     ▼
//! ModuleGraph                   ← Barrier: every table built
//!     │
//!     ▼
//! resolve_imports(module)       ← Bind imported names
//!     │
//!     ▼
//! check_module(module)          ← Kind and shape rules at each use
//! reachability(module)          ← Statements after terminators
//!     │
//!     ▼
//! aggregate                     ← One ordered list per module
//! ```

mod config;
mod diagnostics;
mod ids;
mod pipeline;
mod reachability;
mod resolve;
mod source;
mod symbols;
mod usage;

pub use config::AnalysisConfig;
pub use diagnostics::{
    Category, Diagnostic, DiagnosticCollector, RelatedInfo, Severity, aggregate, codes,
};
pub use ids::{DefId, LocalDefId};
pub use pipeline::{AnalysisResult, ModuleAnalysis, analyze_workspace};
pub use reachability::analyze_module as check_reachability;
pub use resolve::{
    BindError, Binding, ImportBinding, ImportResolution, MemberRef, ModuleEntry, ModuleGraph,
    ResolveResult, Resolver, resolve_imports,
};
pub use source::ModuleSet;
pub use symbols::{
    Arity, DeclKind, Declaration, Member, Shape, SymbolTable, Visibility, build_symbol_table,
};
pub use usage::{
    Access, Caller, Enclosing, ProvidedMember, Provider, Reference, ReferenceKind, UsageReport,
    UsageSite, UseKind, check_module, collect_usage_sites,
};
