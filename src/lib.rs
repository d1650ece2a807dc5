//! # xref-base
//!
//! Cross-module symbol resolution and diagnostics for parsed
//! TypeScript-style modules.
//!
//! Given a set of parsed modules, the engine builds a symbol table per
//! module, links imports to the declarations they name, checks every use
//! against the kind and shape of its declaration, and flags statements that
//! can never run.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → Analysis host, goto-def, references, call hierarchy
//!   ↓
//! hir     → Symbol tables, resolution, usage and reachability checks
//!   ↓
//! syntax  → Parsed-module AST (input boundary)
//!   ↓
//! base    → Primitives (ModuleId, Span)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → hir → ide)
// ============================================================================

/// Foundation types: ModuleId, Span
pub mod base;

/// Syntax: parsed-module AST and input validation
pub mod syntax;

/// High-level IR: symbol tables, resolution and checks
pub mod hir;

/// IDE features: analysis host, goto-definition, find-references, rename, hover
pub mod ide;

// Re-export foundation types
pub use base::{LineCol, ModuleId, Span};

// Re-export the main entry points
pub use hir::{AnalysisConfig, Category, Diagnostic, Severity, analyze_workspace};
pub use ide::{Analysis, AnalysisHost};
