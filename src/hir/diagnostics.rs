//! Diagnostics — Semantic error reporting.
//!
//! This module provides the diagnostic types produced by the symbol table
//! builder, the import resolver, the usage checker and the reachability
//! analyzer, plus the aggregation step that orders them per module.

use std::fmt;
use std::sync::Arc;

use super::symbols::{Declaration, DeclKind};
use crate::base::{ModuleId, Span};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// What kind of defect a diagnostic reports.
///
/// Declaration order is the order diagnostics are reported in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// A referenced symbol, module or member cannot be found.
    UnresolvedImport,
    /// A symbol is used incompatibly with its kind, or declared twice.
    KindMismatch,
    /// A value claiming to satisfy an interface lacks a required member.
    MissingInterfaceMember,
    /// Statements after a terminator.
    UnreachableCode,
}

impl Category {
    /// Severity is fixed per category.
    pub fn severity(self) -> Severity {
        match self {
            Category::UnreachableCode => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::UnresolvedImport => "UnresolvedImport",
            Category::KindMismatch => "KindMismatch",
            Category::MissingInterfaceMember => "MissingInterfaceMember",
            Category::UnreachableCode => "UnreachableCode",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The module containing this diagnostic.
    pub module: ModuleId,
    /// Where in the module.
    pub span: Span,
    /// Severity level.
    pub severity: Severity,
    /// Defect category.
    pub category: Category,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Optional related information.
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedInfo {
    /// The module containing this info.
    pub module: ModuleId,
    pub span: Span,
    /// The message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new diagnostic; severity follows the category.
    pub fn new(module: ModuleId, span: Span, category: Category, message: impl Into<Arc<str>>) -> Self {
        Self {
            module,
            span,
            severity: category.severity(),
            category,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.severity.as_str())?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
pub mod codes {
    /// Imported name not exported by the target module.
    pub const UNRESOLVED_IMPORT: &str = "E0001";
    /// Import specifier names a module that is not in the workspace.
    pub const UNRESOLVED_MODULE: &str = "E0002";
    /// Name not found in any scope.
    pub const UNRESOLVED_NAME: &str = "E0003";
    /// Member not found on an enum, class, interface or namespace.
    pub const UNRESOLVED_MEMBER: &str = "E0004";
    /// Symbol used in a way its kind does not allow.
    pub const KIND_MISMATCH: &str = "E0005";
    /// Name declared or bound twice.
    pub const DUPLICATE_DECLARATION: &str = "E0006";
    /// Wrong number of arguments.
    pub const ARITY_MISMATCH: &str = "E0007";
    /// Interface member missing from the providing shape.
    pub const MISSING_INTERFACE_MEMBER: &str = "E0008";

    /// Statement after return/throw/break/continue.
    pub const UNREACHABLE_CODE: &str = "W0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics for one module during analysis.
#[derive(Clone, Debug)]
pub struct DiagnosticCollector {
    module: ModuleId,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector for a module.
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            diagnostics: Vec::new(),
        }
    }

    /// The module this collector reports into.
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn report(&mut self, span: Span, category: Category, code: &str, message: String) -> &mut Diagnostic {
        self.diagnostics
            .push(Diagnostic::new(self.module, span, category, message).with_code(code));
        let last = self.diagnostics.len() - 1;
        &mut self.diagnostics[last]
    }

    /// Imported name missing from the target module's exports.
    pub fn unresolved_import(&mut self, span: Span, name: &str, source: &str) {
        self.report(
            span,
            Category::UnresolvedImport,
            codes::UNRESOLVED_IMPORT,
            format!("module '{}' has no exported member '{}'", source, name),
        );
    }

    /// Import source that names no module in the workspace.
    pub fn unresolved_module(&mut self, span: Span, name: &str, source: &str) {
        self.report(
            span,
            Category::UnresolvedImport,
            codes::UNRESOLVED_MODULE,
            format!("cannot find module '{}' (importing '{}')", source, name),
        );
    }

    /// Name not visible in any scope.
    pub fn unresolved_name(&mut self, span: Span, name: &str) {
        self.report(
            span,
            Category::UnresolvedImport,
            codes::UNRESOLVED_NAME,
            format!("cannot find name '{}'", name),
        );
    }

    /// Member missing from an enum, class, interface or namespace.
    pub fn unresolved_member(&mut self, span: Span, owner: &str, member: &str) {
        self.report(
            span,
            Category::UnresolvedImport,
            codes::UNRESOLVED_MEMBER,
            format!("'{}' has no member '{}'", owner, member),
        );
    }

    /// A symbol used as something its kind cannot be.
    pub fn kind_mismatch(&mut self, span: Span, decl: &Declaration, usage: &str) {
        let related = RelatedInfo {
            module: decl.id.module,
            span: decl.span,
            message: Arc::from(format!("'{}' is declared here", decl.name)),
        };
        self.report(
            span,
            Category::KindMismatch,
            codes::KIND_MISMATCH,
            format!("'{}' is {} and cannot be {}", decl.name, decl.kind.with_article(), usage),
        )
        .related
        .push(related);
    }

    /// Member of the wrong category (method vs property).
    pub fn member_kind_mismatch(&mut self, span: Span, owner: &str, member: &str, expected: &str, found: &str) {
        self.report(
            span,
            Category::KindMismatch,
            codes::KIND_MISMATCH,
            format!(
                "member '{}' of '{}' is a {} but a {} is required",
                member, owner, found, expected
            ),
        );
    }

    /// Second declaration (or import binding) of a name.
    pub fn duplicate_declaration(&mut self, span: Span, name: &str, existing: Span) {
        let module = self.module;
        self.report(
            span,
            Category::KindMismatch,
            codes::DUPLICATE_DECLARATION,
            format!("duplicate declaration: '{}' is already declared", name),
        )
        .related
        .push(RelatedInfo {
            module,
            span: existing,
            message: Arc::from(format!("previous declaration of '{}'", name)),
        });
    }

    /// Call or instantiation with the wrong number of arguments.
    pub fn arity_mismatch(&mut self, span: Span, name: &str, expected: &str, found: usize) {
        self.report(
            span,
            Category::KindMismatch,
            codes::ARITY_MISMATCH,
            format!("'{}' expects {} argument(s) but got {}", name, expected, found),
        );
    }

    /// Required interface member absent from the providing shape.
    pub fn missing_interface_member(&mut self, span: Span, provider: &str, interface: &str, member: &str) {
        self.report(
            span,
            Category::MissingInterfaceMember,
            codes::MISSING_INTERFACE_MEMBER,
            format!(
                "{} is missing member '{}' required by interface '{}'",
                provider, member, interface
            ),
        );
    }

    /// Statement that can never execute.
    pub fn unreachable(&mut self, span: Span) {
        self.report(
            span,
            Category::UnreachableCode,
            codes::UNREACHABLE_CODE,
            "unreachable code detected".to_string(),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Get the collected diagnostics.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Order one module's diagnostics: by category, then source position.
///
/// The sort is stable, so diagnostics at the same position keep the order
/// their producing phase emitted them in.
pub fn aggregate(parts: impl IntoIterator<Item = Vec<Diagnostic>>) -> Vec<Diagnostic> {
    let mut all: Vec<Diagnostic> = parts.into_iter().flatten().collect();
    all.sort_by_key(|d| (d.category, d.span));
    all
}

impl DeclKind {
    /// "a function", "an interface", ...
    pub fn with_article(self) -> String {
        let name = self.display();
        let article = match name.as_bytes().first() {
            Some(b'a' | b'e' | b'i' | b'o' | b'u') => "an",
            _ => "a",
        };
        format!("{} {}", article, name)
    }
}
