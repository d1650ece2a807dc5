//! Usage checking — every reference checked against the declaration it names.
//!
//! Two steps per module:
//!
//! 1. [`collect_usage_sites`] walks declarations, bodies and top-level
//!    statements with a lexical scope stack and records each place a
//!    module-level name is used. This step is purely syntactic.
//! 2. [`check_module`] resolves each site and applies the kind rules,
//!    recording a [`Reference`] for everything that resolves.
//!
//! Locals are never usage sites. A local whose type is syntactically known
//! (an annotation, a `new C()` initializer, or a copy of such a local) makes
//! member accesses on it usage sites of that type.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::config::AnalysisConfig;
use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::ids::DefId;
use super::resolve::{ImportResolution, ModuleGraph, ResolveResult, Resolver};
use super::symbols::{DeclKind, Declaration, Shape};
use crate::base::{ModuleId, Span};
use crate::syntax::{
    ArrowBody, ClassMemberKind, Expr, ExprKind, Function, Item, ItemKind, MemberKind, Param,
    SourceModule, Stmt, StmtKind, TypeExpr,
};

// ============================================================================
// USAGE SITES
// ============================================================================

/// How a member is accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Call { args: usize },
    New { args: usize },
}

/// The kind of a use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UseKind {
    /// `f(args)`.
    Call { args: usize },
    /// `new C(args)`.
    Instantiate { args: usize },
    /// A type position: annotations, return types, alias bodies.
    TypeAnnotation,
    /// A value claims to satisfy the named interface's shape.
    Implements { provider: Provider },
    /// `X.member`. `instance` is set when `X` is a type known from a typed
    /// local or `this`, rather than the declaration itself.
    MemberAccess {
        member: SmolStr,
        access: Access,
        instance: bool,
    },
    /// Any other read of the name.
    Value,
    /// `extends X`; `class` is set for class heritage.
    Inherit { class: bool },
}

/// Whatever supplies members for an implements check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    /// Fields of an object literal.
    Literal(Vec<ProvidedMember>),
    /// An instance of the named class or interface.
    Instance(SmolStr),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvidedMember {
    pub name: SmolStr,
    pub kind: MemberKind,
}

/// The declaration (and member) a site sits in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enclosing {
    pub item: SmolStr,
    pub member: Option<SmolStr>,
}

/// One use of a module-level name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageSite {
    /// The name as written; dotted for enum members in type positions.
    pub name: SmolStr,
    pub kind: UseKind,
    pub span: Span,
    /// `None` for top-level statements.
    pub enclosing: Option<Enclosing>,
}

// ============================================================================
// REFERENCES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Call,
    Instantiate,
    Type,
    Implements,
    Member,
    Value,
    Inherit,
}

impl ReferenceKind {
    /// Calls and instantiations, the edges of the call hierarchy.
    pub fn is_call(self) -> bool {
        matches!(self, ReferenceKind::Call | ReferenceKind::Instantiate)
    }
}

/// The declaration a reference occurs in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Caller {
    pub decl: DefId,
    pub member: Option<SmolStr>,
}

/// A resolved use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub module: ModuleId,
    pub span: Span,
    pub target: DefId,
    /// Member of `target`, for member accesses on classes and interfaces.
    pub member: Option<SmolStr>,
    pub kind: ReferenceKind,
    pub caller: Option<Caller>,
}

/// Output of checking one module.
#[derive(Clone, Debug, Default)]
pub struct UsageReport {
    pub references: Vec<Reference>,
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// SITE COLLECTION
// ============================================================================

/// Type of a local, when known by name.
type LocalType = Option<SmolStr>;

struct SiteCollector {
    sites: Vec<UsageSite>,
    scopes: Vec<FxHashMap<SmolStr, LocalType>>,
    /// Class whose body is being walked, for `this`.
    class: Option<SmolStr>,
    enclosing: Option<Enclosing>,
}

/// Collect every use of a module-level name in a module.
pub fn collect_usage_sites(source: &SourceModule) -> Vec<UsageSite> {
    let mut collector = SiteCollector {
        sites: Vec::new(),
        scopes: vec![FxHashMap::default()],
        class: None,
        enclosing: None,
    };
    for item in &source.items {
        collector.item(item);
    }
    collector.enclosing = None;
    collector.class = None;
    collector.stmts(&source.statements);
    collector.sites
}

impl SiteCollector {
    fn push(&mut self, name: &SmolStr, kind: UseKind, span: Span) {
        self.sites.push(UsageSite {
            name: name.clone(),
            kind,
            span,
            enclosing: self.enclosing.clone(),
        });
    }

    fn local(&self, name: &str) -> Option<&LocalType> {
        self.scopes.iter().rev().find_map(|frame| frame.get(name))
    }

    fn declare(&mut self, name: &SmolStr, ty: LocalType) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.insert(name.clone(), ty);
        }
    }

    fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        self.scopes.push(FxHashMap::default());
        f(self);
        self.scopes.pop();
    }

    fn enter(&mut self, item: &SmolStr, member: Option<&SmolStr>) {
        self.enclosing = Some(Enclosing {
            item: item.clone(),
            member: member.cloned(),
        });
    }

    fn item(&mut self, item: &Item) {
        self.enter(&item.name, None);
        self.class = None;
        match &item.kind {
            ItemKind::Function(function) => self.function(function),
            ItemKind::Interface(interface) => {
                for base in &interface.extends {
                    self.push(&base.name, UseKind::Inherit { class: false }, base.span);
                }
            }
            ItemKind::Class(class) => {
                if let Some(base) = &class.extends {
                    self.push(&base.name, UseKind::Inherit { class: true }, base.span);
                }
                for interface in &class.implements {
                    let provider = Provider::Instance(item.name.clone());
                    self.push(&interface.name, UseKind::Implements { provider }, interface.span);
                }
                self.class = Some(item.name.clone());
                if let Some(constructor) = &class.constructor {
                    self.enter(&item.name, Some(&SmolStr::new("constructor")));
                    self.function(constructor);
                }
                for member in &class.members {
                    self.enter(&item.name, Some(&member.name));
                    match &member.kind {
                        ClassMemberKind::Method(function) => self.function(function),
                        ClassMemberKind::Property { ty, init } => {
                            if let Some(ty) = ty {
                                self.type_expr(ty);
                            }
                            if let Some(init) = init {
                                self.expr(init);
                            }
                        }
                    }
                }
                self.class = None;
            }
            ItemKind::TypeAlias(ty) => self.type_expr(ty),
            ItemKind::Constant(constant) => {
                self.binding(constant.ty.as_ref(), Some(&constant.init), item.span);
            }
            ItemKind::Enum(_) => {}
        }
    }

    fn function(&mut self, function: &Function) {
        if let Some(ty) = &function.return_type {
            self.type_expr(ty);
        }
        self.scoped(|this| {
            this.params(&function.params);
            this.stmts(&function.body);
        });
    }

    fn params(&mut self, params: &[Param]) {
        for param in params {
            if let Some(ty) = &param.ty {
                self.type_expr(ty);
            }
            let ty = param.ty.as_ref().and_then(|t| t.as_named()).map(|r| r.name.clone());
            self.declare(&param.name, ty);
        }
    }

    fn type_expr(&mut self, ty: &TypeExpr) {
        let mut refs = Vec::new();
        ty.for_each_ref(&mut |r| refs.push((r.name.clone(), r.span)));
        for (name, span) in refs {
            self.push(&name, UseKind::TypeAnnotation, span);
        }
    }

    /// Annotation plus initializer of a constant or `let`. Returns the
    /// binding's known type.
    fn binding(&mut self, ty: Option<&TypeExpr>, init: Option<&Expr>, span: Span) -> LocalType {
        let named = ty.and_then(|t| t.as_named());
        match (named, init.and_then(|e| self.provider_of(e))) {
            (Some(interface), Some(provider)) => {
                self.push(&interface.name, UseKind::Implements { provider }, span);
            }
            _ => {
                if let Some(ty) = ty {
                    self.type_expr(ty);
                }
            }
        }
        if let Some(init) = init {
            self.expr(init);
        }
        named
            .map(|r| r.name.clone())
            .or_else(|| init.and_then(|e| self.type_of(e)))
    }

    fn provider_of(&self, init: &Expr) -> Option<Provider> {
        match &init.kind {
            ExprKind::Object(fields) => Some(Provider::Literal(
                fields
                    .iter()
                    .map(|f| ProvidedMember {
                        name: f.name.clone(),
                        kind: f.member_kind(),
                    })
                    .collect(),
            )),
            _ => self.type_of(init).map(Provider::Instance),
        }
    }

    /// Type of an expression when syntactically obvious.
    fn type_of(&self, expr: &Expr) -> LocalType {
        match &expr.kind {
            ExprKind::New { callee, .. } => match &callee.kind {
                ExprKind::Ident(name) if self.local(name).is_none() => Some(name.clone()),
                _ => None,
            },
            ExprKind::Ident(name) => self.local(name).cloned().flatten(),
            ExprKind::This => self.class.clone(),
            _ => None,
        }
    }

    fn stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn block(&mut self, stmts: &[Stmt]) {
        self.scoped(|this| this.stmts(stmts));
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Throw(expr) => self.expr(expr),
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.expr(value);
                }
            }
            StmtKind::Let { name, ty, init } => {
                let local_ty = self.binding(ty.as_ref(), init.as_ref(), stmt.span);
                self.declare(name, local_ty);
            }
            StmtKind::Break | StmtKind::Continue => {}
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(cond);
                self.block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.block(else_branch);
                }
            }
            StmtKind::Loop { binding, head, body } => self.scoped(|this| {
                for expr in head {
                    this.expr(expr);
                }
                if let Some(binding) = binding {
                    this.declare(binding, None);
                }
                this.stmts(body);
            }),
            StmtKind::Try { body, catch, finally } => {
                self.block(body);
                if let Some(catch) = catch {
                    self.scoped(|this| {
                        if let Some(param) = &catch.param {
                            this.declare(param, None);
                        }
                        this.stmts(&catch.body);
                    });
                }
                if let Some(finally) = finally {
                    self.block(finally);
                }
            }
            StmtKind::Block(stmts) => self.block(stmts),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Ident(name) => {
                if self.local(name).is_none() {
                    self.push(name, UseKind::Value, expr.span);
                }
            }
            ExprKind::This | ExprKind::Literal(_) => {}
            ExprKind::Template(parts) | ExprKind::Array(parts) => {
                for part in parts {
                    self.expr(part);
                }
            }
            ExprKind::Binary(lhs, rhs) => {
                self.expr(lhs);
                self.expr(rhs);
            }
            ExprKind::Call { callee, args } => {
                let count = args.len();
                match &callee.kind {
                    ExprKind::Ident(name) if self.local(name).is_none() => {
                        self.push(name, UseKind::Call { args: count }, callee.span);
                    }
                    ExprKind::Member { object, property } => {
                        self.member(object, property, Access::Call { args: count }, callee.span);
                    }
                    _ => self.expr(callee),
                }
                for arg in args {
                    self.expr(arg);
                }
            }
            ExprKind::New { callee, args } => {
                let count = args.len();
                match &callee.kind {
                    ExprKind::Ident(name) if self.local(name).is_none() => {
                        self.push(name, UseKind::Instantiate { args: count }, callee.span);
                    }
                    ExprKind::Member { object, property } => {
                        self.member(object, property, Access::New { args: count }, callee.span);
                    }
                    _ => self.expr(callee),
                }
                for arg in args {
                    self.expr(arg);
                }
            }
            ExprKind::Member { object, property } => {
                self.member(object, property, Access::Read, expr.span);
            }
            ExprKind::Object(fields) => {
                for field in fields {
                    self.expr(&field.value);
                }
            }
            ExprKind::Arrow { params, body } => self.scoped(|this| {
                this.params(params);
                match body {
                    ArrowBody::Expr(value) => this.expr(value),
                    ArrowBody::Block(stmts) => this.stmts(stmts),
                }
            }),
            ExprKind::Assign { target, value } => {
                self.expr(target);
                self.expr(value);
            }
        }
    }

    fn member(&mut self, object: &Expr, property: &SmolStr, access: Access, span: Span) {
        let kind = |instance| UseKind::MemberAccess {
            member: property.clone(),
            access,
            instance,
        };
        match &object.kind {
            ExprKind::Ident(name) => match self.local(name) {
                Some(Some(ty)) => {
                    let ty = ty.clone();
                    self.push(&ty, kind(true), span);
                }
                Some(None) => {}
                None => self.push(name, kind(false), span),
            },
            ExprKind::This => {
                if let Some(class) = self.class.clone() {
                    self.push(&class, kind(true), span);
                }
            }
            _ => {
                self.expr(object);
                if let Some(ty) = self.type_of(object) {
                    self.push(&ty, kind(true), span);
                }
            }
        }
    }
}

// ============================================================================
// CHECKING
// ============================================================================

/// Check every usage site of one module.
pub fn check_module(
    graph: &ModuleGraph,
    module: ModuleId,
    imports: &ImportResolution,
    config: &AnalysisConfig,
) -> UsageReport {
    let Some(entry) = graph.module(module) else {
        return UsageReport::default();
    };
    let sites = collect_usage_sites(&entry.source);
    let mut checker = UsageChecker {
        resolver: Resolver::new(graph, module, imports),
        config,
        diagnostics: DiagnosticCollector::new(module),
        references: Vec::new(),
    };
    for site in &sites {
        checker.check(site);
    }

    tracing::trace!(
        "[USAGE] {:?}: {} sites, {} references, {} diagnostics",
        module,
        sites.len(),
        checker.references.len(),
        checker.diagnostics.diagnostics().len()
    );

    UsageReport {
        references: checker.references,
        diagnostics: checker.diagnostics.finish(),
    }
}

struct UsageChecker<'a> {
    resolver: Resolver<'a>,
    config: &'a AnalysisConfig,
    diagnostics: DiagnosticCollector,
    references: Vec<Reference>,
}

/// What a site's head name resolved to.
enum Subject<'a> {
    Decl(&'a Declaration),
    Namespace(ModuleId),
    /// Builtin, or an import that already failed.
    Unchecked,
}

impl<'a> UsageChecker<'a> {
    fn graph(&self) -> &'a ModuleGraph {
        self.resolver.graph()
    }

    fn check(&mut self, site: &UsageSite) {
        if let UseKind::MemberAccess {
            member,
            access,
            instance: true,
        } = &site.kind
        {
            self.check_instance_member(site, member, *access);
            return;
        }

        let (head, rest) = match (&site.kind, site.name.split_once('.')) {
            (UseKind::TypeAnnotation | UseKind::Implements { .. }, Some((head, rest))) => (head, Some(rest)),
            _ => (site.name.as_str(), None),
        };

        let subject = match self.resolve_subject(head, site.span) {
            Some(subject) => subject,
            None => return,
        };

        match (subject, rest) {
            (Subject::Unchecked, _) => {}
            (Subject::Decl(decl), Some(member)) => self.check_qualified_type(site, decl, member),
            (Subject::Namespace(ns), Some(member)) => {
                self.check_namespace_member(site, ns, head, member, None);
            }
            (Subject::Decl(decl), None) => self.check_decl(site, decl),
            (Subject::Namespace(ns), None) => {
                if let UseKind::MemberAccess { member, access, .. } = &site.kind {
                    self.check_namespace_member(site, ns, head, member, Some(*access));
                }
            }
        }
    }

    /// The declaration a type name denotes, without reporting anything.
    /// Qualified names go through a namespace import or an enum.
    fn resolve_type_name(&self, name: &str) -> Option<&'a Declaration> {
        let graph = self.graph();
        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        match (self.resolver.resolve(head), rest) {
            (ResolveResult::Found(id), None) => graph.declaration(id),
            (ResolveResult::Found(id), Some(member)) => graph.enum_member(graph.declaration(id)?, member),
            (ResolveResult::Namespace(ns), Some(member)) => graph.resolve_export(ns, member),
            _ => None,
        }
    }

    /// `x.member` where `x` is a typed local or `this`. The annotation or
    /// instantiation that gave `x` its type is a site of its own, so an
    /// unresolved type is not reported again here.
    fn check_instance_member(&mut self, site: &UsageSite, member: &str, access: Access) {
        let Some(ty) = self.resolve_type_name(&site.name) else {
            return;
        };
        if ty.kind.has_members() {
            self.check_member(site, ty, member, access, true);
        } else {
            // Aliases, enums and enum members carry no tracked members
            self.record(site, ty, None, ReferenceKind::Type);
        }
    }

    /// Resolve a head name. `None` once an UnresolvedImport is reported.
    fn resolve_subject(&mut self, name: &str, span: Span) -> Option<Subject<'a>> {
        match self.resolver.resolve(name) {
            ResolveResult::Found(id) => {
                tracing::trace!("[USAGE] '{}' -> {:?}", name, id);
                self.graph().declaration(id).map(Subject::Decl)
            }
            ResolveResult::Namespace(module) => Some(Subject::Namespace(module)),
            ResolveResult::FailedImport => Some(Subject::Unchecked),
            ResolveResult::NotFound if self.config.is_builtin(name) => Some(Subject::Unchecked),
            ResolveResult::NotFound => {
                tracing::debug!("[USAGE] {:?}: cannot find '{}'", self.resolver.module(), name);
                self.diagnostics.unresolved_name(span, name);
                None
            }
        }
    }

    fn check_decl(&mut self, site: &UsageSite, decl: &'a Declaration) {
        let span = site.span;
        match &site.kind {
            UseKind::Call { args } => {
                self.record(site, decl, None, ReferenceKind::Call);
                self.check_call(span, decl, *args);
            }
            UseKind::Instantiate { args } => {
                self.record(site, decl, None, ReferenceKind::Instantiate);
                self.check_instantiate(span, decl, *args);
            }
            UseKind::TypeAnnotation => {
                self.record(site, decl, None, ReferenceKind::Type);
                self.check_type(span, decl);
            }
            UseKind::Implements { provider } => {
                self.record(site, decl, None, ReferenceKind::Implements);
                self.check_implements(span, decl, provider);
            }
            UseKind::Value => {
                self.record(site, decl, None, ReferenceKind::Value);
                self.check_value(span, decl);
            }
            UseKind::Inherit { class } => {
                self.record(site, decl, None, ReferenceKind::Inherit);
                let allowed = if *class {
                    decl.kind == DeclKind::Class
                } else {
                    decl.kind.has_members()
                };
                if !allowed {
                    let usage = if *class {
                        "extended by a class"
                    } else {
                        "extended by an interface"
                    };
                    self.diagnostics.kind_mismatch(span, decl, usage);
                }
            }
            UseKind::MemberAccess {
                member,
                access,
                instance,
            } => self.check_member(site, decl, member, *access, *instance),
        }
    }

    fn check_call(&mut self, span: Span, decl: &Declaration, args: usize) {
        match &decl.shape {
            Shape::Function { arity } => {
                if self.config.check_arity && !arity.accepts(args) {
                    self.diagnostics.arity_mismatch(span, &decl.name, &arity.describe(), args);
                }
            }
            _ => self.diagnostics.kind_mismatch(span, decl, "called"),
        }
    }

    fn check_instantiate(&mut self, span: Span, decl: &Declaration, args: usize) {
        match &decl.shape {
            Shape::Class { constructor, .. } => {
                if self.config.check_arity && !constructor.accepts(args) {
                    self.diagnostics
                        .arity_mismatch(span, &decl.name, &constructor.describe(), args);
                }
            }
            _ => self.diagnostics.kind_mismatch(span, decl, "instantiated with 'new'"),
        }
    }

    fn check_type(&mut self, span: Span, decl: &Declaration) {
        if !decl.kind.is_type() && !decl.is_enum_member() {
            self.diagnostics.kind_mismatch(span, decl, "used as a type");
        }
    }

    fn check_value(&mut self, span: Span, decl: &Declaration) {
        if !decl.kind.is_value() {
            self.diagnostics.kind_mismatch(span, decl, "used as a value");
        }
    }

    /// `Enum.Member` in a type or implements position.
    fn check_qualified_type(&mut self, site: &UsageSite, decl: &'a Declaration, member: &str) {
        if decl.kind != DeclKind::Enum {
            self.diagnostics.unresolved_member(site.span, &decl.name, member);
            return;
        }
        match self.graph().enum_member(decl, member) {
            Some(sub) => self.check_decl(site, sub),
            None => self.diagnostics.unresolved_member(site.span, &decl.name, member),
        }
    }

    /// `ns.name`: resolve in the namespace's exports, then check the use
    /// as if the name had been written directly.
    fn check_namespace_member(
        &mut self,
        site: &UsageSite,
        ns: ModuleId,
        ns_name: &str,
        member: &str,
        access: Option<Access>,
    ) {
        let Some(decl) = self.graph().resolve_export(ns, member) else {
            self.diagnostics.unresolved_member(site.span, ns_name, member);
            return;
        };
        let kind = match (access, &site.kind) {
            (None, UseKind::Implements { provider }) => UseKind::Implements {
                provider: provider.clone(),
            },
            (None, _) => UseKind::TypeAnnotation,
            (Some(Access::Read), _) => UseKind::Value,
            (Some(Access::Call { args }), _) => UseKind::Call { args },
            (Some(Access::New { args }), _) => UseKind::Instantiate { args },
        };
        let direct = UsageSite {
            name: decl.name.clone(),
            kind,
            span: site.span,
            enclosing: site.enclosing.clone(),
        };
        self.check_decl(&direct, decl);
    }

    fn check_member(&mut self, site: &UsageSite, decl: &'a Declaration, member: &str, access: Access, instance: bool) {
        let span = site.span;
        match decl.kind {
            DeclKind::Enum => match self.graph().enum_member(decl, member) {
                Some(sub) => {
                    self.record(site, sub, None, ReferenceKind::Value);
                    if access != Access::Read {
                        let usage = if matches!(access, Access::New { .. }) {
                            "instantiated with 'new'"
                        } else {
                            "called"
                        };
                        self.diagnostics.kind_mismatch(span, sub, usage);
                    }
                }
                None => self.diagnostics.unresolved_member(span, &decl.name, member),
            },
            DeclKind::Interface if !instance => {
                self.record(site, decl, None, ReferenceKind::Value);
                self.diagnostics.kind_mismatch(span, decl, "used as a value");
            }
            DeclKind::Interface | DeclKind::Class => {
                let Some(found) = self.graph().find_member(decl, member) else {
                    if !instance {
                        self.record(site, decl, None, ReferenceKind::Value);
                    }
                    self.diagnostics.unresolved_member(span, &decl.name, member);
                    return;
                };
                let kind = match access {
                    Access::Call { .. } | Access::New { .. } => ReferenceKind::Call,
                    Access::Read => ReferenceKind::Member,
                };
                self.record(site, found.owner, Some(member), kind);

                if let Access::Call { args } = access {
                    match found.member.kind {
                        MemberKind::Property => self.diagnostics.member_kind_mismatch(
                            span,
                            &found.owner.name,
                            member,
                            "method",
                            "property",
                        ),
                        MemberKind::Method { params } => {
                            if self.config.check_arity && args > params {
                                self.diagnostics.arity_mismatch(
                                    span,
                                    member,
                                    &format!("at most {}", params),
                                    args,
                                );
                            }
                        }
                    }
                }
            }
            DeclKind::TypeAlias => {
                self.record(site, decl, None, ReferenceKind::Value);
                self.diagnostics.kind_mismatch(span, decl, "used as a value");
            }
            // Members of functions and constants are not tracked
            DeclKind::Function | DeclKind::Constant => {
                self.record(site, decl, None, ReferenceKind::Value);
            }
        }
    }

    fn check_implements(&mut self, span: Span, interface: &'a Declaration, provider: &Provider) {
        if !interface.kind.has_members() {
            self.check_type(span, interface);
            return;
        }

        let (description, provided): (String, Vec<ProvidedMember>) = match provider {
            Provider::Literal(fields) => ("object literal".to_string(), fields.clone()),
            Provider::Instance(name) => {
                // Unresolved providers are reported at their own site
                let Some(decl) = self.resolve_type_name(name) else {
                    return;
                };
                if !decl.kind.has_members() {
                    return;
                }
                let members = self
                    .graph()
                    .collect_members(decl)
                    .into_iter()
                    .map(|m| ProvidedMember {
                        name: m.member.name.clone(),
                        kind: m.member.kind,
                    })
                    .collect();
                (format!("{} '{}'", decl.kind.display(), decl.name), members)
            }
        };

        for required in self.graph().collect_members(interface) {
            if required.member.optional {
                continue;
            }
            let name = &required.member.name;
            match provided.iter().find(|p| &p.name == name) {
                Some(found) if found.kind.is_method() != required.member.kind.is_method() => {
                    self.diagnostics.member_kind_mismatch(
                        span,
                        &interface.name,
                        name,
                        required.member.kind.category(),
                        found.kind.category(),
                    );
                }
                Some(_) => {}
                None => {
                    self.diagnostics
                        .missing_interface_member(span, &description, &interface.name, name);
                }
            }
        }
    }

    fn record(&mut self, site: &UsageSite, target: &Declaration, member: Option<&str>, kind: ReferenceKind) {
        let caller = site.enclosing.as_ref().and_then(|enclosing| {
            self.graph()
                .table(self.resolver.module())
                .and_then(|table| table.lookup(&enclosing.item))
                .map(|decl| Caller {
                    decl: decl.id,
                    member: enclosing.member.clone(),
                })
        });
        self.references.push(Reference {
            module: self.resolver.module(),
            span: site.span,
            target: target.id,
            member: member.map(SmolStr::new),
            kind,
            caller,
        });
    }
}
