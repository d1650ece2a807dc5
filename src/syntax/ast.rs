//! Parsed module AST.
//!
//! These types are what an external parser hands to the engine: one
//! [`SourceModule`] per source unit, already tokenized and parsed. Only the
//! structure the engine inspects is modeled; operators, literal values and
//! comments are collapsed.
//!
//! Every node carries a [`Span`]. The builder-style constructors leave spans
//! at `1:1`; call `.at(line, col)` (0-indexed) to place a node.

use smol_str::SmolStr;

use crate::base::Span;

macro_rules! impl_at {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Place this node at a 0-indexed line/column.
                pub fn at(mut self, line: u32, col: u32) -> Self {
                    self.span = Span::point(line, col);
                    self
                }

                /// Give this node an explicit span.
                pub fn with_span(mut self, span: Span) -> Self {
                    self.span = span;
                    self
                }
            }
        )*
    };
}

impl_at!(ImportDecl, Item, Param, MemberSignature, ClassMember, EnumMember, TypeRef, Stmt, Expr, ObjectField, ExportSpecifier);

// ============================================================================
// MODULE
// ============================================================================

/// One parsed source unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceModule {
    /// Workspace-relative path, e.g. `src/helper.ts`. Identity of the module.
    pub path: SmolStr,
    pub imports: Vec<ImportDecl>,
    pub exports: Vec<ExportDecl>,
    /// Top-level declarations in source order.
    pub items: Vec<Item>,
    /// Top-level executable statements in source order.
    pub statements: Vec<Stmt>,
}

impl SourceModule {
    pub fn new(path: impl Into<SmolStr>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_import(mut self, import: ImportDecl) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_export(mut self, export: ExportDecl) -> Self {
        self.exports.push(export);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_statement(mut self, stmt: Stmt) -> Self {
        self.statements.push(stmt);
        self
    }
}

// ============================================================================
// IMPORTS & EXPORTS
// ============================================================================

/// `import { A, B as C } from './x'`, `import D from './x'`, `import * as ns from './x'`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    /// Module specifier as written (`./helper`).
    pub source: SmolStr,
    pub specifiers: Vec<ImportSpecifier>,
    pub span: Span,
}

impl ImportDecl {
    pub fn new(source: impl Into<SmolStr>, specifiers: Vec<ImportSpecifier>) -> Self {
        Self {
            source: source.into(),
            specifiers,
            span: Span::default(),
        }
    }
}

/// One binding introduced by an import.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportSpecifier {
    /// `{ imported as local }` (or `{ imported }` when both are equal).
    Named {
        imported: SmolStr,
        local: SmolStr,
        span: Span,
    },
    /// `local` bound to the target's default export.
    Default { local: SmolStr, span: Span },
    /// `* as local` bound to the target's whole export namespace.
    Namespace { local: SmolStr, span: Span },
}

impl ImportSpecifier {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        let name = name.into();
        ImportSpecifier::Named {
            imported: name.clone(),
            local: name,
            span: Span::default(),
        }
    }

    pub fn aliased(imported: impl Into<SmolStr>, local: impl Into<SmolStr>) -> Self {
        ImportSpecifier::Named {
            imported: imported.into(),
            local: local.into(),
            span: Span::default(),
        }
    }

    pub fn default_import(local: impl Into<SmolStr>) -> Self {
        ImportSpecifier::Default {
            local: local.into(),
            span: Span::default(),
        }
    }

    pub fn namespace(local: impl Into<SmolStr>) -> Self {
        ImportSpecifier::Namespace {
            local: local.into(),
            span: Span::default(),
        }
    }

    /// The name this specifier binds in the importing module.
    pub fn local(&self) -> &SmolStr {
        match self {
            ImportSpecifier::Named { local, .. }
            | ImportSpecifier::Default { local, .. }
            | ImportSpecifier::Namespace { local, .. } => local,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ImportSpecifier::Named { span, .. }
            | ImportSpecifier::Default { span, .. }
            | ImportSpecifier::Namespace { span, .. } => *span,
        }
    }

    pub fn at(mut self, line: u32, col: u32) -> Self {
        match &mut self {
            ImportSpecifier::Named { span, .. }
            | ImportSpecifier::Default { span, .. }
            | ImportSpecifier::Namespace { span, .. } => *span = Span::point(line, col),
        }
        self
    }
}

/// Export statements other than `export` modifiers on declarations.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportDecl {
    /// `export { a, b as c }` of local declarations.
    Named {
        specifiers: Vec<ExportSpecifier>,
        span: Span,
    },
    /// `export { a as b } from './x'`.
    From {
        source: SmolStr,
        specifiers: Vec<ExportSpecifier>,
        span: Span,
    },
    /// `export * from './x'`.
    All { source: SmolStr, span: Span },
    /// `export default name`.
    Default { name: SmolStr, span: Span },
}

impl ExportDecl {
    pub fn span(&self) -> Span {
        match self {
            ExportDecl::Named { span, .. }
            | ExportDecl::From { span, .. }
            | ExportDecl::All { span, .. }
            | ExportDecl::Default { span, .. } => *span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportSpecifier {
    pub local: SmolStr,
    pub exported: SmolStr,
    pub span: Span,
}

impl ExportSpecifier {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        let name = name.into();
        Self {
            local: name.clone(),
            exported: name,
            span: Span::default(),
        }
    }

    pub fn aliased(local: impl Into<SmolStr>, exported: impl Into<SmolStr>) -> Self {
        Self {
            local: local.into(),
            exported: exported.into(),
            span: Span::default(),
        }
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub name: SmolStr,
    /// `export` modifier present.
    pub exported: bool,
    pub kind: ItemKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    Function(Function),
    Interface(Interface),
    Class(Class),
    TypeAlias(TypeExpr),
    Constant(Constant),
    Enum(Vec<EnumMember>),
}

impl Item {
    fn new(name: impl Into<SmolStr>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            exported: false,
            kind,
            span: Span::default(),
        }
    }

    pub fn function(name: impl Into<SmolStr>, function: Function) -> Self {
        Self::new(name, ItemKind::Function(function))
    }

    pub fn interface(name: impl Into<SmolStr>, interface: Interface) -> Self {
        Self::new(name, ItemKind::Interface(interface))
    }

    pub fn class(name: impl Into<SmolStr>, class: Class) -> Self {
        Self::new(name, ItemKind::Class(class))
    }

    pub fn type_alias(name: impl Into<SmolStr>, ty: TypeExpr) -> Self {
        Self::new(name, ItemKind::TypeAlias(ty))
    }

    pub fn constant(name: impl Into<SmolStr>, constant: Constant) -> Self {
        Self::new(name, ItemKind::Constant(constant))
    }

    pub fn enumeration(name: impl Into<SmolStr>, members: Vec<EnumMember>) -> Self {
        Self::new(name, ItemKind::Enum(members))
    }

    /// Mark with the `export` modifier.
    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }
}

/// A function, method or constructor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Function {
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: Vec<Stmt>,
}

impl Function {
    pub fn new(params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self {
            params,
            return_type: None,
            body,
        }
    }

    pub fn returning(mut self, ty: TypeExpr) -> Self {
        self.return_type = Some(ty);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: SmolStr,
    pub ty: Option<TypeExpr>,
    /// `x?: T` or `x = default`.
    pub optional: bool,
    pub span: Span,
}

impl Param {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            optional: false,
            span: Span::default(),
        }
    }

    pub fn typed(mut self, ty: TypeExpr) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interface {
    pub extends: Vec<TypeRef>,
    pub members: Vec<MemberSignature>,
}

impl Interface {
    pub fn new(members: Vec<MemberSignature>) -> Self {
        Self {
            extends: Vec::new(),
            members,
        }
    }

    pub fn extending(mut self, base: TypeRef) -> Self {
        self.extends.push(base);
        self
    }
}

/// Whether a member is called or read, and with how many parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method { params: usize },
    Property,
}

impl MemberKind {
    pub fn is_method(self) -> bool {
        matches!(self, MemberKind::Method { .. })
    }

    /// "method" or "property".
    pub fn category(self) -> &'static str {
        match self {
            MemberKind::Method { .. } => "method",
            MemberKind::Property => "property",
        }
    }
}

/// An interface member.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberSignature {
    pub name: SmolStr,
    pub kind: MemberKind,
    pub optional: bool,
    pub span: Span,
}

impl MemberSignature {
    pub fn method(name: impl Into<SmolStr>, params: usize) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method { params },
            optional: false,
            span: Span::default(),
        }
    }

    pub fn property(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
            optional: false,
            span: Span::default(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Class {
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub constructor: Option<Function>,
    pub members: Vec<ClassMember>,
}

impl Class {
    pub fn new(members: Vec<ClassMember>) -> Self {
        Self {
            members,
            ..Self::default()
        }
    }

    pub fn implementing(mut self, interface: TypeRef) -> Self {
        self.implements.push(interface);
        self
    }

    pub fn extending(mut self, base: TypeRef) -> Self {
        self.extends = Some(base);
        self
    }

    pub fn with_constructor(mut self, constructor: Function) -> Self {
        self.constructor = Some(constructor);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassMember {
    pub name: SmolStr,
    pub kind: ClassMemberKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMemberKind {
    Method(Function),
    Property {
        ty: Option<TypeExpr>,
        init: Option<Expr>,
    },
}

impl ClassMember {
    pub fn method(name: impl Into<SmolStr>, function: Function) -> Self {
        Self {
            name: name.into(),
            kind: ClassMemberKind::Method(function),
            span: Span::default(),
        }
    }

    pub fn property(name: impl Into<SmolStr>, ty: Option<TypeExpr>, init: Option<Expr>) -> Self {
        Self {
            name: name.into(),
            kind: ClassMemberKind::Property { ty, init },
            span: Span::default(),
        }
    }

    /// The member's shape as seen from outside the class.
    pub fn member_kind(&self) -> MemberKind {
        match &self.kind {
            ClassMemberKind::Method(function) => MemberKind::Method {
                params: function.params.len(),
            },
            ClassMemberKind::Property { .. } => MemberKind::Property,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    pub ty: Option<TypeExpr>,
    pub init: Expr,
}

impl Constant {
    pub fn new(init: Expr) -> Self {
        Self { ty: None, init }
    }

    pub fn typed(mut self, ty: TypeExpr) -> Self {
        self.ty = Some(ty);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    pub name: SmolStr,
    pub span: Span,
}

impl EnumMember {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
        }
    }
}

// ============================================================================
// TYPES
// ============================================================================

/// A reference to a declared type by name. Dotted names (`Color.Red`)
/// refer to enum members.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: SmolStr,
    pub span: Span,
}

impl TypeRef {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Void,
    Any,
    Unknown,
    Never,
    Null,
    Undefined,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    Named(TypeRef),
    Primitive(Primitive),
    /// A literal type such as `"one"` or `42`.
    Literal,
    Union(Vec<TypeExpr>),
    Array(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        TypeExpr::Named(TypeRef::new(name))
    }

    pub fn array(element: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(element))
    }

    /// The single declared type this expression names, if it is exactly one.
    pub fn as_named(&self) -> Option<&TypeRef> {
        match self {
            TypeExpr::Named(r) => Some(r),
            _ => None,
        }
    }

    /// Visit every named reference in the expression.
    pub fn for_each_ref(&self, f: &mut impl FnMut(&TypeRef)) {
        match self {
            TypeExpr::Named(r) => f(r),
            TypeExpr::Union(parts) => parts.iter().for_each(|p| p.for_each_ref(f)),
            TypeExpr::Array(inner) => inner.for_each_ref(f),
            TypeExpr::Primitive(_) | TypeExpr::Literal => {}
        }
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    /// `let`/`const`/`var` binding.
    Let {
        name: SmolStr,
        ty: Option<TypeExpr>,
        init: Option<Expr>,
    },
    Return(Option<Expr>),
    Throw(Expr),
    Break,
    Continue,
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    /// Any loop: `while`, `for`, `for..of`. `binding` is the loop variable.
    Loop {
        binding: Option<SmolStr>,
        head: Vec<Expr>,
        body: Vec<Stmt>,
    },
    Try {
        body: Vec<Stmt>,
        catch: Option<CatchClause>,
        finally: Option<Vec<Stmt>>,
    },
    Block(Vec<Stmt>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub param: Option<SmolStr>,
    pub body: Vec<Stmt>,
}

impl Stmt {
    fn new(kind: StmtKind) -> Self {
        Self {
            kind,
            span: Span::default(),
        }
    }

    pub fn expr(expr: Expr) -> Self {
        Self::new(StmtKind::Expr(expr))
    }

    pub fn local(name: impl Into<SmolStr>, ty: Option<TypeExpr>, init: Option<Expr>) -> Self {
        Self::new(StmtKind::Let {
            name: name.into(),
            ty,
            init,
        })
    }

    pub fn ret(value: Expr) -> Self {
        Self::new(StmtKind::Return(Some(value)))
    }

    pub fn ret_void() -> Self {
        Self::new(StmtKind::Return(None))
    }

    pub fn throw(value: Expr) -> Self {
        Self::new(StmtKind::Throw(value))
    }

    pub fn brk() -> Self {
        Self::new(StmtKind::Break)
    }

    pub fn cont() -> Self {
        Self::new(StmtKind::Continue)
    }

    pub fn if_(cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Self {
        Self::new(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn loop_(binding: Option<SmolStr>, head: Vec<Expr>, body: Vec<Stmt>) -> Self {
        Self::new(StmtKind::Loop {
            binding,
            head,
            body,
        })
    }

    pub fn try_(body: Vec<Stmt>, catch: Option<CatchClause>, finally: Option<Vec<Stmt>>) -> Self {
        Self::new(StmtKind::Try {
            body,
            catch,
            finally,
        })
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Self::new(StmtKind::Block(stmts))
    }
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Ident(SmolStr),
    This,
    Literal(Literal),
    /// Template string; only the interpolated parts are kept.
    Template(Vec<Expr>),
    /// Any binary operator (`+`, `===`, `&&`, ...).
    Binary(Box<Expr>, Box<Expr>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: SmolStr,
    },
    Object(Vec<ObjectField>),
    Array(Vec<Expr>),
    Arrow {
        params: Vec<Param>,
        body: ArrowBody,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(SmolStr),
    Number(f64),
    Bool(bool),
    Null,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

/// `name: value` in an object literal. Method shorthand is an arrow value.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub name: SmolStr,
    pub value: Expr,
    pub span: Span,
}

impl ObjectField {
    pub fn new(name: impl Into<SmolStr>, value: Expr) -> Self {
        Self {
            name: name.into(),
            value,
            span: Span::default(),
        }
    }

    /// Arrow-valued fields provide methods, everything else a property.
    pub fn member_kind(&self) -> MemberKind {
        match &self.value.kind {
            ExprKind::Arrow { params, .. } => MemberKind::Method {
                params: params.len(),
            },
            _ => MemberKind::Property,
        }
    }
}

impl Expr {
    fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            span: Span::default(),
        }
    }

    pub fn ident(name: impl Into<SmolStr>) -> Self {
        Self::new(ExprKind::Ident(name.into()))
    }

    pub fn this() -> Self {
        Self::new(ExprKind::This)
    }

    pub fn string(value: impl Into<SmolStr>) -> Self {
        Self::new(ExprKind::Literal(Literal::String(value.into())))
    }

    pub fn number(value: f64) -> Self {
        Self::new(ExprKind::Literal(Literal::Number(value)))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ExprKind::Literal(Literal::Bool(value)))
    }

    pub fn null() -> Self {
        Self::new(ExprKind::Literal(Literal::Null))
    }

    pub fn template(parts: Vec<Expr>) -> Self {
        Self::new(ExprKind::Template(parts))
    }

    pub fn binary(lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::Binary(Box::new(lhs), Box::new(rhs)))
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call {
            callee: Box::new(callee),
            args,
        })
    }

    /// `new callee(args)`.
    pub fn construct(callee: Expr, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::New {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn member(object: Expr, property: impl Into<SmolStr>) -> Self {
        Self::new(ExprKind::Member {
            object: Box::new(object),
            property: property.into(),
        })
    }

    /// `object.method(args)`.
    pub fn method_call(object: Expr, method: impl Into<SmolStr>, args: Vec<Expr>) -> Self {
        Self::call(Self::member(object, method), args)
    }

    pub fn object(fields: Vec<ObjectField>) -> Self {
        Self::new(ExprKind::Object(fields))
    }

    pub fn array(items: Vec<Expr>) -> Self {
        Self::new(ExprKind::Array(items))
    }

    pub fn arrow(params: Vec<Param>, body: ArrowBody) -> Self {
        Self::new(ExprKind::Arrow { params, body })
    }

    /// `(params) => value`.
    pub fn arrow_expr(params: Vec<Param>, value: Expr) -> Self {
        Self::arrow(params, ArrowBody::Expr(Box::new(value)))
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::new(ExprKind::Assign {
            target: Box::new(target),
            value: Box::new(value),
        })
    }
}
