//! Syntax — the parsed-module boundary.
//!
//! Tokenizing and parsing happen outside this crate. A parser builds
//! [`SourceModule`]s out of these types and hands them to the engine.

pub mod ast;
mod validate;

pub use ast::{
    ArrowBody, CatchClause, Class, ClassMember, ClassMemberKind, Constant, EnumMember,
    ExportDecl, ExportSpecifier, Expr, ExprKind, Function, ImportDecl, ImportSpecifier,
    Interface, Item, ItemKind, Literal, MemberKind, MemberSignature, ObjectField, Param,
    Primitive, SourceModule, Stmt, StmtKind, TypeExpr, TypeRef,
};
pub use validate::{InputError, validate_module};
