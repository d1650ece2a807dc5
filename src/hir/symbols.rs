//! Symbol tables — declarations extracted from one module.
//!
//! [`build_symbol_table`] turns a module's top-level items into
//! [`Declaration`]s with kind and shape metadata. It runs per module with no
//! access to other modules, so all tables can be built in parallel before
//! import resolution starts.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHashMap;
use smol_str::{SmolStr, format_smolstr};

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::ids::{DefId, LocalDefId};
use crate::base::{ModuleId, Span};
use crate::syntax::{ExportDecl, ItemKind, MemberKind, Param, SourceModule, TypeRef};

// ============================================================================
// DECLARATIONS
// ============================================================================

/// The kind of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Function,
    Interface,
    Class,
    TypeAlias,
    Constant,
    Enum,
}

impl DeclKind {
    /// Human-readable name.
    pub fn display(self) -> &'static str {
        match self {
            DeclKind::Function => "function",
            DeclKind::Interface => "interface",
            DeclKind::Class => "class",
            DeclKind::TypeAlias => "type alias",
            DeclKind::Constant => "constant",
            DeclKind::Enum => "enum",
        }
    }

    /// Can appear in a type position.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            DeclKind::Interface | DeclKind::Class | DeclKind::TypeAlias | DeclKind::Enum
        )
    }

    /// Exists at runtime and can be read as a value.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            DeclKind::Function | DeclKind::Class | DeclKind::Constant | DeclKind::Enum
        )
    }

    /// Has a member shape (class or interface).
    pub fn has_members(self) -> bool {
        matches!(self, DeclKind::Interface | DeclKind::Class)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Exported,
    Local,
}

/// Accepted argument counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Arity {
    pub required: usize,
    pub total: usize,
}

impl Arity {
    pub fn of(params: &[Param]) -> Self {
        Self {
            required: params.iter().filter(|p| !p.optional).count(),
            total: params.len(),
        }
    }

    pub fn accepts(self, args: usize) -> bool {
        self.required <= args && args <= self.total
    }

    /// "2" or "1-2".
    pub fn describe(self) -> String {
        if self.required == self.total {
            self.total.to_string()
        } else {
            format!("{}-{}", self.required, self.total)
        }
    }
}

/// A named member of a class or interface shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: SmolStr,
    pub kind: MemberKind,
    pub optional: bool,
    pub span: Span,
}

/// Shape metadata, by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Constants and type aliases.
    None,
    Function {
        arity: Arity,
    },
    Interface {
        members: Vec<Member>,
        extends: Vec<TypeRef>,
    },
    Class {
        members: Vec<Member>,
        constructor: Arity,
        extends: Option<TypeRef>,
        implements: Vec<TypeRef>,
    },
    Enum {
        members: Vec<SmolStr>,
    },
    /// `Enum.Member` sub-symbol.
    EnumMember {
        parent: LocalDefId,
    },
}

/// A declared symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub id: DefId,
    /// Simple name, or `Enum.Member` for enum member sub-symbols.
    pub name: SmolStr,
    pub kind: DeclKind,
    pub visibility: Visibility,
    pub shape: Shape,
    pub span: Span,
}

impl Declaration {
    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Exported
    }

    /// Own members (not inherited) of a class or interface.
    pub fn members(&self) -> &[Member] {
        match &self.shape {
            Shape::Interface { members, .. } | Shape::Class { members, .. } => members,
            _ => &[],
        }
    }

    /// Own member by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members().iter().find(|m| m.name == name)
    }

    /// Supertypes whose members this declaration inherits.
    pub fn supertypes(&self) -> Vec<&TypeRef> {
        match &self.shape {
            Shape::Interface { extends, .. } => extends.iter().collect(),
            Shape::Class { extends, .. } => extends.iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_enum_member(&self) -> bool {
        matches!(self.shape, Shape::EnumMember { .. })
    }
}

// ============================================================================
// SYMBOL TABLE
// ============================================================================

/// All declarations of one module, with its module scope and export namespace.
///
/// Read-only once built.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    module: ModuleId,
    /// Indexed by `LocalDefId`.
    decls: Vec<Declaration>,
    /// Module-level scope: first declaration of each name wins.
    scope: IndexMap<SmolStr, LocalDefId>,
    /// Own export namespace (re-exports are followed by the resolver).
    exports: IndexMap<SmolStr, LocalDefId>,
    default_export: Option<LocalDefId>,
}

impl SymbolTable {
    fn new(module: ModuleId) -> Self {
        Self {
            module,
            decls: Vec::new(),
            scope: IndexMap::new(),
            exports: IndexMap::new(),
            default_export: None,
        }
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Get a declaration by local id.
    pub fn get(&self, local: LocalDefId) -> Option<&Declaration> {
        self.decls.get(local.index() as usize)
    }

    /// Look up a name in the module scope.
    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.scope.get(name).and_then(|&id| self.get(id))
    }

    /// Look up a name in the module's own export namespace.
    pub fn lookup_export(&self, name: &str) -> Option<&Declaration> {
        self.exports.get(name).and_then(|&id| self.get(id))
    }

    pub fn default_export(&self) -> Option<&Declaration> {
        self.default_export.and_then(|id| self.get(id))
    }

    /// `enum_name.member` sub-symbol.
    pub fn enum_member(&self, enum_name: &str, member: &str) -> Option<&Declaration> {
        self.lookup(&format_smolstr!("{}.{}", enum_name, member))
    }

    /// All declarations in declaration order. Rejected redeclarations are not stored.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    /// Exported names and the declarations they denote.
    pub fn exports(&self) -> impl Iterator<Item = (&SmolStr, &Declaration)> {
        self.exports
            .iter()
            .filter_map(|(name, &id)| self.get(id).map(|decl| (name, decl)))
    }

    /// Get the number of declarations.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    fn push(&mut self, name: SmolStr, kind: DeclKind, visibility: Visibility, shape: Shape, span: Span) -> LocalDefId {
        let local = LocalDefId::new(self.decls.len() as u32);
        self.decls.push(Declaration {
            id: DefId::new(self.module, local),
            name,
            kind,
            visibility,
            shape,
            span,
        });
        local
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Build the symbol table for one module.
///
/// Never fails: a name declared twice at the same visibility is reported
/// (the first declaration keeps the name) and building continues.
pub fn build_symbol_table(module: ModuleId, source: &SourceModule) -> (SymbolTable, Vec<Diagnostic>) {
    let mut table = SymbolTable::new(module);
    let mut diagnostics = DiagnosticCollector::new(module);
    // (name, visibility) → first span, for redeclaration checks
    let mut seen: FxHashMap<(SmolStr, Visibility), Span> = FxHashMap::default();

    for item in &source.items {
        let visibility = if item.exported {
            Visibility::Exported
        } else {
            Visibility::Local
        };

        if let Some(&existing) = seen.get(&(item.name.clone(), visibility)) {
            diagnostics.duplicate_declaration(item.span, &item.name, existing);
            continue;
        }
        seen.insert((item.name.clone(), visibility), item.span);

        let (kind, shape) = shape_of(&item.kind);
        let local = table.push(item.name.clone(), kind, visibility, shape, item.span);
        register(&mut table, item.name.clone(), local, visibility);

        if let ItemKind::Enum(members) = &item.kind {
            let mut member_spans: FxHashMap<&str, Span> = FxHashMap::default();
            for member in members {
                if let Some(&existing) = member_spans.get(member.name.as_str()) {
                    diagnostics.duplicate_declaration(member.span, &member.name, existing);
                    continue;
                }
                member_spans.insert(member.name.as_str(), member.span);

                let dotted = format_smolstr!("{}.{}", item.name, member.name);
                let sub = table.push(
                    dotted.clone(),
                    DeclKind::Constant,
                    visibility,
                    Shape::EnumMember { parent: local },
                    member.span,
                );
                register(&mut table, dotted, sub, visibility);
            }
        }
    }

    let mut default_span: Option<Span> = None;
    for export in &source.exports {
        match export {
            ExportDecl::Named { specifiers, .. } => {
                for spec in specifiers {
                    let Some(&local) = table.scope.get(&spec.local) else {
                        diagnostics.unresolved_name(spec.span, &spec.local);
                        continue;
                    };
                    match table.exports.entry(spec.exported.clone()) {
                        Entry::Vacant(slot) => {
                            slot.insert(local);
                        }
                        Entry::Occupied(slot) => {
                            let existing = table.decls[slot.get().index() as usize].span;
                            diagnostics.duplicate_declaration(spec.span, &spec.exported, existing);
                        }
                    }
                }
            }
            ExportDecl::Default { name, span } => match (table.scope.get(name), default_span) {
                (Some(_), Some(first)) => diagnostics.duplicate_declaration(*span, "default", first),
                (Some(&local), None) => {
                    table.default_export = Some(local);
                    default_span = Some(*span);
                }
                (None, _) => diagnostics.unresolved_name(*span, name),
            },
            // Re-exports need other modules' tables
            ExportDecl::From { .. } | ExportDecl::All { .. } => {}
        }
    }

    tracing::trace!(
        "symbol table for {:?}: {} declarations, {} exports",
        module,
        table.len(),
        table.exports.len()
    );

    (table, diagnostics.finish())
}

fn register(table: &mut SymbolTable, name: SmolStr, local: LocalDefId, visibility: Visibility) {
    if visibility == Visibility::Exported {
        table.exports.entry(name.clone()).or_insert(local);
    }
    table.scope.entry(name).or_insert(local);
}

fn shape_of(kind: &ItemKind) -> (DeclKind, Shape) {
    match kind {
        ItemKind::Function(function) => (
            DeclKind::Function,
            Shape::Function {
                arity: Arity::of(&function.params),
            },
        ),
        ItemKind::Interface(interface) => (
            DeclKind::Interface,
            Shape::Interface {
                members: interface
                    .members
                    .iter()
                    .map(|m| Member {
                        name: m.name.clone(),
                        kind: m.kind,
                        optional: m.optional,
                        span: m.span,
                    })
                    .collect(),
                extends: interface.extends.clone(),
            },
        ),
        ItemKind::Class(class) => (
            DeclKind::Class,
            Shape::Class {
                members: class
                    .members
                    .iter()
                    .map(|m| Member {
                        name: m.name.clone(),
                        kind: m.member_kind(),
                        optional: false,
                        span: m.span,
                    })
                    .collect(),
                constructor: class
                    .constructor
                    .as_ref()
                    .map(|c| Arity::of(&c.params))
                    .unwrap_or_default(),
                extends: class.extends.clone(),
                implements: class.implements.clone(),
            },
        ),
        ItemKind::TypeAlias(_) => (DeclKind::TypeAlias, Shape::None),
        ItemKind::Constant(_) => (DeclKind::Constant, Shape::None),
        ItemKind::Enum(members) => (
            DeclKind::Enum,
            Shape::Enum {
                members: members.iter().map(|m| m.name.clone()).collect(),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::diagnostics::{Category, codes};
    use crate::syntax::{
        Class, ClassMember, Constant, EnumMember, ExportSpecifier, Expr, Function, Interface,
        Item, MemberSignature, Primitive, TypeExpr,
    };

    fn build(source: &SourceModule) -> (SymbolTable, Vec<Diagnostic>) {
        build_symbol_table(ModuleId::new(0), source)
    }

    #[test]
    fn test_kinds_and_shapes() {
        let source = SourceModule::new("helper.ts")
            .with_item(
                Item::function("f", Function::new(vec![Param::new("a"), Param::new("b").optional()], vec![]))
                    .exported(),
            )
            .with_item(
                Item::interface(
                    "I",
                    Interface::new(vec![MemberSignature::method("m", 0), MemberSignature::property("p")]),
                )
                .exported(),
            )
            .with_item(Item::type_alias("T", TypeExpr::Primitive(Primitive::String)))
            .with_item(Item::constant("C", Constant::new(Expr::string("v"))).exported());

        let (table, diags) = build(&source);
        assert!(diags.is_empty());

        let f = table.lookup("f").unwrap();
        assert_eq!(f.kind, DeclKind::Function);
        assert_eq!(f.shape, Shape::Function { arity: Arity { required: 1, total: 2 } });

        let i = table.lookup_export("I").unwrap();
        assert_eq!(i.kind, DeclKind::Interface);
        assert_eq!(i.members().len(), 2);
        assert!(i.member("m").unwrap().kind.is_method());

        assert_eq!(table.lookup("T").unwrap().visibility, Visibility::Local);
        assert!(table.lookup_export("T").is_none());
        assert_eq!(table.lookup("C").unwrap().kind, DeclKind::Constant);
    }

    #[test]
    fn test_enum_members_are_flat_sub_symbols() {
        let source = SourceModule::new("e.ts").with_item(
            Item::enumeration(
                "SharedEnum",
                vec![EnumMember::new("ONE"), EnumMember::new("TWO"), EnumMember::new("THREE")],
            )
            .exported(),
        );

        let (table, diags) = build(&source);
        assert!(diags.is_empty());
        assert_eq!(table.len(), 4);

        let two = table.enum_member("SharedEnum", "TWO").unwrap();
        assert_eq!(two.name, "SharedEnum.TWO");
        assert_eq!(two.kind, DeclKind::Constant);
        assert!(two.is_exported());
        assert!(table.lookup_export("SharedEnum.THREE").is_some());
        assert!(table.enum_member("SharedEnum", "FOUR").is_none());
    }

    #[test]
    fn test_redeclaration_same_visibility_is_kind_mismatch() {
        let source = SourceModule::new("d.ts")
            .with_item(Item::constant("x", Constant::new(Expr::number(1.0))).at(0, 0))
            .with_item(Item::function("x", Function::default()).at(4, 0));

        let (table, diags) = build(&source);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].category, Category::KindMismatch);
        assert_eq!(diags[0].code.as_deref(), Some(codes::DUPLICATE_DECLARATION));
        assert_eq!(diags[0].span, Span::point(4, 0));
        // First declaration wins
        assert_eq!(table.lookup("x").unwrap().kind, DeclKind::Constant);
    }

    #[test]
    fn test_same_name_different_visibility_is_allowed() {
        let source = SourceModule::new("d.ts")
            .with_item(Item::constant("x", Constant::new(Expr::number(1.0))))
            .with_item(Item::function("x", Function::default()).exported());

        let (table, diags) = build(&source);
        assert!(diags.is_empty());
        assert_eq!(table.lookup("x").unwrap().kind, DeclKind::Constant);
        assert_eq!(table.lookup_export("x").unwrap().kind, DeclKind::Function);
    }

    #[test]
    fn test_class_shape_excludes_constructor() {
        let class = Class::new(vec![
            ClassMember::property("name", None, None),
            ClassMember::method("getName", Function::default()),
        ])
        .with_constructor(Function::new(vec![Param::new("name")], vec![]));
        let source = SourceModule::new("c.ts").with_item(Item::class("C", class).exported());

        let (table, _) = build(&source);
        let c = table.lookup("C").unwrap();
        match &c.shape {
            Shape::Class { members, constructor, .. } => {
                assert_eq!(members.len(), 2);
                assert_eq!(*constructor, Arity { required: 1, total: 1 });
            }
            other => panic!("expected class shape, got {:?}", other),
        }
    }

    #[test]
    fn test_export_list_and_default() {
        let source = SourceModule::new("m.ts")
            .with_item(Item::function("run", Function::default()))
            .with_item(Item::constant("v", Constant::new(Expr::number(1.0))))
            .with_export(ExportDecl::Named {
                specifiers: vec![ExportSpecifier::aliased("v", "value")],
                span: Span::default(),
            })
            .with_export(ExportDecl::Default {
                name: "run".into(),
                span: Span::default(),
            });

        let (table, diags) = build(&source);
        assert!(diags.is_empty());
        assert_eq!(table.lookup_export("value").unwrap().name, "v");
        assert!(table.lookup_export("v").is_none());
        assert_eq!(table.default_export().unwrap().name, "run");
    }

    #[test]
    fn test_export_of_unknown_local_is_reported() {
        let source = SourceModule::new("m.ts").with_export(ExportDecl::Default {
            name: "ghost".into(),
            span: Span::point(7, 0),
        });

        let (_, diags) = build(&source);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].category, Category::UnresolvedImport);
    }

    #[test]
    fn test_second_default_export_points_at_first() {
        let source = SourceModule::new("m.ts")
            .with_item(Item::function("run", Function::default()))
            .with_item(Item::function("walk", Function::default()))
            .with_export(ExportDecl::Default {
                name: "run".into(),
                span: Span::point(3, 0),
            })
            .with_export(ExportDecl::Default {
                name: "walk".into(),
                span: Span::point(4, 0),
            });

        let (table, diags) = build(&source);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.as_deref(), Some(codes::DUPLICATE_DECLARATION));
        assert_eq!(diags[0].span, Span::point(4, 0));
        assert_eq!(diags[0].related[0].span, Span::point(3, 0));
        assert_eq!(table.default_export().unwrap().name, "run");
    }

    #[test]
    fn test_arity() {
        let arity = Arity { required: 1, total: 2 };
        assert!(!arity.accepts(0));
        assert!(arity.accepts(1));
        assert!(arity.accepts(2));
        assert!(!arity.accepts(3));
        assert_eq!(arity.describe(), "1-2");
        assert_eq!(Arity { required: 2, total: 2 }.describe(), "2");
    }
}
