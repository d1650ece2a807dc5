//! Find references — every resolved use of a declaration.

use crate::hir::{AnalysisResult, DefId, Reference};

/// All references to `target`, in module then source order.
///
/// With `member` set, only accesses to that member of a class or interface
/// are returned; otherwise only uses of the declaration itself.
pub fn find_references<'a>(result: &'a AnalysisResult, target: DefId, member: Option<&str>) -> Vec<&'a Reference> {
    result
        .references()
        .filter(|r| r.target == target && r.member.as_deref() == member)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::base::ModuleId;
    use crate::hir::{AnalysisConfig, ReferenceKind, analyze_workspace};
    use crate::syntax::{
        Class, ClassMember, Expr, Function, ImportDecl, ImportSpecifier, Item, SourceModule, Stmt,
    };

    #[test]
    fn test_references_across_modules() {
        let lib = SourceModule::new("lib.ts").with_item(
            Item::class("Counter", Class::new(vec![ClassMember::method("inc", Function::default())])).exported(),
        );
        let app = SourceModule::new("app.ts")
            .with_import(ImportDecl::new("./lib", vec![ImportSpecifier::named("Counter")]))
            .with_statement(Stmt::local(
                "c",
                None,
                Some(Expr::construct(Expr::ident("Counter"), vec![])),
            ))
            .with_statement(Stmt::expr(Expr::method_call(Expr::ident("c"), "inc", vec![])))
            .with_statement(Stmt::expr(Expr::method_call(Expr::ident("c"), "inc", vec![])));
        let modules = vec![
            (ModuleId::new(0), Arc::new(lib)),
            (ModuleId::new(1), Arc::new(app)),
        ];
        let result = analyze_workspace(&modules, &AnalysisConfig::default());
        let counter = result.graph().table(ModuleId::new(0)).unwrap().lookup("Counter").unwrap().id;

        let direct = find_references(&result, counter, None);
        assert_eq!(direct.len(), 1);
        assert_eq!(direct[0].kind, ReferenceKind::Instantiate);

        let inc = find_references(&result, counter, Some("inc"));
        assert_eq!(inc.len(), 2);
        assert!(inc.iter().all(|r| r.module == ModuleId::new(1)));
    }
}
