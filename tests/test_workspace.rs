//! End-to-end checks over the fixture workspace.
//!
//! The helper/consumer modules exercise every symbol kind across module
//! boundaries and must come out clean; `main.ts` carries exactly one
//! unreachable statement.

mod common;

use xref::hir::{Category, DeclKind, ReferenceKind, Severity, Visibility};
use xref::ide::RenameError;
use xref::{LineCol, Span};

#[test]
fn test_clean_modules_have_no_diagnostics() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();

    for (name, module) in [
        ("helper", ws.helper),
        ("consumer", ws.consumer),
        ("another_consumer", ws.another_consumer),
        ("clean", ws.clean),
    ] {
        assert!(
            analysis.is_clean(module),
            "{} should be clean, got {:?}",
            name,
            analysis.diagnostics(module)
        );
    }
}

#[test]
fn test_main_has_one_unreachable_warning() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();

    let diags = analysis.diagnostics(ws.main);
    assert_eq!(diags.len(), 1, "{:?}", diags);
    assert_eq!(diags[0].category, Category::UnreachableCode);
    assert_eq!(diags[0].severity, Severity::Warning);
    assert_eq!(diags[0].span.start, LineCol::new(common::UNREACHABLE_LINE, 2));

    assert_eq!(analysis.error_count(), 0);
    assert_eq!(analysis.warning_count(), 1);
}

#[test]
fn test_analysis_is_idempotent() {
    let mut first = common::workspace();
    let mut second = common::workspace();

    let a = first.host.analysis();
    let b = second.host.analysis();
    let left: Vec<_> = a.all_diagnostics().into_iter().map(|(id, d)| (id, d.to_vec())).collect();
    let right: Vec<_> = b.all_diagnostics().into_iter().map(|(id, d)| (id, d.to_vec())).collect();
    assert_eq!(left, right);

    // Re-running on the same host, after an unrelated change and back
    first.host.remove_module(first.clean);
    first.host.set_module(common::clean()).unwrap();
    let again = first.host.analysis();
    let rerun: Vec<_> = again.all_diagnostics().into_iter().map(|(id, d)| (id, d.to_vec())).collect();
    assert_eq!(rerun.len(), left.len());
    assert!(rerun.iter().all(|entry| left.contains(entry)));
}

#[test]
fn test_goto_definition_across_modules() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();

    for name in common::SHARED {
        let decl = analysis
            .goto_definition(ws.consumer, name)
            .unwrap_or_else(|| panic!("{} should resolve", name));
        assert_eq!(decl.id.module, ws.helper);
        assert_eq!(decl.name, name);
    }

    let function = analysis.goto_definition(ws.consumer, "SharedFunction").unwrap();
    assert_eq!(function.kind, DeclKind::Function);
    assert_eq!(function.span, Span::point(3, 0));

    let two = analysis.goto_definition(ws.another_consumer, "SharedEnum.TWO").unwrap();
    assert_eq!(two.span, Span::point(43, 2));

    // Not imported into clean.ts
    assert!(analysis.goto_definition(ws.clean, "SharedFunction").is_none());
}

#[test]
fn test_find_references_across_modules() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();
    let shared_function = analysis.goto_definition(ws.helper, "SharedFunction").unwrap().id;

    let refs = analysis.find_references(shared_function, None);
    let sites: Vec<_> = refs.iter().map(|r| (r.module, r.span)).collect();
    assert_eq!(
        sites,
        vec![
            (ws.consumer, Span::point(12, 35)),
            (ws.another_consumer, Span::point(12, 17)),
        ]
    );
    assert!(refs.iter().all(|r| r.kind == ReferenceKind::Call));

    let shared_class = analysis.goto_definition(ws.helper, "SharedClass").unwrap().id;
    let helper_method = analysis.find_references(shared_class, Some("helperMethod"));
    assert_eq!(helper_method.len(), 1);
    assert_eq!(helper_method[0].module, ws.consumer);
}

#[test]
fn test_call_hierarchy() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();
    let shared_function = analysis.goto_definition(ws.helper, "SharedFunction").unwrap().id;
    let consumer_function = analysis.goto_definition(ws.consumer, "ConsumerFunction").unwrap().id;

    let incoming = analysis.incoming_calls(shared_function);
    let callers: Vec<_> = incoming
        .iter()
        .map(|call| {
            let caller = call.from.as_ref().unwrap();
            analysis.declaration(caller.decl).unwrap().name.clone()
        })
        .collect();
    assert_eq!(callers, vec!["ConsumerFunction", "AnotherConsumerFunction"]);

    // Called from the top level of consumer.ts
    let top = analysis.incoming_calls(consumer_function);
    assert_eq!(top.len(), 1);
    assert!(top[0].from.is_none());

    let outgoing = analysis.outgoing_calls(consumer_function);
    assert_eq!(outgoing[0].to, shared_function);
    assert!(outgoing.iter().any(|call| call.member.as_deref() == Some("helperMethod")));
    assert_eq!(outgoing.len(), 6);
}

#[test]
fn test_module_dependency_graph() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();

    assert_eq!(analysis.dependencies(ws.consumer), vec![ws.helper]);
    assert_eq!(analysis.dependents(ws.helper), vec![ws.consumer, ws.another_consumer]);
    assert!(analysis.dependencies(ws.clean).is_empty());
    assert!(analysis.dependents(ws.main).is_empty());
}

#[test]
fn test_removing_helper_breaks_consumers_once_per_specifier() {
    let mut ws = common::workspace();
    assert!(ws.host.remove_module(ws.helper));
    let analysis = ws.host.analysis();

    for module in [ws.consumer, ws.another_consumer] {
        let diags = analysis.diagnostics(module);
        assert_eq!(diags.len(), common::SHARED.len(), "{:?}", diags);
        assert!(diags.iter().all(|d| d.category == Category::UnresolvedImport));
    }
    assert!(analysis.is_clean(ws.clean));
}

#[test]
fn test_rename_constant_across_modules() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();
    let constant = analysis.goto_definition(ws.helper, "SharedConstant").unwrap().id;

    let change = analysis.rename(constant, None, "UpdatedConstant").unwrap();
    assert_eq!(
        change.edits.keys().copied().collect::<Vec<_>>(),
        vec![ws.helper, ws.consumer, ws.another_consumer]
    );
    assert_eq!(change.edits[&ws.helper], vec![Span::point(38, 0)]);
    // Import specifier, then the use in `console.log`
    assert_eq!(change.edits[&ws.consumer], vec![Span::point(6, 2), Span::point(30, 14)]);
    assert!(change.edits[&ws.another_consumer].contains(&Span::point(6, 2)));

    assert_eq!(
        analysis.rename(constant, None, "SharedFunction"),
        Err(RenameError::Conflict {
            name: "SharedFunction".into(),
            module: ws.helper
        })
    );
}

#[test]
fn test_rename_class_method() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();
    let class = analysis.goto_definition(ws.helper, "SharedClass").unwrap().id;

    let change = analysis.rename(class, Some("helperMethod"), "assist").unwrap();
    assert_eq!(change.edits[&ws.helper], vec![Span::point(29, 2)]);
    assert_eq!(change.edits[&ws.consumer].len(), 1);
    assert_eq!(change.occurrences(), 2);

    assert!(matches!(
        analysis.rename(class, Some("helperMethod"), "getName"),
        Err(RenameError::Conflict { .. })
    ));
}

#[test]
fn test_hover_across_modules() {
    let mut ws = common::workspace();
    let analysis = ws.host.analysis();

    let function = analysis.hover(ws.consumer, "SharedFunction").unwrap();
    assert_eq!(function.kind, DeclKind::Function);
    assert_eq!(function.module, ws.helper);
    assert_eq!(function.visibility, Visibility::Exported);
    assert_eq!(function.signature, "export function SharedFunction(0)");

    let class = analysis.hover(ws.consumer, "SharedClass").unwrap();
    assert_eq!(class.span, Span::point(14, 0));
    assert_eq!(class.members, vec!["name", "getName", "getValue", "helperMethod"]);
    assert!(class.signature.starts_with("export class SharedClass(1) { name, getName(0)"));

    assert!(analysis.hover(ws.clean, "SharedClass").is_none());
}
