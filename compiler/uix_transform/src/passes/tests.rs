use super::*;
use pretty_assertions::assert_eq;
use uix_ir::{DirectiveNamespace, NodeKind, PostConstructStep, ScopeKind, TargetTypeScope};

use crate::test_support::{compile, context, context_with, ui_types, Markup};
use crate::{CompileErrorKind, CompileOptions};

fn run(pass: &dyn Transformer, m: &mut Markup, ctx: &mut CompileContext<'_>) {
    if let Err(e) = run_pass(pass, ctx, &mut m.doc) {
        panic!("{} failed: {e}", pass.name());
    }
}

#[test]
fn compiler_directives_are_stripped() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    m.directive(root, DirectiveNamespace::Xaml, "Class", "App.MainWindow");
    m.directive(root, DirectiveNamespace::Xaml, "Precompile", "True");
    m.name(root, "main");
    let button = m.child(root, "Content", ui.button);
    m.directive(button, DirectiveNamespace::Xaml, "FieldModifier", "public");

    let mut ctx = context(&ui);
    run(&StripCompilerDirectives, &mut m, &mut ctx);

    assert!(m.doc.directive(root, &DirectiveNamespace::Xaml, "Class").is_none());
    assert!(m.doc.directive(root, &DirectiveNamespace::Xaml, "Precompile").is_none());
    assert!(m.doc.directive(root, &DirectiveNamespace::Xaml, "Name").is_some());
    assert!(m.doc.directive(button, &DirectiveNamespace::Xaml, "FieldModifier").is_none());
}

#[test]
fn design_directives_are_dropped_outside_design_mode() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    m.text(root, "Title", "Real");
    m.directive(root, DirectiveNamespace::Design, "Title", "Preview");

    let mut ctx = context(&ui);
    run(&DesignTimeProperties, &mut m, &mut ctx);

    assert!(m.doc.directive(root, &DirectiveNamespace::Design, "Title").is_none());
    assert_eq!(m.doc.property_text(root, "Title"), Some("Real"));
}

#[test]
fn design_directives_replace_properties_in_design_mode() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    m.text(root, "Title", "Real");
    let design = m.directive(root, DirectiveNamespace::Design, "Title", "Preview");

    let options = CompileOptions {
        design_mode: true,
        ..CompileOptions::default()
    };
    let mut ctx = context_with(&ui, options);
    run(&DesignTimeProperties, &mut m, &mut ctx);

    assert_eq!(m.doc.property(root, "Title"), Some(design));
    assert_eq!(m.doc.property_text(root, "Title"), Some("Preview"));
    assert_eq!(m.doc.children(root).len(), 1);
}

#[test]
fn styles_and_templates_get_target_scopes() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    let style = m.child(root, "Styles", ui.style);
    m.type_ref(style, "TargetType", "Button");
    let template = m.child(style, "Template", ui.control_template);
    m.text(template, "TargetType", "Border");
    let untargeted = m.child(root, "Tag", ui.style);

    let mut ctx = context(&ui);
    run(&TargetTypeScopes, &mut m, &mut ctx);

    let scope = |n| m.doc.as_object(n).and_then(|o| o.scope);
    assert_eq!(
        scope(style),
        Some(TargetTypeScope {
            kind: ScopeKind::Style,
            target: ui.button
        })
    );
    assert_eq!(
        scope(template),
        Some(TargetTypeScope {
            kind: ScopeKind::ControlTemplate,
            target: ui.border
        })
    );
    assert_eq!(scope(untargeted), None);
}

#[test]
fn unknown_target_type_is_an_error() {
    let ui = ui_types();
    let mut m = Markup::new();
    let style = m.root(ui.style);
    m.type_ref(style, "TargetType", "Slider");
    let mut ctx = context(&ui);
    let error = run_pass(&TargetTypeScopes, &mut ctx, &mut m.doc).unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::UnresolvedType);
    assert!(error.message.contains("Slider"));
}

#[test]
fn resolve_by_name_values_become_lookups() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    let panel = m.child(root, "Content", ui.stack_panel);
    let label = m.child(panel, "Children", ui.label);
    let target = m.text(label, "Target", "input");
    let text = m.child(panel, "Children", ui.text_block);
    m.name(text, "input");
    let tag = m.text(label, "Tag", "input");

    let mut ctx = context(&ui);
    run(&ResolveByName, &mut m, &mut ctx);

    let value = |p| m.doc.first_value(p).map(|v| m.doc.kind(v).clone());
    assert_eq!(value(target), Some(NodeKind::NameLookup("input".to_string())));
    assert_eq!(value(tag), Some(NodeKind::Text("input".to_string())));
}

#[test]
fn resolve_by_name_rejects_unknown_names() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    let label = m.child(root, "Content", ui.label);
    m.text(label, "Target", "missing");

    let mut ctx = context(&ui);
    let error = run_pass(&ResolveByName, &mut ctx, &mut m.doc).unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::UnresolvedName);
}

#[test]
fn resolve_by_name_follows_attached_owner() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    let panel = m.child(root, "Content", ui.stack_panel);
    let button = m.child(panel, "Children", ui.button);
    let target = m.attached_text(button, ui.label, "Target", " input ");
    let text = m.child(panel, "Children", ui.text_block);
    m.name(text, "input");

    let mut ctx = context(&ui);
    run(&ResolveByName, &mut m, &mut ctx);

    let value = m.doc.first_value(target).map(|v| m.doc.kind(v).clone());
    assert_eq!(value, Some(NodeKind::NameLookup("input".to_string())));
}

#[test]
fn root_gets_name_scope_steps_once() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    let child = m.child(root, "Content", ui.border);

    let mut ctx = context(&ui);
    run(&RootNameScope, &mut m, &mut ctx);
    run(&RootNameScope, &mut m, &mut ctx);

    let steps: Vec<_> = m
        .doc
        .children(root)
        .into_iter()
        .filter_map(|c| match m.doc.kind(c) {
            NodeKind::PostConstruct(steps) => Some(steps.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        steps,
        vec![vec![
            PostConstructStep::RegisterNameScope,
            PostConstructStep::CompleteNameScope
        ]]
    );
    assert_eq!(m.doc.children(child).len(), 0);
}

#[test]
fn every_pass_is_idempotent() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    m.data_type(root, "vm:MainViewModel");
    m.directive(root, DirectiveNamespace::Xaml, "Class", "App.MainWindow");
    let list = m.child(root, "Content", ui.list_box);
    m.extension(list, "ItemsSource", ui.binding, Some("People"));
    let template = m.child(list, "ItemTemplate", ui.data_template);
    let check = m.child(template, "Content", ui.button);
    m.extension(check, "IsEnabled", ui.binding, Some("!IsActive"));

    let mut ctx = context(&ui);
    for pass in default_passes() {
        run(pass.as_ref(), &mut m, &mut ctx);
        let once = m.doc.dump();
        run(pass.as_ref(), &mut m, &mut ctx);
        assert_eq!(m.doc.dump(), once, "{} is not idempotent", pass.name());
    }
}

#[test]
fn empty_document_compiles() {
    let ui = ui_types();
    let mut m = Markup::new();
    assert_eq!(compile(&ui, &mut m), Ok(()));
}

#[test]
fn deep_nesting_does_not_overflow() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    m.data_type(root, "vm:MainViewModel");
    let mut parent = root;
    for _ in 0..5_000 {
        parent = m.child(parent, "Child", ui.border);
    }
    m.extension(parent, "Tag", ui.binding, Some("Title"));
    assert_eq!(compile(&ui, &mut m), Ok(()));
}
