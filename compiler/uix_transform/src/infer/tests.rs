use super::*;
use pretty_assertions::assert_eq;

use crate::passes::{run_pass, BindingPathParser, StripCompilerDirectives};
use crate::test_support::{compile, context, resolved, ui_types, Markup, Ui};

/// `<Window x:DataType="vm:MainViewModel">`
fn window(ui: &Ui, m: &mut Markup) -> NodeId {
    let root = m.root(ui.window);
    m.data_type(root, "vm:MainViewModel");
    root
}

#[test]
fn explicit_data_type_wins_over_data_context() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = window(&ui, &mut m);
    m.child(root, "DataContext", ui.person);
    let text = m.child(root, "Content", ui.text_block);
    let binding = m.extension(text, "Text", ui.binding, Some("Title"));

    compile(&ui, &mut m).unwrap();
    let path = resolved(&m.doc, binding);
    assert_eq!(path.start, ui.main_vm);
    assert_eq!(path.result_type(), ui.string);
}

#[test]
fn data_context_binding_starts_from_parent_context() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = window(&ui, &mut m);
    let border = m.child(root, "Content", ui.border);
    let context_binding = m.extension(border, "DataContext", ui.binding, Some("Selected"));
    let text = m.child(border, "Child", ui.text_block);
    let binding = m.extension(text, "Text", ui.binding, Some("Age"));

    compile(&ui, &mut m).unwrap();
    assert_eq!(resolved(&m.doc, context_binding).start, ui.main_vm);
    assert_eq!(resolved(&m.doc, context_binding).result_type(), ui.person);
    assert_eq!(resolved(&m.doc, binding).start, ui.person);
    assert_eq!(resolved(&m.doc, binding).result_type(), ui.int32);
}

#[test]
fn object_data_context_uses_its_type() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    m.child(root, "DataContext", ui.person);
    let binding = m.extension(root, "Title", ui.binding, Some("Name"));

    compile(&ui, &mut m).unwrap();
    assert_eq!(resolved(&m.doc, binding).start, ui.person);
}

#[test]
fn item_template_takes_element_type_of_items_source() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = window(&ui, &mut m);
    let list = m.child(root, "Content", ui.list_box);
    m.extension(list, "ItemsSource", ui.binding, Some("People"));
    let template = m.child(list, "ItemTemplate", ui.data_template);
    let text = m.child(template, "Content", ui.text_block);
    let binding = m.extension(text, "Text", ui.binding, Some("Friends"));

    compile(&ui, &mut m).unwrap();
    assert_eq!(resolved(&m.doc, binding).start, ui.person);
    assert_eq!(resolved(&m.doc, binding).result_type(), ui.people);
}

#[test]
fn item_template_with_object_items_source() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    let list = m.child(root, "Content", ui.list_box);
    m.child(list, "ItemsSource", ui.people);
    let template = m.child(list, "ItemTemplate", ui.data_template);
    let text = m.child(template, "Content", ui.text_block);
    let binding = m.extension(text, "Text", ui.binding, Some("Name"));

    compile(&ui, &mut m).unwrap();
    assert_eq!(resolved(&m.doc, binding).start, ui.person);
}

#[test]
fn template_data_type_property_is_used_verbatim() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = window(&ui, &mut m);
    let template = m.child(root, "Tag", ui.data_template);
    m.type_ref(template, "DataType", "vm:Person");
    let text = m.child(template, "Content", ui.text_block);
    let binding = m.extension(text, "Text", ui.binding, Some("Name"));

    compile(&ui, &mut m).unwrap();
    assert_eq!(resolved(&m.doc, binding).start, ui.person);
}

/// `<DataTemplate>` with no data type outside any items control.
fn loose_template(ui: &Ui, with_binding: bool) -> (Markup, NodeId) {
    let mut m = Markup::new();
    let root = window(ui, &mut m);
    let template = m.child(root, "Tag", ui.data_template);
    let text = m.child(template, "Content", ui.text_block);
    if with_binding {
        m.extension(text, "Text", ui.binding, Some("Name"));
    } else {
        m.text(text, "Text", "static");
    }
    (m, template)
}

#[test]
fn uninferrable_template_fails_only_when_read() {
    let ui = ui_types();
    let (mut unread, _) = loose_template(&ui, false);
    assert_eq!(compile(&ui, &mut unread), Ok(()));

    let (mut read, template) = loose_template(&ui, true);
    let error = compile(&ui, &mut read).unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::UninferrableDataContext);
    assert_eq!(error.location, read.doc.location(template));
    assert!(error.notes.iter().any(|n| n.contains("read by the binding")));
}

#[test]
fn non_binding_extension_defers_the_context() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = window(&ui, &mut m);
    let border = m.child(root, "Content", ui.border);
    m.extension(border, "DataContext", ui.static_resource, Some("vm"));
    let text = m.child(border, "Child", ui.text_block);
    m.extension(text, "Text", ui.binding, Some("Name"));

    let error = compile(&ui, &mut m).unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::UninferrableDataContext);
    assert!(error.message.contains("StaticResourceExtension"));
    let value = m.doc.property(border, "DataContext").and_then(|p| m.doc.first_value(p));
    assert_eq!(Some(error.location), value.map(|v| m.doc.location(v)));
}

#[test]
fn binding_without_any_data_context_is_an_error() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = m.root(ui.window);
    m.extension(root, "Title", ui.binding, Some("Title"));

    let error = compile(&ui, &mut m).unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::UninferrableDataContext);
    assert!(error.notes.iter().any(|n| n.contains("x:DataType")));
}

#[test]
fn inference_is_memoized_per_node() {
    let ui = ui_types();
    let mut m = Markup::new();
    let root = window(&ui, &mut m);
    let mut ctx = context(&ui);
    run_pass(&StripCompilerDirectives, &mut ctx, &mut m.doc).unwrap();
    run_pass(&BindingPathParser, &mut ctx, &mut m.doc).unwrap();

    assert!(ctx.memoized_data_context(root).is_none());
    let first = infer_data_context(&mut ctx, &m.doc, Scope::EMPTY, root).unwrap();
    assert_eq!(first.and_then(|c| c.known()), Some(ui.main_vm));
    assert!(ctx.memoized_data_context(root).is_some());

    // A later change to the node is not observed: the memo answers.
    if let Some(obj) = m.doc.as_object_mut(root) {
        obj.children.clear();
    }
    let second = infer_data_context(&mut ctx, &m.doc, Scope::EMPTY, root).unwrap();
    assert_eq!(second.and_then(|c| c.known()), Some(ui.main_vm));
}

#[test]
fn deferred_context_reports_its_error_on_every_read() {
    let error = CompileError::new(
        CompileErrorKind::UninferrableDataContext,
        "cannot infer",
        Location::new(4, 2),
    );
    let context = DataContextType::deferred(error.clone());
    assert_eq!(context.known(), None);
    assert_eq!(context.get(), Err(error.clone()));
    assert_eq!(context.get(), Err(error));
    assert_eq!(format!("{context:?}"), "Deferred");
}
