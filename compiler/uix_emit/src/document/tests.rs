use super::*;
use pretty_assertions::assert_eq;
use uix_ir::{DirectiveNamespace, ParsedBindingPath, PathNode, ResolvedPath};
use uix_transform::{run_pipeline, CompileContext, CompileErrorKind, CompileOptions};
use uix_types::{PropertyFlags, TypeRegistry, TypeSystem};

/// `<Window x:DataType="Model" Title="{CompiledBinding !Busy}"/>`
fn compiled() -> (TypeRegistry, Document) {
    let mut registry = TypeRegistry::new();
    let object = registry.add_type("Object");
    let boolean = registry.add_derived("Boolean", object);
    registry.add_derived("CompiledBindingExtension", object);
    let window = registry.add_derived("Window", object);
    registry.add_property(window, "Title", object, PropertyFlags::empty());
    let model = registry.add_derived("Model", object);
    registry.add_property(model, "Busy", boolean, PropertyFlags::empty());

    let at = Location::new(1, 1);
    let mut doc = Document::new();
    let root = doc.add_object(window, at);
    doc.set_root(root);
    let data_type = doc.add_type_reference("Model", at);
    let directive = doc.add_directive(DirectiveNamespace::Xaml, "DataType", vec![data_type], at);
    doc.push_child(root, directive);
    let binding_ty = registry.resolve_type("CompiledBindingExtension").unwrap();
    let binding = doc.add_object(binding_ty, Location::new(1, 20));
    let path = doc.add_text("!Busy", Location::new(1, 37));
    doc.push_argument(binding, path);
    let ext = doc.add_markup_extension(binding, Location::new(1, 20));
    let title = doc.add_property("Title", None, vec![ext], Location::new(1, 13));
    doc.push_child(root, title);

    let mut ctx = CompileContext::new(&registry, CompileOptions::default()).unwrap();
    run_pipeline(&mut ctx, &mut doc).unwrap();
    (registry, doc)
}

#[test]
fn bindings_become_chains_and_root_steps_are_collected() {
    let (registry, doc) = compiled();
    let out = emit_document(&doc).unwrap();

    assert_eq!(
        out.root_steps,
        vec![
            PostConstructStep::RegisterNameScope,
            PostConstructStep::CompleteNameScope
        ]
    );
    assert_eq!(out.chains.len(), 1);
    let chain = &out.chains[0];
    assert_eq!(chain.kind, ChainKind::Binding);
    assert_eq!(chain.location, Location::new(1, 37));
    assert_eq!(registry.type_name(chain.result_type), "Boolean");
    let rendered: Vec<String> = chain
        .ops
        .iter()
        .map(|op| op.display(&registry).to_string())
        .collect();
    assert_eq!(
        rendered,
        vec!["create-builder", "not", "property Busy: Boolean", "build"]
    );
}

#[test]
fn unresolved_binding_path_is_an_internal_error() {
    let mut doc = Document::new();
    let root = doc.add_object(TypeId::new(0), Location::new(1, 1));
    doc.set_root(root);
    let parsed = doc.alloc(
        NodeKind::ParsedBindingPath(ParsedBindingPath {
            text: "Name".to_string(),
            nodes: [PathNode::PropertyAccess {
                name: "Name".to_string(),
                owner: None,
            }]
            .into_iter()
            .collect(),
            offsets: [0].into_iter().collect(),
        }),
        Location::new(2, 4),
    );
    doc.push_argument(root, parsed);

    let error = emit_document(&doc).unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::Internal);
    assert_eq!(error.location, Location::new(2, 4));
}

#[test]
fn empty_document_has_no_chains() {
    assert_eq!(emit_document(&Document::new()), Ok(CompiledDocument::default()));
}

#[test]
fn property_paths_are_emitted_as_property_path_chains() {
    let mut doc = Document::new();
    let root = doc.add_object(TypeId::new(0), Location::new(1, 1));
    doc.set_root(root);
    let path = doc.alloc(
        NodeKind::ResolvedPropertyPath(ResolvedPath::identity(TypeId::new(0))),
        Location::new(3, 9),
    );
    let pv = doc.add_property("Path", None, vec![path], Location::new(3, 3));
    doc.push_child(root, pv);

    let out = emit_document(&doc).unwrap();
    assert_eq!(out.chains.len(), 1);
    assert_eq!(out.chains[0].kind, ChainKind::PropertyPath);
    assert_eq!(out.chains[0].node, path);
    assert!(out.root_steps.is_empty());
}
