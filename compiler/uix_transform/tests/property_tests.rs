//! Property-based tests for property path resolution.
//!
//! A resolved property path prints back to text that resolves to the same
//! path, and printing a canonical path reproduces it exactly.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use uix_ir::{Document, Location, NodeId, NodeKind, ResolvedPath};
use uix_transform::{run_pipeline, CompileContext, CompileOptions, DisplayPropertyPath};
use uix_types::{PropertyFlags, TypeRegistry, TypeSystem};

fn registry() -> TypeRegistry {
    let mut r = TypeRegistry::new();
    let object = r.add_type("Object");
    r.add_derived("CompiledBindingExtension", object);
    r.add_derived("Boolean", object);
    let path = r.add_derived("PropertyPath", object);
    let style = r.add_derived("Style", object);
    r.add_property(style, "TargetType", object, PropertyFlags::empty());
    let trigger = r.add_derived("Trigger", object);
    r.add_property(trigger, "Path", path, PropertyFlags::empty());

    let node = r.add_derived("Node", object);
    r.add_property(node, "Next", node, PropertyFlags::empty());
    r.add_derived("SpecialNode", node);
    let layout = r.add_derived("Layout", object);
    r.add_property(layout, "Slot", node, PropertyFlags::ATTACHED);
    r
}

/// Resolve `text` as the `Path` of a trigger in a style targeting `Node`.
fn resolve(registry: &TypeRegistry, text: &str) -> ResolvedPath {
    let ty = |name: &str| registry.resolve_type(name).unwrap();
    let at = Location::new(1, 1);
    let mut doc = Document::new();
    let style = doc.add_object(ty("Style"), at);
    doc.set_root(style);
    let target = doc.add_type_reference("Node", at);
    let target_type = doc.add_property("TargetType", None, vec![target], at);
    doc.push_child(style, target_type);
    let trigger = doc.add_object(ty("Trigger"), at);
    let triggers = doc.add_property("Triggers", None, vec![trigger], at);
    doc.push_child(style, triggers);
    let value = doc.add_text(text, at);
    let path = doc.add_property("Path", None, vec![value], at);
    doc.push_child(trigger, path);

    let mut ctx = CompileContext::new(registry, CompileOptions::default()).unwrap();
    run_pipeline(&mut ctx, &mut doc).unwrap();
    resolved_value(&doc, value)
}

fn resolved_value(doc: &Document, value: NodeId) -> ResolvedPath {
    match doc.kind(value) {
        NodeKind::ResolvedPropertyPath(path) => path.clone(),
        other => panic!("property path not resolved: {other:?}"),
    }
}

fn path_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(0..4u8, 0..8).prop_map(|steps| {
        let mut text = String::from("Next");
        for step in steps {
            text.push_str(match step {
                0 => ".Next",
                1 => ".(Layout.Slot)",
                2 => ":as(SpecialNode)",
                _ => ":is(Node)",
            });
        }
        text
    })
}

proptest! {
    #[test]
    fn printed_path_resolves_to_the_same_path(text in path_text_strategy()) {
        let registry = registry();
        let first = resolve(&registry, &text);
        let printed = DisplayPropertyPath::new(&registry, &first).to_string();
        prop_assert_eq!(&printed, &text);
        let second = resolve(&registry, &printed);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn whitespace_does_not_change_the_resolved_path(text in path_text_strategy()) {
        let registry = registry();
        let spaced = text
            .replace(".N", " . N")
            .replace(".(", " . (")
            .replace(':', " :");
        prop_assert_eq!(resolve(&registry, &text), resolve(&registry, &spaced));
    }
}
