use super::*;
use pretty_assertions::assert_eq;
use uix_ir::{Location, TypeId};

const STYLE: TypeId = TypeId::new(1);
const BORDER: TypeId = TypeId::new(2);
const BUTTON: TypeId = TypeId::new(3);

fn loc() -> Location {
    Location::new(1, 1)
}

/// Style > Setters > Border > Child > Button
fn chain() -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let style = doc.add_object(STYLE, loc());
    let setters = doc.add_property("Setters", None, vec![], loc());
    let border = doc.add_object(BORDER, loc());
    let child = doc.add_property("Child", None, vec![], loc());
    let button = doc.add_object(BUTTON, loc());
    (doc, vec![style, setters, border, child, button])
}

#[test]
fn objects_are_listed_nearest_first() {
    let (doc, nodes) = chain();
    let scope = Scope::new(&nodes);
    let objects: Vec<_> = scope.objects(&doc).collect();
    assert_eq!(objects, vec![(4, nodes[4]), (2, nodes[2]), (0, nodes[0])]);
    assert_eq!(scope.nearest_object(&doc), Some((4, nodes[4])));
}

#[test]
fn above_narrows_to_ancestors() {
    let (doc, nodes) = chain();
    let scope = Scope::new(&nodes).above(4);
    assert_eq!(scope.nodes().len(), 4);
    assert_eq!(scope.nearest_object(&doc), Some((2, nodes[2])));
    assert!(Scope::new(&nodes).above(0).is_empty());
}

#[test]
fn enclosing_property_stops_at_objects() {
    let (doc, nodes) = chain();
    let inside_child = Scope::new(&nodes).above(4);
    assert_eq!(inside_child.enclosing_property(&doc).map(|p| p.name.as_str()), Some("Child"));
    assert!(Scope::new(&nodes).enclosing_property(&doc).is_none());
    assert!(Scope::EMPTY.enclosing_property(&doc).is_none());
}

#[test]
fn target_type_scope_filters_by_kind() {
    let (mut doc, nodes) = chain();
    if let Some(style) = doc.as_object_mut(nodes[0]) {
        style.scope = Some(TargetTypeScope {
            kind: ScopeKind::Style,
            target: BORDER,
        });
    }
    let scope = Scope::new(&nodes);
    assert_eq!(scope.target_type_scope(&doc, None).map(|s| s.target), Some(BORDER));
    assert!(scope
        .target_type_scope(&doc, Some(ScopeKind::ControlTemplate))
        .is_none());
}

#[test]
fn stack_view_tracks_push_and_pop() {
    let mut stack = ScopeStack::new();
    stack.push(NodeId::new(0));
    stack.push(NodeId::new(1));
    assert_eq!(stack.view().nodes(), &[NodeId::new(0), NodeId::new(1)]);
    assert_eq!(stack.pop(), Some(NodeId::new(1)));
    assert_eq!(stack.view().nodes(), &[NodeId::new(0)]);
}
