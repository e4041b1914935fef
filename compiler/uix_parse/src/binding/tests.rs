use super::*;
use pretty_assertions::assert_eq;

fn kinds(text: &str) -> Vec<SegmentKind> {
    match parse_binding_path(text) {
        Ok(expr) => expr.segments().iter().map(|s| s.kind.clone()).collect(),
        Err(e) => panic!("`{text}` failed to parse: {e} at {:?}", e.span),
    }
}

fn error(text: &str) -> SyntaxError {
    match parse_binding_path(text) {
        Ok(expr) => panic!("`{text}` parsed unexpectedly: {expr:?}"),
        Err(e) => e,
    }
}

fn prop(name: &str) -> SegmentKind {
    SegmentKind::Property {
        name: name.to_string(),
    }
}

#[test]
fn empty_and_dot_are_the_empty_marker() {
    for text in ["", "   ", ".", " . "] {
        assert_eq!(parse_binding_path(text), Ok(BindingExpr::Empty), "{text:?}");
    }
}

#[test]
fn plain_property_chain() {
    assert_eq!(
        kinds("Person.Address.City"),
        vec![prop("Person"), prop("Address"), prop("City")]
    );
}

#[test]
fn segment_spans_cover_names() {
    let expr = parse_binding_path("Person.Name");
    let spans: Vec<_> = expr
        .map(|e| e.segments().iter().map(|s| s.span).collect())
        .unwrap_or_default();
    assert_eq!(spans, vec![Span::new(0, 6), Span::new(7, 11)]);
}

#[test]
fn attached_property_segments() {
    assert_eq!(
        kinds("Item.(local:Layout.Row)"),
        vec![
            prop("Item"),
            SegmentKind::AttachedProperty {
                owner: "local:Layout".to_string(),
                name: "Row".to_string(),
            },
        ]
    );
}

#[test]
fn negation_and_sources() {
    assert_eq!(
        kinds("!!#submit.IsEnabled"),
        vec![
            SegmentKind::Not,
            SegmentKind::Not,
            SegmentKind::ElementName {
                name: "submit".to_string()
            },
            prop("IsEnabled"),
        ]
    );
    assert_eq!(kinds("$self.Bounds"), vec![SegmentKind::SelfSource, prop("Bounds")]);
    assert_eq!(kinds("$self"), vec![SegmentKind::SelfSource]);
    assert_eq!(kinds("!"), vec![SegmentKind::Not]);
}

#[test]
fn parent_source_forms() {
    assert_eq!(
        kinds("$parent.Title"),
        vec![
            SegmentKind::Parent {
                ty: None,
                level: 0
            },
            prop("Title")
        ]
    );
    assert_eq!(
        kinds("$parent[ListBox;2].SelectedItem"),
        vec![
            SegmentKind::Parent {
                ty: Some("ListBox".to_string()),
                level: 2
            },
            prop("SelectedItem"),
        ]
    );
    assert_eq!(
        kinds("$parent[vm:Shell]"),
        vec![SegmentKind::Parent {
            ty: Some("vm:Shell".to_string()),
            level: 0
        }]
    );
}

#[test]
fn trailing_separator_points_at_the_dot() {
    let err = error("Person.");
    assert_eq!(err.span, Span::new(6, 7));
    assert_eq!(err.message, "expected property name after `.`");

    assert_eq!(error("#box. ").span, Span::new(4, 5));
}

#[test]
fn empty_segment_points_at_second_dot() {
    let err = error("Background..Color");
    assert_eq!(err.span, Span::new(11, 12));
    assert_eq!(err.message, "expected property name, found `.`");
}

#[test]
fn malformed_sources_and_members() {
    assert_eq!(error("$sibling").message, "unknown binding source `$sibling`");
    assert_eq!(error("$parent[ListBox;x]").span, Span::new(16, 17));
    assert_eq!(error("$parent[ListBox;1").message, "expected `]` to close `$parent[...]`, found end of path");
    assert_eq!(error("(Grid.Row").span, Span::point(9));
    assert_eq!(error("A B").message, "expected `.` between path segments, found ` `");
    assert_eq!(error("#submitIsEnabled Name").span, Span::new(16, 17));
    assert_eq!(error(".Name").span, Span::new(0, 1));
    assert_eq!(error("$parent[A;99999999999]").message, "ancestor level `99999999999` is too large");
}

#[test]
fn source_segments_are_classified() {
    assert!(SegmentKind::SelfSource.is_source());
    assert!(!SegmentKind::Not.is_source());
    assert!(!prop("A").is_source());
}
