use super::*;
use pretty_assertions::assert_eq;
use uix_ir::{PropertyId, TypeId};
use uix_transform::CompileErrorKind;

const PERSON: TypeId = TypeId::new(1);
const STRING: TypeId = TypeId::new(2);
const BOOLEAN: TypeId = TypeId::new(3);

fn element(node: PathNode, produces: TypeId, property: Option<PropertyId>) -> PathElement {
    PathElement {
        node,
        produces,
        property,
    }
}

#[test]
fn empty_path_is_create_then_build() {
    let ops = generate_accessor_chain(&ResolvedPath::identity(PERSON), Location::UNKNOWN);
    assert_eq!(ops, Ok(vec![AccessorOp::CreateBuilder, AccessorOp::Build]));
}

#[test]
fn ops_follow_source_order() {
    let path = ResolvedPath {
        start: PERSON,
        elements: vec![
            element(PathNode::Not, BOOLEAN, None),
            element(
                PathNode::Name {
                    identifier: "input".to_string(),
                },
                PERSON,
                None,
            ),
            element(
                PathNode::PropertyAccess {
                    name: "Name".to_string(),
                    owner: None,
                },
                STRING,
                Some(PropertyId::new(4)),
            ),
        ],
        result: BOOLEAN,
    };
    let ops = generate_accessor_chain(&path, Location::new(2, 3));
    assert_eq!(
        ops,
        Ok(vec![
            AccessorOp::CreateBuilder,
            AccessorOp::Not,
            AccessorOp::ElementName {
                name: "input".to_string()
            },
            AccessorOp::Property {
                property: PropertyId::new(4),
                name: "Name".to_string(),
                owner: None,
                ty: STRING,
            },
            AccessorOp::Build,
        ])
    );
}

#[test]
fn unresolved_property_is_an_internal_error() {
    let path = ResolvedPath {
        start: PERSON,
        elements: vec![element(
            PathNode::PropertyAccess {
                name: "Name".to_string(),
                owner: None,
            },
            STRING,
            None,
        )],
        result: STRING,
    };
    let error = generate_accessor_chain(&path, Location::new(9, 1)).map_err(|e| (e.kind, e.location));
    assert_eq!(error, Err((CompileErrorKind::Internal, Location::new(9, 1))));
}
