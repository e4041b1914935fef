//! Builder operations.

use std::fmt;

use uix_ir::{NodeId, PropertyId, TypeId};
use uix_types::TypeSystem;

/// One call on the runtime path builder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessorOp {
    CreateBuilder,
    Property {
        property: PropertyId,
        name: String,
        /// Owner of a type-qualified property.
        owner: Option<TypeId>,
        ty: TypeId,
    },
    ChildTraversal,
    Cast {
        target: TypeId,
        strict: bool,
    },
    VisualAncestor {
        ty: TypeId,
        level: u32,
    },
    LogicalAncestor {
        ty: TypeId,
        level: u32,
    },
    SelfSource,
    TemplatedParent {
        ty: TypeId,
    },
    ElementName {
        name: String,
    },
    /// Start from the object built for markup node `value`.
    RawSource {
        value: NodeId,
    },
    Not,
    Build,
}

impl AccessorOp {
    /// Render with type names from `types`.
    pub fn display<'a>(&'a self, types: &'a dyn TypeSystem) -> DisplayOp<'a> {
        DisplayOp { op: self, types }
    }
}

pub struct DisplayOp<'a> {
    op: &'a AccessorOp,
    types: &'a dyn TypeSystem,
}

impl fmt::Display for DisplayOp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |ty: TypeId| self.types.type_name(ty);
        match self.op {
            AccessorOp::CreateBuilder => f.write_str("create-builder"),
            AccessorOp::Property {
                name: property,
                owner: None,
                ty,
                ..
            } => write!(f, "property {property}: {}", name(*ty)),
            AccessorOp::Property {
                name: property,
                owner: Some(owner),
                ty,
                ..
            } => write!(f, "property ({}.{property}): {}", name(*owner), name(*ty)),
            AccessorOp::ChildTraversal => f.write_str("traverse"),
            AccessorOp::Cast {
                target,
                strict: true,
            } => write!(f, "cast {}", name(*target)),
            AccessorOp::Cast {
                target,
                strict: false,
            } => write!(f, "try-cast {}", name(*target)),
            AccessorOp::VisualAncestor { ty, level } => {
                write!(f, "visual-ancestor {} #{level}", name(*ty))
            }
            AccessorOp::LogicalAncestor { ty, level } => {
                write!(f, "logical-ancestor {} #{level}", name(*ty))
            }
            AccessorOp::SelfSource => f.write_str("self"),
            AccessorOp::TemplatedParent { ty } => write!(f, "templated-parent {}", name(*ty)),
            AccessorOp::ElementName { name } => write!(f, "element {name}"),
            AccessorOp::RawSource { value } => write!(f, "source node {}", value.raw()),
            AccessorOp::Not => f.write_str("not"),
            AccessorOp::Build => f.write_str("build"),
        }
    }
}
