use uix_ir::{Location, PathElement, PathNode, ResolvedPath};
use uix_transform::CompileError;

use crate::AccessorOp;

/// Op sequence for one resolved path.
///
/// # Errors
///
/// A property element without a resolved property is an internal error:
/// resolution always records one.
pub fn generate_accessor_chain(
    path: &ResolvedPath,
    location: Location,
) -> Result<Vec<AccessorOp>, CompileError> {
    let mut ops = Vec::with_capacity(path.elements.len() + 2);
    ops.push(AccessorOp::CreateBuilder);
    for element in &path.elements {
        ops.push(element_op(element, location)?);
    }
    ops.push(AccessorOp::Build);
    Ok(ops)
}

fn element_op(element: &PathElement, location: Location) -> Result<AccessorOp, CompileError> {
    Ok(match &element.node {
        PathNode::PropertyAccess { name, owner } => {
            let Some(property) = element.property else {
                return Err(CompileError::internal(
                    format!("property `{name}` reached code generation unresolved"),
                    location,
                ));
            };
            AccessorOp::Property {
                property,
                name: name.clone(),
                owner: *owner,
                ty: element.produces,
            }
        }
        PathNode::ChildTraversal => AccessorOp::ChildTraversal,
        PathNode::Cast { target, strict } => AccessorOp::Cast {
            target: *target,
            strict: *strict,
        },
        PathNode::VisualAncestor { ty, level } => AccessorOp::VisualAncestor {
            ty: *ty,
            level: *level,
        },
        PathNode::LogicalAncestor { ty, level } => AccessorOp::LogicalAncestor {
            ty: *ty,
            level: *level,
        },
        PathNode::SelfSource => AccessorOp::SelfSource,
        PathNode::TemplatedParent { ty } => AccessorOp::TemplatedParent { ty: *ty },
        PathNode::Name { identifier } => AccessorOp::ElementName {
            name: identifier.clone(),
        },
        PathNode::RawSource { value } => AccessorOp::RawSource { value: *value },
        PathNode::Not => AccessorOp::Not,
    })
}

#[cfg(test)]
mod tests;
