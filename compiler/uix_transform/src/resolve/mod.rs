//! Type resolution of binding and property paths.
//!
//! Resolution walks a path left to right, tracking the current static type:
//! sources replace it, property reads replace it with the property's type,
//! casts with their target, and child traversal keeps it. Negation leads the
//! path but applies to its final value, so it only changes the result type.

use std::fmt;

use uix_ir::{
    Document, Location, NodeId, NodeKind, PathElement, PathNode, ResolvedPath, TypeId,
};
use uix_parse::{PropertyPathSegment, PropertyPathSegmentKind};
use uix_types::TypeSystem;

use crate::infer::binding_data_context;
use crate::scope::Scope;
use crate::stack::ensure_sufficient_stack;
use crate::{CompileContext, CompileError, CompileErrorKind};

/// The node holding a compiled binding's path: the first positional
/// argument, else the `Path` property's value.
pub fn binding_path_node(doc: &Document, binding: NodeId) -> Option<NodeId> {
    let is_path = |id: NodeId| {
        matches!(
            doc.kind(id),
            NodeKind::Text(_) | NodeKind::ParsedBindingPath(_) | NodeKind::ResolvedBindingPath(_)
        )
    };
    let argument = doc
        .as_object(binding)
        .and_then(|o| o.arguments.first().copied())
        .filter(|&a| is_path(a));
    argument.or_else(|| {
        doc.property(binding, "Path")
            .and_then(|p| doc.first_value(p))
            .filter(|&v| is_path(v))
    })
}

/// Resolve the parsed path of the compiled binding `binding`. `scope` holds
/// the binding object's ancestors.
///
/// An already resolved path is returned as is.
pub fn resolve_binding_path(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    binding: NodeId,
) -> Result<ResolvedPath, CompileError> {
    let binding_location = doc.location(binding);
    let Some(path_node) = binding_path_node(doc, binding) else {
        return Err(CompileError::internal(
            "compiled binding has no path node",
            binding_location,
        ));
    };
    let location = doc.location(path_node);
    let parsed = match doc.kind(path_node) {
        NodeKind::ResolvedBindingPath(resolved) => return Ok(resolved.clone()),
        NodeKind::ParsedBindingPath(parsed) => parsed,
        _ => {
            return Err(CompileError::internal(
                "compiled binding path was not parsed before resolution",
                location,
            ))
        }
    };

    let first_navigation = parsed.nodes.iter().find(|n| !n.is_transform());
    let start = match first_navigation {
        Some(source) if source.is_source() => {
            source_type(ctx, doc, scope, binding, path_node, source, location)?
        }
        _ => data_context_start(ctx, doc, scope, binding, location)?,
    };

    let mut current = start;
    let mut negated = false;
    let mut elements = Vec::with_capacity(parsed.nodes.len());
    for (index, node) in parsed.nodes.iter().enumerate() {
        let (produces, property) = match node {
            PathNode::Not => {
                negated = true;
                (ctx.well_known.boolean, None)
            }
            PathNode::PropertyAccess { name, owner } => {
                let on = owner.unwrap_or(current);
                let info = ctx.types.find_any_property(on, name).ok_or_else(|| {
                    let at = location.offset_in(&parsed.text, parsed.offset_of(index));
                    unknown_member(ctx.types, name, on, at)
                        .with_note(format!("in binding path `{}`", parsed.text))
                })?;
                current = info.ty;
                (info.ty, Some(info.id))
            }
            PathNode::ChildTraversal => (current, None),
            PathNode::Cast { target, .. } => {
                current = *target;
                (current, None)
            }
            source => {
                let leads = parsed.nodes[..index].iter().all(PathNode::is_transform);
                if !leads {
                    return Err(CompileError::internal(
                        format!("binding source `{source:?}` does not lead the path"),
                        location,
                    ));
                }
                (current, None)
            }
        };
        elements.push(PathElement {
            node: node.clone(),
            produces,
            property,
        });
    }

    let result = if negated { ctx.well_known.boolean } else { current };
    tracing::trace!(
        path = %parsed.text,
        start = ctx.type_name(start),
        result = ctx.type_name(result),
        "resolved binding path"
    );
    Ok(ResolvedPath {
        start,
        elements,
        result,
    })
}

/// Start type when the path does not select a source: the binding's own
/// `DataType`, else the inferred data context.
fn data_context_start(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    binding: NodeId,
    location: Location,
) -> Result<TypeId, CompileError> {
    if let Some(value) = doc.property(binding, "DataType").and_then(|p| doc.first_value(p)) {
        return ctx.resolve_type_value(doc, value);
    }
    binding_data_context(ctx, doc, scope, location)
}

/// Type of a leading source node of `binding`'s path, held in `path_node`.
fn source_type(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    binding: NodeId,
    path_node: NodeId,
    source: &PathNode,
    location: Location,
) -> Result<TypeId, CompileError> {
    match source {
        PathNode::Name { identifier } => ctx
            .named_element(doc, identifier)
            .map(|e| e.ty)
            .ok_or_else(|| {
                CompileError::new(
                    CompileErrorKind::UnresolvedName,
                    format!("no element named `{identifier}`"),
                    location,
                )
            }),
        PathNode::SelfSource => scope
            .nearest_object(doc)
            .and_then(|(_, target)| doc.object_type(target))
            .ok_or_else(|| CompileError::internal("binding has no target object", location)),
        PathNode::VisualAncestor { ty, .. }
        | PathNode::LogicalAncestor { ty, .. }
        | PathNode::TemplatedParent { ty } => Ok(*ty),
        PathNode::RawSource { value } => {
            let mut ancestors = scope.nodes().to_vec();
            ancestors.extend([binding, path_node]);
            raw_source_type(ctx, doc, Scope::new(&ancestors), *value)
        }
        other => Err(CompileError::internal(
            format!("`{other:?}` is not a binding source"),
            location,
        )),
    }
}

/// Static type of an explicit `Source` value; `scope` holds its ancestors.
/// A compiled binding yields its result type; other markup extensions have
/// no static type.
fn raw_source_type(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    value: NodeId,
) -> Result<TypeId, CompileError> {
    match doc.kind(value) {
        NodeKind::Object(obj) => Ok(obj.ty),
        NodeKind::MarkupExtension(inner) => {
            let inner = *inner;
            let Some(ext_ty) = doc.object_type(inner) else {
                return Err(CompileError::internal(
                    "markup extension does not wrap an object",
                    doc.location(value),
                ));
            };
            if ctx.is_assignable(Some(ctx.well_known.compiled_binding), ext_ty) {
                let mut ancestors = scope.nodes().to_vec();
                ancestors.push(value);
                let path = ensure_sufficient_stack(|| {
                    resolve_binding_path(ctx, doc, Scope::new(&ancestors), inner)
                })?;
                return Ok(path.result_type());
            }
            Err(CompileError::new(
                CompileErrorKind::UninferrableDataContext,
                format!(
                    "the binding source type cannot be inferred from `{}`",
                    ctx.type_name(ext_ty)
                ),
                doc.location(value),
            )
            .with_note(
                "only compiled bindings have a static result type; \
                 use an object element or a compiled binding as `Source`",
            ))
        }
        NodeKind::Text(_) => ctx.well_known.string.ok_or_else(|| {
            CompileError::new(
                CompileErrorKind::UnresolvedType,
                "text binding source needs a string type",
                doc.location(value),
            )
        }),
        _ => Err(CompileError::new(
            CompileErrorKind::InvalidValue,
            "unsupported `Source` value",
            doc.location(value),
        )),
    }
}

fn unknown_member(types: &dyn TypeSystem, name: &str, on: TypeId, location: Location) -> CompileError {
    CompileError::new(
        CompileErrorKind::UnknownMember,
        format!("no property `{name}` on type `{}`", types.type_name(on)),
        location,
    )
}

/// Resolve a parsed property path. `scope` holds the ancestors of the
/// property assignment; the path starts at the nearest target-type scope.
///
/// `location` is where `text` starts; errors point at the failing segment.
pub fn resolve_property_path(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    text: &str,
    segments: &[PropertyPathSegment],
    location: Location,
) -> Result<ResolvedPath, CompileError> {
    let Some(target_scope) = scope.target_type_scope(doc, None) else {
        return Err(CompileError::new(
            CompileErrorKind::MissingScope,
            "a property path must be inside a style or control template with a `TargetType`",
            location,
        ));
    };

    let start = target_scope.target;
    let mut current = start;
    let mut elements = Vec::with_capacity(segments.len());
    for segment in segments {
        let at = location.offset_in(text, segment.span.start);
        let element = match &segment.kind {
            PropertyPathSegmentKind::Property { name } => {
                let info = ctx
                    .types
                    .find_any_property(current, name)
                    .ok_or_else(|| unknown_member(ctx.types, name, current, at))?;
                current = info.ty;
                PathElement {
                    node: PathNode::PropertyAccess {
                        name: name.clone(),
                        owner: None,
                    },
                    produces: info.ty,
                    property: Some(info.id),
                }
            }
            PropertyPathSegmentKind::QualifiedProperty { owner, name } => {
                let owner_ty = ctx.resolve_type(owner, at)?;
                let info = ctx
                    .types
                    .find_any_property(owner_ty, name)
                    .ok_or_else(|| unknown_member(ctx.types, name, owner_ty, at))?;
                current = info.ty;
                PathElement {
                    node: PathNode::PropertyAccess {
                        name: name.clone(),
                        owner: Some(owner_ty),
                    },
                    produces: info.ty,
                    property: Some(info.id),
                }
            }
            PropertyPathSegmentKind::ChildTraversal => PathElement {
                node: PathNode::ChildTraversal,
                produces: current,
                property: None,
            },
            PropertyPathSegmentKind::Cast { ty, strict } => {
                let target = ctx.resolve_type(ty, at)?;
                current = target;
                PathElement {
                    node: PathNode::Cast {
                        target,
                        strict: *strict,
                    },
                    produces: target,
                    property: None,
                }
            }
        };
        elements.push(element);
    }

    Ok(ResolvedPath {
        start,
        elements,
        result: current,
    })
}

/// Prints a resolved property path in property-path syntax, naming types
/// the way the type system does.
pub struct DisplayPropertyPath<'a> {
    types: &'a dyn TypeSystem,
    path: &'a ResolvedPath,
}

impl<'a> DisplayPropertyPath<'a> {
    pub fn new(types: &'a dyn TypeSystem, path: &'a ResolvedPath) -> Self {
        DisplayPropertyPath { types, path }
    }
}

impl fmt::Display for DisplayPropertyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.path.elements {
            match &element.node {
                PathNode::PropertyAccess { name, owner: None } => f.write_str(name)?,
                PathNode::PropertyAccess {
                    name,
                    owner: Some(owner),
                } => write!(f, "({}.{name})", self.types.type_name(*owner))?,
                PathNode::ChildTraversal => f.write_str(".")?,
                PathNode::Cast {
                    target,
                    strict: false,
                } => write!(f, ":as({})", self.types.type_name(*target))?,
                PathNode::Cast {
                    target,
                    strict: true,
                } => write!(f, ":is({})", self.types.type_name(*target))?,
                other => write!(f, "<{other:?}>")?,
            }
        }
        Ok(())
    }
}
