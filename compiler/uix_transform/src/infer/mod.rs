//! Data-context type inference.
//!
//! For each object node the engine decides whether the node introduces a
//! new data context and, if so, of which static type. Rules, in order:
//!
//! 1. An `x:DataType` directive wins.
//! 2. A `DataContext` property assigned a compiled binding takes that
//!    binding's result type; assigned an object element, that element's type.
//!    Any other markup extension makes the context uninferrable.
//! 3. A data template uses its `DataType` property, or, when it is the
//!    `ItemTemplate` of an items control, the element type of the control's
//!    items source. Otherwise the template's context is uninferrable.
//!
//! Uninferrable contexts become [`DataContextType::Deferred`]: inference
//! itself succeeds and the error surfaces only when a binding reads it.
//! Results are memoized per node in the [`CompileContext`].

use std::fmt;
use std::rc::Rc;

use uix_ir::{DirectiveNamespace, Document, Location, NodeId, NodeKind, TypeId};

use crate::resolve::resolve_binding_path;
use crate::scope::Scope;
use crate::stack::ensure_sufficient_stack;
use crate::{CompileContext, CompileError, CompileErrorKind};

/// Static type of a data context.
#[derive(Clone)]
pub enum DataContextType {
    Known(TypeId),
    /// Fails when read.
    Deferred(Rc<dyn Fn() -> Result<TypeId, CompileError>>),
}

impl DataContextType {
    /// A context that raises `error` on every read.
    pub fn deferred(error: CompileError) -> Self {
        DataContextType::Deferred(Rc::new(move || Err(error.clone())))
    }

    /// Read the type.
    pub fn get(&self) -> Result<TypeId, CompileError> {
        match self {
            DataContextType::Known(ty) => Ok(*ty),
            DataContextType::Deferred(read) => read(),
        }
    }

    pub fn known(&self) -> Option<TypeId> {
        match self {
            DataContextType::Known(ty) => Some(*ty),
            DataContextType::Deferred(_) => None,
        }
    }
}

impl fmt::Debug for DataContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataContextType::Known(ty) => write!(f, "Known({ty:?})"),
            DataContextType::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// Data context introduced at `node`, or `None` when it inherits its
/// parent's. `scope` holds the ancestors of `node`.
pub fn infer_data_context(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    node: NodeId,
) -> Result<Option<DataContextType>, CompileError> {
    if let Some(memo) = ctx.memoized_data_context(node) {
        return Ok(memo.clone());
    }
    let inferred = ensure_sufficient_stack(|| infer_uncached(ctx, doc, scope, node))?;
    tracing::trace!(?node, ?inferred, "inferred data context");
    ctx.memoize_data_context(node, inferred.clone());
    Ok(inferred)
}

fn infer_uncached(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    node: NodeId,
) -> Result<Option<DataContextType>, CompileError> {
    let Some(ty) = doc.object_type(node) else {
        return Ok(None);
    };

    if let Some(directive) = doc.directive(node, &DirectiveNamespace::Xaml, "DataType") {
        let value = first_value(doc, directive)?;
        let data_type = ctx.resolve_type_value(doc, value)?;
        return Ok(Some(DataContextType::Known(data_type)));
    }

    if let Some(property) = doc.property(node, "DataContext") {
        return data_context_property(ctx, doc, scope, node, property);
    }

    if ctx.is_assignable(ctx.well_known.data_template, ty) {
        if let Some(property) = doc.property(node, "DataType") {
            let value = first_value(doc, property)?;
            let data_type = ctx.resolve_type_value(doc, value)?;
            return Ok(Some(DataContextType::Known(data_type)));
        }
        if let Some(item) = item_template_type(ctx, doc, scope)? {
            return Ok(Some(DataContextType::Known(item)));
        }
        return Ok(Some(DataContextType::deferred(
            CompileError::new(
                CompileErrorKind::UninferrableDataContext,
                "the data context type of this data template cannot be inferred",
                doc.location(node),
            )
            .with_note("set the template's `DataType`, or `x:DataType` on an element inside it"),
        )));
    }

    Ok(None)
}

fn first_value(doc: &Document, member: NodeId) -> Result<NodeId, CompileError> {
    doc.first_value(member).ok_or_else(|| {
        CompileError::new(
            CompileErrorKind::InvalidValue,
            "expected a value",
            doc.location(member),
        )
    })
}

fn data_context_property(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    node: NodeId,
    property: NodeId,
) -> Result<Option<DataContextType>, CompileError> {
    let value = first_value(doc, property)?;
    match doc.kind(value) {
        NodeKind::MarkupExtension(inner) => {
            let inner = *inner;
            let ext_ty = doc.object_type(inner);
            if ext_ty.is_some_and(|t| ctx.is_assignable(Some(ctx.well_known.compiled_binding), t)) {
                let ancestors = extend(scope, &[node, property, value]);
                let path = resolve_binding_path(ctx, doc, Scope::new(&ancestors), inner)?;
                Ok(Some(DataContextType::Known(path.result_type())))
            } else {
                let ext_name = ext_ty.map_or("<unknown>", |t| ctx.type_name(t)).to_string();
                Ok(Some(DataContextType::deferred(
                    CompileError::new(
                        CompileErrorKind::UninferrableDataContext,
                        format!("the data context type cannot be inferred from `{ext_name}`"),
                        doc.location(value),
                    )
                    .with_note("only compiled bindings have a static result type; add `x:DataType`"),
                )))
            }
        }
        NodeKind::Object(obj) => Ok(Some(DataContextType::Known(obj.ty))),
        NodeKind::Text(_) => Ok(ctx.well_known.string.map(DataContextType::Known)),
        _ => Ok(None),
    }
}

/// Element type of the items source when the template being inferred is
/// the `ItemTemplate` of an items control. `scope` holds the template's
/// ancestors.
fn item_template_type(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
) -> Result<Option<TypeId>, CompileError> {
    if !scope
        .enclosing_property(doc)
        .is_some_and(|p| p.owner.is_none() && p.name == "ItemTemplate")
    {
        return Ok(None);
    }
    let Some((index, control)) = scope.nearest_object(doc) else {
        return Ok(None);
    };
    let control_ty = doc.object_type(control);
    if !control_ty.is_some_and(|t| ctx.is_assignable(ctx.well_known.items_control, t)) {
        return Ok(None);
    }

    let Some(source) = doc
        .property(control, "ItemsSource")
        .or_else(|| doc.property(control, "Items"))
    else {
        return Ok(None);
    };
    let value = first_value(doc, source)?;

    let collection = match doc.kind(value) {
        NodeKind::MarkupExtension(inner) => {
            let inner = *inner;
            let is_binding = doc
                .object_type(inner)
                .is_some_and(|t| ctx.is_assignable(Some(ctx.well_known.compiled_binding), t));
            if !is_binding {
                return Ok(None);
            }
            let ancestors = extend(scope.above(index + 1), &[source, value]);
            resolve_binding_path(ctx, doc, Scope::new(&ancestors), inner)?.result_type()
        }
        NodeKind::Object(obj) => obj.ty,
        _ => return Ok(None),
    };

    let element = element_type(ctx, collection);
    tracing::trace!(?collection, ?element, "item template element type");
    Ok(element)
}

/// `T` of the first `IEnumerable<T>` that `collection` implements.
fn element_type(ctx: &CompileContext<'_>, collection: TypeId) -> Option<TypeId> {
    let enumerable = ctx.well_known.enumerable?;
    ctx.types
        .generic_interfaces(collection)
        .into_iter()
        .find(|i| i.definition == enumerable && i.arguments.len() == 1)
        .map(|i| i.arguments[0])
}

fn extend(scope: Scope<'_>, nodes: &[NodeId]) -> Vec<NodeId> {
    let mut ancestors = Vec::with_capacity(scope.nodes().len() + nodes.len());
    ancestors.extend_from_slice(scope.nodes());
    ancestors.extend_from_slice(nodes);
    ancestors
}

/// Data context a compiled binding starts from. `scope` holds the
/// binding object's ancestors.
///
/// A binding assigned to `DataContext` starts from its target's parent.
pub fn binding_data_context(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    location: Location,
) -> Result<TypeId, CompileError> {
    let Some((index, _)) = scope.nearest_object(doc) else {
        return Err(CompileError::internal("binding has no target object", location));
    };
    let sets_data_context = scope
        .enclosing_property(doc)
        .is_some_and(|p| p.owner.is_none() && p.name == "DataContext");
    let search = if sets_data_context {
        scope.above(index)
    } else {
        scope.above(index + 1)
    };
    nearest_data_context(ctx, doc, search, location)
}

/// Data context of the nearest object in `scope` (inclusive) that
/// introduces one.
pub fn nearest_data_context(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    location: Location,
) -> Result<TypeId, CompileError> {
    let objects: Vec<(usize, NodeId)> = scope.objects(doc).collect();
    for (index, node) in objects {
        if let Some(context) = infer_data_context(ctx, doc, scope.above(index), node)? {
            return context.get().map_err(|e| {
                e.with_note(format!("read by the binding at {location}"))
            });
        }
    }
    Err(CompileError::new(
        CompileErrorKind::UninferrableDataContext,
        "no data context type is known for this binding",
        location,
    )
    .with_note("add `x:DataType` to an enclosing element"))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
