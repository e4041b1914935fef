//! Binding source resolution.
//!
//! A compiled binding can select its start object in the path text (`#name`,
//! `$self`, `$parent[...]`) or through one of three long-form properties:
//! `ElementName`, `Source` and `RelativeSource`. At most one selector may be
//! present. The long form is converted into the same [`PathNode`] the path
//! syntax would have produced, and the property is removed from the binding.

use uix_ir::{Document, Location, NodeId, NodeKind, PathNode, ScopeKind, TypeId};

use crate::scope::Scope;
use crate::{CompileContext, CompileError, CompileErrorKind};

const ELEMENT_NAME: &str = "ElementName";
const SOURCE: &str = "Source";
const RELATIVE_SOURCE: &str = "RelativeSource";

/// Convert the long-form source property of `binding`, if any, and remove
/// it from the binding. `scope` holds the binding object's ancestors.
///
/// Returns `Ok(None)` when the binding has no long-form source, or when it
/// selects the data context explicitly (`Mode=DataContext`).
#[tracing::instrument(level = "trace", skip_all, fields(?binding))]
pub fn convert_long_form_source(
    ctx: &mut CompileContext<'_>,
    doc: &mut Document,
    scope: Scope<'_>,
    binding: NodeId,
    path_has_source: bool,
) -> Result<Option<PathNode>, CompileError> {
    let element_name = doc.property(binding, ELEMENT_NAME);
    let source = doc.property(binding, SOURCE);
    let relative_source = doc.property(binding, RELATIVE_SOURCE);

    let present: Vec<NodeId> = [element_name, source, relative_source]
        .into_iter()
        .flatten()
        .collect();
    let selectors = present.len() + usize::from(path_has_source);
    if selectors > 1 {
        let mut error = CompileError::new(
            CompileErrorKind::AmbiguousSource,
            "only one binding source may be specified",
            doc.location(binding),
        )
        .with_note("`ElementName`, `Source` and `RelativeSource` are mutually exclusive");
        if path_has_source {
            error = error.with_note("the binding path already selects a source");
        }
        return Err(error);
    }

    let converted = if let Some(property) = element_name {
        Some(element_name_source(doc, property)?)
    } else if let Some(property) = source {
        let value = value_of(doc, property, SOURCE)?;
        Some(PathNode::RawSource { value })
    } else if let Some(property) = relative_source {
        let value = value_of(doc, property, RELATIVE_SOURCE)?;
        let object = relative_source_object(ctx, doc, value)?;
        resolve_relative_source(ctx, doc, scope, object)?
    } else {
        None
    };

    for property in present {
        doc.remove_child(binding, property);
    }
    Ok(converted)
}

fn value_of(doc: &Document, property: NodeId, name: &str) -> Result<NodeId, CompileError> {
    doc.first_value(property).ok_or_else(|| {
        CompileError::new(
            CompileErrorKind::InvalidValue,
            format!("`{name}` has no value"),
            doc.location(property),
        )
    })
}

fn element_name_source(doc: &Document, property: NodeId) -> Result<PathNode, CompileError> {
    let value = value_of(doc, property, ELEMENT_NAME)?;
    match doc.text(value) {
        Some(name) if !name.trim().is_empty() => Ok(PathNode::Name {
            identifier: name.trim().to_string(),
        }),
        _ => Err(CompileError::new(
            CompileErrorKind::InvalidValue,
            "`ElementName` must be a non-empty element name",
            doc.location(value),
        )),
    }
}

/// The `RelativeSource` object a property value denotes.
fn relative_source_object(
    ctx: &CompileContext<'_>,
    doc: &Document,
    value: NodeId,
) -> Result<NodeId, CompileError> {
    let object = match doc.kind(value) {
        NodeKind::MarkupExtension(inner) => Some(*inner),
        NodeKind::Object(_) => Some(value),
        _ => None,
    };
    let ty = object.and_then(|o| doc.object_type(o));
    match (object, ty) {
        (Some(object), Some(ty)) if ctx.is_assignable(ctx.well_known.relative_source, ty) => {
            Ok(object)
        }
        (_, Some(ty)) => Err(CompileError::new(
            CompileErrorKind::InvalidValue,
            format!("expected a `RelativeSource` value, found `{}`", ctx.type_name(ty)),
            doc.location(value),
        )),
        _ => Err(CompileError::new(
            CompileErrorKind::InvalidValue,
            "expected a `RelativeSource` value",
            doc.location(value),
        )),
    }
}

/// Search direction for `FindAncestor`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tree {
    Visual,
    Logical,
}

/// Resolve a `RelativeSource` object to a source node. `scope` holds the
/// binding object's ancestors.
pub fn resolve_relative_source(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    relative_source: NodeId,
) -> Result<Option<PathNode>, CompileError> {
    let location = doc.location(relative_source);
    let mode = relative_source_mode(doc, relative_source)?;

    if mode.eq_ignore_ascii_case("FindAncestor") {
        let level = ancestor_level(doc, relative_source)?;
        let tree = ancestor_tree(doc, relative_source)?;
        let ty = match doc.property(relative_source, "AncestorType") {
            Some(property) => {
                let value = value_of(doc, property, "AncestorType")?;
                Some(ctx.resolve_type_value(doc, value)?)
            }
            None => None,
        };
        tracing::trace!(?tree, ?ty, level, "relative source ancestor");
        match (tree, ty) {
            (Tree::Visual, Some(ty)) => Ok(Some(PathNode::VisualAncestor { ty, level })),
            (Tree::Visual, None) => Err(CompileError::new(
                CompileErrorKind::UnresolvedAncestor,
                "`AncestorType` must be set when searching the visual tree",
                location,
            )),
            (Tree::Logical, Some(ty)) => Ok(Some(PathNode::LogicalAncestor { ty, level })),
            (Tree::Logical, None) => {
                let ty = infer_logical_ancestor(ctx, doc, scope, level, location)?;
                Ok(Some(PathNode::LogicalAncestor { ty, level }))
            }
        }
    } else if mode.eq_ignore_ascii_case("DataContext") {
        Ok(None)
    } else if mode.eq_ignore_ascii_case("Self") {
        Ok(Some(PathNode::SelfSource))
    } else if mode.eq_ignore_ascii_case("TemplatedParent") {
        match scope.target_type_scope(doc, Some(ScopeKind::ControlTemplate)) {
            Some(template) => Ok(Some(PathNode::TemplatedParent { ty: template.target })),
            None => Err(CompileError::new(
                CompileErrorKind::MissingScope,
                "a `TemplatedParent` binding has to be inside a control template with a `TargetType`",
                location,
            )),
        }
    } else {
        Err(CompileError::new(
            CompileErrorKind::InvalidValue,
            format!("unknown relative source mode `{mode}`"),
            location,
        )
        .with_note("expected `FindAncestor`, `DataContext`, `Self` or `TemplatedParent`"))
    }
}

/// `Mode` property, else the first positional argument, else `FindAncestor`.
fn relative_source_mode(doc: &Document, relative_source: NodeId) -> Result<String, CompileError> {
    if let Some(mode) = doc.property_text(relative_source, "Mode") {
        return Ok(mode.trim().to_string());
    }
    let first_argument = doc
        .as_object(relative_source)
        .and_then(|o| o.arguments.first().copied());
    match first_argument {
        Some(argument) => doc.text(argument).map(|t| t.trim().to_string()).ok_or_else(|| {
            CompileError::new(
                CompileErrorKind::InvalidValue,
                "relative source mode must be text",
                doc.location(argument),
            )
        }),
        None => Ok("FindAncestor".to_string()),
    }
}

/// Zero-based ancestor level. `AncestorLevel` itself is one-based; an
/// explicit `0` means the nearest ancestor, like leaving it unset.
fn ancestor_level(doc: &Document, relative_source: NodeId) -> Result<u32, CompileError> {
    let Some(property) = doc.property(relative_source, "AncestorLevel") else {
        return Ok(0);
    };
    let text = doc
        .first_value(property)
        .and_then(|v| doc.text(v))
        .unwrap_or_default()
        .trim();
    match text.parse::<u32>() {
        Ok(level) => Ok(level.saturating_sub(1)),
        Err(_) => Err(CompileError::new(
            CompileErrorKind::InvalidValue,
            format!("`AncestorLevel` must be a non-negative integer, found `{text}`"),
            doc.location(property),
        )),
    }
}

fn ancestor_tree(doc: &Document, relative_source: NodeId) -> Result<Tree, CompileError> {
    let Some(tree) = doc.property_text(relative_source, "Tree") else {
        return Ok(Tree::Visual);
    };
    let tree = tree.trim();
    if tree.eq_ignore_ascii_case("Visual") {
        Ok(Tree::Visual)
    } else if tree.eq_ignore_ascii_case("Logical") {
        Ok(Tree::Logical)
    } else {
        let location = doc
            .property(relative_source, "Tree")
            .map_or(doc.location(relative_source), |p| doc.location(p));
        Err(CompileError::new(
            CompileErrorKind::InvalidValue,
            format!("unknown tree `{tree}`; expected `Visual` or `Logical`"),
            location,
        ))
    }
}

/// Type of the `level`-th (zero-based) logical-tree ancestor of a binding's
/// target. `scope` holds the binding object's ancestors; the nearest object
/// in it is the target and is not itself a candidate.
pub fn infer_logical_ancestor(
    ctx: &CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    level: u32,
    location: Location,
) -> Result<TypeId, CompileError> {
    let found = scope
        .objects(doc)
        .skip(1)
        .filter_map(|(_, node)| doc.object_type(node))
        .filter(|&ty| ctx.is_assignable(ctx.well_known.logical_element, ty))
        .nth(level as usize);
    found.ok_or_else(|| {
        CompileError::new(
            CompileErrorKind::UnresolvedAncestor,
            "unable to resolve the implicit ancestor type from the markup tree",
            location,
        )
        .with_note(format!(
            "looked for logical ancestor number {} of the binding target",
            u64::from(level) + 1
        ))
    })
}
