//! Parses and resolves property-path typed property values.

use uix_ir::{Document, NodeId, NodeKind};
use uix_parse::parse_property_path;

use super::Transformer;
use crate::resolve::{resolve_property_path, DisplayPropertyPath};
use crate::scope::Scope;
use crate::{CompileContext, CompileError};

/// Rewrites text assigned to a property of the well-known property-path
/// type into a [`NodeKind::ResolvedPropertyPath`].
pub struct PropertyPathResolver;

impl Transformer for PropertyPathResolver {
    fn name(&self) -> &'static str {
        "property-path-resolver"
    }

    fn transform(
        &self,
        ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        let Some(path_type) = ctx.well_known.property_path else {
            return Ok(());
        };
        let NodeKind::PropertyValue(pv) = doc.kind(node) else {
            return Ok(());
        };
        let declared = match pv.owner {
            Some(owner) => ctx.types.find_attached_property(owner, &pv.name),
            None => scope
                .nodes()
                .last()
                .and_then(|&p| doc.object_type(p))
                .and_then(|ty| ctx.types.find_any_property(ty, &pv.name)),
        };
        if !declared.is_some_and(|p| ctx.types.is_assignable_from(path_type, p.ty)) {
            return Ok(());
        }
        let Some(value) = pv.values.first().copied() else {
            return Ok(());
        };
        let NodeKind::Text(text) = doc.kind(value) else {
            return Ok(());
        };
        let text = text.clone();
        let location = doc.location(value);

        let segments =
            parse_property_path(&text).map_err(|e| CompileError::from_syntax(&e, &text, location))?;
        let resolved = resolve_property_path(ctx, doc, scope, &text, &segments, location)
            .map_err(|e| e.with_note(format!("in property path `{text}`")))?;
        tracing::trace!(
            path = %DisplayPropertyPath::new(ctx.types, &resolved),
            result = ctx.type_name(resolved.result_type()),
            "resolved property path"
        );
        doc.replace(value, NodeKind::ResolvedPropertyPath(resolved));
        Ok(())
    }
}
