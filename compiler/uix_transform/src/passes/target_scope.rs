//! Marks styles and control templates with the type they target.

use uix_ir::{Document, NodeId, ScopeKind, TargetTypeScope};

use super::Transformer;
use crate::scope::Scope;
use crate::{CompileContext, CompileError};

pub struct TargetTypeScopes;

impl Transformer for TargetTypeScopes {
    fn name(&self) -> &'static str {
        "target-type-scopes"
    }

    fn transform(
        &self,
        ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        _scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        let Some(ty) = doc.object_type(node) else {
            return Ok(());
        };
        let kind = if ctx.is_assignable(ctx.well_known.control_template, ty) {
            ScopeKind::ControlTemplate
        } else if ctx.is_assignable(ctx.well_known.style, ty) {
            ScopeKind::Style
        } else {
            return Ok(());
        };
        let Some(value) = doc.property(node, "TargetType").and_then(|p| doc.first_value(p)) else {
            return Ok(());
        };
        let target = ctx.resolve_type_value(doc, value)?;
        tracing::trace!(?node, ?kind, target = ctx.type_name(target), "target-type scope");
        if let Some(obj) = doc.as_object_mut(node) {
            obj.scope = Some(TargetTypeScope { kind, target });
        }
        Ok(())
    }
}
