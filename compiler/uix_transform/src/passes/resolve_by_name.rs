//! Turns text assigned to name-referencing properties into name lookups.

use uix_ir::{Document, NodeId, NodeKind};

use super::Transformer;
use crate::scope::Scope;
use crate::{CompileContext, CompileError, CompileErrorKind};

/// Properties flagged `RESOLVE_BY_NAME` take an element name as text; the
/// text becomes a [`NodeKind::NameLookup`] checked against the name table.
pub struct ResolveByName;

impl Transformer for ResolveByName {
    fn name(&self) -> &'static str {
        "resolve-by-name"
    }

    fn transform(
        &self,
        ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        let NodeKind::PropertyValue(pv) = doc.kind(node) else {
            return Ok(());
        };
        let info = match pv.owner {
            Some(owner) => ctx.types.find_attached_property(owner, &pv.name),
            None => {
                let Some(parent_ty) = scope.nodes().last().and_then(|&p| doc.object_type(p)) else {
                    return Ok(());
                };
                ctx.types.find_any_property(parent_ty, &pv.name)
            }
        };
        if !info.is_some_and(|i| i.resolves_by_name()) {
            return Ok(());
        }

        let names: Vec<(NodeId, String)> = pv
            .values
            .iter()
            .filter_map(|&v| doc.text(v).map(|t| (v, t.trim().to_string())))
            .collect();
        for (value, name) in names {
            if ctx.named_element(doc, &name).is_none() {
                return Err(CompileError::new(
                    CompileErrorKind::UnresolvedName,
                    format!("no element named `{name}`"),
                    doc.location(value),
                ));
            }
            doc.replace(value, NodeKind::NameLookup(name));
        }
        Ok(())
    }
}
