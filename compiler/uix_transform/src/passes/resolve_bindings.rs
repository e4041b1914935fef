//! Resolves the parsed path of every compiled binding.

use uix_ir::{Document, NodeId, NodeKind};

use super::{is_compiled_binding, Transformer};
use crate::resolve::{binding_path_node, resolve_binding_path};
use crate::scope::Scope;
use crate::{CompileContext, CompileError};

pub struct BindingResolution;

impl Transformer for BindingResolution {
    fn name(&self) -> &'static str {
        "binding-resolution"
    }

    fn transform(
        &self,
        ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        if !is_compiled_binding(ctx, doc, node) {
            return Ok(());
        }
        let Some(path_node) = binding_path_node(doc, node) else {
            return Err(CompileError::internal(
                "compiled binding reached resolution without a path",
                doc.location(node),
            ));
        };
        if !matches!(doc.kind(path_node), NodeKind::ParsedBindingPath(_)) {
            return Ok(());
        }
        let resolved = resolve_binding_path(ctx, doc, scope, node)?;
        doc.replace(path_node, NodeKind::ResolvedBindingPath(resolved));
        Ok(())
    }
}
