//! Registers the root object with the name scope after construction.

use uix_ir::{Document, NodeId, NodeKind, PostConstructStep};

use super::Transformer;
use crate::scope::Scope;
use crate::{CompileContext, CompileError};

/// Appends a post-construct step list to the root object: register it with
/// the name scope, then complete the scope. Injected once.
pub struct RootNameScope;

impl Transformer for RootNameScope {
    fn name(&self) -> &'static str {
        "root-name-scope"
    }

    fn transform(
        &self,
        _ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        if !scope.is_empty() {
            return Ok(());
        }
        let Some(obj) = doc.as_object(node) else {
            return Ok(());
        };
        let injected = obj
            .children
            .iter()
            .any(|&c| matches!(doc.kind(c), NodeKind::PostConstruct(_)));
        if injected {
            return Ok(());
        }
        let steps = doc.alloc(
            NodeKind::PostConstruct(vec![
                PostConstructStep::RegisterNameScope,
                PostConstructStep::CompleteNameScope,
            ]),
            doc.location(node),
        );
        doc.push_child(node, steps);
        tracing::trace!(?node, "injected root name scope steps");
        Ok(())
    }
}
