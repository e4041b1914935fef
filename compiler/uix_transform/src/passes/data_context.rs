//! Infers the data context type of every object node.

use uix_ir::{Document, NodeId};

use super::Transformer;
use crate::infer::infer_data_context;
use crate::scope::Scope;
use crate::{CompileContext, CompileError};

/// Runs [`infer_data_context`] on every object so each node's context is
/// memoized before bindings are resolved. Uninferrable contexts do not fail
/// here.
pub struct DataContextInference;

impl Transformer for DataContextInference {
    fn name(&self) -> &'static str {
        "data-context-inference"
    }

    fn transform(
        &self,
        ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        if doc.as_object(node).is_some() {
            infer_data_context(ctx, doc, scope, node)?;
        }
        Ok(())
    }
}
