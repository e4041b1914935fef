//! Removes directives that only steer code generation of the markup class.

use uix_ir::{DirectiveNamespace, Document, NodeId, NodeKind};

use super::Transformer;
use crate::scope::Scope;
use crate::{CompileContext, CompileError};

const COMPILER_DIRECTIVES: &[&str] = &["Precompile", "Class", "ClassModifier", "FieldModifier"];

/// Strips `x:Precompile`, `x:Class`, `x:ClassModifier` and `x:FieldModifier`.
pub struct StripCompilerDirectives;

impl Transformer for StripCompilerDirectives {
    fn name(&self) -> &'static str {
        "strip-compiler-directives"
    }

    fn transform(
        &self,
        _ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        _scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        let Some(obj) = doc.as_object(node) else {
            return Ok(());
        };
        let stripped: Vec<NodeId> = obj
            .children
            .iter()
            .copied()
            .filter(|&child| match doc.kind(child) {
                NodeKind::Directive(d) => {
                    d.namespace == DirectiveNamespace::Xaml
                        && COMPILER_DIRECTIVES.contains(&d.name.as_str())
                }
                _ => false,
            })
            .collect();
        for child in stripped {
            tracing::trace!(?node, ?child, "stripping compiler directive");
            doc.remove_child(node, child);
        }
        Ok(())
    }
}
