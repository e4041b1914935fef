//! Design-time (`d:`) directives.
//!
//! Outside design mode they are dropped. In design mode each one becomes a
//! plain property assignment of the same name, replacing any existing
//! assignment of that property.

use uix_ir::{DirectiveNamespace, Document, NodeId, NodeKind, PropertyValueNode};

use super::Transformer;
use crate::scope::Scope;
use crate::{CompileContext, CompileError};

pub struct DesignTimeProperties;

impl Transformer for DesignTimeProperties {
    fn name(&self) -> &'static str {
        "design-time-properties"
    }

    fn transform(
        &self,
        ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        _scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        let Some(obj) = doc.as_object(node) else {
            return Ok(());
        };
        let design: Vec<(NodeId, String, Vec<NodeId>)> = obj
            .children
            .iter()
            .filter_map(|&child| match doc.kind(child) {
                NodeKind::Directive(d) if d.namespace == DirectiveNamespace::Design => {
                    Some((child, d.name.clone(), d.values.clone()))
                }
                _ => None,
            })
            .collect();

        for (directive, name, values) in design {
            if !ctx.options.design_mode {
                doc.remove_child(node, directive);
                continue;
            }
            if let Some(existing) = doc.property(node, &name) {
                doc.remove_child(node, existing);
            }
            tracing::trace!(?node, property = %name, "applying design-time property");
            doc.replace(
                directive,
                NodeKind::PropertyValue(PropertyValueNode {
                    name,
                    owner: None,
                    values,
                }),
            );
        }
        Ok(())
    }
}
