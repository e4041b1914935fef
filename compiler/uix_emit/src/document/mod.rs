//! Whole-document generation.

use uix_ir::{Document, Location, NodeId, NodeKind, PostConstructStep, TypeId};
use uix_transform::{ensure_sufficient_stack, CompileError};

use crate::{generate_accessor_chain, AccessorOp};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChainKind {
    Binding,
    PropertyPath,
}

/// Op sequence for one path in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessorChain {
    /// The path node the chain was generated from.
    pub node: NodeId,
    pub location: Location,
    pub kind: ChainKind,
    pub result_type: TypeId,
    pub ops: Vec<AccessorOp>,
}

/// Generator output for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledDocument {
    /// Chains in document order.
    pub chains: Vec<AccessorChain>,
    /// Steps to run after the root object is constructed.
    pub root_steps: Vec<PostConstructStep>,
}

/// Generate chains for every resolved path reachable from the root.
///
/// # Errors
///
/// A binding path that was parsed but never resolved is an internal error.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = doc.len()))]
pub fn emit_document(doc: &Document) -> Result<CompiledDocument, CompileError> {
    let mut out = CompiledDocument::default();
    let root = doc.root();
    if root.is_valid() {
        if let Some(obj) = doc.as_object(root) {
            for &child in &obj.children {
                if let NodeKind::PostConstruct(steps) = doc.kind(child) {
                    out.root_steps.extend_from_slice(steps);
                }
            }
        }
        collect(doc, root, &mut out)?;
    }
    tracing::debug!(chains = out.chains.len(), "generated accessor chains");
    Ok(out)
}

fn collect(doc: &Document, node: NodeId, out: &mut CompiledDocument) -> Result<(), CompileError> {
    ensure_sufficient_stack(|| {
        let location = doc.location(node);
        let chain = match doc.kind(node) {
            NodeKind::ResolvedBindingPath(path) => Some((ChainKind::Binding, path)),
            NodeKind::ResolvedPropertyPath(path) => Some((ChainKind::PropertyPath, path)),
            NodeKind::ParsedBindingPath(parsed) => {
                return Err(CompileError::internal(
                    format!("binding path `{}` reached code generation unresolved", parsed.text),
                    location,
                ))
            }
            _ => None,
        };
        if let Some((kind, path)) = chain {
            out.chains.push(AccessorChain {
                node,
                location,
                kind,
                result_type: path.result_type(),
                ops: generate_accessor_chain(path, location)?,
            });
        }
        for child in doc.children(node) {
            collect(doc, child, out)?;
        }
        Ok(())
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
