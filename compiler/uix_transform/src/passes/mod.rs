//! The transformer pipeline.
//!
//! A [`Transformer`] rewrites one node at a time. [`run_pass`] drives a
//! transformer over the whole document in pre-order: a node is transformed
//! before its children are computed, so a pass sees the children the node
//! has *after* its own rewrite. Passes run in the fixed order of
//! [`default_passes`]; later passes rely on the output of earlier ones.

mod binding_path;
mod data_context;
mod design_time;
mod directives;
mod name_scope;
mod property_path;
mod resolve_by_name;
mod resolve_bindings;
mod target_scope;

pub use binding_path::BindingPathParser;
pub use data_context::DataContextInference;
pub use design_time::DesignTimeProperties;
pub use directives::StripCompilerDirectives;
pub use name_scope::RootNameScope;
pub use property_path::PropertyPathResolver;
pub use resolve_by_name::ResolveByName;
pub use resolve_bindings::BindingResolution;
pub use target_scope::TargetTypeScopes;

use uix_ir::{Document, NodeId};

use crate::scope::{Scope, ScopeStack};
use crate::stack::ensure_sufficient_stack;
use crate::{CompileContext, CompileError};

/// One node-local rewrite.
pub trait Transformer {
    /// Name used in trace output.
    fn name(&self) -> &'static str;

    /// Rewrite `node` in place. `scope` holds its ancestors, root first.
    ///
    /// Must be idempotent: running a pass twice leaves the document as one
    /// run did.
    fn transform(
        &self,
        ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError>;
}

/// The pipeline, in execution order.
pub fn default_passes() -> Vec<Box<dyn Transformer>> {
    vec![
        Box::new(StripCompilerDirectives),
        Box::new(DesignTimeProperties),
        Box::new(TargetTypeScopes),
        Box::new(ResolveByName),
        Box::new(BindingPathParser),
        Box::new(PropertyPathResolver),
        Box::new(DataContextInference),
        Box::new(BindingResolution),
        Box::new(RootNameScope),
    ]
}

/// Run every pass of [`default_passes`] over `doc`, stopping at the first error.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = doc.len()))]
pub fn run_pipeline(ctx: &mut CompileContext<'_>, doc: &mut Document) -> Result<(), CompileError> {
    for pass in default_passes() {
        run_pass(pass.as_ref(), ctx, doc)?;
    }
    Ok(())
}

/// Run one transformer over the document.
#[tracing::instrument(level = "debug", skip_all, fields(pass = pass.name()))]
pub fn run_pass(
    pass: &dyn Transformer,
    ctx: &mut CompileContext<'_>,
    doc: &mut Document,
) -> Result<(), CompileError> {
    let root = doc.root();
    if !root.is_valid() {
        return Ok(());
    }
    let mut stack = ScopeStack::new();
    let result = walk(pass, ctx, doc, &mut stack, root);
    if let Err(error) = &result {
        tracing::debug!(code = %error.code(), %error, "pass failed");
    }
    result
}

fn walk(
    pass: &dyn Transformer,
    ctx: &mut CompileContext<'_>,
    doc: &mut Document,
    stack: &mut ScopeStack,
    node: NodeId,
) -> Result<(), CompileError> {
    ensure_sufficient_stack(|| {
        pass.transform(ctx, doc, stack.view(), node)?;
        let children = doc.children(node);
        stack.push(node);
        for child in children {
            walk(pass, ctx, doc, stack, child)?;
        }
        stack.pop();
        Ok(())
    })
}

/// Whether `node` is a compiled binding object.
pub(crate) fn is_compiled_binding(ctx: &CompileContext<'_>, doc: &Document, node: NodeId) -> bool {
    doc.object_type(node)
        .is_some_and(|ty| ctx.is_assignable(Some(ctx.well_known.compiled_binding), ty))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
