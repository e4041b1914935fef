//! Transformer pipeline for compiled bindings.
//!
//! Takes a markup [`Document`](uix_ir::Document) built by the external markup
//! parser and rewrites it in place, pass by pass, until every compiled
//! binding and property path is fully typed:
//!
//! 1. Compiler-only and design-time directives are stripped or applied.
//! 2. Styles and control templates get their target-type scope.
//! 3. Binding path text is parsed and long-form sources are folded in.
//! 4. Property paths are parsed and resolved.
//! 5. Data context types are inferred for every object.
//! 6. Binding paths are resolved against their data context or source.
//! 7. The root gets its name scope registration steps.
//!
//! The first error aborts the compile; there is no recovery.

mod context;
mod error;
mod infer;
pub mod passes;
mod resolve;
pub mod scope;
mod source;
mod stack;

#[cfg(test)]
mod test_support;

pub use context::{CompileContext, CompileOptions, NamedElement};
pub use error::{CompileError, CompileErrorKind};
pub use infer::{binding_data_context, infer_data_context, nearest_data_context, DataContextType};
pub use passes::{run_pass, run_pipeline, Transformer};
pub use resolve::{
    binding_path_node, resolve_binding_path, resolve_property_path, DisplayPropertyPath,
};
pub use source::{convert_long_form_source, infer_logical_ancestor, resolve_relative_source};
pub use stack::ensure_sufficient_stack;
