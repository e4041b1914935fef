//! Accessor chain generation.
//!
//! Turns every resolved binding and property path in a transformed document
//! into a flat op sequence for the emission backend: one
//! [`AccessorOp::CreateBuilder`], one op per path element in source order,
//! then [`AccessorOp::Build`]. Element order is never changed, since each
//! element's type depends on the one before it.

mod chain;
mod document;
mod ops;

pub use chain::generate_accessor_chain;
pub use document::{emit_document, AccessorChain, ChainKind, CompiledDocument};
pub use ops::{AccessorOp, DisplayOp};
