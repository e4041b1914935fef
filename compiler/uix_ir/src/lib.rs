//! UIXML IR - Markup Representation Types
//!
//! This crate contains the core data structures shared by every phase of the
//! markup compiler:
//! - Spans for offsets inside attribute text, locations for markup nodes
//! - Opaque `TypeId`/`PropertyId` handles issued by the type system
//! - The markup arena (`Document`, `NodeId`, `NodeKind`)
//! - Path nodes produced by the binding and property-path pipelines
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: nodes reference each other by `NodeId(u32)`, never
//!   by owning pointers, so passes rewrite a node in place without disturbing
//!   its parent or siblings.
//! - **Never Construct Types**: `TypeId` is a handle into an external type
//!   system; this crate only stores and compares it.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod handles;
pub mod markup;
mod node_id;
mod path;
mod span;

pub use handles::{PropertyId, TypeId};
pub use markup::{
    DirectiveNamespace, DirectiveNode, Document, Node, NodeKind, ObjectNode, PostConstructStep,
    PropertyValueNode, ScopeKind, TargetTypeScope,
};
pub use node_id::NodeId;
pub use path::{ParsedBindingPath, PathElement, PathNode, ResolvedPath};
pub use span::{Location, Span};
