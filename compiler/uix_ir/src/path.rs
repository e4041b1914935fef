//! Path nodes for compiled bindings and property paths.
//!
//! The grammars in `uix_parse` produce syntax carrying type *names*. The
//! transformer pipeline turns that syntax into [`PathNode`]s (types resolved
//! to [`TypeId`] handles) and later into [`ResolvedPath`]s, where every
//! element records the type it produces. The accessor chain generator only
//! ever sees resolved paths.

use smallvec::SmallVec;

use crate::{NodeId, PropertyId, TypeId};

/// One step of a binding or property path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathNode {
    /// Read a property. `owner` is set for type-qualified segments
    /// (`(Grid.Row)`), otherwise the property is looked up on the current type.
    PropertyAccess { name: String, owner: Option<TypeId> },
    /// Step into the value produced by the previous element.
    ChildTraversal,
    /// Reinterpret the current value. Strict casts fail at runtime on
    /// mismatch, soft casts produce null.
    Cast { target: TypeId, strict: bool },
    /// Nearest visual-tree ancestor of `ty`, skipping `level` matches.
    VisualAncestor { ty: TypeId, level: u32 },
    /// Nearest logical-tree ancestor of `ty`, skipping `level` matches.
    LogicalAncestor { ty: TypeId, level: u32 },
    /// The binding target itself.
    SelfSource,
    /// The templated parent of a control template; `ty` is the template's target type.
    TemplatedParent { ty: TypeId },
    /// Element looked up by name in the active name scope.
    Name { identifier: String },
    /// Explicit `Source` object.
    RawSource { value: NodeId },
    /// Boolean negation of the final value.
    Not,
}

impl PathNode {
    /// Whether this node replaces the data context as the path's start value.
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            PathNode::VisualAncestor { .. }
                | PathNode::LogicalAncestor { .. }
                | PathNode::SelfSource
                | PathNode::TemplatedParent { .. }
                | PathNode::Name { .. }
                | PathNode::RawSource { .. }
        )
    }

    /// Whether this node transforms the final value rather than navigating.
    ///
    /// Transforms lead the path; a synthesized source node is inserted after them.
    pub fn is_transform(&self) -> bool {
        matches!(self, PathNode::Not)
    }
}

/// A binding path after grammar parsing, before type resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParsedBindingPath {
    /// Original text of the path, kept for diagnostics.
    pub text: String,
    pub nodes: SmallVec<[PathNode; 4]>,
    /// Byte offset into `text` of each node, parallel to `nodes`.
    /// Synthesized nodes sit at offset 0.
    pub offsets: SmallVec<[u32; 4]>,
}

impl ParsedBindingPath {
    /// Index at which a source node synthesized from long-form properties goes.
    pub fn source_insertion_point(&self) -> usize {
        self.nodes.iter().take_while(|n| n.is_transform()).count()
    }

    /// Byte offset into `text` where the node at `index` starts.
    pub fn offset_of(&self, index: usize) -> u32 {
        self.offsets.get(index).copied().unwrap_or(0)
    }

    /// Insert a synthesized source node after the leading transforms.
    pub fn insert_source(&mut self, source: PathNode) {
        let at = self.source_insertion_point();
        self.nodes.insert(at, source);
        if at <= self.offsets.len() {
            self.offsets.insert(at, 0);
        }
    }

    /// Whether the path binds to the data context itself.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A path element together with the type produced by applying it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathElement {
    pub node: PathNode,
    pub produces: TypeId,
    /// Resolved property for `PropertyAccess` elements.
    pub property: Option<PropertyId>,
}

/// A fully resolved path: every element typed, in source order.
///
/// The terminal type is stored rather than derived from the last element:
/// transforms lead the path but apply to its final value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedPath {
    /// Type the first element is applied to.
    pub start: TypeId,
    pub elements: Vec<PathElement>,
    pub result: TypeId,
}

impl ResolvedPath {
    /// An empty path: identity on `start`.
    pub fn identity(start: TypeId) -> Self {
        ResolvedPath {
            start,
            elements: Vec::new(),
            result: start,
        }
    }

    /// Terminal type of the path. An empty path yields its start type.
    #[inline]
    pub fn result_type(&self) -> TypeId {
        self.result
    }

    /// Number of property reads in the path.
    pub fn property_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e.node, PathNode::PropertyAccess { .. }))
            .count()
    }
}
