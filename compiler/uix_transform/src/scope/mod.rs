//! Ancestor scopes visible during traversal.
//!
//! The driver keeps a [`ScopeStack`] of the nodes enclosing the node being
//! transformed, root first. Passes see it through a [`Scope`], a borrowed
//! view that answers "nearest such ancestor" queries and can be narrowed to
//! the ancestors of any node in it.

use uix_ir::{Document, NodeId, NodeKind, PropertyValueNode, ScopeKind, TargetTypeScope};

/// Stack of ancestor nodes, root first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeStack {
    nodes: Vec<NodeId>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.nodes.pop()
    }

    pub fn view(&self) -> Scope<'_> {
        Scope { nodes: &self.nodes }
    }
}

impl From<Vec<NodeId>> for ScopeStack {
    fn from(nodes: Vec<NodeId>) -> Self {
        ScopeStack { nodes }
    }
}

/// Borrowed view of an ancestor stack, root first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scope<'s> {
    nodes: &'s [NodeId],
}

impl<'s> Scope<'s> {
    pub const EMPTY: Scope<'static> = Scope { nodes: &[] };

    pub fn new(nodes: &'s [NodeId]) -> Self {
        Scope { nodes }
    }

    pub fn nodes(self) -> &'s [NodeId] {
        self.nodes
    }

    pub fn is_empty(self) -> bool {
        self.nodes.is_empty()
    }

    /// Ancestors of the node at `index`.
    pub fn above(self, index: usize) -> Scope<'s> {
        Scope {
            nodes: &self.nodes[..index],
        }
    }

    /// Object ancestors, nearest first, with their stack index.
    pub fn objects<'d>(self, doc: &'d Document) -> impl Iterator<Item = (usize, NodeId)> + 'd
    where
        's: 'd,
    {
        self.nodes
            .iter()
            .copied()
            .enumerate()
            .rev()
            .filter(move |&(_, n)| matches!(doc.kind(n), NodeKind::Object(_)))
    }

    /// Nearest enclosing object, with its stack index.
    pub fn nearest_object(self, doc: &Document) -> Option<(usize, NodeId)> {
        self.objects(doc).next()
    }

    /// Property assignment between the current node and its nearest object.
    pub fn enclosing_property<'d>(self, doc: &'d Document) -> Option<&'d PropertyValueNode> {
        for &node in self.nodes.iter().rev() {
            match doc.kind(node) {
                NodeKind::PropertyValue(pv) => return Some(pv),
                NodeKind::Object(_) => return None,
                _ => {}
            }
        }
        None
    }

    /// Nearest target-type scope, optionally restricted to one kind.
    pub fn target_type_scope(self, doc: &Document, kind: Option<ScopeKind>) -> Option<TargetTypeScope> {
        self.objects(doc)
            .filter_map(|(_, n)| doc.as_object(n).and_then(|o| o.scope))
            .find(|s| kind.map_or(true, |k| s.kind == k))
    }
}

#[cfg(test)]
mod tests;
