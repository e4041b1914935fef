//! Markup arena.
//!
//! A [`Document`] owns every node of one markup file in a flat `Vec<Node>`,
//! addressed by [`NodeId`]. The external parser fills it with the six source
//! node kinds; pipeline passes add synthesized kinds by replacing a node's
//! content in place ([`Document::replace`]) or by allocating new nodes.
//!
//! # Traversal Order
//!
//! [`Document::children`] yields, for an object, its positional arguments
//! first and then its member children. Path nodes that embed markup (a
//! `RawSource` value) expose that markup as children so passes reach it.
//!
//! Unlinked nodes stay in the arena until the document is dropped. Only the
//! tree reachable from [`Document::root`] is meaningful.

use std::fmt::Write;

use crate::{Location, NodeId, ParsedBindingPath, PathNode, ResolvedPath, TypeId};

/// Namespace of a directive attribute or element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveNamespace {
    /// The markup language namespace (`x:`).
    Xaml,
    /// The design-time namespace (`d:`), ignored outside design mode.
    Design,
    /// Any other namespace, kept verbatim.
    Other(String),
}

impl DirectiveNamespace {
    /// Conventional prefix used when printing.
    pub fn prefix(&self) -> &str {
        match self {
            DirectiveNamespace::Xaml => "x",
            DirectiveNamespace::Design => "d",
            DirectiveNamespace::Other(ns) => ns,
        }
    }
}

/// Kind of a target-type scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Style,
    ControlTemplate,
}

/// A subtree in which unqualified property names resolve against `target`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetTypeScope {
    pub kind: ScopeKind,
    pub target: TypeId,
}

/// An object element (`<Button ...>`, or the object inside `{Binding ...}`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectNode {
    pub ty: TypeId,
    /// Positional constructor arguments (`{Binding Name}` has one).
    pub arguments: Vec<NodeId>,
    /// Property values, directives and content.
    pub children: Vec<NodeId>,
    /// Set by the target-type scope pass.
    pub scope: Option<TargetTypeScope>,
}

impl ObjectNode {
    pub fn new(ty: TypeId) -> Self {
        ObjectNode {
            ty,
            arguments: Vec::new(),
            children: Vec::new(),
            scope: None,
        }
    }
}

/// A property assignment. `owner` is set for attached properties (`Grid.Row`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyValueNode {
    pub name: String,
    pub owner: Option<TypeId>,
    pub values: Vec<NodeId>,
}

/// A directive (`x:Name`, `x:DataType`, `d:DataContext`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectiveNode {
    pub namespace: DirectiveNamespace,
    pub name: String,
    pub values: Vec<NodeId>,
}

/// Step run once after the root object has been constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PostConstructStep {
    /// Register the root object with the active name scope.
    RegisterNameScope,
    /// Seal the name scope against further registrations.
    CompleteNameScope,
}

/// Node content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Source kinds, produced by the external markup parser.
    Object(ObjectNode),
    PropertyValue(PropertyValueNode),
    Directive(DirectiveNode),
    Text(String),
    /// `{...}` markup extension wrapping an object node.
    MarkupExtension(NodeId),
    /// Reference to a type by (optionally prefixed) name.
    TypeReference(String),

    // Synthesized kinds.
    ParsedBindingPath(ParsedBindingPath),
    ResolvedBindingPath(ResolvedPath),
    ResolvedPropertyPath(ResolvedPath),
    /// Value resolved at runtime by looking up a named element.
    NameLookup(String),
    PostConstruct(Vec<PostConstructStep>),
}

/// A node: content plus source location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub location: Location,
}

/// Arena holding one markup document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("markup arena exceeded u32::MAX nodes"))
}

impl Document {
    /// Create an empty document (no root yet).
    pub fn new() -> Self {
        Document {
            nodes: Vec::new(),
            root: NodeId::INVALID,
        }
    }

    /// Allocate a node, returning its ID.
    pub fn alloc(&mut self, kind: NodeKind, location: Location) -> NodeId {
        let id = NodeId::new(to_u32(self.nodes.len()));
        self.nodes.push(Node { kind, location });
        id
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    /// Number of allocated nodes, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    #[inline]
    pub fn location(&self, id: NodeId) -> Location {
        self.nodes[id.index()].location
    }

    /// Replace a node's content, keeping its ID and location.
    pub fn replace(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].kind = kind;
    }

    // --- Builders ---

    pub fn add_object(&mut self, ty: TypeId, location: Location) -> NodeId {
        self.alloc(NodeKind::Object(ObjectNode::new(ty)), location)
    }

    pub fn add_text(&mut self, text: impl Into<String>, location: Location) -> NodeId {
        self.alloc(NodeKind::Text(text.into()), location)
    }

    pub fn add_type_reference(&mut self, name: impl Into<String>, location: Location) -> NodeId {
        self.alloc(NodeKind::TypeReference(name.into()), location)
    }

    pub fn add_markup_extension(&mut self, object: NodeId, location: Location) -> NodeId {
        self.alloc(NodeKind::MarkupExtension(object), location)
    }

    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        owner: Option<TypeId>,
        values: Vec<NodeId>,
        location: Location,
    ) -> NodeId {
        self.alloc(
            NodeKind::PropertyValue(PropertyValueNode {
                name: name.into(),
                owner,
                values,
            }),
            location,
        )
    }

    pub fn add_directive(
        &mut self,
        namespace: DirectiveNamespace,
        name: impl Into<String>,
        values: Vec<NodeId>,
        location: Location,
    ) -> NodeId {
        self.alloc(
            NodeKind::Directive(DirectiveNode {
                namespace,
                name: name.into(),
                values,
            }),
            location,
        )
    }

    /// Append a member child to an object node. No-op for other kinds.
    pub fn push_child(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Object(obj) = self.kind_mut(parent) {
            obj.children.push(child);
        }
    }

    /// Append a positional argument to an object node. No-op for other kinds.
    pub fn push_argument(&mut self, parent: NodeId, argument: NodeId) {
        if let NodeKind::Object(obj) = self.kind_mut(parent) {
            obj.arguments.push(argument);
        }
    }

    /// Unlink `child` from an object's member list.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Object(obj) = self.kind_mut(parent) {
            obj.children.retain(|&c| c != child);
        }
    }

    // --- Queries ---

    /// Direct children in traversal order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.kind(id) {
            NodeKind::Object(obj) => obj
                .arguments
                .iter()
                .chain(obj.children.iter())
                .copied()
                .collect(),
            NodeKind::PropertyValue(pv) => pv.values.clone(),
            NodeKind::Directive(d) => d.values.clone(),
            NodeKind::MarkupExtension(inner) => vec![*inner],
            NodeKind::ParsedBindingPath(path) => raw_sources(path.nodes.iter()),
            NodeKind::ResolvedBindingPath(path) | NodeKind::ResolvedPropertyPath(path) => {
                raw_sources(path.elements.iter().map(|e| &e.node))
            }
            NodeKind::Text(_)
            | NodeKind::TypeReference(_)
            | NodeKind::NameLookup(_)
            | NodeKind::PostConstruct(_) => Vec::new(),
        }
    }

    pub fn as_object(&self, id: NodeId) -> Option<&ObjectNode> {
        match self.kind(id) {
            NodeKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self, id: NodeId) -> Option<&mut ObjectNode> {
        match self.kind_mut(id) {
            NodeKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Declared type of an object node.
    pub fn object_type(&self, id: NodeId) -> Option<TypeId> {
        self.as_object(id).map(|o| o.ty)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Object wrapped by a markup extension node.
    pub fn extension_object(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::MarkupExtension(inner) => Some(*inner),
            _ => None,
        }
    }

    /// First non-attached property assignment named `name` on an object.
    pub fn property(&self, object: NodeId, name: &str) -> Option<NodeId> {
        let obj = self.as_object(object)?;
        obj.children.iter().copied().find(|&c| {
            matches!(self.kind(c), NodeKind::PropertyValue(pv) if pv.owner.is_none() && pv.name == name)
        })
    }

    /// First value of a property assignment or directive.
    pub fn first_value(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::PropertyValue(pv) => pv.values.first().copied(),
            NodeKind::Directive(d) => d.values.first().copied(),
            _ => None,
        }
    }

    /// Text of the first value of property `name` on `object`.
    pub fn property_text(&self, object: NodeId, name: &str) -> Option<&str> {
        let prop = self.property(object, name)?;
        self.text(self.first_value(prop)?)
    }

    /// First directive `namespace:name` on an object.
    pub fn directive(
        &self,
        object: NodeId,
        namespace: &DirectiveNamespace,
        name: &str,
    ) -> Option<NodeId> {
        let obj = self.as_object(object)?;
        obj.children.iter().copied().find(|&c| {
            matches!(self.kind(c), NodeKind::Directive(d) if &d.namespace == namespace && d.name == name)
        })
    }

    /// Render the reachable tree as indented text.
    ///
    /// Two documents with equal dumps are structurally identical regardless
    /// of how many unreachable nodes their arenas hold.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        if self.root.is_valid() {
            self.dump_node(self.root, 0, &mut out);
        }
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let _ = write!(out, "{:indent$}", "", indent = depth * 2);
        let _ = match &node.kind {
            NodeKind::Object(obj) => match obj.scope {
                Some(scope) => writeln!(out, "Object {:?} scope={:?}", obj.ty, scope),
                None => writeln!(out, "Object {:?}", obj.ty),
            },
            NodeKind::PropertyValue(pv) => match pv.owner {
                Some(owner) => writeln!(out, "Property {:?}.{}", owner, pv.name),
                None => writeln!(out, "Property {}", pv.name),
            },
            NodeKind::Directive(d) => writeln!(out, "Directive {}:{}", d.namespace.prefix(), d.name),
            NodeKind::Text(t) => writeln!(out, "Text {t:?}"),
            NodeKind::MarkupExtension(_) => writeln!(out, "MarkupExtension"),
            NodeKind::TypeReference(name) => writeln!(out, "TypeReference {name}"),
            NodeKind::ParsedBindingPath(path) => {
                writeln!(out, "ParsedBindingPath {:?} {:?}", path.text, path.nodes)
            }
            NodeKind::ResolvedBindingPath(path) => {
                writeln!(out, "ResolvedBindingPath {:?}", path)
            }
            NodeKind::ResolvedPropertyPath(path) => {
                writeln!(out, "ResolvedPropertyPath {:?}", path)
            }
            NodeKind::NameLookup(name) => writeln!(out, "NameLookup {name}"),
            NodeKind::PostConstruct(steps) => writeln!(out, "PostConstruct {steps:?}"),
        };
        for child in self.children(id) {
            self.dump_node(child, depth + 1, out);
        }
    }
}

fn raw_sources<'a>(nodes: impl Iterator<Item = &'a PathNode>) -> Vec<NodeId> {
    nodes
        .filter_map(|n| match n {
            PathNode::RawSource { value } => Some(*value),
            _ => None,
        })
        .collect()
}
