//! Purpose: Arena representation of a parsed JSON document.
//! Exports: `Document`, `Node`, `NodeId`, `NodeKind`, `NodeType`, `MAX_DEPTH_LIMIT`.
//! Role: Immutable tree that cursors navigate by index; built once by the parse boundary.
//! Invariants: Only the crate builds documents, and a built document has at least one node.
//! Invariants: Nodes are stored in pre-order, so the root is always index 0.
//! Invariants: Object children alternate key (String) and value nodes in document order.
//! Invariants: Depth counts nested containers; a scalar root has depth 0.

use std::fmt;

/// Hard ceiling on container nesting. Parsing and materialization recurse
/// once per level, so larger requested bounds are clamped to this.
pub const MAX_DEPTH_LIMIT: usize = 4096;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    String(Box<str>),
    Double(f64),
    Integer(i64),
    True,
    False,
    Null,
    Array,
    Object,
}

/// Type tag of a node, without its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeType {
    String,
    Double,
    Integer,
    True,
    False,
    Null,
    Array,
    Object,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::String(_) => NodeType::String,
            NodeKind::Double(_) => NodeType::Double,
            NodeKind::Integer(_) => NodeType::Integer,
            NodeKind::True => NodeType::True,
            NodeKind::False => NodeType::False,
            NodeKind::Null => NodeType::Null,
            NodeKind::Array => NodeType::Array,
            NodeKind::Object => NodeType::Object,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }
}

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    depth: usize,
}

impl Document {
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in pre-order (document order).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Deepest container nesting seen while building.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DepthExceeded {
    pub(crate) max_depth: usize,
}

impl fmt::Display for DepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth limit exceeded (max depth {})", self.max_depth)
    }
}

impl std::error::Error for DepthExceeded {}

/// Incremental pre-order arena construction.
///
/// Callers push a node, then link it under its parent after its previous
/// sibling. Containers are bracketed by `enter`/`leave` so the depth bound
/// is checked before any child of an over-deep container is recorded.
#[derive(Debug)]
pub(crate) struct DocumentBuilder {
    nodes: Vec<Node>,
    max_depth: usize,
    depth: usize,
    deepest: usize,
}

impl DocumentBuilder {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            nodes: Vec::new(),
            max_depth,
            depth: 0,
            deepest: 0,
        }
    }

    pub(crate) fn with_capacity(max_depth: usize, capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new(max_depth)
        }
    }

    pub(crate) fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            first_child: None,
            next_sibling: None,
        });
        id
    }

    pub(crate) fn enter(&mut self, kind: NodeKind, parent: Option<NodeId>) -> Result<NodeId, DepthExceeded> {
        if self.depth >= self.max_depth {
            return Err(DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);
        Ok(self.push(kind, parent))
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Attach `child` under `parent`, after `prev` when given.
    pub(crate) fn link(&mut self, parent: NodeId, prev: Option<NodeId>, child: NodeId) {
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
    }

    pub(crate) fn finish(self) -> Document {
        Document {
            nodes: self.nodes,
            depth: self.deepest,
        }
    }
}
