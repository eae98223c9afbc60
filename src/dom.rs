//! Host document model - the node tree the editor edits
//!
//! An id-based arena standing in for the host's document tree. Nodes are
//! either elements (with ordered children) or text leaves backed by a rope.
//! Ids are never reused, so a subtree removed from the tree stays
//! addressable and can be re-inserted later (undo relies on this).

use ropey::Rope;

/// Opaque handle to a node in a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw index, for diagnostics only
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Node payload: an element with children, or a text leaf
#[derive(Debug, Clone)]
pub enum NodeKind {
    Element {
        tag: String,
        children: Vec<NodeId>,
        /// Whether this element currently accepts input (set by attach,
        /// cleared by detach)
        editable_flag: bool,
        /// An embedded non-editable unit (block widget); selected and
        /// removed as a whole, never entered by the caret
        atomic: bool,
    },
    Text {
        content: Rope,
    },
}

/// One node in the arena
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

/// The host document tree
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<Node>,
}

impl Dom {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node {
            parent: None,
            kind: NodeKind::Element {
                tag: tag.to_string(),
                children: Vec::new(),
                editable_flag: false,
                atomic: false,
            },
        })
    }

    /// Create a detached non-editable widget element (e.g. an embedded
    /// image or horizontal rule)
    pub fn create_widget(&mut self, tag: &str) -> NodeId {
        self.push(Node {
            parent: None,
            kind: NodeKind::Element {
                tag: tag.to_string(),
                children: Vec::new(),
                editable_flag: false,
                atomic: true,
            },
        })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node {
            parent: None,
            kind: NodeKind::Text {
                content: Rope::from(text),
            },
        })
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Element tag, or None for text nodes
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Text { .. })
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).kind {
            NodeKind::Element { children, .. } => children,
            NodeKind::Text { .. } => &[],
        }
    }

    // === Tree structure ===

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child);
    }

    /// Insert `child` at `index` among `parent`'s children
    ///
    /// The child must be detached; `index` is clamped to the child count.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        debug_assert!(self.node(child).parent.is_none(), "child must be detached");
        match &mut self.node_mut(parent).kind {
            NodeKind::Element { children, .. } => {
                let index = index.min(children.len());
                children.insert(index, child);
            }
            // Text nodes cannot have children; the insertion is dropped
            NodeKind::Text { .. } => {
                tracing::warn!(parent = parent.index(), "insert_child on a text node ignored");
                return;
            }
        }
        self.node_mut(child).parent = Some(parent);
    }

    /// Detach `child` from its parent, returning its former index
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Option<usize> {
        let index = self.index_in_parent(child)?;
        match &mut self.node_mut(parent).kind {
            NodeKind::Element { children, .. } => {
                children.remove(index);
            }
            NodeKind::Text { .. } => return None,
        }
        self.node_mut(child).parent = None;
        Some(index)
    }

    /// Position of `id` among its parent's children
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Iterate `id` and its ancestors, root-ward
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.parent(n))
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|n| n == ancestor)
    }

    /// Nearest common ancestor of two nodes, if they share a tree
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        self.ancestors(a)
            .find(|&candidate| self.is_ancestor_or_self(candidate, b))
    }

    // === Editability flag ===

    /// Mark or unmark an element as accepting input
    pub fn set_editable_flag(&mut self, id: NodeId, editable: bool) {
        if let NodeKind::Element { editable_flag, .. } = &mut self.node_mut(id).kind {
            *editable_flag = editable;
        }
    }

    pub fn editable_flag(&self, id: NodeId) -> bool {
        matches!(
            self.node(id).kind,
            NodeKind::Element {
                editable_flag: true,
                ..
            }
        )
    }

    /// Whether this node is an embedded non-editable unit
    pub fn is_atomic(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { atomic: true, .. })
    }

    /// Nearest self-or-ancestor element marked editable
    pub fn editing_host_of(&self, node: NodeId) -> Option<NodeId> {
        self.ancestors(node).find(|&n| self.editable_flag(n))
    }

    // === Text content ===

    /// Text content of a text node (empty for elements)
    pub fn text(&self, id: NodeId) -> String {
        match &self.node(id).kind {
            NodeKind::Text { content } => content.to_string(),
            NodeKind::Element { .. } => String::new(),
        }
    }

    /// Length of a text node in chars (0 for elements)
    pub fn text_len(&self, id: NodeId) -> usize {
        match &self.node(id).kind {
            NodeKind::Text { content } => content.len_chars(),
            NodeKind::Element { .. } => 0,
        }
    }

    /// Insert text into a text node at a char offset (clamped to length)
    pub fn insert_text(&mut self, id: NodeId, char_idx: usize, text: &str) {
        if let NodeKind::Text { content } = &mut self.node_mut(id).kind {
            let char_idx = char_idx.min(content.len_chars());
            content.insert(char_idx, text);
        }
    }

    /// Copy of a char range from a text node (clamped to length)
    pub fn text_slice(&self, id: NodeId, range: std::ops::Range<usize>) -> String {
        if let NodeKind::Text { content } = &self.node(id).kind {
            let end = range.end.min(content.len_chars());
            let start = range.start.min(end);
            content.slice(start..end).to_string()
        } else {
            String::new()
        }
    }

    /// Remove a char range from a text node, returning the removed text
    pub fn remove_text(&mut self, id: NodeId, range: std::ops::Range<usize>) -> String {
        if let NodeKind::Text { content } = &mut self.node_mut(id).kind {
            let end = range.end.min(content.len_chars());
            let start = range.start.min(end);
            let removed: String = content.slice(start..end).to_string();
            content.remove(start..end);
            removed
        } else {
            String::new()
        }
    }

    /// Concatenated text of a subtree, in document order
    pub fn text_of_subtree(&self, id: NodeId) -> String {
        match &self.node(id).kind {
            NodeKind::Text { content } => content.to_string(),
            NodeKind::Element { children, .. } => {
                let mut out = String::new();
                for &child in children {
                    out.push_str(&self.text_of_subtree(child));
                }
                out
            }
        }
    }
}
