//! Editable regions and their registry
//!
//! An [`Editable`] is one attached document region: the element it wraps,
//! its settings, pending formatting overrides, and its own undo context.
//! The registry maps element identity to the live editable and resolves
//! arbitrary descendant nodes to their nearest attached ancestor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, NodeId};
use crate::messages::OverrideTag;
use crate::undo::{ScopeHandle, UndoContext};

/// Per-editable configuration, merged over editor defaults at attach
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditableSettings {
    /// Element tag used when splitting blocks (Enter)
    #[serde(default = "default_block_node")]
    pub default_block_node: String,
    /// Whether embedded non-editable widgets get selection handling
    #[serde(default = "default_allow_block_widgets")]
    pub allow_block_widgets: bool,
}

fn default_block_node() -> String {
    "div".to_string()
}

fn default_allow_block_widgets() -> bool {
    true
}

impl Default for EditableSettings {
    fn default() -> Self {
        Self {
            default_block_node: default_block_node(),
            allow_block_widgets: default_allow_block_widgets(),
        }
    }
}

/// One attached document region
#[derive(Debug, Clone)]
pub struct Editable {
    element: NodeId,
    /// Pending formatting intents, drained by the next insertion
    pub overrides: Vec<OverrideTag>,
    pub settings: EditableSettings,
    /// Transaction manager scoped to this editable
    pub undo: UndoContext,
    /// True between attach and detach
    pub is_open: bool,
    /// Handle of the lifetime-spanning root scope, closed by detach
    root_scope: Option<ScopeHandle>,
}

impl Editable {
    pub fn new(element: NodeId, settings: EditableSettings) -> Self {
        Self {
            element,
            overrides: Vec::new(),
            settings,
            undo: UndoContext::new(),
            is_open: true,
            root_scope: None,
        }
    }

    /// The element this editable wraps (not owned; the host document's)
    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn root_scope(&self) -> Option<ScopeHandle> {
        self.root_scope
    }

    pub fn set_root_scope(&mut self, handle: ScopeHandle) {
        self.root_scope = Some(handle);
    }

    /// Add or remove a pending override (pressing the shortcut twice cancels)
    pub fn toggle_override(&mut self, tag: OverrideTag) {
        if let Some(pos) = self.overrides.iter().position(|&t| t == tag) {
            self.overrides.remove(pos);
        } else {
            self.overrides.push(tag);
        }
    }

    /// Consume all pending overrides
    pub fn take_overrides(&mut self) -> Vec<OverrideTag> {
        std::mem::take(&mut self.overrides)
    }
}

/// Mapping from element identity to its live editable
#[derive(Debug, Clone, Default)]
pub struct EditableRegistry {
    entries: HashMap<NodeId, Editable>,
}

impl EditableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, element: NodeId) -> bool {
        self.entries.contains_key(&element)
    }

    pub fn insert(&mut self, editable: Editable) {
        debug_assert!(!self.entries.contains_key(&editable.element()));
        self.entries.insert(editable.element(), editable);
    }

    pub fn remove(&mut self, element: NodeId) -> Option<Editable> {
        self.entries.remove(&element)
    }

    pub fn get(&self, element: NodeId) -> Option<&Editable> {
        self.entries.get(&element)
    }

    pub fn get_mut(&mut self, element: NodeId) -> Option<&mut Editable> {
        self.entries.get_mut(&element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the nearest enclosing attached element for a descendant node.
    ///
    /// Walks the ancestor chain, so cost is O(depth), not O(registry size).
    pub fn lookup(&self, dom: &Dom, node: NodeId) -> Option<NodeId> {
        dom.ancestors(node).find(|n| self.entries.contains_key(n))
    }
}
