//! Raw input notifications
//!
//! The untyped occurrences the host delivers to [`Editor::dispatch`]. The
//! pipeline stages interpret these; nothing here carries editing semantics
//! yet.
//!
//! [`Editor::dispatch`]: crate::editor::Editor::dispatch

use crate::boundary::{Boundary, Range};
use crate::dom::NodeId;

/// Keys with a name rather than a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKey {
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

/// A pressed key: a printable character or a named key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Named(NamedKey),
}

/// Modifier state at the time of a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub logo: bool,
}

impl Modifiers {
    /// The platform's primary shortcut modifier (Ctrl, or Cmd on macOS)
    pub fn primary(&self) -> bool {
        self.ctrl || self.logo
    }
}

/// A keyboard notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A plain character press with no modifiers
    pub fn character(ch: char) -> Self {
        Self::new(Key::Character(ch))
    }
}

/// What kind of pointer action happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Move,
    Click,
}

/// A pointer notification, with the hit position already resolved by the
/// host to a node and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: NodeId,
    pub offset: usize,
}

/// A paste notification carrying the clipboard payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub content: String,
}

/// Drag lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Over,
    Drop,
}

/// Whether a drop moves or copies the dragged content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Move,
    Copy,
}

/// A drag-over or drop notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEvent {
    pub phase: DragPhase,
    /// The dragged content's origin, when the drag started inside the editor
    pub source: Option<Range>,
    /// Where the pointer currently is
    pub target: Boundary,
    pub effect: DropEffect,
}

/// One raw input occurrence
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    Pointer(PointerEvent),
    Paste(PasteEvent),
    Drag(DragEvent),
    /// Native selection-change notification. Routed through the pipeline
    /// only when [`EditorConfig::route_selection_changes`] is set.
    ///
    /// [`EditorConfig::route_selection_changes`]: crate::config::EditorConfig
    SelectionChange,
}

impl InputEvent {
    pub fn is_pointer_move(&self) -> bool {
        matches!(
            self,
            InputEvent::Pointer(PointerEvent {
                kind: PointerKind::Move,
                ..
            })
        )
    }
}
