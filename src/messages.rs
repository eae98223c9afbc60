//! Semantic edit intents
//!
//! Interpretation stages classify raw notifications into these; the typing
//! stage consumes them against the associated editable.

/// Target for caret movement operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
}

/// A pending formatting intent, applied to the next insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideTag {
    Bold,
    Italic,
    Code,
}

impl OverrideTag {
    /// Inline element tag this override wraps typed text in
    pub fn node_name(&self) -> &'static str {
        match self {
            OverrideTag::Bold => "strong",
            OverrideTag::Italic => "em",
            OverrideTag::Code => "code",
        }
    }
}

/// The classified meaning of one input occurrence
#[derive(Debug, Clone, PartialEq)]
pub enum EditIntent {
    // === Movement ===
    /// Move caret without affecting selection
    Move(MoveTarget),
    /// Move caret and extend selection
    MoveWithSelection(MoveTarget),

    // === Insertion ===
    /// Insert a single typed character
    InsertChar(char),
    /// Insert a string (from paste or drop)
    InsertText(String),
    /// Split the current block (Enter)
    SplitBlock,

    // === Deletion ===
    /// Delete character before caret (Backspace)
    DeleteBackward,
    /// Delete character after caret (Delete)
    DeleteForward,

    // === Selection ===
    /// Select the editable's whole content
    SelectAll,

    // === Formatting ===
    /// Toggle a pending formatting override for the next insertion
    ToggleOverride(OverrideTag),

    // === History ===
    /// Undo last step
    Undo,
    /// Redo last undone step
    Redo,
}

impl EditIntent {
    /// Check if this intent mutates the editable's content
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            EditIntent::InsertChar(_)
                | EditIntent::InsertText(_)
                | EditIntent::SplitBlock
                | EditIntent::DeleteBackward
                | EditIntent::DeleteForward
                | EditIntent::Undo
                | EditIntent::Redo
        )
    }

    /// Check if this intent is a caret movement
    pub fn is_movement(&self) -> bool {
        matches!(self, EditIntent::Move(_) | EditIntent::MoveWithSelection(_))
    }
}
