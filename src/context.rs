//! Edit context - the unit of work threaded through the pipeline
//!
//! One context per input occurrence. It moves by value through the stage
//! chain; each stage returns the (possibly modified) context for the next.

use crate::boundary::Range;
use crate::dom::NodeId;
use crate::events::InputEvent;
use crate::messages::EditIntent;

/// What kind of occurrence this context represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    /// A raw notification from the host
    NativeInput,
    /// Synthetic lifecycle event: an editable was attached
    Attach,
    /// Synthetic lifecycle event: an editable was detached
    Detach,
    /// A tag set by a stage for a recognized gesture (e.g. "drop")
    Gesture(&'static str),
}

/// The mutable per-occurrence state shared by all pipeline stages
#[derive(Debug, Clone)]
pub struct EditContext {
    /// The originating raw notification (absent for synthetic contexts)
    pub event: Option<InputEvent>,
    /// Occurrence tag
    pub kind: ContextKind,
    /// The working range; any stage may set or replace it
    pub range: Option<Range>,
    /// The attached element this occurrence targets, resolved by the
    /// association stage. Later stages must tolerate `None`.
    pub editable: Option<NodeId>,
    /// The classified meaning, attached by interpretation stages and
    /// consumed by typing
    pub intent: Option<EditIntent>,
}

impl EditContext {
    /// Default context for a raw notification
    pub fn from_event(event: InputEvent) -> Self {
        Self {
            event: Some(event),
            kind: ContextKind::NativeInput,
            range: None,
            editable: None,
            intent: None,
        }
    }

    /// Synthetic lifecycle context carrying an editable's element
    pub fn lifecycle(kind: ContextKind, element: NodeId) -> Self {
        Self {
            event: None,
            kind,
            range: None,
            editable: Some(element),
            intent: None,
        }
    }

    pub fn is_native_input(&self) -> bool {
        matches!(self.kind, ContextKind::NativeInput)
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(self.kind, ContextKind::Attach | ContextKind::Detach)
    }
}
