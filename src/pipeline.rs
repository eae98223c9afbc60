//! Event pipeline - the fixed chain every occurrence flows through
//!
//! One dispatch builds an [`EditContext`] and threads it through the stage
//! sequence below, in order, exactly once. Stages are independent; each
//! receives the context by value and returns it for the next. A stage that
//! does not recognize the occurrence must return the context unchanged.
//!
//! Dispatches may nest: a stage (or a lifecycle operation it triggers) can
//! dispatch a synthetic follow-up, which runs to completion before the
//! outer stage resumes. Everything is single-threaded and cooperative.

use crate::context::EditContext;
use crate::editor::Editor;
use crate::events::InputEvent;
use crate::stages;

/// One link in the chain of responsibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Classify keyboard notifications into semantic intents
    Keys,
    /// Classify pointer notifications into caret placement
    Pointer,
    /// Resolve the range to its nearest attached editable
    Associate,
    /// Sanitize paste payloads into insertion intents
    Paste,
    /// Handle drag-over targeting and drop move/copy gestures
    DragDrop,
    /// Select embedded non-editable widgets as units
    BlockWidget,
    /// Apply intents as recorded mutations of the editable
    Typing,
    /// Normalize and clamp the range to the editable
    SelectionPolicy,
    /// Write the final range to the ambient selection
    Commit,
}

/// The fixed stage order. Never composed dynamically; changing editing
/// behavior means changing a stage, not the chain.
pub const STAGES: [Stage; 9] = [
    Stage::Keys,
    Stage::Pointer,
    Stage::Associate,
    Stage::Paste,
    Stage::DragDrop,
    Stage::BlockWidget,
    Stage::Typing,
    Stage::SelectionPolicy,
    Stage::Commit,
];

/// Run one occurrence through the pipeline.
///
/// Exactly one of `event` / `seed` carries the occurrence: a raw
/// notification gets a default context, a seed context (synthetic
/// lifecycle events) is used as-is. Passing both merges the event into the
/// seed; passing neither is a no-op.
pub fn dispatch(editor: &mut Editor, event: Option<InputEvent>, seed: Option<EditContext>) {
    let mut cx = match (event, seed) {
        (Some(event), None) => {
            if matches!(event, InputEvent::SelectionChange)
                && !editor.config.route_selection_changes
            {
                tracing::trace!("selection-change routing disabled, dropping");
                return;
            }
            let mut cx = EditContext::from_event(event);
            complete_default_range(editor, &mut cx);
            cx
        }
        (None, Some(cx)) => cx,
        (Some(event), Some(mut cx)) => {
            cx.event.get_or_insert(event);
            cx
        }
        (None, None) => {
            tracing::warn!("dispatch called with neither event nor context");
            return;
        }
    };

    tracing::trace!(kind = ?cx.kind, "pipeline start");
    for stage in STAGES {
        cx = stages::run(stage, editor, cx);
    }
    tracing::trace!(kind = ?cx.kind, range = ?cx.range, "pipeline done");
}

/// Non-positional occurrences target the ambient selection by default.
/// Drag notifications target the pointer position instead; pointer
/// notifications produce their own range in the pointer stage.
fn complete_default_range(editor: &Editor, cx: &mut EditContext) {
    if cx.range.is_some() {
        return;
    }
    match &cx.event {
        Some(InputEvent::Key(_)) | Some(InputEvent::Paste(_)) | Some(InputEvent::SelectionChange) => {
            cx.range = editor.selection.current();
        }
        Some(InputEvent::Drag(drag)) => {
            cx.range = Some(crate::boundary::Range::caret(drag.target));
        }
        Some(InputEvent::Pointer(_)) | None => {}
    }
}
