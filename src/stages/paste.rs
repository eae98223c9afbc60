//! Paste interpretation stage
//!
//! Sanitizes the clipboard payload and turns it into an insertion intent
//! targeting the context range (falling back to the ambient selection).
//! The actual mutation and its undo record happen in the typing stage,
//! like any other insertion.

use crate::context::EditContext;
use crate::editor::Editor;
use crate::events::InputEvent;
use crate::messages::EditIntent;

pub(crate) fn handle(editor: &mut Editor, mut cx: EditContext) -> EditContext {
    let Some(InputEvent::Paste(paste)) = cx.event.as_ref() else {
        return cx;
    };

    if cx.range.is_none() {
        cx.range = editor.selection.current();
    }

    let clean = sanitize(&paste.content);
    if clean.is_empty() {
        tracing::debug!("paste payload empty after sanitization");
        return cx;
    }
    cx.intent = Some(EditIntent::InsertText(clean));
    cx
}

/// Normalize line endings and strip control characters the document model
/// cannot hold
fn sanitize(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}
