//! Editable association stage
//!
//! Resolves the context's range to the nearest enclosing attached editable
//! and records it on the context. Later stages read `cx.editable` instead
//! of repeating the lookup.

use crate::context::EditContext;
use crate::editor::Editor;

pub(crate) fn handle(editor: &mut Editor, mut cx: EditContext) -> EditContext {
    // Pointer-move never re-associates, even when a range is present.
    // Hover passes over arbitrary regions; following it would thrash the
    // association mid-gesture.
    if cx.event.as_ref().is_some_and(|e| e.is_pointer_move()) {
        return cx;
    }

    // Lifecycle contexts arrive with the editable already set; the field is
    // written once per pass
    if cx.editable.is_some() {
        return cx;
    }

    let Some(range) = cx.range else {
        return cx;
    };
    let Some(anchor) = range.common_ancestor(&editor.dom) else {
        // Malformed range (endpoints in disjoint trees): no editable, but
        // the remaining stages still run
        tracing::debug!(?range, "range has no common ancestor");
        return cx;
    };

    cx.editable = editor.registry.lookup(&editor.dom, anchor);
    cx
}
