//! Selection commit stage
//!
//! The end of the chain, and the only stage allowed to touch the ambient
//! selection. No range on the context means some stage cancelled the
//! occurrence; the committed selection then stays exactly as it was.

use crate::context::EditContext;
use crate::editor::Editor;

pub(crate) fn handle(editor: &mut Editor, cx: EditContext) -> EditContext {
    match cx.range {
        Some(range) => editor.selection.commit(range),
        None => tracing::trace!(kind = ?cx.kind, "no range, selection untouched"),
    }
    cx
}
