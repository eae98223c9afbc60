//! Pipeline stages
//!
//! Each stage is a total function `(editor, context) -> context`: it never
//! fails, and when the occurrence is not its concern it hands the context
//! back untouched. All stages tolerate a missing range and a missing
//! editable.

mod associate;
mod commit;
mod dragdrop;
mod keys;
mod paste;
mod pointer;
mod policy;
mod typing;
mod widget;

use crate::context::EditContext;
use crate::editor::Editor;
use crate::pipeline::Stage;

/// Dispatch one stage of the chain
pub(crate) fn run(stage: Stage, editor: &mut Editor, cx: EditContext) -> EditContext {
    match stage {
        Stage::Keys => keys::handle(editor, cx),
        Stage::Pointer => pointer::handle(editor, cx),
        Stage::Associate => associate::handle(editor, cx),
        Stage::Paste => paste::handle(editor, cx),
        Stage::DragDrop => dragdrop::handle(editor, cx),
        Stage::BlockWidget => widget::handle(editor, cx),
        Stage::Typing => typing::handle(editor, cx),
        Stage::SelectionPolicy => policy::handle(editor, cx),
        Stage::Commit => commit::handle(editor, cx),
    }
}
