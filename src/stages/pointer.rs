//! Pointer interpretation stage
//!
//! Pointer down and click place a collapsed caret at the hit position.
//! Pointer up and move are transparent; move in particular must not
//! produce a range, or the association stage would re-associate on every
//! hover.

use crate::boundary::{Boundary, Range};
use crate::context::EditContext;
use crate::editor::Editor;
use crate::events::{InputEvent, PointerKind};

pub(crate) fn handle(_editor: &mut Editor, mut cx: EditContext) -> EditContext {
    let Some(InputEvent::Pointer(pointer)) = cx.event.as_ref() else {
        return cx;
    };
    match pointer.kind {
        PointerKind::Down | PointerKind::Click => {
            cx.range = Some(Range::caret(Boundary::new(pointer.target, pointer.offset)));
        }
        PointerKind::Up | PointerKind::Move => {}
    }
    cx
}
