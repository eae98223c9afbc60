//! Drag/drop interpretation stage
//!
//! Drag-over keeps the caret tracking the drop target. A drop moves or
//! copies the dragged text inside a nested gesture scope, so the source
//! deletion and the target insertion undo as one step.

use crate::boundary::{Boundary, Range};
use crate::context::{ContextKind, EditContext};
use crate::editor::Editor;
use crate::events::{DragEvent, DragPhase, DropEffect, InputEvent};
use crate::registry::Editable;
use crate::undo::{EditOp, EditRecord, ScopeMeta};

pub(crate) fn handle(editor: &mut Editor, mut cx: EditContext) -> EditContext {
    let Some(InputEvent::Drag(drag)) = cx.event.as_ref() else {
        return cx;
    };
    let drag = *drag;
    match drag.phase {
        DragPhase::Over => {
            cx.range = Some(Range::caret(drag.target));
            cx
        }
        DragPhase::Drop => perform_drop(editor, cx, drag),
    }
}

fn perform_drop(editor: &mut Editor, mut cx: EditContext, drag: DragEvent) -> EditContext {
    let Some(element) = cx.editable else {
        tracing::debug!("drop outside any editable, ignoring");
        return cx;
    };
    let Editor { dom, registry, .. } = editor;
    let Some(editable) = registry.get_mut(element) else {
        return cx;
    };

    let Some(source) = drag.source else {
        tracing::debug!("drop without a source range, nothing to transfer");
        cx.range = Some(Range::caret(drag.target));
        return cx;
    };
    let source = source.normalized(dom);
    let target = drag.target;

    // Only single-text-node drags transfer content; anything wider
    // degrades to caret placement at the target
    if source.is_collapsed()
        || source.start.node != source.end.node
        || !dom.is_text(source.start.node)
        || !dom.is_text(target.node)
    {
        cx.range = Some(Range::caret(target));
        return cx;
    }

    let src_node = source.start.node;
    let (src_start, src_end) = (source.start.offset, source.end.offset);

    // Moving a selection onto itself is a no-op gesture
    if matches!(drag.effect, DropEffect::Move)
        && target.node == src_node
        && (src_start..=src_end).contains(&target.offset)
    {
        cx.range = Some(source);
        return cx;
    }

    let payload = dom.text_slice(src_node, src_start..src_end);

    cx.kind = ContextKind::Gesture("drop");
    let scope = editable.undo.enter(ScopeMeta::Gesture("drop"), false);

    let mut insert_at = target.offset;
    if matches!(drag.effect, DropEffect::Move) {
        dom.remove_text(src_node, src_start..src_end);
        record(
            editable,
            EditRecord::new(EditOp::delete_text(src_node, src_start, payload.clone()))
                .with_range_before(source),
        );
        // The removal shifted everything past the source leftwards
        if target.node == src_node && insert_at > src_end {
            insert_at -= src_end - src_start;
        }
    }
    insert_at = insert_at.min(dom.text_len(target.node));

    dom.insert_text(target.node, insert_at, &payload);
    let caret = Range::caret(Boundary::new(
        target.node,
        insert_at + payload.chars().count(),
    ));
    record(
        editable,
        EditRecord::new(EditOp::insert_text(target.node, insert_at, payload))
            .with_range_after(caret),
    );

    if let Err(e) = editable.undo.exit(scope) {
        tracing::warn!(error = %e, "drop scope close failed");
    }
    cx.range = Some(caret);
    cx
}

fn record(editable: &mut Editable, record: EditRecord) {
    if let Err(e) = editable.undo.record(record) {
        tracing::warn!(error = %e, "drop edit not recorded");
    }
}
