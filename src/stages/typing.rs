//! Typing interpretation stage
//!
//! Consumes the classified intent against the associated editable: caret
//! movement, text insertion and deletion, block splitting, select-all,
//! override toggling and undo/redo delegation. Every content mutation is
//! applied to the document and recorded in the editable's undo context.
//!
//! Each editing occurrence runs inside one merged scope, so multi-record
//! edits (replacing a selection, wrapping an override, splitting a block)
//! revert as a single step.

use crate::boundary::{Boundary, Range};
use crate::context::EditContext;
use crate::dom::{Dom, NodeId};
use crate::editor::Editor;
use crate::messages::{EditIntent, MoveTarget, OverrideTag};
use crate::registry::Editable;
use crate::undo::{EditOp, EditRecord, ScopeMeta};

pub(crate) fn handle(editor: &mut Editor, mut cx: EditContext) -> EditContext {
    let Some(intent) = cx.intent.take() else {
        return cx;
    };
    let Some(element) = cx.editable else {
        tracing::trace!(?intent, "intent without an editable, dropped");
        return cx;
    };
    let Editor { dom, registry, .. } = editor;
    let Some(editable) = registry.get_mut(element) else {
        return cx;
    };

    match intent {
        EditIntent::Undo => {
            if let Some(step) = editable.undo.undo(dom) {
                cx.range = step.range_before().or(cx.range);
            }
        }
        EditIntent::Redo => {
            if let Some(step) = editable.undo.redo(dom) {
                cx.range = step.range_after().or(cx.range);
            }
        }
        EditIntent::SelectAll => {
            cx.range = Some(Range::new(
                Boundary::new(element, 0),
                Boundary::new(element, dom.children(element).len()),
            ));
        }
        EditIntent::ToggleOverride(tag) => editable.toggle_override(tag),
        EditIntent::Move(target) => {
            if let Some(range) = cx.range {
                cx.range = Some(move_caret(dom, range, target));
            }
        }
        EditIntent::MoveWithSelection(target) => {
            if let Some(range) = cx.range {
                cx.range = Some(extend_selection(dom, range, target));
            }
        }
        intent => {
            let Some(range) = cx.range else {
                return cx;
            };
            let scope = editable.undo.enter(ScopeMeta::UserDevice, false);
            let caret = apply_edit(dom, editable, element, range.normalized(dom), intent);
            if let Err(e) = editable.undo.exit(scope) {
                tracing::warn!(error = %e, "typing scope close failed");
            }
            if let Some(caret) = caret {
                cx.range = Some(Range::caret(caret));
            }
        }
    }
    cx
}

// ========================================================================
// Caret movement
// ========================================================================

fn move_caret(dom: &Dom, range: Range, target: MoveTarget) -> Range {
    let range = range.normalized(dom);
    if !range.is_collapsed() {
        // A selection collapses to its matching side before moving
        return match target {
            MoveTarget::Left | MoveTarget::LineStart => Range::caret(range.start),
            MoveTarget::Right | MoveTarget::LineEnd => Range::caret(range.end),
        };
    }
    Range::caret(step_boundary(dom, range.start, target))
}

fn extend_selection(dom: &Dom, range: Range, target: MoveTarget) -> Range {
    Range::new(range.start, step_boundary(dom, range.end, target))
}

fn step_boundary(dom: &Dom, boundary: Boundary, target: MoveTarget) -> Boundary {
    // Element carets need layout-aware math; they stay put here
    if !dom.is_text(boundary.node) {
        return boundary;
    }
    let len = dom.text_len(boundary.node);
    let offset = boundary.offset.min(len);
    let new_offset = match target {
        MoveTarget::Left => offset.saturating_sub(1),
        MoveTarget::Right => (offset + 1).min(len),
        MoveTarget::LineStart => {
            let prefix = dom.text_slice(boundary.node, 0..offset);
            prefix
                .chars()
                .rev()
                .position(|c| c == '\n')
                .map(|from_end| offset - from_end)
                .unwrap_or(0)
        }
        MoveTarget::LineEnd => {
            let suffix = dom.text_slice(boundary.node, offset..len);
            suffix
                .chars()
                .position(|c| c == '\n')
                .map(|ahead| offset + ahead)
                .unwrap_or(len)
        }
    };
    Boundary::new(boundary.node, new_offset)
}

// ========================================================================
// Content mutation
// ========================================================================

fn apply_edit(
    dom: &mut Dom,
    editable: &mut Editable,
    element: NodeId,
    range: Range,
    intent: EditIntent,
) -> Option<Boundary> {
    match intent {
        EditIntent::InsertChar(c) => insert(dom, editable, range, &c.to_string()),
        EditIntent::InsertText(text) => insert(dom, editable, range, &text),
        EditIntent::SplitBlock => split_block(dom, editable, element, range),
        EditIntent::DeleteBackward => delete_dir(dom, editable, range, Dir::Backward),
        EditIntent::DeleteForward => delete_dir(dom, editable, range, Dir::Forward),
        _ => None,
    }
}

fn insert(dom: &mut Dom, editable: &mut Editable, range: Range, text: &str) -> Option<Boundary> {
    let caret = if range.is_collapsed() {
        range.start
    } else {
        delete_range(dom, editable, range)?
    };
    let caret = resolve_text_caret(dom, caret)?;

    let overrides = editable.take_overrides();
    if !overrides.is_empty() {
        return insert_wrapped(dom, editable, caret, text, &overrides);
    }

    dom.insert_text(caret.node, caret.offset, text);
    let after = Boundary::new(caret.node, caret.offset + text.chars().count());
    record(
        editable,
        EditRecord::new(EditOp::insert_text(caret.node, caret.offset, text))
            .with_range_before(Range::caret(caret))
            .with_range_after(Range::caret(after)),
    );
    Some(after)
}

/// Insert text wrapped in the pending override elements, innermost tag
/// closest to the text. The caret's tail is detached into its own text
/// node first so the wrap slots in between.
fn insert_wrapped(
    dom: &mut Dom,
    editable: &mut Editable,
    caret: Boundary,
    text: &str,
    overrides: &[OverrideTag],
) -> Option<Boundary> {
    let parent = dom.parent(caret.node)?;
    let index = dom.index_in_parent(caret.node)?;
    let len = dom.text_len(caret.node);
    let before = Range::caret(caret);

    if caret.offset < len {
        let tail = dom.text_slice(caret.node, caret.offset..len);
        dom.remove_text(caret.node, caret.offset..len);
        record(
            editable,
            EditRecord::new(EditOp::delete_text(caret.node, caret.offset, tail.clone()))
                .with_range_before(before),
        );
        let tail_node = dom.create_text(&tail);
        dom.insert_child(parent, index + 1, tail_node);
        record(
            editable,
            EditRecord::new(EditOp::insert_node(parent, index + 1, tail_node)),
        );
    }

    let inner = dom.create_text(text);
    let mut wrapped = inner;
    for tag in overrides {
        let wrap = dom.create_element(tag.node_name());
        dom.append_child(wrap, wrapped);
        wrapped = wrap;
    }
    dom.insert_child(parent, index + 1, wrapped);

    let after = Boundary::new(inner, text.chars().count());
    record(
        editable,
        EditRecord::new(EditOp::insert_node(parent, index + 1, wrapped))
            .with_range_before(before)
            .with_range_after(Range::caret(after)),
    );
    Some(after)
}

/// Split the caret's block at the caret, carrying the tail into a fresh
/// block named by the editable's settings
fn split_block(
    dom: &mut Dom,
    editable: &mut Editable,
    element: NodeId,
    range: Range,
) -> Option<Boundary> {
    let caret = if range.is_collapsed() {
        range.start
    } else {
        delete_range(dom, editable, range)?
    };
    let caret = resolve_text_caret(dom, caret)?;
    if !dom.is_ancestor_or_self(element, caret.node) {
        return None;
    }

    // The top-most ancestor under the editable is the block being split
    let block = dom
        .ancestors(caret.node)
        .take_while(|&n| n != element)
        .last()?;
    let block_index = dom.index_in_parent(block)?;

    let len = dom.text_len(caret.node);
    let tail = if caret.offset < len {
        let tail = dom.text_slice(caret.node, caret.offset..len);
        dom.remove_text(caret.node, caret.offset..len);
        record(
            editable,
            EditRecord::new(EditOp::delete_text(caret.node, caret.offset, tail.clone()))
                .with_range_before(Range::caret(caret)),
        );
        tail
    } else {
        String::new()
    };

    let new_text = dom.create_text(&tail);
    let new_block = dom.create_element(&editable.settings.default_block_node);
    dom.append_child(new_block, new_text);
    dom.insert_child(element, block_index + 1, new_block);

    let after = Boundary::new(new_text, 0);
    record(
        editable,
        EditRecord::new(EditOp::insert_node(element, block_index + 1, new_block))
            .with_range_before(Range::caret(caret))
            .with_range_after(Range::caret(after)),
    );
    Some(after)
}

enum Dir {
    Backward,
    Forward,
}

fn delete_dir(
    dom: &mut Dom,
    editable: &mut Editable,
    range: Range,
    dir: Dir,
) -> Option<Boundary> {
    if !range.is_collapsed() {
        return delete_range(dom, editable, range);
    }
    let caret = resolve_text_caret(dom, range.start)?;
    let len = dom.text_len(caret.node);
    let (start, end) = match dir {
        Dir::Backward if caret.offset > 0 => (caret.offset - 1, caret.offset),
        Dir::Forward if caret.offset < len => (caret.offset, caret.offset + 1),
        // At the node edge; crossing into a sibling is boundary-math
        // collaborator territory, so the caret just stays
        _ => return Some(caret),
    };
    let removed = dom.remove_text(caret.node, start..end);
    record(
        editable,
        EditRecord::new(EditOp::delete_text(caret.node, start, removed))
            .with_range_before(Range::caret(caret))
            .with_range_after(Range::caret(Boundary::new(caret.node, start))),
    );
    Some(Boundary::new(caret.node, start))
}

/// Remove a non-collapsed range's content, returning the caret left behind
fn delete_range(dom: &mut Dom, editable: &mut Editable, range: Range) -> Option<Boundary> {
    // Text within one node
    if range.start.node == range.end.node && dom.is_text(range.start.node) {
        let removed = dom.remove_text(range.start.node, range.start.offset..range.end.offset);
        record(
            editable,
            EditRecord::new(EditOp::delete_text(
                range.start.node,
                range.start.offset,
                removed,
            ))
            .with_range_before(range)
            .with_range_after(Range::caret(range.start)),
        );
        return Some(range.start);
    }

    // A single selected child (e.g. an activated widget) is removed whole
    if range.start.node == range.end.node
        && dom.is_element(range.start.node)
        && range.end.offset == range.start.offset + 1
    {
        let parent = range.start.node;
        let child = *dom.children(parent).get(range.start.offset)?;
        dom.remove_child(parent, child)?;
        record(
            editable,
            EditRecord::new(EditOp::remove_node(parent, range.start.offset, child))
                .with_range_before(range)
                .with_range_after(Range::caret(range.start)),
        );
        return Some(range.start);
    }

    tracing::debug!(?range, "multi-node range deletion unsupported, dropped");
    None
}

/// Land a boundary in a text node: element boundaries slide into the
/// adjacent text child when one exists
fn resolve_text_caret(dom: &Dom, boundary: Boundary) -> Option<Boundary> {
    if dom.is_text(boundary.node) {
        return Some(Boundary::new(
            boundary.node,
            boundary.offset.min(dom.text_len(boundary.node)),
        ));
    }
    let children = dom.children(boundary.node);
    if boundary.offset > 0 {
        if let Some(&prev) = children.get(boundary.offset - 1) {
            if dom.is_text(prev) {
                return Some(Boundary::new(prev, dom.text_len(prev)));
            }
        }
    }
    if let Some(&next) = children.get(boundary.offset) {
        if dom.is_text(next) {
            return Some(Boundary::new(next, 0));
        }
    }
    None
}

fn record(editable: &mut Editable, record: EditRecord) {
    if let Err(e) = editable.undo.record(record) {
        tracing::warn!(error = %e, "edit not recorded");
    }
}
