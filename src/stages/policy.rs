//! Selection policy stage
//!
//! Reconciles the computed range with editor-wide selection rules: start
//! and end are put in document order, offsets are clamped to their node's
//! extent, and both endpoints are pulled inside the associated editable's
//! subtree. Without an editable the range passes through unchanged apart
//! from normalization.

use crate::boundary::{Boundary, Range};
use crate::context::EditContext;
use crate::dom::{Dom, NodeId};
use crate::editor::Editor;

pub(crate) fn handle(editor: &mut Editor, mut cx: EditContext) -> EditContext {
    let Some(range) = cx.range else {
        return cx;
    };
    let dom = &editor.dom;

    let mut range = range.normalized(dom);
    range.start = clamp_offset(dom, range.start);
    range.end = clamp_offset(dom, range.end);

    if let Some(element) = cx.editable {
        range.start = clamp_into(dom, element, range.start, Side::Start);
        range.end = clamp_into(dom, element, range.end, Side::End);
    }

    cx.range = Some(range);
    cx
}

enum Side {
    Start,
    End,
}

/// Keep the offset within the node's extent
fn clamp_offset(dom: &Dom, boundary: Boundary) -> Boundary {
    let max = if dom.is_text(boundary.node) {
        dom.text_len(boundary.node)
    } else {
        dom.children(boundary.node).len()
    };
    Boundary::new(boundary.node, boundary.offset.min(max))
}

/// Pull a boundary outside the editable to the editable's matching edge
fn clamp_into(dom: &Dom, editable: NodeId, boundary: Boundary, side: Side) -> Boundary {
    if dom.is_ancestor_or_self(editable, boundary.node) {
        return boundary;
    }
    match side {
        Side::Start => Boundary::new(editable, 0),
        Side::End => Boundary::new(editable, dom.children(editable).len()),
    }
}
