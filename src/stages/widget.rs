//! Block-widget interpretation stage
//!
//! Embedded non-editable elements (images, rules, embeds) inside an
//! editable are selected and traversed as units: clicking one selects the
//! whole node, and arrowing away from a selected widget collapses the
//! selection to the matching side instead of entering it.

use crate::boundary::Range;
use crate::context::EditContext;
use crate::dom::{Dom, NodeId};
use crate::editor::Editor;
use crate::events::{InputEvent, PointerKind};
use crate::messages::{EditIntent, MoveTarget};

pub(crate) fn handle(editor: &mut Editor, mut cx: EditContext) -> EditContext {
    let Some(element) = cx.editable else {
        return cx;
    };
    let enabled = editor
        .registry
        .get(element)
        .map(|e| e.settings.allow_block_widgets)
        .unwrap_or(false);
    if !enabled {
        return cx;
    }
    let dom = &editor.dom;

    match cx.event.as_ref() {
        Some(InputEvent::Pointer(pointer))
            if matches!(pointer.kind, PointerKind::Down | PointerKind::Click) =>
        {
            if let Some(widget) = enclosing_widget(dom, element, pointer.target) {
                if let Some(range) = Range::select_node(dom, widget) {
                    tracing::debug!(widget = widget.index(), "widget activated");
                    cx.range = Some(range);
                }
            }
        }
        Some(InputEvent::Key(_)) => {
            let Some(range) = cx.range else {
                return cx;
            };
            if selected_widget(dom, range).is_none() {
                return cx;
            }
            // Consume the horizontal move: the caret lands beside the
            // widget, never inside it
            match cx.intent {
                Some(EditIntent::Move(MoveTarget::Left)) => {
                    cx.range = Some(Range::caret(range.start));
                    cx.intent = None;
                }
                Some(EditIntent::Move(MoveTarget::Right)) => {
                    cx.range = Some(Range::caret(range.end));
                    cx.intent = None;
                }
                _ => {}
            }
        }
        _ => {}
    }
    cx
}

/// Nearest atomic element at or above `hit`, strictly inside the editable
fn enclosing_widget(dom: &Dom, editable: NodeId, hit: NodeId) -> Option<NodeId> {
    dom.ancestors(hit)
        .take_while(|&n| n != editable)
        .find(|&n| dom.is_atomic(n))
        .filter(|&n| dom.is_ancestor_or_self(editable, n))
}

/// The atomic element a range selects as its single unit, if any
fn selected_widget(dom: &Dom, range: Range) -> Option<NodeId> {
    if range.start.node != range.end.node || range.end.offset != range.start.offset + 1 {
        return None;
    }
    let child = dom.children(range.start.node).get(range.start.offset)?;
    dom.is_atomic(*child).then_some(*child)
}
