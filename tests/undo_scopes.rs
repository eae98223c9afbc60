//! Undo transaction tests - scope discipline, partitioning, history replay

mod common;

use common::{attached_editor, click_at, press_ctrl, press_shift, range, type_text};
use scribe::undo::{EditOp, EditRecord, ScopeMeta, UndoContext, UndoError};
use scribe::Dom;

// ========================================================================
// Scope stack discipline
// ========================================================================

#[test]
fn test_out_of_order_exit_is_a_scope_mismatch() {
    let mut undo = UndoContext::new();
    let first = undo.enter(ScopeMeta::External, false);
    let second = undo.enter(ScopeMeta::UserDevice, true);

    // Closing the outer scope while the inner one is open must fail
    assert_eq!(undo.exit(first), Err(UndoError::ScopeMismatch));

    // Innermost-first succeeds
    assert_eq!(undo.exit(second), Ok(()));
    assert_eq!(undo.exit(first), Ok(()));
}

#[test]
fn test_record_requires_an_open_scope() {
    let mut dom = Dom::new();
    let text = dom.create_text("x");

    let mut undo = UndoContext::new();
    assert_eq!(
        undo.record(EditRecord::new(EditOp::insert_text(text, 0, "a"))),
        Err(UndoError::NoOpenScope)
    );
}

#[test]
fn test_scope_mismatch_does_not_corrupt_the_stack() {
    let mut dom = Dom::new();
    let text = dom.create_text("");

    let mut undo = UndoContext::new();
    let outer = undo.enter(ScopeMeta::External, true);
    let inner = undo.enter(ScopeMeta::Gesture("paste"), false);

    let _ = undo.exit(outer);

    // The failed exit left both scopes open; recording still lands in the
    // inner scope and everything closes cleanly afterwards
    dom.insert_text(text, 0, "a");
    undo.record(EditRecord::new(EditOp::insert_text(text, 0, "a")))
        .unwrap();
    undo.exit(inner).unwrap();
    undo.exit(outer).unwrap();
    assert_eq!(undo.undo_count(), 1);
}

// ========================================================================
// Partitioning
// ========================================================================

#[test]
fn test_merged_scope_reverts_three_edits_atomically() {
    let mut dom = Dom::new();
    let text = dom.create_text("");

    let mut undo = UndoContext::new();
    let scope = undo.enter(ScopeMeta::Gesture("import"), false);
    for (i, s) in ["a", "b", "c"].iter().enumerate() {
        dom.insert_text(text, i, s);
        undo.record(EditRecord::new(EditOp::insert_text(text, i, *s)))
            .unwrap();
    }
    undo.exit(scope).unwrap();
    assert_eq!(dom.text(text), "abc");

    // One undo reverts all three
    assert!(undo.undo(&mut dom).is_some());
    assert_eq!(dom.text(text), "");
    assert!(undo.undo(&mut dom).is_none());
}

#[test]
fn test_partitioned_scope_needs_three_undos() {
    let mut dom = Dom::new();
    let text = dom.create_text("");

    let mut undo = UndoContext::new();
    let scope = undo.enter(ScopeMeta::External, true);
    for (i, s) in ["a", "b", "c"].iter().enumerate() {
        dom.insert_text(text, i, s);
        undo.record(EditRecord::new(EditOp::insert_text(text, i, *s)))
            .unwrap();
    }

    undo.undo(&mut dom);
    undo.undo(&mut dom);
    assert_eq!(dom.text(text), "a");
    undo.undo(&mut dom);
    assert_eq!(dom.text(text), "");

    undo.exit(scope).unwrap();
}

// ========================================================================
// History through the editor façade
// ========================================================================

#[test]
fn test_keyboard_undo_redo_replays_selection() {
    let (mut editor, _, text) = attached_editor("ab");
    click_at(&mut editor, text, 2);
    type_text(&mut editor, "c");

    press_ctrl(&mut editor, 'z');
    assert_eq!(editor.document().text(text), "ab");
    assert_eq!(editor.selection().current(), Some(common::caret(text, 2)));

    press_ctrl(&mut editor, 'y');
    assert_eq!(editor.document().text(text), "abc");
    assert_eq!(editor.selection().current(), Some(common::caret(text, 3)));
}

#[test]
fn test_new_edit_discards_redo_history() {
    let (mut editor, div, text) = attached_editor("");
    click_at(&mut editor, text, 0);
    type_text(&mut editor, "a");

    editor.undo(div).unwrap();
    assert!(editor.editable(div).unwrap().undo.can_redo());

    type_text(&mut editor, "b");
    assert!(!editor.editable(div).unwrap().undo.can_redo());
    assert!(!editor.redo(div).unwrap());
    assert_eq!(editor.document().text(text), "b");
}

#[test]
fn test_replacing_a_selection_is_one_step() {
    let (mut editor, div, text) = attached_editor("hello world");
    click_at(&mut editor, text, 0);
    // Select "hello" with shift+arrow, then type over it
    for _ in 0..5 {
        press_shift(&mut editor, scribe::events::NamedKey::ArrowRight);
    }
    assert_eq!(editor.selection().current(), Some(range(text, 0, 5)));

    type_text(&mut editor, "X");
    assert_eq!(editor.document().text(text), "X world");

    // Deleting the selection and inserting the char undo together
    editor.undo(div).unwrap();
    assert_eq!(editor.document().text(text), "hello world");
}
