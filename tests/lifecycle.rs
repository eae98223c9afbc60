//! Editable lifecycle tests - attach, detach, registry invariants

mod common;

use common::{attached_editor, caret, click_at, type_text};
use scribe::errors::AttachError;
use scribe::{Dom, Editor};

// ========================================================================
// Attach/detach round trips
// ========================================================================

#[test]
fn test_attach_detach_leaves_no_mapping() {
    let (mut editor, div, _) = attached_editor("hello");

    editor.detach(div).unwrap();
    assert!(!editor.is_attached(div));
    assert!(editor.editable(div).is_none());

    // Second detach reports the misuse
    assert_eq!(editor.detach(div).unwrap_err(), AttachError::NotAttached(div));
}

#[test]
fn test_double_attach_fails_with_one_editable_left() {
    let (mut editor, div, _) = attached_editor("hello");

    assert_eq!(editor.attach(div), Err(AttachError::AlreadyAttached(div)));
    assert_eq!(editor.attached_count(), 1);

    // The original attachment is untouched and still works
    assert!(editor.is_attached(div));
    assert!(editor.document().editable_flag(div));
}

#[test]
fn test_reattach_after_detach_succeeds() {
    let (mut editor, div, _) = attached_editor("hello");

    editor.detach(div).unwrap();
    editor.attach(div).unwrap();
    assert!(editor.is_attached(div));
    assert!(editor.document().editable_flag(div));
}

#[test]
fn test_detach_keeps_document_edits() {
    let (mut editor, div, text) = attached_editor("ab");
    click_at(&mut editor, text, 2);
    type_text(&mut editor, "c");

    let editable = editor.detach(div).unwrap();
    assert_eq!(editor.document().text(text), "abc");

    // The returned editable still holds the recorded history
    assert_eq!(editable.undo.undo_count(), 1);
}

#[test]
fn test_undo_after_detach_with_zero_edits_signals_nothing() {
    let (mut editor, div, _) = attached_editor("hello");

    let mut editable = editor.detach(div).unwrap();
    // The root scope is already closed and nothing was recorded
    assert!(editable.undo.undo(editor.document_mut()).is_none());
}

#[test]
fn test_failed_attach_leaves_element_state_alone() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    let text = dom.create_text("x");
    dom.append_child(div, text);
    let mut editor = Editor::new(dom);

    editor.attach(div).unwrap();
    let _ = editor.attach(div);

    // Still attached, flag still set, root scope still open
    assert!(editor.document().editable_flag(div));
    assert_eq!(editor.editable(div).unwrap().undo.open_scopes(), 1);
}

// ========================================================================
// Multiple editables
// ========================================================================

#[test]
fn test_two_editables_have_independent_histories() {
    let mut dom = Dom::new();
    let first = dom.create_element("div");
    let first_text = dom.create_text("one");
    let second = dom.create_element("div");
    let second_text = dom.create_text("two");
    dom.append_child(first, first_text);
    dom.append_child(second, second_text);

    let mut editor = Editor::new(dom);
    editor.attach(first).unwrap();
    editor.attach(second).unwrap();

    click_at(&mut editor, first_text, 3);
    type_text(&mut editor, "!");
    assert_eq!(editor.document().text(first_text), "one!");

    // Only the first editable recorded anything
    assert_eq!(editor.editable(first).unwrap().undo.undo_count(), 1);
    assert_eq!(editor.editable(second).unwrap().undo.undo_count(), 0);

    // Undoing the second does nothing; the first reverts
    assert!(!editor.undo(second).unwrap());
    assert!(editor.undo(first).unwrap());
    assert_eq!(editor.document().text(first_text), "one");
}

#[test]
fn test_detach_one_editable_spares_the_other() {
    let mut dom = Dom::new();
    let first = dom.create_element("div");
    let second = dom.create_element("div");
    let second_text = dom.create_text("kept");
    dom.append_child(second, second_text);

    let mut editor = Editor::new(dom);
    editor.attach(first).unwrap();
    editor.attach(second).unwrap();

    editor.detach(first).unwrap();
    assert!(!editor.is_attached(first));
    assert!(editor.is_attached(second));

    click_at(&mut editor, second_text, 4);
    type_text(&mut editor, "!");
    assert_eq!(editor.document().text(second_text), "kept!");
    assert_eq!(editor.selection().current(), Some(caret(second_text, 5)));
}
