//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use scribe::boundary::{Boundary, Range};
use scribe::events::{InputEvent, Key, KeyEvent, Modifiers, NamedKey};
use scribe::{Dom, Editor, NodeId};

/// An editor over `<div><text/></div>` with the div attached
pub fn attached_editor(text_content: &str) -> (Editor, NodeId, NodeId) {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    let text = dom.create_text(text_content);
    dom.append_child(div, text);
    let mut editor = Editor::new(dom);
    editor.attach(div).expect("attach sample div");
    (editor, div, text)
}

/// An editor over `<div><p><text/></p></div>` with only the outer div
/// attached
pub fn nested_editor(text_content: &str) -> (Editor, NodeId, NodeId, NodeId) {
    let mut dom = Dom::new();
    let outer = dom.create_element("div");
    let inner = dom.create_element("p");
    let text = dom.create_text(text_content);
    dom.append_child(outer, inner);
    dom.append_child(inner, text);
    let mut editor = Editor::new(dom);
    editor.attach(outer).expect("attach outer div");
    (editor, outer, inner, text)
}

/// Place the caret by clicking at (node, offset)
pub fn click_at(editor: &mut Editor, node: NodeId, offset: usize) {
    editor.dispatch(InputEvent::Pointer(scribe::events::PointerEvent {
        kind: scribe::events::PointerKind::Click,
        target: node,
        offset,
    }));
}

/// Type a string character by character through the pipeline
pub fn type_text(editor: &mut Editor, text: &str) {
    for ch in text.chars() {
        editor.dispatch(InputEvent::Key(KeyEvent::character(ch)));
    }
}

pub fn press(editor: &mut Editor, key: NamedKey) {
    editor.dispatch(InputEvent::Key(KeyEvent::new(Key::Named(key))));
}

pub fn press_shift(editor: &mut Editor, key: NamedKey) {
    editor.dispatch(InputEvent::Key(KeyEvent::with_modifiers(
        Key::Named(key),
        Modifiers {
            shift: true,
            ..Default::default()
        },
    )));
}

pub fn press_ctrl(editor: &mut Editor, c: char) {
    editor.dispatch(InputEvent::Key(KeyEvent::with_modifiers(
        Key::Character(c),
        Modifiers {
            ctrl: true,
            ..Default::default()
        },
    )));
}

pub fn caret(node: NodeId, offset: usize) -> Range {
    Range::caret(Boundary::new(node, offset))
}

pub fn range(node: NodeId, start: usize, end: usize) -> Range {
    Range::new(Boundary::new(node, start), Boundary::new(node, end))
}
