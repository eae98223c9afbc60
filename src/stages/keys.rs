//! Key interpretation stage
//!
//! Classifies keyboard notifications into semantic intents. Non-keyboard
//! contexts pass through untouched.

use crate::context::EditContext;
use crate::editor::Editor;
use crate::events::{InputEvent, Key, KeyEvent, NamedKey};
use crate::messages::{EditIntent, MoveTarget, OverrideTag};

pub(crate) fn handle(_editor: &mut Editor, mut cx: EditContext) -> EditContext {
    let Some(InputEvent::Key(event)) = cx.event.as_ref() else {
        return cx;
    };
    cx.intent = classify(*event);
    cx
}

fn classify(event: KeyEvent) -> Option<EditIntent> {
    let KeyEvent { key, modifiers } = event;
    let shift = modifiers.shift;

    match key {
        // Undo/Redo (Ctrl/Cmd+Z, Ctrl/Cmd+Shift+Z, Ctrl/Cmd+Y)
        Key::Character(c) if modifiers.primary() && c.eq_ignore_ascii_case(&'z') => {
            if shift {
                Some(EditIntent::Redo)
            } else {
                Some(EditIntent::Undo)
            }
        }
        Key::Character(c) if modifiers.primary() && c.eq_ignore_ascii_case(&'y') => {
            Some(EditIntent::Redo)
        }

        // Select All (Ctrl/Cmd+A)
        Key::Character(c) if modifiers.primary() && c.eq_ignore_ascii_case(&'a') => {
            Some(EditIntent::SelectAll)
        }

        // Formatting overrides for the next typed character
        Key::Character(c) if modifiers.primary() && c.eq_ignore_ascii_case(&'b') => {
            Some(EditIntent::ToggleOverride(OverrideTag::Bold))
        }
        Key::Character(c) if modifiers.primary() && c.eq_ignore_ascii_case(&'i') => {
            Some(EditIntent::ToggleOverride(OverrideTag::Italic))
        }
        Key::Character(c) if modifiers.primary() && c.eq_ignore_ascii_case(&'e') => {
            Some(EditIntent::ToggleOverride(OverrideTag::Code))
        }

        // Editing
        Key::Named(NamedKey::Enter) => Some(EditIntent::SplitBlock),
        Key::Named(NamedKey::Backspace) => Some(EditIntent::DeleteBackward),
        Key::Named(NamedKey::Delete) => Some(EditIntent::DeleteForward),

        // Caret movement, with or without selection extension
        Key::Named(NamedKey::ArrowLeft) => Some(movement(MoveTarget::Left, shift)),
        Key::Named(NamedKey::ArrowRight) => Some(movement(MoveTarget::Right, shift)),
        Key::Named(NamedKey::Home) => Some(movement(MoveTarget::LineStart, shift)),
        Key::Named(NamedKey::End) => Some(movement(MoveTarget::LineEnd, shift)),

        // Character input (only without the shortcut modifier)
        Key::Character(c) if !modifiers.primary() && !modifiers.alt => {
            Some(EditIntent::InsertChar(c))
        }

        _ => None,
    }
}

fn movement(target: MoveTarget, extend: bool) -> EditIntent {
    if extend {
        EditIntent::MoveWithSelection(target)
    } else {
        EditIntent::Move(target)
    }
}
