use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::{FocusField, FormCommand};

use super::keymap::{KeymapContext, classify_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Save,
    Quit,
    Activate,
    Dismiss,
    FieldStep(i32),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Dispatch {
    Action(KeyAction),
    Input(KeyEvent),
}

pub(crate) fn route(context: KeymapContext, key: &KeyEvent) -> Dispatch {
    match classify_key(context, key) {
        Some(action) => Dispatch::Action(action),
        None => Dispatch::Input(*key),
    }
}

/// Edits a key press makes to the focused field, if any.
pub(crate) fn field_command(focus: FocusField, key: &KeyEvent) -> Option<FormCommand> {
    match focus {
        FocusField::Nickname => match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(FormCommand::NicknameInput(ch))
            }
            KeyCode::Backspace => Some(FormCommand::NicknameBackspace),
            KeyCode::Delete => Some(FormCommand::NicknameClear),
            _ => None,
        },
        FocusField::Favorite => match key.code {
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                Some(FormCommand::ToggleFavorite)
            }
            _ => None,
        },
        FocusField::Character | FocusField::Submit => None,
    }
}
