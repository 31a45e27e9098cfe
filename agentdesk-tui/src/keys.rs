//! Keybinding definitions for the TUI.
//!
//! Two modes: navigation keys when no form is open, and text-entry keys
//! while a form or the test chat has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    Refresh,
    NewItem,
    EditItem,
    DeleteItem,
    ToggleEnabled,
    Configure,
    OpenChat,
    ShowPrompts,
    Filter,
    Logout,
    Confirm,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('n') => Some(Action::NewItem),
        KeyCode::Char('e') => Some(Action::EditItem),
        KeyCode::Char('d') => Some(Action::DeleteItem),
        KeyCode::Char('t') => Some(Action::ToggleEnabled),
        KeyCode::Char('c') => Some(Action::Configure),
        KeyCode::Char('m') => Some(Action::OpenChat),
        KeyCode::Char('p') => Some(Action::ShowPrompts),
        KeyCode::Char('f') => Some(Action::Filter),
        KeyCode::Char('L') => Some(Action::Logout),
        KeyCode::Char('[') => Some(Action::PrevPage),
        KeyCode::Char(']') => Some(Action::NextPage),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
        KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
        KeyCode::Char(c @ '1'..='9') => Some(Action::SwitchView(c as usize - '1' as usize)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Input(char),
    Backspace,
    NextField,
    PrevField,
    /// Next choice of a choice or toggle field.
    CycleNext,
    CyclePrev,
    Submit,
    Cancel,
}

pub fn map_form_key(event: KeyEvent) -> Option<FormAction> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(FormAction::Cancel),
            _ => None,
        };
    }

    match code {
        KeyCode::Enter => Some(FormAction::Submit),
        KeyCode::Esc => Some(FormAction::Cancel),
        KeyCode::Tab | KeyCode::Down => Some(FormAction::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(FormAction::PrevField),
        KeyCode::Right => Some(FormAction::CycleNext),
        KeyCode::Left => Some(FormAction::CyclePrev),
        KeyCode::Backspace => Some(FormAction::Backspace),
        KeyCode::Char(c) => Some(FormAction::Input(c)),
        _ => None,
    }
}
