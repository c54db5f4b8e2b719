use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use crate::core::Action;

/// Terminal input relevant to navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Navigate(Action),
    Quit,
}

/// Poll for a key with timeout. `Ok(None)` on timeout or an irrelevant event.
pub fn poll_input(timeout: Duration) -> io::Result<Option<KeyInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key_event) => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            Ok(map_key(&key_event))
        }
        _ => Ok(None),
    }
}

pub fn map_key(key: &KeyEvent) -> Option<KeyInput> {
    // Some terminals also report releases; only presses navigate.
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(KeyInput::Quit),
        (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => Some(KeyInput::Quit),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(KeyInput::Navigate(Action::MoveUp)),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(KeyInput::Navigate(Action::MoveDown)),
        (_, KeyCode::Left) | (_, KeyCode::Char('h')) => Some(KeyInput::Navigate(Action::MoveLeft)),
        (_, KeyCode::Right) | (_, KeyCode::Char('l')) => Some(KeyInput::Navigate(Action::MoveRight)),
        (_, KeyCode::Enter) | (_, KeyCode::Char(' ')) => Some(KeyInput::Navigate(Action::Confirm)),
        _ => None,
    }
}
