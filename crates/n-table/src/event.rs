// SPDX-License-Identifier: MIT
//! The controller's input vocabulary.
//!
//! Raw terminal events are translated into [`GridEvent`]s here, so the
//! controller itself never sees escape codes or modifier bits.

use n_term::input::{Event, KeyCode, KeyEvent, Modifiers};

/// One discrete thing the user did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Append a character to the focused cell.
    Input(char),
    /// Delete the last character of the focused cell.
    Backspace,
    /// Line submit (Enter).
    Submit,
    /// Host interrupt (Ctrl+C, Ctrl+D).
    Interrupt,
}

impl GridEvent {
    /// Translate a key press. Keys with no meaning in the grid map to `None`.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.is_ctrl('c') || key.is_ctrl('d') {
            return Some(Self::Interrupt);
        }
        match key.code {
            KeyCode::Up => Some(Self::MoveUp),
            KeyCode::Down => Some(Self::MoveDown),
            KeyCode::Left => Some(Self::MoveLeft),
            KeyCode::Right => Some(Self::MoveRight),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Enter => Some(Self::Submit),
            KeyCode::Char(ch)
                if !ch.is_control()
                    && !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) =>
            {
                Some(Self::Input(ch))
            }
            _ => None,
        }
    }

    /// Translate any terminal event into zero or more grid events.
    ///
    /// A paste types its characters one by one; line breaks and other
    /// control characters in it are dropped.
    #[must_use]
    pub fn from_terminal(event: &Event) -> Vec<Self> {
        match event {
            Event::Key(key) => Self::from_key(key).into_iter().collect(),
            Event::Paste(text) => text
                .chars()
                .filter(|ch| !ch.is_control())
                .map(Self::Input)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    fn with(code: KeyCode, modifiers: Modifiers) -> KeyEvent {
        KeyEvent { code, modifiers }
    }

    #[test]
    fn arrows_move() {
        assert_eq!(GridEvent::from_key(&key(KeyCode::Up)), Some(GridEvent::MoveUp));
        assert_eq!(GridEvent::from_key(&key(KeyCode::Down)), Some(GridEvent::MoveDown));
        assert_eq!(GridEvent::from_key(&key(KeyCode::Left)), Some(GridEvent::MoveLeft));
        assert_eq!(GridEvent::from_key(&key(KeyCode::Right)), Some(GridEvent::MoveRight));
    }

    #[test]
    fn editing_keys() {
        assert_eq!(GridEvent::from_key(&key(KeyCode::Backspace)), Some(GridEvent::Backspace));
        assert_eq!(GridEvent::from_key(&key(KeyCode::Enter)), Some(GridEvent::Submit));
        assert_eq!(
            GridEvent::from_key(&key(KeyCode::Char('9'))),
            Some(GridEvent::Input('9'))
        );
        assert_eq!(
            GridEvent::from_key(&with(KeyCode::Char('A'), Modifiers::SHIFT)),
            Some(GridEvent::Input('A'))
        );
    }

    #[test]
    fn interrupts() {
        assert_eq!(
            GridEvent::from_key(&with(KeyCode::Char('c'), Modifiers::CTRL)),
            Some(GridEvent::Interrupt)
        );
        assert_eq!(
            GridEvent::from_key(&with(KeyCode::Char('d'), Modifiers::CTRL)),
            Some(GridEvent::Interrupt)
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(GridEvent::from_key(&key(KeyCode::Tab)), None);
        assert_eq!(GridEvent::from_key(&key(KeyCode::Escape)), None);
        assert_eq!(GridEvent::from_key(&key(KeyCode::PageDown)), None);
        assert_eq!(
            GridEvent::from_key(&with(KeyCode::Char('x'), Modifiers::ALT)),
            None
        );
        assert_eq!(
            GridEvent::from_key(&with(KeyCode::Char('a'), Modifiers::CTRL)),
            None
        );
    }

    #[test]
    fn paste_types_each_char() {
        assert_eq!(
            GridEvent::from_terminal(&Event::Paste("1\n2".into())),
            vec![GridEvent::Input('1'), GridEvent::Input('2')]
        );
    }

    #[test]
    fn terminal_key_event() {
        assert_eq!(
            GridEvent::from_terminal(&Event::Key(key(KeyCode::Left))),
            vec![GridEvent::MoveLeft]
        );
        assert!(GridEvent::from_terminal(&Event::Key(key(KeyCode::Home))).is_empty());
    }
}
