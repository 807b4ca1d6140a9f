use crossterm::event::{self, Event, KeyCode, KeyEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Esc,
    Unknown,
}

impl From<KeyCode> for NavKey {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Up | KeyCode::Char('k') => NavKey::Up,
            KeyCode::Down | KeyCode::Char('j') => NavKey::Down,
            KeyCode::Enter => NavKey::Enter,
            KeyCode::Esc | KeyCode::Char('q') => NavKey::Esc,
            _ => NavKey::Unknown,
        }
    }
}

/// Blocks until a key press. Read failures count as `Esc`.
pub fn read_nav_key() -> NavKey {
    loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                return NavKey::from(key.code)
            }
            Ok(_) => continue,
            Err(_) => return NavKey::Esc,
        }
    }
}

/// Moves a cursor through `len` rows, wrapping at both ends.
pub fn step(index: usize, len: usize, key: NavKey) -> usize {
    if len == 0 {
        return 0;
    }
    match key {
        NavKey::Up => index.checked_sub(1).unwrap_or(len - 1),
        NavKey::Down => (index + 1) % len,
        _ => index,
    }
}
