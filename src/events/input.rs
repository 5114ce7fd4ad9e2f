//! Input event types and key bindings.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{Error, Result};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Unknown,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Unknown,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "Space"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Esc"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Del"),
            Key::Tab => write!(f, "Tab"),
            Key::BackTab => write!(f, "Shift+Tab"),
            Key::Up => write!(f, "↑"),
            Key::Down => write!(f, "↓"),
            Key::Left => write!(f, "←"),
            Key::Right => write!(f, "→"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PgUp"),
            Key::PageDown => write!(f, "PgDn"),
            Key::F(n) => write!(f, "F{n}"),
            Key::Unknown => write!(f, "?"),
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    /// Create a new input event.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// The typed character, if this is plain text input.
    pub fn text(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
            _ => None,
        }
    }

    /// Check if this event triggers `binding`.
    ///
    /// Shift is not compared for characters (it is already in the character)
    /// nor for back-tab, which terminals report with and without it.
    pub fn matches(&self, binding: &KeyBinding) -> bool {
        if self.key != binding.key
            || self.modifiers.ctrl != binding.modifiers.ctrl
            || self.modifiers.alt != binding.modifiers.alt
        {
            return false;
        }
        match self.key {
            Key::Char(_) | Key::BackTab => true,
            _ => self.modifiers.shift == binding.modifiers.shift,
        }
    }
}

/// A key binding parsed from its configured form ("Ctrl+c", "Esc", "?").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    pub fn parse(binding: &str) -> Result<Self> {
        let binding = binding.trim();
        if binding.is_empty() {
            return Err(Error::config("empty key binding"));
        }
        // A lone "+" is the plus key, not a separator.
        let (mods, key) = match binding.rsplit_once('+') {
            Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
            Some((mods, key)) => (mods, key),
            None => ("", binding),
        };

        let mut modifiers = Modifiers::default();
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                other => return Err(Error::config(format!("unknown modifier '{other}'"))),
            }
        }

        let key = parse_key(key)?;
        if key == Key::BackTab {
            modifiers.shift = true;
        }
        Ok(Self { key, modifiers })
    }
}

fn parse_key(name: &str) -> Result<Key> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(c));
    }

    let key = match name.to_lowercase().as_str() {
        "enter" | "return" => Key::Enter,
        "esc" | "escape" => Key::Escape,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "tab" => Key::Tab,
        "backtab" => Key::BackTab,
        "space" => Key::Char(' '),
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        s if s.starts_with('f') => s[1..]
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=12).contains(n))
            .map(Key::F)
            .ok_or_else(|| Error::config(format!("unknown key '{name}'")))?,
        _ => return Err(Error::config(format!("unknown key '{name}'"))),
    };
    Ok(key)
}

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        if self.modifiers.shift && self.key != Key::BackTab {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
        InputEvent::from(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_parse_bindings() {
        let ctrl_c = KeyBinding::parse("Ctrl+c").unwrap();
        assert_eq!(ctrl_c.key, Key::Char('c'));
        assert!(ctrl_c.modifiers.ctrl);

        assert_eq!(KeyBinding::parse("Esc").unwrap().key, Key::Escape);
        assert_eq!(KeyBinding::parse("?").unwrap().key, Key::Char('?'));
        assert_eq!(KeyBinding::parse("+").unwrap().key, Key::Char('+'));
        assert_eq!(KeyBinding::parse("F5").unwrap().key, Key::F(5));

        assert!(KeyBinding::parse("").is_err());
        assert!(KeyBinding::parse("Hyper+q").is_err());
        assert!(KeyBinding::parse("F99").is_err());
        assert!(KeyBinding::parse("nonsense").is_err());
    }

    #[test]
    fn test_matches_compares_modifiers() {
        let quit = KeyBinding::parse("q").unwrap();
        let force_quit = KeyBinding::parse("Ctrl+c").unwrap();

        assert!(press(KeyCode::Char('q'), KeyModifiers::NONE).matches(&quit));
        assert!(!press(KeyCode::Char('q'), KeyModifiers::CONTROL).matches(&quit));
        assert!(press(KeyCode::Char('c'), KeyModifiers::CONTROL).matches(&force_quit));
        assert!(!press(KeyCode::Char('c'), KeyModifiers::NONE).matches(&force_quit));
    }

    #[test]
    fn test_shifted_characters_match() {
        let help = KeyBinding::parse("?").unwrap();
        assert!(press(KeyCode::Char('?'), KeyModifiers::SHIFT).matches(&help));

        let back_tab = KeyBinding::parse("BackTab").unwrap();
        assert!(press(KeyCode::BackTab, KeyModifiers::SHIFT).matches(&back_tab));
        assert!(press(KeyCode::BackTab, KeyModifiers::NONE).matches(&back_tab));
    }

    #[test]
    fn test_text_ignores_chords() {
        assert_eq!(press(KeyCode::Char('a'), KeyModifiers::NONE).text(), Some('a'));
        assert_eq!(press(KeyCode::Char('A'), KeyModifiers::SHIFT).text(), Some('A'));
        assert_eq!(press(KeyCode::Char('a'), KeyModifiers::CONTROL).text(), None);
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE).text(), None);
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["Ctrl+c", "Esc", "Shift+Tab", "F5", "?"] {
            let binding = KeyBinding::parse(text).unwrap();
            assert_eq!(KeyBinding::parse(&binding.to_string()).unwrap(), binding);
        }
    }
}
