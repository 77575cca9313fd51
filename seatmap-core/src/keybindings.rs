//! Keybindings: commands mapped to key strings like "enter" or "shift+tab"

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Commands the seat map responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Toggle selection of the keyboard-focused seat
    #[serde(rename = "activate")]
    Activate,
    /// Move keyboard focus to the next activatable seat
    #[serde(rename = "next")]
    Next,
    /// Move keyboard focus to the previous activatable seat
    #[serde(rename = "prev")]
    Prev,
    #[serde(rename = "focus.clear")]
    FocusClear,
    /// Fetch the venue again after a failed load
    #[serde(rename = "retry")]
    Retry,
    #[serde(rename = "quit")]
    Quit,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Activate,
        Command::Next,
        Command::Prev,
        Command::FocusClear,
        Command::Retry,
        Command::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Activate => "activate",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::FocusClear => "focus.clear",
            Command::Retry => "retry",
            Command::Quit => "quit",
        }
    }
}

/// Command -> key strings. Deserializes from a JSON object such as
/// `{ "activate": ["enter", "space"], "quit": ["q"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keybindings {
    bindings: HashMap<Command, Vec<String>>,
}

impl Default for Keybindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.set(Command::Activate, ["enter", "space"]);
        bindings.set(Command::Next, ["tab", "right", "l"]);
        bindings.set(Command::Prev, ["shift+tab", "left", "h"]);
        bindings.set(Command::FocusClear, ["backspace"]);
        bindings.set(Command::Retry, ["r"]);
        bindings.set(Command::Quit, ["q", "esc", "ctrl+c"]);
        bindings
    }
}

impl Keybindings {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn set<I, K>(&mut self, command: Command, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.bindings
            .insert(command, keys.into_iter().map(Into::into).collect());
    }

    pub fn keys(&self, command: Command) -> &[String] {
        self.bindings.get(&command).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First key bound to a command, formatted for a help bar
    pub fn display_key(&self, command: Command) -> Option<String> {
        self.keys(command)
            .first()
            .map(|key| format_key_for_display(key))
    }

    /// Command bound to a key event, if any
    pub fn command_for(&self, key: &KeyEvent) -> Option<Command> {
        Command::ALL.into_iter().find(|command| {
            self.keys(*command)
                .iter()
                .filter_map(|s| parse_key_string(s))
                .any(|bound| keys_match(&bound, key))
        })
    }

    /// Every key string must parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        for keys in self.bindings.values() {
            if let Some(bad) = keys.iter().find(|k| parse_key_string(k).is_none()) {
                return Err(ConfigError::UnknownKey(bad.clone()));
            }
        }
        Ok(())
    }

    /// User bindings replace the defaults command by command
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        defaults.bindings.extend(user.bindings);
        defaults
    }
}

/// Compare code and modifiers; characters compare case-insensitively
fn keys_match(bound: &KeyEvent, key: &KeyEvent) -> bool {
    let codes_match = match (bound.code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
        (a, b) => a == b,
    };
    // terminals report shift on upper-case letters
    let modifiers = key.modifiers - KeyModifiers::SHIFT;
    let bound_modifiers = bound.modifiers - KeyModifiers::SHIFT;
    codes_match
        && (modifiers == bound_modifiers || matches!(bound.code, KeyCode::BackTab))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Parse a key string like "q", "esc", "ctrl+c", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    let (mods, key_part) = match key_str.rsplit_once('+') {
        // "+" on its own is a key
        Some((mods, "")) => (Some(mods.trim_end_matches('+')), "+"),
        Some((mods, key)) => (Some(mods), key),
        None => (None, key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in mods.into_iter().flat_map(|m| m.split('+')) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            "" => {}
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        f if f.starts_with('f') && f.len() > 1 => KeyCode::F(f[1..].parse().ok()?),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

/// Format a key string for display ("ctrl+c" -> "^C", "space" -> "Space")
pub fn format_key_for_display(key_str: &str) -> String {
    let key_str = key_str.trim().to_lowercase();
    if key_str == "shift+tab" || key_str == "backtab" {
        return "Shift+Tab".to_string();
    }

    let (prefix, key_part) = match key_str.split_once('+') {
        Some(("ctrl" | "control", key)) => ("^", key),
        Some(("alt", key)) => ("Alt+", key),
        Some(("shift", key)) => ("Shift+", key),
        _ => ("", key_str.as_str()),
    };

    let key_display = match key_part {
        "esc" | "escape" => "Esc".to_string(),
        "enter" | "return" => "Enter".to_string(),
        "tab" => "Tab".to_string(),
        "backspace" => "Bksp".to_string(),
        "space" => "Space".to_string(),
        "left" => "←".to_string(),
        "right" => "→".to_string(),
        "up" => "↑".to_string(),
        "down" => "↓".to_string(),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_uppercase().collect(),
                _ => other.to_uppercase(),
            }
        }
    };

    format!("{prefix}{key_display}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let result = parse_key_string("q").unwrap();
        assert_eq!(result.code, KeyCode::Char('q'));
        assert_eq!(result.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn test_parse_space_and_enter() {
        assert_eq!(parse_key_string("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("Enter").unwrap().code, KeyCode::Enter);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let result = parse_key_string("ctrl+c").unwrap();
        assert_eq!(result.code, KeyCode::Char('c'));
        assert!(result.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_parse_shift_tab() {
        let result = parse_key_string("shift+tab").unwrap();
        assert_eq!(result.code, KeyCode::BackTab);
        assert!(result.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn test_parse_function_key() {
        assert_eq!(parse_key_string("f5").unwrap().code, KeyCode::F(5));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_key_string("").is_none());
        assert!(parse_key_string("hyper+x").is_none());
        assert!(parse_key_string("nonsense").is_none());
    }

    #[test]
    fn test_default_commands() {
        let bindings = Keybindings::default();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);

        assert_eq!(bindings.command_for(&enter), Some(Command::Activate));
        assert_eq!(bindings.command_for(&space), Some(Command::Activate));
        assert_eq!(bindings.command_for(&tab), Some(Command::Next));
        assert_eq!(bindings.command_for(&back_tab), Some(Command::Prev));
        assert_eq!(bindings.command_for(&ctrl_c), Some(Command::Quit));
        assert_eq!(bindings.command_for(&plain_c), None);
    }

    #[test]
    fn test_merge_overrides_per_command() {
        let mut user = Keybindings::empty();
        user.set(Command::Quit, ["x"]);

        let merged = Keybindings::merge(Keybindings::default(), user);
        assert_eq!(merged.keys(Command::Quit), ["x".to_string()]);
        assert_eq!(merged.keys(Command::Activate).len(), 2);
    }

    #[test]
    fn test_deserialize_from_json() {
        let bindings: Keybindings =
            serde_json::from_str(r#"{ "activate": ["a"], "focus.clear": ["c"] }"#).unwrap();
        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(bindings.command_for(&a), Some(Command::Activate));
        assert_eq!(bindings.keys(Command::FocusClear), ["c".to_string()]);
    }

    #[test]
    fn test_validate_rejects_unknown_key() {
        let mut bindings = Keybindings::empty();
        bindings.set(Command::Next, ["tab", "warp"]);
        assert!(matches!(
            bindings.validate(),
            Err(ConfigError::UnknownKey(k)) if k == "warp"
        ));
        assert!(Keybindings::default().validate().is_ok());
    }

    #[test]
    fn test_format_key_for_display() {
        assert_eq!(format_key_for_display("q"), "Q");
        assert_eq!(format_key_for_display("ctrl+c"), "^C");
        assert_eq!(format_key_for_display("esc"), "Esc");
        assert_eq!(format_key_for_display("shift+tab"), "Shift+Tab");
        assert_eq!(format_key_for_display("space"), "Space");
    }
}
