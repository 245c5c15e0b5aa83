//! Keybinding configuration for the reading session.
//!
//! Lookups are per-mode: `q` quits from the feed list but closes the article
//! view, so the article lookup resolves `back` before `quit`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub refresh: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub page_up: Vec<String>,
    pub page_down: Vec<String>,
    pub goto_top: Vec<String>,
    pub goto_bottom: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: vec!["q".to_string(), "Ctrl+c".to_string()],
            refresh: vec!["r".to_string()],
            select: vec!["Enter".to_string()],
            back: vec!["Esc".to_string(), "q".to_string()],
            move_up: vec!["k".to_string(), "Up".to_string()],
            move_down: vec!["j".to_string(), "Down".to_string()],
            page_up: vec!["PageUp".to_string()],
            page_down: vec!["PageDown".to_string()],
            goto_top: vec!["g".to_string()],
            goto_bottom: vec!["G".to_string()],
        }
    }
}

impl KeybindingConfig {
    /// Action lookup while the feed list is showing.
    pub fn list_action(&self, key: &KeyEvent) -> Action {
        if self.matches(key, &self.quit) {
            Action::Quit
        } else if self.matches(key, &self.refresh) {
            Action::Refresh
        } else if self.matches(key, &self.select) {
            Action::Select
        } else if self.matches(key, &self.move_up) {
            Action::MoveUp
        } else if self.matches(key, &self.move_down) {
            Action::MoveDown
        } else if self.matches(key, &self.page_up) {
            Action::PageUp
        } else if self.matches(key, &self.page_down) {
            Action::PageDown
        } else {
            Action::None
        }
    }

    /// Action lookup while an article is open. `back` wins over `quit` so a
    /// key bound to both closes the article instead of the session.
    pub fn article_action(&self, key: &KeyEvent) -> Action {
        if self.matches(key, &self.back) {
            Action::Back
        } else if self.matches(key, &self.quit) {
            Action::Quit
        } else if self.matches(key, &self.select) {
            Action::Select
        } else if self.matches(key, &self.goto_top) {
            Action::GotoTop
        } else if self.matches(key, &self.goto_bottom) {
            Action::GotoBottom
        } else if self.matches(key, &self.move_up) {
            Action::MoveUp
        } else if self.matches(key, &self.move_down) {
            Action::MoveDown
        } else if self.matches(key, &self.page_up) {
            Action::PageUp
        } else if self.matches(key, &self.page_down) {
            Action::PageDown
        } else {
            Action::None
        }
    }

    fn matches(&self, key: &KeyEvent, bindings: &[String]) -> bool {
        bindings.iter().any(|binding| {
            parse_key_string(binding)
                .map(|parsed| parsed.matches(key))
                .unwrap_or(false)
        })
    }
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event. A stray SHIFT on the event
    /// is tolerated so "G" matches whether or not the terminal reports the
    /// modifier.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "/"
/// - Special keys: "Enter", "Tab", "BackTab", "Backspace", "Delete", "Home",
///   "End", "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc",
///   "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = if parts.len() > 1 {
        for part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
        parts[parts.len() - 1]
    } else {
        s
    };

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    if s.len() == 1 {
        let c = s.chars().next().unwrap();
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_single_char() {
        let binding = parse_key_string("j").unwrap();
        assert_eq!(binding.code, KeyCode::Char('j'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_key_string("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key_string("Esc").unwrap().code, KeyCode::Esc);
        assert_eq!(parse_key_string("PageDown").unwrap().code, KeyCode::PageDown);
        assert_eq!(parse_key_string("Space").unwrap().code, KeyCode::Char(' '));
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(parse_key_string("F1").unwrap().code, KeyCode::F(1));
        assert_eq!(parse_key_string("f12").unwrap().code, KeyCode::F(12));
        assert!(parse_key_string("F13").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+c").unwrap();
        assert_eq!(binding.code, KeyCode::Char('c'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL);

        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(
            binding.modifiers,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );
    }

    #[test]
    fn test_binding_matches_tolerates_shift_on_event() {
        let binding = parse_key_string("G").unwrap();
        let shifted = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert!(binding.matches(&shifted));
        assert!(binding.matches(&key(KeyCode::Char('G'))));
    }

    #[test]
    fn test_q_quits_list_but_backs_out_of_article() {
        let config = KeybindingConfig::default();
        let q = key(KeyCode::Char('q'));

        assert_eq!(config.list_action(&q), Action::Quit);
        assert_eq!(config.article_action(&q), Action::Back);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(config.list_action(&ctrl_c), Action::Quit);
        assert_eq!(config.article_action(&ctrl_c), Action::Quit);
    }

    #[test]
    fn test_default_list_actions() {
        let config = KeybindingConfig::default();
        assert_eq!(config.list_action(&key(KeyCode::Char('r'))), Action::Refresh);
        assert_eq!(config.list_action(&key(KeyCode::Enter)), Action::Select);
        assert_eq!(config.list_action(&key(KeyCode::Char('j'))), Action::MoveDown);
        assert_eq!(config.list_action(&key(KeyCode::Char('g'))), Action::None);
    }

    #[test]
    fn test_default_article_actions() {
        let config = KeybindingConfig::default();
        assert_eq!(config.article_action(&key(KeyCode::Char('g'))), Action::GotoTop);
        assert_eq!(
            config.article_action(&key(KeyCode::Char('G'))),
            Action::GotoBottom
        );
        assert_eq!(config.article_action(&key(KeyCode::Esc)), Action::Back);
        assert_eq!(config.article_action(&key(KeyCode::Enter)), Action::Select);
    }
}
