//! Keyboard shortcut resolution.

use crate::config::KeybindingsConfig;

/// Session-boundary actions a shortcut can request.
///
/// Undo and redo are handled inside the session and never reach the host;
/// these are the actions the host must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SaveFile,
    CopyClipboard,
    Undo,
    Redo,
    Cancel,
}

/// A key as delivered by the host event loop.
///
/// Characters arrive already translated by the host's keymap (so Shift+1
/// is `Char('!')`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Return,
    Escape,
    Backspace,
}

/// Modifier state accompanying a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// One parsed binding, e.g. "Ctrl+S" or "Escape".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl KeyBinding {
    /// Parses a binding string. Tokens are separated by '+'; the last
    /// token is the key, everything before it a modifier. Matching is
    /// case-insensitive.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut modifiers = Modifiers::default();
        let tokens: Vec<&str> = spec.split('+').map(str::trim).collect();
        let (key_token, modifier_tokens) = tokens.split_last()?;

        for token in modifier_tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                other => {
                    log::warn!("Unknown modifier '{other}' in keybinding '{spec}'");
                    return None;
                }
            }
        }

        let key = match key_token.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "space" => Key::Char(' '),
            single => {
                let mut chars = single.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    log::warn!("Unknown key '{key_token}' in keybinding '{spec}'");
                    return None;
                }
                Key::Char(c.to_ascii_lowercase())
            }
        };

        Some(Self { modifiers, key })
    }

    fn key_matches(&self, key: Key) -> bool {
        match (self.key, key) {
            (Key::Char(a), Key::Char(b)) => a == b.to_ascii_lowercase(),
            (a, b) => a == b,
        }
    }

    /// Returns true if the event matches this binding exactly, including
    /// the Shift state. Character keys compare case-insensitively.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key_matches(key)
            && self.modifiers.ctrl == modifiers.ctrl
            && self.modifiers.alt == modifiers.alt
            && self.modifiers.shift == modifiers.shift
    }

    /// Lenient fallback: a binding that does not name Shift also accepts
    /// the shifted event, so Ctrl+S still fires when the host reports
    /// Shift for an uppercase character.
    fn matches_ignoring_shift(&self, key: Key, modifiers: Modifiers) -> bool {
        !self.modifiers.shift
            && self.key_matches(key)
            && self.modifiers.ctrl == modifiers.ctrl
            && self.modifiers.alt == modifiers.alt
    }
}

/// The session's resolved shortcut table.
#[derive(Debug, Clone)]
pub struct ShortcutMap {
    bindings: Vec<(KeyBinding, Action)>,
}

impl ShortcutMap {
    /// Builds the table from config strings. A binding that fails to
    /// parse falls back to its default with a warning.
    pub fn from_config(config: &KeybindingsConfig) -> Self {
        let defaults = KeybindingsConfig::default();
        let parse = |spec: &str, fallback: &str| -> KeyBinding {
            KeyBinding::parse(spec).unwrap_or_else(|| {
                log::warn!("Invalid keybinding '{spec}', using default '{fallback}'");
                KeyBinding::parse(fallback).unwrap_or(KeyBinding {
                    modifiers: Modifiers::NONE,
                    key: Key::Escape,
                })
            })
        };

        Self {
            bindings: vec![
                (parse(&config.save, &defaults.save), Action::SaveFile),
                (parse(&config.copy, &defaults.copy), Action::CopyClipboard),
                (parse(&config.undo, &defaults.undo), Action::Undo),
                (parse(&config.redo, &defaults.redo), Action::Redo),
                (parse(&config.cancel, &defaults.cancel), Action::Cancel),
            ],
        }
    }

    /// Resolves a key event to an action, if any binding matches.
    ///
    /// Exact matches win, so a Shift-carrying binding is never shadowed
    /// by its shift-less sibling; only when no binding matches exactly
    /// does the shift-lenient fallback apply.
    pub fn resolve(&self, key: Key, modifiers: Modifiers) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.matches(key, modifiers))
            .or_else(|| {
                self.bindings
                    .iter()
                    .find(|(binding, _)| binding.matches_ignoring_shift(key, modifiers))
            })
            .map(|(_, action)| *action)
    }
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modifier_combinations() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert!(binding.modifiers.ctrl);
        assert!(binding.modifiers.shift);
        assert_eq!(binding.key, Key::Char('z'));

        assert_eq!(
            KeyBinding::parse("Escape").unwrap().key,
            Key::Escape
        );
        assert!(KeyBinding::parse("Hyper+S").is_none());
        assert!(KeyBinding::parse("Ctrl+F13").is_none());
    }

    #[test]
    fn default_map_resolves_the_standard_shortcuts() {
        let map = ShortcutMap::default();
        assert_eq!(
            map.resolve(Key::Char('s'), Modifiers::CTRL),
            Some(Action::SaveFile)
        );
        assert_eq!(
            map.resolve(Key::Char('c'), Modifiers::CTRL),
            Some(Action::CopyClipboard)
        );
        assert_eq!(
            map.resolve(Key::Char('z'), Modifiers::CTRL),
            Some(Action::Undo)
        );
        assert_eq!(
            map.resolve(Key::Char('y'), Modifiers::CTRL),
            Some(Action::Redo)
        );
        assert_eq!(
            map.resolve(Key::Escape, Modifiers::NONE),
            Some(Action::Cancel)
        );
        assert_eq!(map.resolve(Key::Char('s'), Modifiers::NONE), None);
    }

    #[test]
    fn uppercase_characters_still_match() {
        let map = ShortcutMap::default();
        assert_eq!(
            map.resolve(
                Key::Char('S'),
                Modifiers {
                    ctrl: true,
                    shift: true,
                    alt: false
                }
            ),
            Some(Action::SaveFile)
        );
    }

    #[test]
    fn shift_binding_wins_over_its_shiftless_sibling() {
        let config = KeybindingsConfig {
            redo: "Ctrl+Shift+Z".to_string(),
            ..KeybindingsConfig::default()
        };
        let map = ShortcutMap::from_config(&config);
        let ctrl_shift = Modifiers {
            ctrl: true,
            shift: true,
            alt: false,
        };
        assert_eq!(map.resolve(Key::Char('z'), ctrl_shift), Some(Action::Redo));
        assert_eq!(
            map.resolve(Key::Char('z'), Modifiers::CTRL),
            Some(Action::Undo)
        );
        // The default Ctrl+Y is replaced, not kept alongside.
        assert_eq!(map.resolve(Key::Char('y'), Modifiers::CTRL), None);
        // A binding that names Shift never fires without it.
        let redo = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert!(!redo.matches(Key::Char('z'), Modifiers::CTRL));
    }

    #[test]
    fn invalid_config_binding_falls_back_to_default() {
        let config = KeybindingsConfig {
            undo: "Bogus+Nothing".to_string(),
            ..KeybindingsConfig::default()
        };
        let map = ShortcutMap::from_config(&config);
        assert_eq!(
            map.resolve(Key::Char('z'), Modifiers::CTRL),
            Some(Action::Undo)
        );
    }
}
