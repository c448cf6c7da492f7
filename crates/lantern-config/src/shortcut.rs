//! Keyboard shortcut parsing.
//!
//! Shortcuts are written as `+`-separated modifier names followed by a single
//! key character: `"/"`, `"ctrl+k"`, `"cmd+alt+p"`. Shift is not a modifier;
//! it is implied by the character itself (`"?"`).

use std::{fmt, str::FromStr};

use crate::ConfigError;

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Alt / Option key.
    pub alt: bool,
    /// Meta / Command / Super key.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Returns true if any modifier is held.
    pub fn any(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// A global keyboard shortcut that opens the search surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Required modifiers.
    pub modifiers: Modifiers,
    /// Key character, lowercased.
    pub key: char,
}

impl Shortcut {
    /// Returns true if a key press with `key` and `modifiers` triggers this shortcut.
    pub fn matches(&self, key: char, modifiers: Modifiers) -> bool {
        self.modifiers == modifiers && key.to_lowercase().eq(self.key.to_lowercase())
    }
}

impl Default for Shortcut {
    fn default() -> Self {
        Self {
            modifiers: Modifiers::NONE,
            key: '/',
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.alt {
            write!(f, "alt+")?;
        }
        if self.modifiers.meta {
            write!(f, "meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for Shortcut {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidShortcut {
            shortcut: s.to_string(),
            reason: reason.to_string(),
        };

        // A lone "+" is a valid key, so split off the final key before the modifiers.
        let (prefix, key) = match s.strip_suffix('+') {
            Some(rest) if rest.is_empty() || rest.ends_with('+') => (rest, "+"),
            _ => match s.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", s),
            },
        };
        let prefix = prefix.strip_suffix('+').unwrap_or(prefix);

        let mut chars = key.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => c.to_lowercase().next().unwrap_or(c),
            (None, _) => return Err(invalid("missing key")),
            _ => return Err(invalid("key must be a single character")),
        };

        let mut modifiers = Modifiers::NONE;
        for name in prefix.split('+').filter(|part| !part.is_empty()) {
            match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                other => return Err(invalid(&format!("unknown modifier '{other}'"))),
            }
        }

        Ok(Self { modifiers, key })
    }
}
