//! Key presses, shortcut tables and the positional key dispatcher.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Legacy DOM key code for Enter/Return.
pub const ENTER_KEY_CODE: u32 = 13;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Alt, Ctrl or Shift held. Any of them disables shortcut dispatch.
    /// Meta is not considered.
    pub fn suppresses_shortcuts(&self) -> bool {
        self.alt || self.ctrl || self.shift
    }
}

/// A pressed key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter/Return: activates the focused button.
    Enter,
    /// A key producing a symbol, e.g. `"1"`, `"-"`, `"Q"`.
    Character(String),
    /// A raw code with no symbol mapping.
    Other(u32),
}

impl Key {
    pub fn character(symbol: impl Into<String>) -> Self {
        Self::Character(symbol.into())
    }

    /// Map a legacy DOM `keyCode`.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            ENTER_KEY_CODE => Self::Enter,
            48..=57 | 65..=90 => char::from_u32(code)
                .map(|c| Self::Character(c.to_string()))
                .unwrap_or(Self::Other(code)),
            173 | 189 => Self::character("-"),
            61 | 187 => Self::character("="),
            _ => Self::Other(code),
        }
    }

    /// Parse a key name such as `"enter"`, `"return"` or a single symbol.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("enter") || name.eq_ignore_ascii_case("return") {
            return Some(Self::Enter);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::Character(c.to_string())),
            _ => None,
        }
    }

    /// Check whether this key produces `symbol`, ignoring ASCII case.
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        match self {
            Self::Character(c) => c.eq_ignore_ascii_case(symbol),
            _ => false,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("Enter"),
            Self::Character(c) => f.write_str(c),
            Self::Other(code) => write!(f, "#{code}"),
        }
    }
}

/// A key together with the modifiers held while it was pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Parse `"2"`, `"enter"`, `"shift+2"`, `"ctrl+alt+q"`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut modifiers = Modifiers::NONE;
        let mut parts: Vec<&str> = text.split('+').collect();
        // A trailing "+" means the plus key itself, e.g. "shift++".
        let key = if text.ends_with("++") || text == "+" {
            parts.truncate(parts.len().saturating_sub(2));
            Key::character("+")
        } else {
            Key::parse(parts.pop()?)?
        };
        for part in parts {
            match part.trim().to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                _ => return None,
            }
        }
        Some(Self::new(key, modifiers))
    }
}

/// Positional mapping from key symbol to button index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortcutTable {
    symbols: Vec<String>,
}

impl ShortcutTable {
    /// Digits `1`–`9` then `0`.
    pub const DIGITS: [&'static str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];
    /// Extra symbols sidebars append after the digits.
    pub const SIDEBAR_EXTRA: [&'static str; 2] = ["-", "="];

    pub fn new(symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// The digit table, ten entries.
    pub fn digits() -> Self {
        Self::new(Self::DIGITS)
    }

    /// The sidebar table: digits followed by `-` and `=`.
    pub fn sidebar() -> Self {
        Self::new(Self::DIGITS.into_iter().chain(Self::SIDEBAR_EXTRA))
    }

    /// Symbol for position `index`.
    pub fn symbol(&self, index: usize) -> Option<&str> {
        self.symbols.get(index).map(String::as_str)
    }

    /// Position the key maps to.
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.symbols.iter().position(|symbol| key.matches_symbol(symbol))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for ShortcutTable {
    fn default() -> Self {
        Self::digits()
    }
}

/// What a key press asks a container to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Activate the focused button.
    ActivateFocused,
    /// Activate the button at this position.
    ActivatePosition(usize),
}

/// Whether a key press was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Consumed; outer targets must not react.
    Yes,
    /// Not handled, try the next target.
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Stateless translation of key presses into [`KeyCommand`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDispatcher {
    table: ShortcutTable,
}

impl KeyDispatcher {
    pub fn new(table: ShortcutTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ShortcutTable {
        &self.table
    }

    /// Resolve a press against a container of `button_count` buttons.
    ///
    /// Any of Alt/Ctrl/Shift suppresses dispatch. Enter activates the
    /// focused button when there is one; otherwise the key is looked up in
    /// the shortcut table and only resolves when a button exists at that
    /// position.
    pub fn resolve(&self, press: &KeyPress, has_focused_button: bool, button_count: usize) -> Option<KeyCommand> {
        if press.modifiers.suppresses_shortcuts() {
            return None;
        }
        if press.key == Key::Enter && has_focused_button {
            return Some(KeyCommand::ActivateFocused);
        }
        self.table
            .position(&press.key)
            .filter(|&position| position < button_count)
            .map(KeyCommand::ActivatePosition)
    }
}
