//! Core identifier types: KeyCode and the ModifierKey bitmask

use std::fmt;
use std::str::FromStr;

/// Modifier keys as a bitfield, with separate bits for the left and right keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModifierKey(u32);

impl ModifierKey {
    pub const NONE: ModifierKey = ModifierKey(0);
    pub const LEFT_SHIFT: ModifierKey = ModifierKey(1 << 0);
    pub const RIGHT_SHIFT: ModifierKey = ModifierKey(1 << 1);
    /// Either shift key
    pub const SHIFT: ModifierKey = ModifierKey(Self::LEFT_SHIFT.0 | Self::RIGHT_SHIFT.0);
    pub const LEFT_CTRL: ModifierKey = ModifierKey(1 << 2);
    pub const RIGHT_CTRL: ModifierKey = ModifierKey(1 << 3);
    /// Either control key
    pub const CTRL: ModifierKey = ModifierKey(Self::LEFT_CTRL.0 | Self::RIGHT_CTRL.0);
    pub const LEFT_ALT: ModifierKey = ModifierKey(1 << 4);
    pub const RIGHT_ALT: ModifierKey = ModifierKey(1 << 5);
    /// Either alt key
    pub const ALT: ModifierKey = ModifierKey(Self::LEFT_ALT.0 | Self::RIGHT_ALT.0);
    /// Caps lock toggled on (not held)
    pub const CAPS_LOCK: ModifierKey = ModifierKey(1 << 6);

    const ALL_BITS: u32 = 0b111_1111;

    /// Build a mask from raw bits, dropping unknown bits
    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        ModifierKey(bits & Self::ALL_BITS)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if no modifiers are active
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: ModifierKey) -> ModifierKey {
        ModifierKey(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: ModifierKey) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if this shares at least one modifier with other
    ///
    /// `mods.intersects(ModifierKey::SHIFT)` is the "either shift" test.
    #[inline]
    pub const fn intersects(self, other: ModifierKey) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub fn insert(&mut self, other: ModifierKey) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: ModifierKey) {
        self.0 &= !other.0;
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.intersects(Self::SHIFT)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.intersects(Self::CTRL)
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.intersects(Self::ALT)
    }

    #[inline]
    pub const fn caps_lock(self) -> bool {
        self.contains(Self::CAPS_LOCK)
    }

    /// The modifier bit a held key contributes, if it is a modifier key
    pub const fn for_key(key: KeyCode) -> ModifierKey {
        match key {
            KeyCode::LeftShift => Self::LEFT_SHIFT,
            KeyCode::RightShift => Self::RIGHT_SHIFT,
            KeyCode::LeftCtrl => Self::LEFT_CTRL,
            KeyCode::RightCtrl => Self::RIGHT_CTRL,
            KeyCode::LeftAlt => Self::LEFT_ALT,
            KeyCode::RightAlt => Self::RIGHT_ALT,
            _ => Self::NONE,
        }
    }
}

impl std::ops::BitOr for ModifierKey {
    type Output = ModifierKey;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for ModifierKey {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl std::ops::BitAnd for ModifierKey {
    type Output = ModifierKey;

    fn bitand(self, rhs: Self) -> Self::Output {
        ModifierKey(self.0 & rhs.0)
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }

        let mut parts = Vec::new();
        for (flag, name) in [
            (Self::LEFT_SHIFT, "LShift"),
            (Self::RIGHT_SHIFT, "RShift"),
            (Self::LEFT_CTRL, "LCtrl"),
            (Self::RIGHT_CTRL, "RCtrl"),
            (Self::LEFT_ALT, "LAlt"),
            (Self::RIGHT_ALT, "RAlt"),
            (Self::CAPS_LOCK, "CapsLock"),
        ] {
            if self.contains(flag) {
                parts.push(name);
            }
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A physical key identifier
///
/// Keys are identified by position, not by the character they produce, so a
/// WASD binding keeps working on non-QWERTY layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A letter, digit-row or unshifted punctuation key
    ///
    /// Letters are lowercase. Bindings and [`Input::ingest`](crate::Input::ingest)
    /// fold uppercase letters, so prefer [`KeyCode::char`] when building one by hand.
    Char(char),

    // Named keys
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F24

    // Modifier keys, tracked as ordinary held keys as well
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    CapsLock,

    // Numpad (physical keys)
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadEnter,
    NumpadDecimal,
}

impl KeyCode {
    /// Create a character key, normalized to lowercase
    pub fn char(c: char) -> Self {
        KeyCode::Char(c.to_ascii_lowercase())
    }

    /// Fold `Char` letters to lowercase; other keys pass through
    pub const fn normalized(self) -> Self {
        match self {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }

    /// Check if this is one of the six shift/ctrl/alt keys
    pub fn is_modifier(self) -> bool {
        !ModifierKey::for_key(self).is_empty()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::LeftShift => write!(f, "LShift"),
            KeyCode::RightShift => write!(f, "RShift"),
            KeyCode::LeftCtrl => write!(f, "LCtrl"),
            KeyCode::RightCtrl => write!(f, "RCtrl"),
            KeyCode::LeftAlt => write!(f, "LAlt"),
            KeyCode::RightAlt => write!(f, "RAlt"),
            KeyCode::CapsLock => write!(f, "CapsLock"),
            KeyCode::Numpad0 => write!(f, "Num0"),
            KeyCode::Numpad1 => write!(f, "Num1"),
            KeyCode::Numpad2 => write!(f, "Num2"),
            KeyCode::Numpad3 => write!(f, "Num3"),
            KeyCode::Numpad4 => write!(f, "Num4"),
            KeyCode::Numpad5 => write!(f, "Num5"),
            KeyCode::Numpad6 => write!(f, "Num6"),
            KeyCode::Numpad7 => write!(f, "Num7"),
            KeyCode::Numpad8 => write!(f, "Num8"),
            KeyCode::Numpad9 => write!(f, "Num9"),
            KeyCode::NumpadAdd => write!(f, "Num+"),
            KeyCode::NumpadSubtract => write!(f, "Num-"),
            KeyCode::NumpadMultiply => write!(f, "Num*"),
            KeyCode::NumpadDivide => write!(f, "Num/"),
            KeyCode::NumpadEnter => write!(f, "NumEnter"),
            KeyCode::NumpadDecimal => write!(f, "Num."),
        }
    }
}

/// Characters on the US punctuation keys, unshifted
const PUNCTUATION_KEYS: &str = "-=[]\\;'`,./";

/// Error returned when a key name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(pub String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid key: {}", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for KeyCode {
    type Err = ParseKeyError;

    /// Parse a key name like "w", "space", "lshift" or "f5" (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();

        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphanumeric() || PUNCTUATION_KEYS.contains(c) {
                return Ok(KeyCode::Char(c));
            }
            return Err(ParseKeyError(s.to_string()));
        }

        if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            if (1..=24).contains(&n) {
                return Ok(KeyCode::F(n));
            }
            return Err(ParseKeyError(s.to_string()));
        }

        match key.as_str() {
            "space" => Ok(KeyCode::Space),
            "enter" | "return" => Ok(KeyCode::Enter),
            "escape" | "esc" => Ok(KeyCode::Escape),
            "tab" => Ok(KeyCode::Tab),
            "backspace" | "back" => Ok(KeyCode::Backspace),
            "delete" | "del" => Ok(KeyCode::Delete),

            "up" | "arrowup" => Ok(KeyCode::Up),
            "down" | "arrowdown" => Ok(KeyCode::Down),
            "left" | "arrowleft" => Ok(KeyCode::Left),
            "right" | "arrowright" => Ok(KeyCode::Right),

            "home" => Ok(KeyCode::Home),
            "end" => Ok(KeyCode::End),
            "pageup" | "pgup" => Ok(KeyCode::PageUp),
            "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),
            "insert" | "ins" => Ok(KeyCode::Insert),

            "lshift" | "leftshift" => Ok(KeyCode::LeftShift),
            "rshift" | "rightshift" => Ok(KeyCode::RightShift),
            "lctrl" | "leftctrl" => Ok(KeyCode::LeftCtrl),
            "rctrl" | "rightctrl" => Ok(KeyCode::RightCtrl),
            "lalt" | "leftalt" => Ok(KeyCode::LeftAlt),
            "ralt" | "rightalt" => Ok(KeyCode::RightAlt),
            "capslock" | "caps" => Ok(KeyCode::CapsLock),

            "num0" | "numpad0" => Ok(KeyCode::Numpad0),
            "num1" | "numpad1" => Ok(KeyCode::Numpad1),
            "num2" | "numpad2" => Ok(KeyCode::Numpad2),
            "num3" | "numpad3" => Ok(KeyCode::Numpad3),
            "num4" | "numpad4" => Ok(KeyCode::Numpad4),
            "num5" | "numpad5" => Ok(KeyCode::Numpad5),
            "num6" | "numpad6" => Ok(KeyCode::Numpad6),
            "num7" | "numpad7" => Ok(KeyCode::Numpad7),
            "num8" | "numpad8" => Ok(KeyCode::Numpad8),
            "num9" | "numpad9" => Ok(KeyCode::Numpad9),
            "num+" | "numpadadd" => Ok(KeyCode::NumpadAdd),
            "num-" | "numpadsubtract" => Ok(KeyCode::NumpadSubtract),
            "num*" | "numpadmultiply" => Ok(KeyCode::NumpadMultiply),
            "num/" | "numpaddivide" => Ok(KeyCode::NumpadDivide),
            "numenter" | "numpadenter" => Ok(KeyCode::NumpadEnter),
            "num." | "numpaddecimal" => Ok(KeyCode::NumpadDecimal),

            _ => Err(ParseKeyError(s.to_string())),
        }
    }
}
