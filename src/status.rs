//! Tri-state input status flags

use std::fmt;

/// Started / Performed / Cancelled flags reported by a binding or action
///
/// Flags combine independently. The activating frame reports
/// `STARTED | PERFORMED`; an empty set is [`InputStatus::IDLE`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputStatus(u8);

impl InputStatus {
    /// No input activity
    pub const IDLE: InputStatus = InputStatus(0);
    /// Input became active this frame
    pub const STARTED: InputStatus = InputStatus(1 << 0);
    /// Input is active this frame
    pub const PERFORMED: InputStatus = InputStatus(1 << 1);
    /// Input became inactive this frame
    pub const CANCELLED: InputStatus = InputStatus(1 << 2);

    /// Status for an "active" predicate sampled on the previous and current frame
    ///
    /// | was   | is    | flags                 |
    /// |-------|-------|-----------------------|
    /// | false | false | idle                  |
    /// | false | true  | started + performed   |
    /// | true  | true  | performed             |
    /// | true  | false | cancelled             |
    pub const fn from_transition(was_active: bool, is_active: bool) -> Self {
        let mut bits = 0;
        if !was_active && is_active {
            bits |= Self::STARTED.0;
        }
        if is_active {
            bits |= Self::PERFORMED.0;
        }
        if was_active && !is_active {
            bits |= Self::CANCELLED.0;
        }
        InputStatus(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_idle(self) -> bool {
        self.0 == 0
    }

    /// Check if any flag in `flags` is set
    #[inline]
    pub const fn has_any(self, flags: InputStatus) -> bool {
        (self.0 & flags.0) != 0
    }

    /// Check if every flag in `flags` is set
    #[inline]
    pub const fn has_all(self, flags: InputStatus) -> bool {
        (self.0 & flags.0) == flags.0
    }

    #[inline]
    pub const fn started(self) -> bool {
        self.has_any(Self::STARTED)
    }

    #[inline]
    pub const fn performed(self) -> bool {
        self.has_any(Self::PERFORMED)
    }

    #[inline]
    pub const fn cancelled(self) -> bool {
        self.has_any(Self::CANCELLED)
    }

    /// Whether the underlying predicate held on the current frame
    #[inline]
    pub const fn is_active(self) -> bool {
        self.performed()
    }

    /// Whether the underlying predicate held on the previous frame
    ///
    /// Recovered from the transition table: a cancel means it was active,
    /// and a perform without a start means it already was.
    #[inline]
    pub const fn was_active(self) -> bool {
        self.cancelled() || (self.performed() && !self.started())
    }
}

impl std::ops::BitOr for InputStatus {
    type Output = InputStatus;

    fn bitor(self, rhs: Self) -> Self::Output {
        InputStatus(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for InputStatus {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for InputStatus {
    type Output = InputStatus;

    fn bitand(self, rhs: Self) -> Self::Output {
        InputStatus(self.0 & rhs.0)
    }
}

impl std::ops::BitAndAssign for InputStatus {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl fmt::Display for InputStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_idle() {
            return write!(f, "Idle");
        }
        let mut parts = Vec::new();
        if self.started() {
            parts.push("Started");
        }
        if self.performed() {
            parts.push("Performed");
        }
        if self.cancelled() {
            parts.push("Cancelled");
        }
        write!(f, "{}", parts.join("|"))
    }
}
