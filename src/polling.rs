//! Double-buffered per-frame device state
//!
//! Raw events mutate [`PollingState::current`]. Once per frame the evaluation
//! cascade reads both snapshots, then [`PollingState::advance_frame`] copies
//! `current` into `previous`. `current` is never cleared on advance: a key
//! held across many frames must read as active in both buffers, otherwise it
//! would look like a fresh press every frame.

use std::collections::BTreeSet;

use crate::types::{KeyCode, ModifierKey};

/// Raw device state for one frame slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollingData {
    down_keys: BTreeSet<KeyCode>,
    modifiers: ModifierKey,
}

impl PollingData {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.down_keys.contains(&key)
    }

    #[inline]
    pub fn is_key_up(&self, key: KeyCode) -> bool {
        !self.is_key_down(key)
    }

    #[inline]
    pub fn modifiers(&self) -> ModifierKey {
        self.modifiers
    }

    /// Held keys in key order
    pub fn down_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.down_keys.iter().copied()
    }

    pub fn held_count(&self) -> usize {
        self.down_keys.len()
    }

    /// Returns true if the key was not already held
    pub(crate) fn press(&mut self, key: KeyCode) -> bool {
        self.down_keys.insert(key)
    }

    /// Returns true if the key was held
    pub(crate) fn release(&mut self, key: KeyCode) -> bool {
        self.down_keys.remove(&key)
    }

    pub(crate) fn release_all(&mut self) {
        self.down_keys.clear();
    }

    pub(crate) fn set_modifiers(&mut self, modifiers: ModifierKey) {
        self.modifiers = modifiers;
    }
}

/// Previous and current [`PollingData`] snapshots
#[derive(Debug, Clone, Default)]
pub struct PollingState {
    previous: PollingData,
    current: PollingData,
}

impl PollingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot from the end of the last frame
    pub fn previous(&self) -> &PollingData {
        &self.previous
    }

    /// Snapshot being built for this frame
    pub fn current(&self) -> &PollingData {
        &self.current
    }

    /// Mark a key held in `current`; holding an already-held key is a no-op
    pub fn register_active(&mut self, key: KeyCode) {
        if self.current.press(key) {
            tracing::trace!(%key, "key down");
        }
    }

    /// Mark a key released in `current`; releasing an unheld key is a no-op
    pub fn register_inactive(&mut self, key: KeyCode) {
        if self.current.release(key) {
            tracing::trace!(%key, "key up");
        }
    }

    /// Overwrite the modifier mask of `current`; set once per frame
    pub fn set_modifiers(&mut self, modifiers: ModifierKey) {
        self.current.set_modifiers(modifiers);
    }

    /// Release every key held in `current`
    pub fn clear(&mut self) {
        if self.current.held_count() > 0 {
            tracing::debug!(count = self.current.held_count(), "releasing held keys");
        }
        self.current.release_all();
    }

    /// `previous := current`, keeping `current` intact
    pub fn advance_frame(&mut self) {
        self.previous.clone_from(&self.current);
    }

    /// Key went down between the previous and current frame
    pub fn is_edge_start(&self, key: KeyCode) -> bool {
        !self.previous.is_key_down(key) && self.current.is_key_down(key)
    }

    /// Key is held on the current frame
    pub fn is_active(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key)
    }

    /// Key went up between the previous and current frame
    pub fn is_edge_end(&self, key: KeyCode) -> bool {
        self.previous.is_key_down(key) && !self.current.is_key_down(key)
    }
}
