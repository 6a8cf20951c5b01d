//! The input orchestrator
//!
//! # Frame cycle
//!
//! ```text
//! ingest(RawEvent)*  →  update()
//!                         ├─ drain events queued by InputSender handles
//!                         ├─ poll the modifier mask once
//!                         ├─ Profile → Map → Action → Binding cascade
//!                         └─ advance the polling state
//! ```
//!
//! `Input` is an ordinary value. Construct one, keep it alongside the event
//! loop, and pass it around by reference.

use std::sync::mpsc::{self, Receiver, Sender};

use uuid::Uuid;

use crate::action_profile::ActionProfile;
use crate::config::InputConfig;
use crate::error::{InputError, Scope};
use crate::polling::PollingState;
use crate::registry::Registry;
use crate::types::{KeyCode, ModifierKey};

/// A decoded platform event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Modifier mask as last reported by the platform
    Modifiers(ModifierKey),
    /// The window lost keyboard focus; key-up events may never arrive
    FocusLost,
}

/// Cloneable handle for feeding events from another thread
///
/// Events are buffered and applied on the input's own thread, in arrival
/// order, at the start of the next [`Input::update`] (or on an explicit
/// [`Input::drain_pending`]).
///
/// Queued events land after every [`Input::ingest`] call made since the
/// previous drain, regardless of when they were sent. Hosts that mix both
/// paths within a frame should not rely on their relative order.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<RawEvent>,
}

impl InputSender {
    /// Queue an event; returns false if the `Input` has been dropped
    pub fn send(&self, event: RawEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(?event, "input dropped, discarding event");
                false
            }
        }
    }
}

/// Owns the polling state and every action profile
#[derive(Debug)]
pub struct Input {
    config: InputConfig,
    polling: PollingState,
    /// Snapshot of the frame the last `update` evaluated
    evaluated: PollingState,
    reported_modifiers: ModifierKey,
    profiles: Registry<ActionProfile>,
    frame: u64,
    tx: Sender<RawEvent>,
    rx: Receiver<RawEvent>,
}

impl Input {
    /// An out-of-range `default_deadzone` is logged and replaced with the default
    pub fn new(config: InputConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            config: config.sanitized(),
            polling: PollingState::new(),
            evaluated: PollingState::new(),
            reported_modifiers: ModifierKey::NONE,
            profiles: Registry::new(),
            frame: 0,
            tx,
            rx,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Number of completed `update` calls
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The live polling state, including events ingested since the last update
    pub fn polling_state(&self) -> &PollingState {
        &self.polling
    }

    /// Handle for queueing events from other threads
    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Apply one raw event to the current frame
    pub fn ingest(&mut self, event: RawEvent) {
        match event {
            RawEvent::KeyDown(key) => self.polling.register_active(key.normalized()),
            RawEvent::KeyUp(key) => self.polling.register_inactive(key.normalized()),
            RawEvent::Modifiers(mask) => self.reported_modifiers = mask,
            RawEvent::FocusLost => {
                if self.config.release_on_focus_loss {
                    self.polling.clear();
                    // Caps lock is a toggle, not a held key
                    self.reported_modifiers = self.reported_modifiers & ModifierKey::CAPS_LOCK;
                }
            }
        }
    }

    /// Ingest every event queued through [`InputSender`]s
    ///
    /// Returns the number of events applied.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.ingest(event);
            applied += 1;
        }
        applied
    }

    /// Evaluate one frame: poll modifiers, run the cascade, advance
    ///
    /// Call exactly once per frame, after all of the frame's `ingest` calls.
    pub fn update(&mut self) {
        let queued = self.drain_pending();
        if queued > 0 {
            tracing::trace!(queued, "applied queued events");
        }

        let modifiers = self.poll_modifiers();
        self.polling.set_modifiers(modifiers);

        for profile in self.profiles.values_mut() {
            if !profile.is_enabled() {
                continue;
            }
            profile.process(&self.polling);
        }

        self.evaluated.clone_from(&self.polling);
        self.polling.advance_frame();
        self.frame += 1;
        tracing::trace!(frame = self.frame, %modifiers, "frame evaluated");
    }

    /// Platform-reported mask plus any modifier keys currently held
    fn poll_modifiers(&self) -> ModifierKey {
        self.polling
            .current()
            .down_keys()
            .fold(self.reported_modifiers, |mask, key| {
                mask | ModifierKey::for_key(key)
            })
    }

    /// Create a profile and hand it to `configure` before it is registered
    pub fn create_profile<F>(&mut self, name: &str, configure: F) -> Result<Uuid, InputError>
    where
        F: FnOnce(&mut ActionProfile) -> Result<(), InputError>,
    {
        if self.profiles.contains_name(name) {
            return Err(InputError::duplicate(Scope::Profile, name));
        }

        let mut profile = ActionProfile::new(name, self.config.defaults());
        configure(&mut profile)?;

        let id = self
            .profiles
            .insert(name, profile)
            .ok_or_else(|| InputError::duplicate(Scope::Profile, name))?;
        tracing::debug!(profile = name, "registered profile");
        Ok(id)
    }

    pub fn profile(&self, name: &str) -> Option<&ActionProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut(&mut self, name: &str) -> Option<&mut ActionProfile> {
        self.profiles.get_mut(name)
    }

    pub fn profile_by_id(&self, id: &Uuid) -> Option<&ActionProfile> {
        self.profiles.get_by_id(id)
    }

    pub fn profile_by_id_mut(&mut self, id: &Uuid) -> Option<&mut ActionProfile> {
        self.profiles.get_by_id_mut(id)
    }

    pub fn profile_id(&self, name: &str) -> Option<Uuid> {
        self.profiles.id_of(name)
    }

    /// Profiles in registration order
    pub fn profiles(&self) -> impl Iterator<Item = &ActionProfile> {
        self.profiles.values()
    }

    pub fn profiles_mut(&mut self) -> impl Iterator<Item = &mut ActionProfile> {
        self.profiles.values_mut()
    }

    /// Key went down on the frame the last `update` evaluated
    pub fn is_edge_start(&self, key: KeyCode) -> bool {
        self.evaluated.is_edge_start(key)
    }

    /// Key was held on the frame the last `update` evaluated
    pub fn is_active(&self, key: KeyCode) -> bool {
        self.evaluated.is_active(key)
    }

    /// Key went up on the frame the last `update` evaluated
    pub fn is_edge_end(&self, key: KeyCode) -> bool {
        self.evaluated.is_edge_end(key)
    }

    /// Modifier mask the last `update` evaluated with
    pub fn modifiers(&self) -> ModifierKey {
        self.evaluated.current().modifiers()
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
