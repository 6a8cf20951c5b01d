//! Action maps: named groups of actions with group-level gating

use uuid::Uuid;

use crate::action::{Action, Defaults, EvaluationPolicy};
use crate::error::{InputError, Scope};
use crate::polling::PollingState;
use crate::registry::Registry;

/// A named group of actions, e.g. "Player" or "Menu"
///
/// [`disable`](Self::disable) suspends evaluation of every action in the map
/// without touching their own enabled flags. Only
/// [`enable_all_actions`](Self::enable_all_actions) and
/// [`disable_all_actions`](Self::disable_all_actions) write through to the
/// actions.
#[derive(Debug)]
pub struct ActionMap {
    name: String,
    enabled: bool,
    defaults: Defaults,
    actions: Registry<Action>,
}

impl ActionMap {
    pub(crate) fn new(name: &str, defaults: Defaults) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            defaults,
            actions: Registry::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Policy handed to actions created from now on
    pub fn default_policy(&self) -> EvaluationPolicy {
        self.defaults.policy
    }

    pub fn set_default_policy(&mut self, policy: EvaluationPolicy) {
        self.defaults.policy = policy;
    }

    /// Create an action and hand it to `configure` before it is registered
    ///
    /// `configure` is not called when the name is already taken.
    pub fn add_action<F>(&mut self, name: &str, configure: F) -> Result<Uuid, InputError>
    where
        F: FnOnce(&mut Action) -> Result<(), InputError>,
    {
        if self.actions.contains_name(name) {
            return Err(InputError::duplicate(Scope::Action, name));
        }

        let mut action = Action::new(name, self.defaults);
        configure(&mut action)?;

        let id = self
            .actions
            .insert(name, action)
            .ok_or_else(|| InputError::duplicate(Scope::Action, name))?;
        tracing::debug!(map = %self.name, action = name, "registered action");
        Ok(id)
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn action_mut(&mut self, name: &str) -> Option<&mut Action> {
        self.actions.get_mut(name)
    }

    pub fn action_by_id(&self, id: &Uuid) -> Option<&Action> {
        self.actions.get_by_id(id)
    }

    pub fn action_by_id_mut(&mut self, id: &Uuid) -> Option<&mut Action> {
        self.actions.get_by_id_mut(id)
    }

    pub fn action_id(&self, name: &str) -> Option<Uuid> {
        self.actions.id_of(name)
    }

    /// Actions in registration order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    pub fn actions_mut(&mut self) -> impl Iterator<Item = &mut Action> {
        self.actions.values_mut()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Set every action's own enabled flag
    pub fn enable_all_actions(&mut self) {
        for action in self.actions.values_mut() {
            action.enable();
        }
    }

    /// Clear every action's own enabled flag
    pub fn disable_all_actions(&mut self) {
        for action in self.actions.values_mut() {
            action.disable();
        }
    }

    /// Run every enabled action, in registration order
    pub fn process(&mut self, state: &PollingState) {
        if !self.enabled {
            return;
        }

        for action in self.actions.values_mut() {
            if !action.is_enabled() {
                continue;
            }
            action.process(state);
        }
    }
}
