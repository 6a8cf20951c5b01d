//! Action profiles: named groups of action maps

use uuid::Uuid;

use crate::action::{Defaults, EvaluationPolicy};
use crate::action_map::ActionMap;
use crate::error::{InputError, Scope};
use crate::polling::PollingState;
use crate::registry::Registry;

/// A named set of action maps, e.g. "Keyboard" or "Accessibility"
///
/// Disabling a profile gates every map beneath it without changing the maps'
/// own enabled flags, exactly as [`ActionMap`] gates its actions.
#[derive(Debug)]
pub struct ActionProfile {
    name: String,
    enabled: bool,
    defaults: Defaults,
    maps: Registry<ActionMap>,
}

impl ActionProfile {
    pub(crate) fn new(name: &str, defaults: Defaults) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            defaults,
            maps: Registry::new(),
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

    pub fn default_policy(&self) -> EvaluationPolicy {
        self.defaults.policy
    }

    pub fn set_default_policy(&mut self, policy: EvaluationPolicy) {
        self.defaults.policy = policy;
    }

    /// Create a map and hand it to `configure` before it is registered
    ///
    /// `configure` is not called when the name is already taken.
    pub fn add_map<F>(&mut self, name: &str, configure: F) -> Result<Uuid, InputError>
    where
        F: FnOnce(&mut ActionMap) -> Result<(), InputError>,
    {
        if self.maps.contains_name(name) {
            return Err(InputError::duplicate(Scope::Map, name));
        }

        let mut map = ActionMap::new(name, self.defaults);
        configure(&mut map)?;

        let id = self
            .maps
            .insert(name, map)
            .ok_or_else(|| InputError::duplicate(Scope::Map, name))?;
        tracing::debug!(profile = %self.name, map = name, "registered action map");
        Ok(id)
    }

    pub fn map(&self, name: &str) -> Option<&ActionMap> {
        self.maps.get(name)
    }

    pub fn map_mut(&mut self, name: &str) -> Option<&mut ActionMap> {
        self.maps.get_mut(name)
    }

    pub fn map_by_id(&self, id: &Uuid) -> Option<&ActionMap> {
        self.maps.get_by_id(id)
    }

    pub fn map_by_id_mut(&mut self, id: &Uuid) -> Option<&mut ActionMap> {
        self.maps.get_by_id_mut(id)
    }

    pub fn map_id(&self, name: &str) -> Option<Uuid> {
        self.maps.id_of(name)
    }

    /// Maps in registration order
    pub fn maps(&self) -> impl Iterator<Item = &ActionMap> {
        self.maps.values()
    }

    pub fn maps_mut(&mut self) -> impl Iterator<Item = &mut ActionMap> {
        self.maps.values_mut()
    }

    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// Set every map's own enabled flag
    pub fn enable_all_maps(&mut self) {
        for map in self.maps.values_mut() {
            map.enable();
        }
    }

    /// Clear every map's own enabled flag
    pub fn disable_all_maps(&mut self) {
        for map in self.maps.values_mut() {
            map.disable();
        }
    }

    /// Run every enabled map, in registration order
    pub fn process(&mut self, state: &PollingState) {
        if !self.enabled {
            return;
        }

        for map in self.maps.values_mut() {
            if !map.is_enabled() {
                continue;
            }
            map.process(state);
        }
    }
}
