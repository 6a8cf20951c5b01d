//! Actions: named input intents fed by one or more bindings

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::binding::{
    Binding, BindingContext, ButtonBinding, Evaluation, Vec2Binding, Vec2Keys,
};
use crate::error::{InputError, Scope};
use crate::event::Event;
use crate::polling::PollingState;
use crate::registry::Registry;
use crate::status::InputStatus;
use crate::types::KeyCode;

/// How an action combines the statuses of several bindings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPolicy {
    /// Evaluate every binding and treat the action as active while any
    /// binding is active. Releasing one of two held bindings keeps the
    /// action performed instead of cancelling it.
    #[default]
    Aggregate,
    /// Stop at the first binding (in registration order) that reports a
    /// non-idle status and fire exactly its flags.
    FirstActive,
}

/// Settings a container hands down to the children it creates
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Defaults {
    pub policy: EvaluationPolicy,
    pub deadzone: f32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            policy: EvaluationPolicy::default(),
            deadzone: crate::config::DEFAULT_DEADZONE,
        }
    }
}

/// A named input intent such as "Jump" or "Move"
///
/// Created only through [`ActionMap::add_action`](crate::ActionMap::add_action).
/// Subscribers on `started`, `performed` and `cancelled` run synchronously
/// during [`Input::update`](crate::Input::update), in subscription order.
#[derive(Debug)]
pub struct Action {
    /// Fired on the frame the action becomes active
    pub started: Event<BindingContext>,
    /// Fired on every frame the action is active, including the first
    pub performed: Event<BindingContext>,
    /// Fired on the frame the action stops being active
    pub cancelled: Event<BindingContext>,

    name: String,
    enabled: bool,
    policy: EvaluationPolicy,
    default_deadzone: f32,
    bindings: Registry<Box<dyn Binding>>,
}

impl Action {
    pub(crate) fn new(name: &str, defaults: Defaults) -> Self {
        Self {
            started: Event::new(),
            performed: Event::new(),
            cancelled: Event::new(),
            name: name.to_string(),
            enabled: true,
            policy: defaults.policy,
            default_deadzone: defaults.deadzone,
            bindings: Registry::new(),
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

    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: EvaluationPolicy) {
        self.policy = policy;
    }

    /// Register a binding under a name unique within this action
    pub fn add_binding(
        &mut self,
        name: &str,
        binding: impl Binding + 'static,
    ) -> Result<Uuid, InputError> {
        let kind = binding.kind();
        let id = self
            .bindings
            .insert(name, Box::new(binding))
            .ok_or_else(|| InputError::duplicate(Scope::Binding, name))?;
        tracing::debug!(action = %self.name, binding = name, %kind, "registered binding");
        Ok(id)
    }

    pub fn add_button(&mut self, name: &str, key: KeyCode) -> Result<Uuid, InputError> {
        self.add_binding(name, ButtonBinding::new(key))
    }

    pub fn add_vec2(
        &mut self,
        name: &str,
        keys: Vec2Keys,
        deadzone: f32,
    ) -> Result<Uuid, InputError> {
        self.add_binding(name, Vec2Binding::new(keys, deadzone)?)
    }

    /// Directional binding using the configured default deadzone
    pub fn add_vec2_default(&mut self, name: &str, keys: Vec2Keys) -> Result<Uuid, InputError> {
        self.add_vec2(name, keys, self.default_deadzone)
    }

    pub fn binding(&self, name: &str) -> Option<&dyn Binding> {
        self.bindings.get(name).map(|b| b.as_ref())
    }

    pub fn binding_by_id(&self, id: &Uuid) -> Option<&dyn Binding> {
        self.bindings.get_by_id(id).map(|b| b.as_ref())
    }

    pub fn binding_id(&self, name: &str) -> Option<Uuid> {
        self.bindings.id_of(name)
    }

    /// Binding names in registration order
    pub fn binding_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.names()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Ask a binding to reset itself
    pub fn reset_binding(&self, name: &str) -> Result<(), InputError> {
        let binding = self
            .bindings
            .get(name)
            .ok_or_else(|| InputError::not_found(Scope::Binding, name))?;
        binding.reset()
    }

    /// Evaluate bindings against the polling state and fire notifications
    ///
    /// Returns the flags that fired; idle when the action is disabled.
    pub fn process(&mut self, state: &PollingState) -> InputStatus {
        if !self.enabled {
            return InputStatus::IDLE;
        }

        match self.policy {
            EvaluationPolicy::Aggregate => self.process_aggregate(state),
            EvaluationPolicy::FirstActive => self.process_first_active(state),
        }
    }

    fn process_aggregate(&mut self, state: &PollingState) -> InputStatus {
        let mut was_active = false;
        let mut is_active = false;
        let mut active_context: Option<BindingContext> = None;
        let mut cancel_context: Option<BindingContext> = None;

        for (name, evaluation) in self.evaluate_all(state) {
            let status = evaluation.status;
            was_active |= status.was_active();
            is_active |= status.is_active();

            if status.is_active() && active_context.is_none() {
                tracing::trace!(action = %self.name, binding = name, "active binding");
                active_context = Some(evaluation.context);
            } else if status.cancelled() && cancel_context.is_none() {
                cancel_context = Some(evaluation.context);
            }
        }

        let status = InputStatus::from_transition(was_active, is_active);
        let context = if status.cancelled() {
            cancel_context
        } else {
            active_context
        };

        match context {
            Some(context) => self.fire(status, &context),
            None => InputStatus::IDLE,
        }
    }

    fn process_first_active(&mut self, state: &PollingState) -> InputStatus {
        let winner = self
            .evaluate_all(state)
            .into_iter()
            .map(|(_, evaluation)| evaluation)
            .find(|evaluation| !evaluation.status.is_idle());

        match winner {
            Some(evaluation) => self.fire(evaluation.status, &evaluation.context),
            None => InputStatus::IDLE,
        }
    }

    /// Evaluate every binding in order, isolating failures
    ///
    /// A failing binding is logged and skipped so it cannot swallow input
    /// from its siblings.
    fn evaluate_all(&self, state: &PollingState) -> Vec<(&str, Evaluation)> {
        let mut results = Vec::with_capacity(self.bindings.len());
        for (_, name, binding) in self.bindings.iter() {
            match binding.evaluate(state) {
                Ok(evaluation) => results.push((name, evaluation)),
                Err(err) => tracing::warn!(
                    action = %self.name,
                    binding = name,
                    kind = %binding.kind(),
                    error = %err,
                    "binding evaluation failed, skipping"
                ),
            }
        }
        results
    }

    fn fire(&mut self, status: InputStatus, context: &BindingContext) -> InputStatus {
        if status.is_idle() {
            return status;
        }
        tracing::trace!(action = %self.name, %status, "firing");

        if status.started() {
            self.started.invoke(context);
        }
        if status.performed() {
            self.performed.invoke(context);
        }
        if status.cancelled() {
            self.cancelled.invoke(context);
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::AnalogBinding;
    use crate::math::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SPACE: KeyCode = KeyCode::Space;
    const PAD_A: KeyCode = KeyCode::Enter;

    type Log = Rc<RefCell<Vec<(&'static str, BindingContext)>>>;

    fn recorded(action: &mut Action) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        action.started.add(move |ctx| l.borrow_mut().push(("started", ctx.clone())));
        let l = Rc::clone(&log);
        action
            .performed
            .add(move |ctx| l.borrow_mut().push(("performed", ctx.clone())));
        let l = Rc::clone(&log);
        action
            .cancelled
            .add(move |ctx| l.borrow_mut().push(("cancelled", ctx.clone())));
        log
    }

    fn kinds(log: &Log) -> Vec<&'static str> {
        log.borrow().iter().map(|(kind, _)| *kind).collect()
    }

    fn jump(policy: EvaluationPolicy) -> Action {
        let mut action = Action::new(
            "Jump",
            Defaults {
                policy,
                ..Defaults::default()
            },
        );
        action.add_button("Keyboard", SPACE).unwrap();
        action.add_button("Pad", PAD_A).unwrap();
        action
    }

    #[test]
    fn test_duplicate_binding_name() {
        let mut action = Action::new("Jump", Defaults::default());
        action.add_button("Keyboard", SPACE).unwrap();
        assert_eq!(
            action.add_button("Keyboard", PAD_A),
            Err(InputError::DuplicateName {
                scope: Scope::Binding,
                name: "Keyboard".to_string()
            })
        );
        assert_eq!(action.binding_count(), 1);
    }

    #[test]
    fn test_disabled_action_fires_nothing() {
        let mut action = jump(EvaluationPolicy::Aggregate);
        let log = recorded(&mut action);
        action.disable();

        let mut state = PollingState::new();
        state.register_active(SPACE);

        assert_eq!(action.process(&state), InputStatus::IDLE);
        assert!(log.borrow().is_empty());
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_started_and_performed_fire_together() {
        let mut action = jump(EvaluationPolicy::Aggregate);
        let log = recorded(&mut action);

        let mut state = PollingState::new();
        state.register_active(SPACE);
        action.process(&state);

        assert_eq!(kinds(&log), vec!["started", "performed"]);
        assert_eq!(log.borrow()[0].1.as_bool(), Some(true));
        assert_eq!(log.borrow()[0].1.keys, vec![SPACE]);
    }

    #[test]
    fn test_aggregate_second_release_does_not_cancel() {
        let mut action = jump(EvaluationPolicy::Aggregate);
        let log = recorded(&mut action);
        let mut state = PollingState::new();

        state.register_active(SPACE);
        state.register_active(PAD_A);
        action.process(&state);
        state.advance_frame();
        log.borrow_mut().clear();

        state.register_inactive(PAD_A);
        let status = action.process(&state);

        assert_eq!(status, InputStatus::PERFORMED);
        assert_eq!(kinds(&log), vec!["performed"]);
        assert_eq!(log.borrow()[0].1.keys, vec![SPACE]);
    }

    #[test]
    fn test_aggregate_second_press_does_not_restart() {
        let mut action = jump(EvaluationPolicy::Aggregate);
        let log = recorded(&mut action);
        let mut state = PollingState::new();

        state.register_active(SPACE);
        action.process(&state);
        state.advance_frame();
        log.borrow_mut().clear();

        state.register_active(PAD_A);
        assert_eq!(action.process(&state), InputStatus::PERFORMED);
        assert_eq!(kinds(&log), vec!["performed"]);
    }

    #[test]
    fn test_aggregate_cancel_when_last_binding_releases() {
        let mut action = jump(EvaluationPolicy::Aggregate);
        let log = recorded(&mut action);
        let mut state = PollingState::new();

        state.register_active(PAD_A);
        action.process(&state);
        state.advance_frame();
        log.borrow_mut().clear();

        state.register_inactive(PAD_A);
        assert_eq!(action.process(&state), InputStatus::CANCELLED);
        assert_eq!(kinds(&log), vec!["cancelled"]);
        assert_eq!(log.borrow()[0].1.as_bool(), Some(false));
    }

    #[test]
    fn test_first_active_stops_at_first_non_idle() {
        let mut action = jump(EvaluationPolicy::FirstActive);
        let log = recorded(&mut action);
        let mut state = PollingState::new();

        state.register_active(SPACE);
        state.register_active(PAD_A);
        action.process(&state);
        state.advance_frame();
        log.borrow_mut().clear();

        // The keyboard binding is still performing, so it wins and masks the
        // pad binding's cancellation.
        state.register_inactive(PAD_A);
        assert_eq!(action.process(&state), InputStatus::PERFORMED);
        assert_eq!(kinds(&log), vec!["performed"]);
    }

    #[test]
    fn test_first_active_falls_through_idle_bindings() {
        let mut action = jump(EvaluationPolicy::FirstActive);
        let log = recorded(&mut action);
        let mut state = PollingState::new();

        state.register_active(PAD_A);
        action.process(&state);

        assert_eq!(kinds(&log), vec!["started", "performed"]);
        assert_eq!(log.borrow()[0].1.keys, vec![PAD_A]);
    }

    #[test]
    fn test_failing_binding_is_isolated() {
        let mut action = Action::new("Throttle", Defaults::default());
        action
            .add_binding("Trigger", AnalogBinding::new(KeyCode::Char('e')))
            .unwrap();
        action.add_button("Fallback", SPACE).unwrap();
        let log = recorded(&mut action);

        let mut state = PollingState::new();
        state.register_active(SPACE);

        let status = action.process(&state);
        assert_eq!(status, InputStatus::STARTED | InputStatus::PERFORMED);
        assert_eq!(kinds(&log), vec!["started", "performed"]);
    }

    #[test]
    fn test_vec2_payload_delivered() {
        let mut action = Action::new("Move", Defaults::default());
        action.add_vec2_default("WASD", Vec2Keys::wasd()).unwrap();
        let log = recorded(&mut action);

        let mut state = PollingState::new();
        state.register_active(KeyCode::Char('a'));
        action.process(&state);

        assert_eq!(log.borrow()[1].1.as_vec2(), Some(Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn test_vec2_deadzone_out_of_range_rejected() {
        let mut action = Action::new("Move", Defaults::default());
        for deadzone in [-0.5, 1.0, f32::NAN] {
            assert!(matches!(
                action.add_vec2("WASD", Vec2Keys::wasd(), deadzone),
                Err(InputError::InvalidValue(_))
            ));
        }
        assert_eq!(action.binding_count(), 0);

        // Nothing registered, so an idle frame stays silent
        let log = recorded(&mut action);
        assert!(action.process(&PollingState::new()).is_idle());
        assert!(log.borrow().is_empty());

        action.add_vec2("WASD", Vec2Keys::wasd(), 0.0).unwrap();
        assert_eq!(action.binding_count(), 1);
    }

    #[test]
    fn test_reset_binding() {
        let action = jump(EvaluationPolicy::Aggregate);
        assert!(matches!(
            action.reset_binding("Keyboard"),
            Err(InputError::Unimplemented(_))
        ));
        assert!(matches!(
            action.reset_binding("Missing"),
            Err(InputError::NotFound { .. })
        ));
    }

    #[test]
    fn test_binding_lookup() {
        let action = jump(EvaluationPolicy::Aggregate);
        let id = action.binding_id("Pad").expect("registered");
        assert!(action.binding_by_id(&id).is_some());
        assert!(action.binding("Nope").is_none());
        assert_eq!(
            action.binding_names().collect::<Vec<_>>(),
            vec!["Keyboard", "Pad"]
        );
    }
}
