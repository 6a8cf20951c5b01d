//! Four-key directional binding (WASD, arrow keys)

use crate::error::InputError;
use crate::math::Vec2;
use crate::polling::{PollingData, PollingState};
use crate::status::InputStatus;
use crate::types::KeyCode;

use super::{Binding, BindingContext, BindingKind, BindingValue, Evaluation};

/// The keys driving each half-axis of a [`Vec2Binding`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vec2Keys {
    pub pos_x: KeyCode,
    pub neg_x: KeyCode,
    pub pos_y: KeyCode,
    pub neg_y: KeyCode,
}

impl Vec2Keys {
    pub const fn new(pos_x: KeyCode, neg_x: KeyCode, pos_y: KeyCode, neg_y: KeyCode) -> Self {
        Self {
            pos_x: pos_x.normalized(),
            neg_x: neg_x.normalized(),
            pos_y: pos_y.normalized(),
            neg_y: neg_y.normalized(),
        }
    }

    /// D/A for X, W/S for Y
    pub const fn wasd() -> Self {
        Self::new(
            KeyCode::Char('d'),
            KeyCode::Char('a'),
            KeyCode::Char('w'),
            KeyCode::Char('s'),
        )
    }

    /// Right/Left for X, Up/Down for Y
    pub const fn arrows() -> Self {
        Self::new(KeyCode::Right, KeyCode::Left, KeyCode::Up, KeyCode::Down)
    }

    fn to_array(self) -> [KeyCode; 4] {
        [self.pos_x, self.neg_x, self.pos_y, self.neg_y]
    }
}

/// Below zero the idle vector counts as active; at 1 or above a unit step
/// never does.
fn check_deadzone(deadzone: f32) -> Result<(), InputError> {
    if (0.0..1.0).contains(&deadzone) {
        Ok(())
    } else {
        Err(InputError::InvalidValue(format!(
            "deadzone must be in [0, 1), got {}",
            deadzone
        )))
    }
}

/// Active while the combined direction's L∞ norm exceeds the deadzone
///
/// Each held key contributes a unit step along its half-axis; opposite keys
/// cancel to 0. The payload is the raw vector whatever the deadzone says.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2Binding {
    keys: Vec2Keys,
    deadzone: f32,
}

impl Vec2Binding {
    /// Fails unless `deadzone` is in `[0, 1)`
    pub fn new(keys: Vec2Keys, deadzone: f32) -> Result<Self, InputError> {
        check_deadzone(deadzone)?;
        Ok(Self { keys, deadzone })
    }

    pub fn keys(&self) -> Vec2Keys {
        self.keys
    }

    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Sum of unit contributions for one snapshot
    pub fn direction(&self, data: &PollingData) -> Vec2 {
        let axis = |pos: KeyCode, neg: KeyCode| {
            let mut value = 0.0;
            if data.is_key_down(pos) {
                value += 1.0;
            }
            if data.is_key_down(neg) {
                value -= 1.0;
            }
            value
        };

        Vec2::new(
            axis(self.keys.pos_x, self.keys.neg_x),
            axis(self.keys.pos_y, self.keys.neg_y),
        )
    }

    fn past_deadzone(&self, direction: Vec2) -> bool {
        direction.linf_norm() > self.deadzone
    }
}

impl Binding for Vec2Binding {
    fn kind(&self) -> BindingKind {
        BindingKind::Vec2
    }

    fn evaluate(&self, state: &PollingState) -> Result<Evaluation, InputError> {
        let previous = self.direction(state.previous());
        let current = self.direction(state.current());

        let was_active = self.past_deadzone(previous);
        let is_active = self.past_deadzone(current);

        let keys = if is_active {
            self.keys
                .to_array()
                .into_iter()
                .filter(|&key| state.current().is_key_down(key))
                .collect()
        } else {
            Vec::new()
        };

        let context = BindingContext::new(
            BindingValue::Vec2(current),
            keys,
            state.current().modifiers(),
        );

        Ok(Evaluation::new(
            InputStatus::from_transition(was_active, is_active),
            context,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: KeyCode = KeyCode::Char('w');
    const A: KeyCode = KeyCode::Char('a');
    const S: KeyCode = KeyCode::Char('s');
    const D: KeyCode = KeyCode::Char('d');

    fn eval(binding: &Vec2Binding, state: &PollingState) -> Evaluation {
        binding.evaluate(state).expect("vec2 evaluation is infallible")
    }

    #[test]
    fn test_single_direction() {
        let binding = Vec2Binding::new(Vec2Keys::wasd(), 0.1).unwrap();
        let mut state = PollingState::new();
        state.register_active(W);

        let result = eval(&binding, &state);
        assert_eq!(result.context.as_vec2(), Some(Vec2::new(0.0, 1.0)));
        assert_eq!(result.status, InputStatus::STARTED | InputStatus::PERFORMED);
        assert_eq!(result.context.keys, vec![W]);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let binding = Vec2Binding::new(Vec2Keys::wasd(), 0.1).unwrap();
        let mut state = PollingState::new();
        state.register_active(S);
        state.register_active(A);

        let result = eval(&binding, &state);
        assert_eq!(result.context.as_vec2(), Some(Vec2::new(-1.0, -1.0)));
        assert_eq!(result.context.keys, vec![A, S]);
    }

    #[test]
    fn test_opposite_keys_cancel_to_zero() {
        let binding = Vec2Binding::new(Vec2Keys::wasd(), 0.1).unwrap();
        let mut state = PollingState::new();
        state.register_active(A);
        state.register_active(D);

        let result = eval(&binding, &state);
        let value = result.context.as_vec2().expect("vec2 payload");
        assert_eq!(value.x, 0.0);
        assert_eq!(value.y, 0.0);
        assert!(result.status.is_idle());
        assert!(result.context.keys.is_empty());
    }

    #[test]
    fn test_opposite_press_while_moving_cancels() {
        let binding = Vec2Binding::new(Vec2Keys::wasd(), 0.1).unwrap();
        let mut state = PollingState::new();
        state.register_active(D);
        state.advance_frame();

        state.register_active(A);
        let result = eval(&binding, &state);
        assert_eq!(result.status, InputStatus::CANCELLED);
        assert_eq!(result.context.as_vec2(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_remaining_axis_keeps_action_alive() {
        let binding = Vec2Binding::new(Vec2Keys::arrows(), 0.5).unwrap();
        let mut state = PollingState::new();
        state.register_active(KeyCode::Right);
        state.register_active(KeyCode::Left);
        state.register_active(KeyCode::Up);

        let result = eval(&binding, &state);
        assert_eq!(result.status, InputStatus::STARTED | InputStatus::PERFORMED);
        assert_eq!(result.context.as_vec2(), Some(Vec2::Y));

        state.advance_frame();
        state.register_inactive(KeyCode::Up);
        let result = eval(&binding, &state);
        assert_eq!(result.status, InputStatus::CANCELLED);
        assert!(result.context.keys.is_empty());
    }

    #[test]
    fn test_keys_fold_uppercase() {
        let keys = Vec2Keys::new(
            KeyCode::Char('D'),
            KeyCode::Char('A'),
            KeyCode::Char('W'),
            KeyCode::Char('S'),
        );
        assert_eq!(keys, Vec2Keys::wasd());
    }

    #[test]
    fn test_deadzone_out_of_range_rejected() {
        for deadzone in [-0.5, 1.0, 2.0, f32::NAN] {
            assert!(
                matches!(
                    Vec2Binding::new(Vec2Keys::wasd(), deadzone),
                    Err(InputError::InvalidValue(_))
                ),
                "deadzone {} should be rejected",
                deadzone
            );
        }
        assert!(Vec2Binding::new(Vec2Keys::wasd(), 0.0).is_ok());
        assert!(Vec2Binding::new(Vec2Keys::wasd(), 0.99).is_ok());
    }

    #[test]
    fn test_held_then_released() {
        let binding = Vec2Binding::new(Vec2Keys::wasd(), 0.1).unwrap();
        let mut state = PollingState::new();
        state.register_active(W);
        state.advance_frame();

        state.register_active(D);
        assert_eq!(eval(&binding, &state).status, InputStatus::PERFORMED);
        state.advance_frame();

        state.register_inactive(W);
        state.register_inactive(D);
        let result = eval(&binding, &state);
        assert_eq!(result.status, InputStatus::CANCELLED);
        assert_eq!(result.context.as_vec2(), Some(Vec2::ZERO));
    }
}
