//! Single-key button binding

use crate::error::InputError;
use crate::polling::PollingState;
use crate::status::InputStatus;
use crate::types::KeyCode;

use super::{Binding, BindingContext, BindingKind, BindingValue, Evaluation};

/// Active while one key is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBinding {
    key: KeyCode,
}

impl ButtonBinding {
    pub const fn new(key: KeyCode) -> Self {
        Self {
            key: key.normalized(),
        }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }
}

impl Binding for ButtonBinding {
    fn kind(&self) -> BindingKind {
        BindingKind::Button
    }

    fn evaluate(&self, state: &PollingState) -> Result<Evaluation, InputError> {
        let was_pressed = state.previous().is_key_down(self.key);
        let is_pressed = state.current().is_key_down(self.key);

        let keys = if is_pressed { vec![self.key] } else { Vec::new() };
        let context = BindingContext::new(
            BindingValue::Bool(is_pressed),
            keys,
            state.current().modifiers(),
        );

        Ok(Evaluation::new(
            InputStatus::from_transition(was_pressed, is_pressed),
            context,
        ))
    }
}
