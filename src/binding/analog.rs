//! Analog/trigger binding placeholder

use crate::error::InputError;
use crate::polling::PollingState;
use crate::types::KeyCode;

use super::{Binding, BindingKind, Evaluation};

/// Reserved for trigger and slider inputs that report a `Float` payload
///
/// Keyboard polling carries no analog axis, so evaluation reports
/// [`InputError::Unimplemented`] instead of pretending the input is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalogBinding {
    source: KeyCode,
}

impl AnalogBinding {
    pub const fn new(source: KeyCode) -> Self {
        Self { source }
    }

    pub fn source(&self) -> KeyCode {
        self.source
    }
}

impl Binding for AnalogBinding {
    fn kind(&self) -> BindingKind {
        BindingKind::Analog
    }

    fn evaluate(&self, _state: &PollingState) -> Result<Evaluation, InputError> {
        Err(InputError::Unimplemented("analog binding evaluation"))
    }
}
