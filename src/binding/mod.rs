//! Bindings: pure evaluators from polling state to status plus payload
//!
//! A binding watches some keys and defines an "active" predicate over a
//! single [`PollingData`](crate::polling::PollingData) snapshot. Evaluating
//! it against the previous and current snapshot yields an
//! [`InputStatus`] through the shared transition table, along with a
//! [`BindingContext`] payload. Bindings hold no per-frame state.
//!
//! # Architecture
//!
//! ```text
//! PollingState ─┬─ previous ─→ predicate ─┐
//!               └─ current  ─→ predicate ─┴→ InputStatus::from_transition → Evaluation
//! ```

mod analog;
mod button;
mod context;
mod vec2;

use std::fmt;

use crate::error::InputError;
use crate::polling::PollingState;
use crate::status::InputStatus;

pub use analog::AnalogBinding;
pub use button::ButtonBinding;
pub use context::{BindingContext, BindingValue};
pub use vec2::{Vec2Binding, Vec2Keys};

/// Which evaluator a binding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Button,
    Vec2,
    Analog,
    /// Implemented outside this crate
    Custom,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Button => write!(f, "button"),
            BindingKind::Vec2 => write!(f, "vec2"),
            BindingKind::Analog => write!(f, "analog"),
            BindingKind::Custom => write!(f, "custom"),
        }
    }
}

/// Result of evaluating one binding for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub status: InputStatus,
    pub context: BindingContext,
}

impl Evaluation {
    pub fn new(status: InputStatus, context: BindingContext) -> Self {
        Self { status, context }
    }
}

/// A raw-input-to-status evaluator
pub trait Binding: fmt::Debug {
    fn kind(&self) -> BindingKind {
        BindingKind::Custom
    }

    /// Compare the previous and current snapshot and report status plus payload
    fn evaluate(&self, state: &PollingState) -> Result<Evaluation, InputError>;

    /// Restore the binding to its configured state
    ///
    /// No shipped binding supports this yet, and it must not silently succeed.
    fn reset(&self) -> Result<(), InputError> {
        Err(InputError::Unimplemented("binding reset"))
    }
}
