//! Error type for registration and binding operations

use std::fmt;

/// Which level of the hierarchy a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Profile,
    Map,
    Action,
    Binding,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Profile => write!(f, "profile"),
            Scope::Map => write!(f, "action map"),
            Scope::Action => write!(f, "action"),
            Scope::Binding => write!(f, "binding"),
        }
    }
}

/// Errors raised by the action hierarchy
///
/// Plain lookups return `Option` instead; `NotFound` is only used by
/// operations that must act on a named child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A name is already registered within its scope
    DuplicateName { scope: Scope, name: String },
    /// An operation targeted a name that is not registered
    NotFound { scope: Scope, name: String },
    /// The binding does not support this capability
    Unimplemented(&'static str),
    /// A binding failed to evaluate this frame
    Evaluation { binding: String, reason: String },
    /// A binding parameter is outside its valid range
    InvalidValue(String),
}

impl InputError {
    pub(crate) fn duplicate(scope: Scope, name: &str) -> Self {
        InputError::DuplicateName {
            scope,
            name: name.to_string(),
        }
    }

    pub(crate) fn not_found(scope: Scope, name: &str) -> Self {
        InputError::NotFound {
            scope,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::DuplicateName { scope, name } => {
                write!(f, "Duplicate {} name: {}", scope, name)
            }
            InputError::NotFound { scope, name } => write!(f, "No {} named {}", scope, name),
            InputError::Unimplemented(what) => write!(f, "Not implemented: {}", what),
            InputError::Evaluation { binding, reason } => {
                write!(f, "Binding {} failed to evaluate: {}", binding, reason)
            }
            InputError::InvalidValue(e) => write!(f, "Invalid value: {}", e),
        }
    }
}

impl std::error::Error for InputError {}
