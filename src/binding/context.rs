//! Payload delivered with every action notification

use crate::math::Vec2;
use crate::types::{KeyCode, ModifierKey};

/// The typed value a binding produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BindingValue {
    /// No meaningful value
    #[default]
    None,
    /// Button state (true while held)
    Bool(bool),
    /// Scalar value, reserved for analog bindings
    Float(f32),
    /// Combined directional value
    Vec2(Vec2),
}

/// Processed binding output plus the metadata it was produced under
///
/// ```ignore
/// action.performed.add(|ctx: &BindingContext| {
///     if let Some(mut movement) = ctx.as_vec2() {
///         if ctx.modifiers.shift() {
///             movement = movement * 2.0;
///         }
///         player.walk(movement);
///     }
/// });
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingContext {
    pub value: BindingValue,
    /// Keys that contributed to the value; empty when the binding is inactive
    pub keys: Vec<KeyCode>,
    /// Modifier mask active on the evaluated frame
    pub modifiers: ModifierKey,
}

impl BindingContext {
    pub fn new(value: BindingValue, keys: Vec<KeyCode>, modifiers: ModifierKey) -> Self {
        Self {
            value,
            keys,
            modifiers,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self.value, BindingValue::None)
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self.value, BindingValue::Bool(_))
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self.value, BindingValue::Float(_))
    }

    #[inline]
    pub fn is_vec2(&self) -> bool {
        matches!(self.value, BindingValue::Vec2(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            BindingValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self.value {
            BindingValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self.value {
            BindingValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    /// First contributing key, if any
    pub fn key(&self) -> Option<KeyCode> {
        self.keys.first().copied()
    }

    #[inline]
    pub fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }
}
