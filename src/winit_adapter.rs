//! Adapter to convert winit window events to raw input events
//!
//! Keys are mapped from their physical position, so WASD stays WASD on
//! AZERTY or Dvorak layouts.

use winit::event::{ElementState, Modifiers, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersKeyState, PhysicalKey};

use crate::input::RawEvent;
use crate::types::{KeyCode, ModifierKey};

/// Map a physical key to our key code
///
/// Returns None for keys we don't track (media keys, IME keys, etc.)
pub fn key_code_from_physical(physical_key: PhysicalKey) -> Option<KeyCode> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };

    let key = match code {
        // Letters
        WinitKeyCode::KeyA => KeyCode::Char('a'),
        WinitKeyCode::KeyB => KeyCode::Char('b'),
        WinitKeyCode::KeyC => KeyCode::Char('c'),
        WinitKeyCode::KeyD => KeyCode::Char('d'),
        WinitKeyCode::KeyE => KeyCode::Char('e'),
        WinitKeyCode::KeyF => KeyCode::Char('f'),
        WinitKeyCode::KeyG => KeyCode::Char('g'),
        WinitKeyCode::KeyH => KeyCode::Char('h'),
        WinitKeyCode::KeyI => KeyCode::Char('i'),
        WinitKeyCode::KeyJ => KeyCode::Char('j'),
        WinitKeyCode::KeyK => KeyCode::Char('k'),
        WinitKeyCode::KeyL => KeyCode::Char('l'),
        WinitKeyCode::KeyM => KeyCode::Char('m'),
        WinitKeyCode::KeyN => KeyCode::Char('n'),
        WinitKeyCode::KeyO => KeyCode::Char('o'),
        WinitKeyCode::KeyP => KeyCode::Char('p'),
        WinitKeyCode::KeyQ => KeyCode::Char('q'),
        WinitKeyCode::KeyR => KeyCode::Char('r'),
        WinitKeyCode::KeyS => KeyCode::Char('s'),
        WinitKeyCode::KeyT => KeyCode::Char('t'),
        WinitKeyCode::KeyU => KeyCode::Char('u'),
        WinitKeyCode::KeyV => KeyCode::Char('v'),
        WinitKeyCode::KeyW => KeyCode::Char('w'),
        WinitKeyCode::KeyX => KeyCode::Char('x'),
        WinitKeyCode::KeyY => KeyCode::Char('y'),
        WinitKeyCode::KeyZ => KeyCode::Char('z'),

        // Digit row
        WinitKeyCode::Digit0 => KeyCode::Char('0'),
        WinitKeyCode::Digit1 => KeyCode::Char('1'),
        WinitKeyCode::Digit2 => KeyCode::Char('2'),
        WinitKeyCode::Digit3 => KeyCode::Char('3'),
        WinitKeyCode::Digit4 => KeyCode::Char('4'),
        WinitKeyCode::Digit5 => KeyCode::Char('5'),
        WinitKeyCode::Digit6 => KeyCode::Char('6'),
        WinitKeyCode::Digit7 => KeyCode::Char('7'),
        WinitKeyCode::Digit8 => KeyCode::Char('8'),
        WinitKeyCode::Digit9 => KeyCode::Char('9'),

        // Punctuation (US positions)
        WinitKeyCode::Minus => KeyCode::Char('-'),
        WinitKeyCode::Equal => KeyCode::Char('='),
        WinitKeyCode::BracketLeft => KeyCode::Char('['),
        WinitKeyCode::BracketRight => KeyCode::Char(']'),
        WinitKeyCode::Backslash => KeyCode::Char('\\'),
        WinitKeyCode::Semicolon => KeyCode::Char(';'),
        WinitKeyCode::Quote => KeyCode::Char('\''),
        WinitKeyCode::Backquote => KeyCode::Char('`'),
        WinitKeyCode::Comma => KeyCode::Char(','),
        WinitKeyCode::Period => KeyCode::Char('.'),
        WinitKeyCode::Slash => KeyCode::Char('/'),

        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::Enter => KeyCode::Enter,
        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::Tab => KeyCode::Tab,
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::Delete => KeyCode::Delete,

        // Arrows
        WinitKeyCode::ArrowUp => KeyCode::Up,
        WinitKeyCode::ArrowDown => KeyCode::Down,
        WinitKeyCode::ArrowLeft => KeyCode::Left,
        WinitKeyCode::ArrowRight => KeyCode::Right,

        // Navigation
        WinitKeyCode::Home => KeyCode::Home,
        WinitKeyCode::End => KeyCode::End,
        WinitKeyCode::PageUp => KeyCode::PageUp,
        WinitKeyCode::PageDown => KeyCode::PageDown,
        WinitKeyCode::Insert => KeyCode::Insert,

        // Function keys
        WinitKeyCode::F1 => KeyCode::F(1),
        WinitKeyCode::F2 => KeyCode::F(2),
        WinitKeyCode::F3 => KeyCode::F(3),
        WinitKeyCode::F4 => KeyCode::F(4),
        WinitKeyCode::F5 => KeyCode::F(5),
        WinitKeyCode::F6 => KeyCode::F(6),
        WinitKeyCode::F7 => KeyCode::F(7),
        WinitKeyCode::F8 => KeyCode::F(8),
        WinitKeyCode::F9 => KeyCode::F(9),
        WinitKeyCode::F10 => KeyCode::F(10),
        WinitKeyCode::F11 => KeyCode::F(11),
        WinitKeyCode::F12 => KeyCode::F(12),
        WinitKeyCode::F13 => KeyCode::F(13),
        WinitKeyCode::F14 => KeyCode::F(14),
        WinitKeyCode::F15 => KeyCode::F(15),
        WinitKeyCode::F16 => KeyCode::F(16),
        WinitKeyCode::F17 => KeyCode::F(17),
        WinitKeyCode::F18 => KeyCode::F(18),
        WinitKeyCode::F19 => KeyCode::F(19),
        WinitKeyCode::F20 => KeyCode::F(20),
        WinitKeyCode::F21 => KeyCode::F(21),
        WinitKeyCode::F22 => KeyCode::F(22),
        WinitKeyCode::F23 => KeyCode::F(23),
        WinitKeyCode::F24 => KeyCode::F(24),

        // Modifier keys are tracked as ordinary keys too
        WinitKeyCode::ShiftLeft => KeyCode::LeftShift,
        WinitKeyCode::ShiftRight => KeyCode::RightShift,
        WinitKeyCode::ControlLeft => KeyCode::LeftCtrl,
        WinitKeyCode::ControlRight => KeyCode::RightCtrl,
        WinitKeyCode::AltLeft => KeyCode::LeftAlt,
        WinitKeyCode::AltRight => KeyCode::RightAlt,
        WinitKeyCode::CapsLock => KeyCode::CapsLock,

        // Numpad
        WinitKeyCode::Numpad0 => KeyCode::Numpad0,
        WinitKeyCode::Numpad1 => KeyCode::Numpad1,
        WinitKeyCode::Numpad2 => KeyCode::Numpad2,
        WinitKeyCode::Numpad3 => KeyCode::Numpad3,
        WinitKeyCode::Numpad4 => KeyCode::Numpad4,
        WinitKeyCode::Numpad5 => KeyCode::Numpad5,
        WinitKeyCode::Numpad6 => KeyCode::Numpad6,
        WinitKeyCode::Numpad7 => KeyCode::Numpad7,
        WinitKeyCode::Numpad8 => KeyCode::Numpad8,
        WinitKeyCode::Numpad9 => KeyCode::Numpad9,
        WinitKeyCode::NumpadAdd => KeyCode::NumpadAdd,
        WinitKeyCode::NumpadSubtract => KeyCode::NumpadSubtract,
        WinitKeyCode::NumpadMultiply => KeyCode::NumpadMultiply,
        WinitKeyCode::NumpadDivide => KeyCode::NumpadDivide,
        WinitKeyCode::NumpadEnter => KeyCode::NumpadEnter,
        WinitKeyCode::NumpadDecimal => KeyCode::NumpadDecimal,

        _ => return None,
    };
    Some(key)
}

/// Convert winit's modifier report to our mask
///
/// winit reports which side is held only on some platforms. When the side is
/// unknown the left-hand bit is set. Caps lock state is not reported by winit
/// and is never set here.
pub fn modifiers_from_winit(modifiers: &Modifiers) -> ModifierKey {
    let state = modifiers.state();
    let mut mask = ModifierKey::NONE;

    let sides = [
        (
            state.shift_key(),
            modifiers.lshift_state(),
            modifiers.rshift_state(),
            ModifierKey::LEFT_SHIFT,
            ModifierKey::RIGHT_SHIFT,
        ),
        (
            state.control_key(),
            modifiers.lcontrol_state(),
            modifiers.rcontrol_state(),
            ModifierKey::LEFT_CTRL,
            ModifierKey::RIGHT_CTRL,
        ),
        (
            state.alt_key(),
            modifiers.lalt_state(),
            modifiers.ralt_state(),
            ModifierKey::LEFT_ALT,
            ModifierKey::RIGHT_ALT,
        ),
    ];

    for (held, left, right, left_bit, right_bit) in sides {
        if !held {
            continue;
        }
        let left_pressed = left == ModifiersKeyState::Pressed;
        let right_pressed = right == ModifiersKeyState::Pressed;
        if right_pressed {
            mask |= right_bit;
        }
        if left_pressed || !right_pressed {
            mask |= left_bit;
        }
    }
    mask
}

/// Turn key data into a raw event
///
/// OS key repeats are dropped: a held key stays down in the polling state
/// without them.
pub fn raw_event_from_key(
    physical_key: PhysicalKey,
    state: ElementState,
    repeat: bool,
) -> Option<RawEvent> {
    if repeat {
        return None;
    }
    let key = key_code_from_physical(physical_key)?;
    Some(match state {
        ElementState::Pressed => RawEvent::KeyDown(key),
        ElementState::Released => RawEvent::KeyUp(key),
    })
}

/// Extract the raw input event carried by a window event, if any
pub fn raw_event_from_window_event(event: &WindowEvent) -> Option<RawEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            raw_event_from_key(event.physical_key, event.state, event.repeat)
        }
        WindowEvent::ModifiersChanged(modifiers) => {
            Some(RawEvent::Modifiers(modifiers_from_winit(modifiers)))
        }
        WindowEvent::Focused(false) => Some(RawEvent::FocusLost),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{ModifiersState, NativeKeyCode};

    #[test]
    fn test_letters_are_layout_independent() {
        assert_eq!(
            key_code_from_physical(PhysicalKey::Code(WinitKeyCode::KeyW)),
            Some(KeyCode::Char('w'))
        );
        assert_eq!(
            key_code_from_physical(PhysicalKey::Code(WinitKeyCode::Digit7)),
            Some(KeyCode::Char('7'))
        );
    }

    #[test]
    fn test_named_and_modifier_keys() {
        assert_eq!(
            key_code_from_physical(PhysicalKey::Code(WinitKeyCode::Space)),
            Some(KeyCode::Space)
        );
        assert_eq!(
            key_code_from_physical(PhysicalKey::Code(WinitKeyCode::ShiftRight)),
            Some(KeyCode::RightShift)
        );
        assert_eq!(
            key_code_from_physical(PhysicalKey::Code(WinitKeyCode::NumpadEnter)),
            Some(KeyCode::NumpadEnter)
        );
    }

    #[test]
    fn test_function_keys() {
        let codes = [
            WinitKeyCode::F1,
            WinitKeyCode::F2,
            WinitKeyCode::F3,
            WinitKeyCode::F4,
            WinitKeyCode::F5,
            WinitKeyCode::F6,
            WinitKeyCode::F7,
            WinitKeyCode::F8,
            WinitKeyCode::F9,
            WinitKeyCode::F10,
            WinitKeyCode::F11,
            WinitKeyCode::F12,
        ];
        for (i, code) in codes.into_iter().enumerate() {
            assert_eq!(
                key_code_from_physical(PhysicalKey::Code(code)),
                Some(KeyCode::F(i as u8 + 1))
            );
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(
            key_code_from_physical(PhysicalKey::Code(WinitKeyCode::MediaPlayPause)),
            None
        );
        assert_eq!(
            key_code_from_physical(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            None
        );
    }

    #[test]
    fn test_key_events() {
        let space = PhysicalKey::Code(WinitKeyCode::Space);
        assert_eq!(
            raw_event_from_key(space, ElementState::Pressed, false),
            Some(RawEvent::KeyDown(KeyCode::Space))
        );
        assert_eq!(
            raw_event_from_key(space, ElementState::Released, false),
            Some(RawEvent::KeyUp(KeyCode::Space))
        );
        assert_eq!(raw_event_from_key(space, ElementState::Pressed, true), None);
    }

    #[test]
    fn test_modifiers_without_side_info_map_left() {
        let modifiers = Modifiers::from(ModifiersState::SHIFT | ModifiersState::CONTROL);
        assert_eq!(
            modifiers_from_winit(&modifiers),
            ModifierKey::LEFT_SHIFT | ModifierKey::LEFT_CTRL
        );
        assert!(modifiers_from_winit(&Modifiers::default()).is_empty());
    }

    #[test]
    fn test_window_events() {
        assert_eq!(
            raw_event_from_window_event(&WindowEvent::Focused(false)),
            Some(RawEvent::FocusLost)
        );
        assert_eq!(raw_event_from_window_event(&WindowEvent::Focused(true)), None);

        let modifiers = Modifiers::from(ModifiersState::ALT);
        assert_eq!(
            raw_event_from_window_event(&WindowEvent::ModifiersChanged(modifiers)),
            Some(RawEvent::Modifiers(ModifierKey::LEFT_ALT))
        );
    }
}
