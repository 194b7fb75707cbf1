//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit keyboard events into engine
// InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent (engine type) → InputBuffer
//
// OS key-repeat is filtered here: repeat-flagged events are dropped, and
// a press for a key already held is dropped too, so a held key produces
// exactly one KeyDown. Unmapped keys (F-keys, numpad, media keys) are
// filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts Winit key events to InputEvents, tracking which keys are down.
pub(crate) struct InputProcessor {
    held: HashSet<KeyCode>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit KeyEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&mut self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }
        self.translate(key_event.physical_key, key_event.state)
    }

    /// KeyUp for every key still held, e.g. when the window loses focus
    /// and the matching releases will never arrive.
    pub(crate) fn release_all(&mut self) -> Vec<InputEvent> {
        self.held.drain().map(InputEvent::KeyUp).collect()
    }

    //--- Internal Helpers -------------------------------------------------

    fn translate(&mut self, physical_key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key, KeyCode::Unidentified) {
            return None;
        }

        match state {
            ElementState::Pressed => self.held.insert(key).then_some(InputEvent::KeyDown(key)),
            ElementState::Released => {
                self.held.remove(&key);
                Some(InputEvent::KeyUp(key))
            }
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, and common special keys. Left and right
/// variants of Shift / Control collapse into one code. Unmapped keys
/// return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            ShiftLeft | ShiftRight => KeyCode::Shift,
            ControlLeft | ControlRight => KeyCode::Control,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    fn code(key: WinitKeyCode) -> PhysicalKey {
        PhysicalKey::Code(key)
    }

    #[test]
    fn press_and_release() {
        let mut processor = InputProcessor::new();

        assert_eq!(
            processor.translate(code(WinitKeyCode::ArrowLeft), ElementState::Pressed),
            Some(InputEvent::KeyDown(KeyCode::ArrowLeft))
        );
        assert_eq!(
            processor.translate(code(WinitKeyCode::ArrowLeft), ElementState::Released),
            Some(InputEvent::KeyUp(KeyCode::ArrowLeft))
        );
    }

    #[test]
    fn second_press_while_held_is_dropped() {
        let mut processor = InputProcessor::new();

        processor.translate(code(WinitKeyCode::Space), ElementState::Pressed);
        assert_eq!(processor.translate(code(WinitKeyCode::Space), ElementState::Pressed), None);

        processor.translate(code(WinitKeyCode::Space), ElementState::Released);
        assert!(processor.translate(code(WinitKeyCode::Space), ElementState::Pressed).is_some());
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let mut processor = InputProcessor::new();

        assert_eq!(processor.translate(code(WinitKeyCode::F13), ElementState::Pressed), None);
        assert_eq!(
            processor.translate(
                PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
                ElementState::Pressed
            ),
            None
        );
        assert!(processor.release_all().is_empty());
    }

    #[test]
    fn release_all_lifts_every_held_key() {
        let mut processor = InputProcessor::new();
        processor.translate(code(WinitKeyCode::ArrowUp), ElementState::Pressed);
        processor.translate(code(WinitKeyCode::Space), ElementState::Pressed);

        let mut released = processor.release_all();
        released.sort_by_key(|event| format!("{:?}", event));

        assert_eq!(
            released,
            vec![
                InputEvent::KeyUp(KeyCode::ArrowUp),
                InputEvent::KeyUp(KeyCode::Space),
            ]
        );
        assert!(processor.release_all().is_empty());
    }

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_special() {
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::Enter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftRight), KeyCode::Shift);
        assert_eq!(KeyCode::from(WinitKeyCode::ControlLeft), KeyCode::Control);
    }
}
