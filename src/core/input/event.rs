//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level keyboard events.
//
// This module abstracts away platform-specific input (Winit) into a
// small, engine-friendly format consumed by the input subsystem.
//
// Responsibilities:
// - Represent physical keys in a stable, portable way
// - Provide equality and hashing semantics for deduplication
// - Name keys in configuration files (serde, variant names)
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (keys held)
//         ↓
//    ControlState (left/up/right/down/fire)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is the same physical key on QWERTY and AZERTY layouts.
///
/// Variant names double as the key names accepted in the `[controls]`
/// section of the configuration file (`"ArrowLeft"`, `"KeyW"`, `"Space"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Left or right Shift
    Shift,

    /// Left or right Control
    Control,

    /// Fallback for keys not mapped by the input layer.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level keyboard event from the platform layer.
///
/// Only the two transitions matter to the game: a key going down and a
/// key coming back up. OS key-repeat is filtered before events are
/// created, so a held key produces exactly one `KeyDown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Unrecognized or unsupported event. Ignored by the input system.
    Unidentified,
}

impl InputEvent {
    /// Returns the key carried by the event, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => Some(*key),
            Self::Unidentified => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
