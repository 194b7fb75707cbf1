//=========================================================================
// Key Bindings
//=========================================================================
//
// Maps physical keys to ship controls.
//
// Architecture:
//   KeyCode → HashMap → Control
//
// A key maps to at most one control; a control may have several keys.
// Keys without a binding are ignored by the input system.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    control::Control,
    event::KeyCode,
};
use crate::config::ControlsConfig;

//=== KeyBindings =========================================================

/// Key → control lookup table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Control>,
}

impl KeyBindings {
    /// Creates an empty table (no key does anything).
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Builds the table from the `[controls]` configuration section.
    ///
    /// Later entries win when the same key is listed under two controls.
    pub fn from_config(controls: &ControlsConfig) -> Self {
        let mut bindings = Self::new();
        let sections = [
            (Control::Left, &controls.left),
            (Control::Up, &controls.up),
            (Control::Right, &controls.right),
            (Control::Down, &controls.down),
            (Control::Fire, &controls.fire),
        ];

        for (control, keys) in sections {
            for &key in keys {
                bindings.bind(key, control);
            }
        }
        bindings
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to a control, replacing any previous binding of the key.
    pub fn bind(&mut self, key: KeyCode, control: Control) {
        if let Some(previous) = self.bindings.insert(key, control) {
            if previous != control {
                log::debug!("Key {:?} rebound from {:?} to {:?}", key, previous, control);
            }
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the control bound to `key`.
    pub fn control_for(&self, key: KeyCode) -> Option<Control> {
        self.bindings.get(&key).copied()
    }
}

/// Arrow keys steer and thrust, Space fires.
impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&ControlsConfig::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
