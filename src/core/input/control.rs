//=========================================================================
// Controls & Control State
//=========================================================================
//
// The five ship controls and the per-tick snapshot of which are held.
//
// Controls: Semantic commands bound to physical keys (see KeyBindings).
// ControlState: What the simulation reads each tick. Built once per tick
// by the InputSystem and handed to the game by value.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Control =============================================================

/// A ship control.
///
/// The simulation never sees keys, only controls. Several keys may be
/// bound to one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Rotate counter-clockwise.
    Left,

    /// Forward thrust.
    Up,

    /// Rotate clockwise.
    Right,

    /// Reverse thrust.
    Down,

    /// Shoot a bullet (subject to cooldown).
    Fire,
}

impl Control {
    /// Every control, in a stable order.
    pub const ALL: [Control; 5] = [
        Control::Left,
        Control::Up,
        Control::Right,
        Control::Down,
        Control::Fire,
    ];
}

//=== ControlState ========================================================

/// Which controls are held during the current tick.
///
/// Five independent booleans. `Default` is everything released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub left: bool,
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub fire: bool,
}

impl ControlState {
    /// Nothing held.
    pub const RELEASED: Self = Self {
        left: false,
        up: false,
        right: false,
        down: false,
        fire: false,
    };

    /// Returns a state with exactly the given controls held.
    pub fn holding(controls: &[Control]) -> Self {
        let mut state = Self::RELEASED;
        for &control in controls {
            state.set(control, true);
        }
        state
    }

    /// Sets or clears one control.
    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Left => self.left = held,
            Control::Up => self.up = held,
            Control::Right => self.right = held,
            Control::Down => self.down = held,
            Control::Fire => self.fire = held,
        }
    }

    /// Returns `true` if the control is held.
    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Up => self.up,
            Control::Right => self.right,
            Control::Down => self.down,
            Control::Fire => self.fire,
        }
    }
}

/// Compact form for logs, e.g. `[Up Fire]`.
impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let held: Vec<String> = Control::ALL
            .iter()
            .filter(|&&control| self.is_held(control))
            .map(|control| format!("{:?}", control))
            .collect();
        write!(f, "[{}]", held.join(" "))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_released() {
        assert_eq!(ControlState::default(), ControlState::RELEASED);
        for control in Control::ALL {
            assert!(!ControlState::default().is_held(control));
        }
    }

    #[test]
    fn set_and_clear_each_control_independently() {
        for control in Control::ALL {
            let mut state = ControlState::RELEASED;
            state.set(control, true);
            assert!(state.is_held(control));

            let others = Control::ALL.iter().filter(|&&c| c != control);
            for &other in others {
                assert!(!state.is_held(other), "{:?} leaked into {:?}", control, other);
            }

            state.set(control, false);
            assert_eq!(state, ControlState::RELEASED);
        }
    }

    #[test]
    fn holding_builds_state() {
        let state = ControlState::holding(&[Control::Up, Control::Fire]);
        assert!(state.up && state.fire);
        assert!(!state.left && !state.right && !state.down);
    }

    #[test]
    fn display_lists_held_controls() {
        let state = ControlState::holding(&[Control::Left, Control::Fire]);
        assert_eq!(state.to_string(), "[Left Fire]");
        assert_eq!(ControlState::RELEASED.to_string(), "[]");
    }
}
