//=========================================================================
// Input System
//
// Turns the raw key events received from the platform each tick into the
// ControlState the simulation reads.
//
// Responsibilities:
// - Track which keys are held across ticks (StateTracker)
// - Resolve held keys to ship controls (KeyBindings)
// - Produce one ControlState snapshot per tick
//
// Notes:
// Owned and driven by the CoreSystemsOrchestrator on the logic thread.
// A control is held while any key bound to it is held.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod control;
pub mod event;
pub mod key_bindings;
pub mod state_tracker;

//=== Internal Imports ====================================================
use control::ControlState;
use event::InputEvent;
use key_bindings::KeyBindings;
use state_tracker::StateTracker;

//=== External Crates =====================================================
use log::debug;

//=== InputSystem =========================================================

pub struct InputSystem {
    tracker: StateTracker,
    bindings: KeyBindings,
    controls: ControlState,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            tracker: StateTracker::new(),
            bindings,
            controls: ControlState::RELEASED,
        }
    }

    //--- process_frame() --------------------------------------------------
    //
    // Consumes every input batch received since the previous tick, in
    // arrival order, and recomputes the control snapshot.
    //
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) -> ControlState {
        for batch in batches {
            self.tracker.process_events(batch);
        }

        let mut controls = ControlState::RELEASED;
        for key in self.tracker.keys_down() {
            if let Some(control) = self.bindings.control_for(key) {
                controls.set(control, true);
            }
        }

        if controls != self.controls {
            debug!(target: "input", "Controls changed: {} -> {}", self.controls, controls);
        }
        self.controls = controls;
        controls
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use control::Control;
    use event::KeyCode;

    //--- Test Helpers -----------------------------------------------------
    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown(key)
    }
    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp(key)
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn held_key_sets_control_until_released() {
        let mut system = InputSystem::default();

        let controls = system.process_frame(&[vec![key_down(KeyCode::ArrowUp)]]);
        assert_eq!(controls, ControlState::holding(&[Control::Up]));

        // No new events: still held
        let controls = system.process_frame(&[]);
        assert!(controls.up);

        let controls = system.process_frame(&[vec![key_up(KeyCode::ArrowUp)]]);
        assert_eq!(controls, ControlState::RELEASED);
    }

    #[test]
    fn batches_are_applied_in_order() {
        let mut system = InputSystem::default();

        let controls = system.process_frame(&[
            vec![key_down(KeyCode::Space)],
            vec![key_up(KeyCode::Space), key_down(KeyCode::ArrowLeft)],
        ]);

        assert!(!controls.fire);
        assert!(controls.left);
    }

    #[test]
    fn tap_within_one_tick_is_not_held() {
        let mut system = InputSystem::default();

        let controls =
            system.process_frame(&[vec![key_down(KeyCode::Space), key_up(KeyCode::Space)]]);

        assert!(!controls.fire);
        assert_eq!(system.process_frame(&[]), ControlState::RELEASED);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut system = InputSystem::default();
        let controls = system.process_frame(&[vec![key_down(KeyCode::KeyQ)]]);
        assert_eq!(controls, ControlState::RELEASED);

        // A held unbound key does not mask bound ones
        let controls = system.process_frame(&[vec![key_down(KeyCode::ArrowRight)]]);
        assert_eq!(controls, ControlState::holding(&[Control::Right]));
    }

    #[test]
    fn control_held_while_any_bound_key_is_down() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::KeyW, Control::Up);
        let mut system = InputSystem::new(bindings);

        system.process_frame(&[vec![key_down(KeyCode::ArrowUp), key_down(KeyCode::KeyW)]]);
        let controls = system.process_frame(&[vec![key_up(KeyCode::ArrowUp)]]);
        assert!(controls.up, "KeyW still holds Up");

        let controls = system.process_frame(&[vec![key_up(KeyCode::KeyW)]]);
        assert!(!controls.up);
    }

    #[test]
    fn simultaneous_controls() {
        let mut system = InputSystem::default();
        let controls = system.process_frame(&[vec![
            key_down(KeyCode::ArrowLeft),
            key_down(KeyCode::ArrowRight),
            key_down(KeyCode::ArrowUp),
            key_down(KeyCode::ArrowDown),
            key_down(KeyCode::Space),
        ]]);

        for control in Control::ALL {
            assert!(controls.is_held(control));
        }
        assert_eq!(system.process_frame(&[]), controls);
    }
}
