//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level held-key tracking.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys held) → query
//
// A key stays held from its KeyDown until its KeyUp, across any number of
// ticks. A press and release inside one tick leaves the key up.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// The set of keys currently held.
#[derive(Debug, Default)]
pub struct StateTracker {
    keys_down: HashSet<KeyCode>,
}

impl StateTracker {
    /// Creates a new state tracker with no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Event Processing -------------------------------------------------

    /// Applies input events in order.
    pub(super) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match event {
                InputEvent::KeyDown(key) => {
                    self.keys_down.insert(*key);
                }
                InputEvent::KeyUp(key) => {
                    self.keys_down.remove(key);
                }
                InputEvent::Unidentified => {}
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
