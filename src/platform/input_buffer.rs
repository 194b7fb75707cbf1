//=========================================================================
// Input Buffer
//
// Collects key events between two redraws. Acts as a transient event
// aggregator between the Platform and the core thread.
//
// Responsibilities:
// - Store incoming key events for the current frame, in order
// - Drop exact consecutive duplicates
// - Hand the frame's events over via `drain()`
//
// Notes:
// The buffer is drained on every RedrawRequested, so it only ever holds
// one frame of input.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================

pub struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 32;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling --------------------------------------------------
    //
    // Appends a key event. A repeat of the immediately preceding event is
    // ignored; non-adjacent repeats are kept.
    //
    pub fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events and leaves the buffer empty.
    //
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
