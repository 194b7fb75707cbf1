//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input_batches → TickControl
//
// Blocks until the platform sends something, then drains whatever else
// is already queued (bounded, so a flooded queue cannot starve the tick).
// Frames that piled up while the core was busy are merged into one tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events with bounded polling and batch extraction.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
    frames: usize,
    surface: Option<(u32, u32)>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
            frames: 0,
            surface: None,
        }
    }

    /// Waits for the next platform event, then drains the backlog.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        self.frames = 0;

        let first = match self.receiver.recv() {
            Ok(event) => event,
            Err(_) => return TickControl::Exit,
        };
        if self.handle_event(first) == TickControl::Exit {
            return TickControl::Exit;
        }

        let mut drained = 1;
        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        } else if self.frames > 1 {
            debug!("Merged {} queued frames into one tick", self.frames);
        }

        TickControl::Continue
    }

    /// Returns collected input batches for this frame, in arrival order.
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Number of `Frame` messages seen by the last `collect_frame`.
    pub(crate) fn frames(&self) -> usize {
        self.frames
    }

    /// Surface size reported since the last call, if any.
    pub(crate) fn take_surface(&mut self) -> Option<(u32, u32)> {
        self.surface.take()
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::SurfaceReady { width, height } => {
                self.surface = Some((width, height));
                TickControl::Continue
            }
            PlatformEvent::Frame(batch) => {
                self.frames += 1;
                if !batch.is_empty() {
                    self.input_batches.push(batch);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
