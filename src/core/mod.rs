//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the game systems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the InputSystem and the GameDriver
// - Receive platform events over a crossbeam channel
// - Run exactly one simulation tick per display frame
// - Send finished frames and game-over notices back to the platform
//
// Notes:
// The orchestrator runs independently from the platform layer and only
// talks to it through message passing. The tick rate follows the
// platform's redraw rate; there is no fixed timestep. The GameDriver is
// created once the platform reports its surface size, since that size is
// the playfield.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod game;
pub mod input;
pub mod platform_bridge;
pub mod render;

//=== Standard Library Imports ============================================
use std::thread;

//=== External Crates =====================================================
use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, info, trace};

//=== Internal Modules ====================================================
use crate::config::GameConfig;
use game::{math::Bounds, GameDriver, TickOutcome};
use input::{key_bindings::KeyBindings, InputSystem};
use platform_bridge::{CoreEvent, EventCollector, PlatformEvent, TickControl};
use render::DrawList;

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    config: GameConfig,
    input_system: InputSystem,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------
    //
    // Initializes the input system but does not yet start the logic thread.
    //
    pub fn new(config: GameConfig) -> Self {
        let bindings = KeyBindings::from_config(&config.controls);
        Self {
            input_system: InputSystem::new(bindings),
            config,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each iteration:
    //  1. Blocks for platform events (EventCollector)
    //  2. Creates the game once the surface size is known
    //  3. Digests input into a ControlState
    //  4. Ticks the game and ships the frame back
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        sender: Sender<CoreEvent>,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run(receiver, sender))
    }

    fn run(mut self, receiver: Receiver<PlatformEvent>, sender: Sender<CoreEvent>) {
        let mut collector = EventCollector::new(receiver);
        let mut driver: Option<GameDriver> = None;
        let mut frame = DrawList::new();

        loop {
            //--- Step 1: Gather platform events ----------------------------
            if collector.collect_frame() == TickControl::Exit {
                info!("Core thread exiting.");
                break;
            }

            //--- Step 2: Create the game on first surface -----------------
            if let Some((width, height)) = collector.take_surface() {
                if driver.is_none() {
                    let bounds = Bounds::new(width as f32, height as f32);
                    info!("Starting game on a {}x{} playfield", width, height);
                    driver = Some(GameDriver::new(bounds, &self.config));
                } else {
                    debug!("Surface reported again ({}x{}); playfield unchanged", width, height);
                }
            }

            if collector.frames() == 0 {
                continue;
            }

            //--- Step 3: Update input --------------------------------------
            let controls = self.input_system.process_frame(collector.batches());

            //--- Step 4: Tick ----------------------------------------------
            let Some(driver) = driver.as_mut() else {
                trace!("Frame before surface; skipping tick");
                continue;
            };

            let notice = match driver.tick(controls, &mut frame) {
                TickOutcome::Continue => None,
                TickOutcome::GameOver { round } => Some(CoreEvent::GameOver { round }),
                TickOutcome::Restarted => Some(CoreEvent::RoundStarted),
            };
            if let Some(event) = notice {
                if !Self::notify(&sender, event) {
                    break;
                }
            }
            if !Self::send_frame(&sender, CoreEvent::Present(std::mem::take(&mut frame))) {
                break;
            }
        }
    }

    //--- send_frame() -----------------------------------------------------
    //
    // Never blocks the logic thread. A full queue drops the frame; returns
    // false only when the platform side is gone.
    //
    fn send_frame(sender: &Sender<CoreEvent>, event: CoreEvent) -> bool {
        match sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!("Platform queue full; dropping frame");
                true
            }
            Err(TrySendError::Disconnected(_)) => {
                info!("Platform disconnected; core thread exiting.");
                false
            }
        }
    }

    //--- notify() ---------------------------------------------------------
    //
    // Round notices are rare and must arrive, so this waits for room in
    // the queue. Returns false when the platform side is gone.
    //
    fn notify(sender: &Sender<CoreEvent>, event: CoreEvent) -> bool {
        if sender.send(event).is_err() {
            info!("Platform disconnected; core thread exiting.");
            return false;
        }
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
