//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) and softbuffer (pixels on screen) with
// the game's core thread via crossbeam channels.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  InputProcessor          │    │  InputSystem     │
//  │   ├─ Converts Winit      │    │  ↓               │
//  │   └─ Tracks held keys    │    │  GameDriver      │
//  │   ↓                      │    │  ↓               │
//  │  InputBuffer             │    │  DrawList        │
//  │   ↓                      │    └──────────────────┘
//  │  RedrawRequested         │         ↑        │
//  │   ├─ flush ──────────────┼─────────┘        │
//  │   └─ present ◄───────────┼──────────────────┘
//  │      (Canvas → softbuffer)    CoreEvent::Present
//  └──────────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent as one Frame message, even when empty
//    → Core runs one tick per Frame
//    → Latest finished DrawList is rasterized and presented
// ```
//
// Notes:
// - The window is created lazily in `resumed()`, and its inner size at
//   that point becomes the playfield. The window is not resizable.
// - If the core thread dies, the platform logs a warning and keeps
//   running so the window can still be closed.
// - Losing focus releases every held key, since the matching key-up
//   events will never be delivered to this window.
// - The GAME OVER banner is part of the core's frame; the platform only
//   mirrors round changes in the window title.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== Standard Library Imports ============================================

use std::num::NonZeroU32;
use std::rc::Rc;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use softbuffer::{Context, Surface};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Fullscreen, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::WindowConfig;
use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::render::{Canvas, DrawList};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window manager, input aggregator and frame presenter.
///
/// Runs on the main thread (Winit requirement on macOS/iOS). Not Send or
/// Sync; all communication with the core thread goes through channels.
pub(crate) struct Platform {
    settings: WindowConfig,

    /// OS window handle (None until `resumed()` called).
    window: Option<Rc<Window>>,
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,

    /// Key events since the last redraw.
    buffer: InputBuffer,
    input_processor: InputProcessor,

    event_sender: Sender<PlatformEvent>,
    core_receiver: Receiver<CoreEvent>,

    /// Most recent frame from the core; re-presented until a newer one
    /// arrives.
    latest_frame: Option<DrawList>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens in `resumed()`.
    pub fn new(
        event_sender: Sender<PlatformEvent>,
        core_receiver: Receiver<CoreEvent>,
        settings: WindowConfig,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            settings,
            window: None,
            surface: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            core_receiver,
            latest_frame: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn window_attributes(&self) -> WindowAttributes {
        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_resizable(false);

        if self.settings.fullscreen {
            attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
        } else {
            attrs.with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height))
        }
    }

    /// Creates the window and its softbuffer surface, then reports the
    /// drawable size to the core.
    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let window = Rc::new(event_loop.create_window(self.window_attributes())?);
        let context = Context::new(window.clone())?;
        let mut surface = Surface::new(&context, window.clone())?;

        let size = window.inner_size();
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            surface.resize(width, height)?;
        }

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        if self
            .event_sender
            .send(PlatformEvent::SurfaceReady {
                width: size.width,
                height: size.height,
            })
            .is_err()
        {
            warn!(target: "platform", "Channel disconnected, surface size not delivered");
        }

        window.request_redraw();
        self.window = Some(window);
        self.surface = Some(surface);
        Ok(())
    }

    fn resize_surface(&mut self, size: PhysicalSize<u32>) {
        let (Some(surface), Some(width), Some(height)) = (
            self.surface.as_mut(),
            NonZeroU32::new(size.width),
            NonZeroU32::new(size.height),
        ) else {
            return;
        };

        if let Err(e) = surface.resize(width, height) {
            error!(target: "platform", "Surface resize failed: {}", e);
        }
    }

    /// Sends this frame's key events to the core thread.
    ///
    /// A Frame is sent on every redraw, empty or not, because each one
    /// drives exactly one simulation tick. If the channel is disconnected
    /// the events are dropped with a warning.
    fn flush_input_buffer(&mut self) {
        let events = self.buffer.drain();
        let count = events.len();

        if count > 0 {
            trace!(target: "platform::input", "Flushing {} key events", count);
        }

        if self.event_sender.send(PlatformEvent::Frame(events)).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                count
            );
        }
    }

    /// Takes everything the core has sent since the last redraw.
    fn drain_core_events(&mut self) {
        loop {
            match self.core_receiver.try_recv() {
                Ok(CoreEvent::Present(list)) => self.latest_frame = Some(list),
                Ok(CoreEvent::GameOver { round }) => self.announce_game_over(round),
                Ok(CoreEvent::RoundStarted) => self.restore_title(),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    trace!(target: "platform", "Core channel closed");
                    break;
                }
            }
        }
    }

    fn announce_game_over(&self, round: u32) {
        warn!(target: "platform", "Game over (round {})", round);
        if let Some(window) = &self.window {
            window.set_title(&format!("{} - Game Over ({})", self.settings.title, round));
        }
    }

    fn restore_title(&self) {
        debug!(target: "platform", "New round started");
        if let Some(window) = &self.window {
            window.set_title(&self.settings.title);
        }
    }

    /// Rasterizes the latest frame into the softbuffer and shows it.
    /// Surface errors skip the frame.
    fn present_latest(&mut self) {
        let (Some(window), Some(surface), Some(frame)) =
            (&self.window, self.surface.as_mut(), &self.latest_frame)
        else {
            return;
        };

        let size = window.inner_size();
        let mut buffer = match surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(e) => {
                error!(target: "platform", "Frame buffer unavailable: {}", e);
                return;
            }
        };

        match Canvas::new(&mut buffer, size.width as usize, size.height as usize) {
            Some(mut canvas) => canvas.execute(frame),
            None => {
                debug!(target: "platform", "Frame buffer does not match window size; skipping");
                return;
            }
        }

        if let Err(e) = buffer.present() {
            error!(target: "platform", "Present failed: {}", e);
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            error!(target: "platform", "{}", e);
            let _ = self.event_sender.send(PlatformEvent::WindowClosed);
            event_loop.exit();
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Key event ignored");
                }
            }

            WindowEvent::Focused(false) => {
                let released = self.input_processor.release_all();
                if !released.is_empty() {
                    debug!(
                        target: "platform::input",
                        "Focus lost, releasing {} held keys",
                        released.len()
                    );
                    self.buffer.extend(released);
                }
            }

            WindowEvent::Resized(size) => self.resize_surface(*size),

            WindowEvent::RedrawRequested => {
                // Frame boundary
                self.flush_input_buffer();
                self.drain_core_events();
                self.present_latest();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
