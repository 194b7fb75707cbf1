//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform ↔ core interface types (events and errors).
//
// Defines the contract for communication between the platform (main)
// thread and the core (logic) thread:
//
//   Platform ──PlatformEvent──► Core     surface size, per-frame input, close
//   Platform ◄──CoreEvent────── Core     frames to present, round changes
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::error::EventLoopError;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;
use crate::core::render::DrawList;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Drawing surface created. Its size becomes the playfield size.
    SurfaceReady { width: u32, height: u32 },

    /// One display refresh worth of input. Sent on every redraw, empty or
    /// not; each one drives one simulation tick.
    Frame(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Events sent from core back to platform.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoreEvent {
    /// A finished frame to rasterize and show.
    Present(DrawList),

    /// The ship was destroyed; the finished field is shown under a
    /// GAME OVER banner until the next round starts.
    GameOver { round: u32 },

    /// A fresh world replaced the finished one.
    RoundStarted,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),

    /// The OS refused to create the window.
    #[error("Window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    /// Frame buffer setup or presentation failed.
    #[error("Surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}
