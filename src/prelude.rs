//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use asteroid_field::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::platform_bridge::PlatformError;

// Configuration
pub use crate::config::{ConfigError, GameConfig, ShipCollisionScope};

// Input
pub use crate::core::input::control::{Control, ControlState};
pub use crate::core::input::event::{InputEvent, KeyCode};
pub use crate::core::input::key_bindings::KeyBindings;

// Simulation
pub use crate::core::game::math::{Bounds, Vector2};
pub use crate::core::game::{GameDriver, GamePhase, TickOutcome};

// Rendering
pub use crate::core::render::{Canvas, Color, DrawCommand, DrawList};
