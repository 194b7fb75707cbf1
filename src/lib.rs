//=========================================================================
// Asteroid Field - Library Root
//
// This crate defines the public API surface of the Asteroid Field game.
//
// Responsibilities:
// - Expose the runtime facade (`Engine`, `EngineBuilder`)
// - Expose the configuration types and the simulation for reuse/testing
// - Keep the OS integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use asteroid_field::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run().expect("platform failure");
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the game itself (input, simulation, draw lists) and the
// platform bridge. `config` holds the TOML-backed tunables.
//
pub mod config;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit window, input translation and softbuffer
// presentation. `engine` wires it to the core thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::PlatformError;
pub use engine::{Engine, EngineBuilder};
