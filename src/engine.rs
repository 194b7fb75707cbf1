//=========================================================================
// Asteroid Field Engine
//
// Main entry point: wires the platform and the core thread together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config()           └─ spawns core thread
//         └─ with_channel_capacity()    runs platform
//                                       blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::platform_bridge::PlatformError;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== Constants ===========================================================

/// Finished frames waiting for the platform. Anything beyond this is
/// stale by the time it would be shown, so the core drops it instead.
const PRESENT_QUEUE_CAPACITY: usize = 4;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`GameConfig::default`]
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use asteroid_field::EngineBuilder;
/// use asteroid_field::config::GameConfig;
///
/// let mut config = GameConfig::default();
/// config.world.asteroid_count = 20;
///
/// EngineBuilder::new()
///     .with_config(config)
///     .build()
///     .run()
///     .expect("platform failure");
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            channel_capacity: 128,
        }
    }

    /// Replaces the game configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not pass [`GameConfig::validate`].
    pub fn with_config(mut self, config: GameConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("Invalid game configuration: {}", e);
        }
        self.config = config;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine ({}x{}, channel: {})",
            self.config.window.width, self.config.window.height, self.channel_capacity
        );

        Engine {
            config: self.config,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Asteroid Field runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread, one tick per frame)
///   │     └─► InputSystem, GameDriver
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling, Presenting
///
/// Communication: PlatformEvent ──► core, CoreEvent ──► platform
/// ```
pub struct Engine {
    config: GameConfig,
    channel_capacity: usize,
}

impl Engine {
    /// Starts the runtime and blocks until the window is closed.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the two channels
    /// 2. Spawns the core logic thread
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → core thread terminates
    ///
    /// # Errors
    ///
    /// Returns the [`PlatformError`] that stopped the event loop. A panic
    /// on the core thread is logged, not returned.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime");

        //--- 1. Create communication channels -----------------------------
        let (platform_tx, platform_rx) = bounded(self.channel_capacity);
        let (core_tx, core_rx) = bounded(PRESENT_QUEUE_CAPACITY);

        info!("Channels created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let window = self.config.window.clone();
        let core_handle =
            CoreSystemsOrchestrator::new(self.config).spawn_core_thread(platform_rx, core_tx);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(platform_tx, core_rx, window);
        info!("Platform initialized, entering event loop");

        let result = platform.run();
        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.config, GameConfig::default());
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_config() {
        let mut config = GameConfig::default();
        config.world.asteroid_count = 3;

        let builder = EngineBuilder::new().with_config(config.clone());
        assert_eq!(builder.config, config);
    }

    #[test]
    #[should_panic(expected = "Invalid game configuration")]
    fn builder_with_config_panics_on_invalid() {
        let mut config = GameConfig::default();
        config.ship.fire_cooldown = 0;
        EngineBuilder::new().with_config(config);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_chaining() {
        let engine = EngineBuilder::new()
            .with_channel_capacity(64)
            .with_config(GameConfig::default())
            .build();

        assert_eq!(engine.channel_capacity, 64);
        assert_eq!(engine.config.window.title, "Asteroid Field");
    }

    #[test]
    fn builder_default_trait() {
        let builder = EngineBuilder::default();
        assert_eq!(builder.channel_capacity, 128);
    }
}
