//=========================================================================
// Game Configuration
//=========================================================================
//
// Tunables for the window, world generation, ship handling, collision
// scope, game-over behavior and key bindings, loaded from TOML.
//
// Every section is `#[serde(default)]`, so a file only needs the values
// it changes:
//
// ```toml
// [window]
// width = 1024
// height = 768
//
// [ship]
// turn_rate = 0.08
//
// [collision]
// ship_check = "all-asteroids"
//
// [game_over]
// wait_for_fire = false
//
// [controls]
// up = ["ArrowUp", "KeyW"]
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::input::event::KeyCode;

//=== ConfigError =========================================================

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or type error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Well-formed but unusable values
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub ship: ShipConfig,
    pub collision: CollisionConfig,
    pub game_over: GameOverConfig,
    pub controls: ControlsConfig,
}

impl GameConfig {
    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as pretty TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Rejects values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        //--- Window -------------------------------------------------------
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window width and height must be non-zero");
        }

        //--- World --------------------------------------------------------
        let world = &self.world;
        let finite = [
            ("world.star_max_radius", world.star_max_radius),
            ("world.asteroid_min_radius", world.asteroid_min_radius),
            ("world.asteroid_max_radius", world.asteroid_max_radius),
            ("world.asteroid_max_speed", world.asteroid_max_speed),
            ("ship.radius", self.ship.radius),
            ("ship.acceleration", self.ship.acceleration),
            ("ship.turn_rate", self.ship.turn_rate),
            ("ship.bullet_speed", self.ship.bullet_speed),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite", name)));
        }

        if world.star_max_radius <= 0.0 {
            return invalid("world.star_max_radius must be positive");
        }
        if world.asteroid_min_radius <= 0.0 {
            return invalid("world.asteroid_min_radius must be positive");
        }
        if world.asteroid_min_radius >= world.asteroid_max_radius {
            return invalid("world.asteroid_min_radius must be below world.asteroid_max_radius");
        }
        if world.asteroid_max_speed < 0.0 {
            return invalid("world.asteroid_max_speed must not be negative");
        }

        //--- Ship ---------------------------------------------------------
        let ship = &self.ship;
        if ship.radius <= 0.0 {
            return invalid("ship.radius must be positive");
        }
        if !(0.0..=1.0).contains(&ship.friction) {
            return invalid("ship.friction must be within [0, 1]");
        }
        if ship.fire_cooldown == 0 {
            return invalid("ship.fire_cooldown must be at least 1");
        }
        if ship.bullet_speed <= 0.0 {
            return invalid("ship.bullet_speed must be positive");
        }

        Ok(())
    }
}

//=== WindowConfig ========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Borderless fullscreen on the current monitor; width/height ignored.
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Asteroid Field".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

//=== WorldConfig =========================================================

/// World generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub star_count: usize,
    /// Star radii are drawn from `[0, star_max_radius)`.
    pub star_max_radius: f32,
    pub asteroid_count: usize,
    /// Asteroid radii are drawn from `[asteroid_min_radius, asteroid_max_radius)`.
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    /// Each velocity component is drawn from `[-max, max)`.
    pub asteroid_max_speed: f32,
    /// Fixed RNG seed; random each run when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            star_count: 100,
            star_max_radius: 2.0,
            asteroid_count: 10,
            asteroid_min_radius: 30.0,
            asteroid_max_radius: 50.0,
            asteroid_max_speed: 1.0,
            seed: None,
        }
    }
}

//=== ShipConfig ==========================================================

/// Ship handling. Rates are per tick, angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub radius: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub turn_rate: f32,
    /// Ticks between shots while fire is held.
    pub fire_cooldown: u32,
    pub bullet_speed: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            acceleration: 0.1,
            friction: 0.99,
            turn_rate: 0.05,
            fire_cooldown: 15,
            bullet_speed: 5.0,
        }
    }
}

//=== CollisionConfig =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub ship_check: ShipCollisionScope,
}

/// Which asteroids can destroy the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShipCollisionScope {
    /// Only the first asteroid left after bullet hits are removed.
    #[default]
    FirstAsteroid,

    /// Every asteroid.
    AllAsteroids,
}

//=== GameOverConfig ======================================================

/// What happens after the ship is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOverConfig {
    /// Freeze the field behind a GAME OVER banner until fire is pressed
    /// again. When off, the next tick starts a new round.
    pub wait_for_fire: bool,
}

impl Default for GameOverConfig {
    fn default() -> Self {
        Self {
            wait_for_fire: true,
        }
    }
}

//=== ControlsConfig ======================================================

/// Keys bound to each control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub left: Vec<KeyCode>,
    pub up: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub fire: Vec<KeyCode>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            left: vec![KeyCode::ArrowLeft],
            up: vec![KeyCode::ArrowUp],
            right: vec![KeyCode::ArrowRight],
            down: vec![KeyCode::ArrowDown],
            fire: vec![KeyCode::Space],
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    //=====================================================================
    // Defaults
    //=====================================================================

    #[test]
    fn defaults_match_classic_tuning() {
        let config = GameConfig::default();

        assert_eq!(config.world.star_count, 100);
        assert_eq!(config.world.asteroid_count, 10);
        assert_eq!(config.world.asteroid_min_radius, 30.0);
        assert_eq!(config.world.asteroid_max_radius, 50.0);
        assert_eq!(config.ship.radius, 20.0);
        assert_eq!(config.ship.acceleration, 0.1);
        assert_eq!(config.ship.friction, 0.99);
        assert_eq!(config.ship.turn_rate, 0.05);
        assert_eq!(config.ship.fire_cooldown, 15);
        assert_eq!(config.ship.bullet_speed, 5.0);
        assert_eq!(config.collision.ship_check, ShipCollisionScope::FirstAsteroid);
        assert!(config.game_over.wait_for_fire);
        assert!(config.validate().is_ok());
    }

    //=====================================================================
    // Parsing
    //=====================================================================

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_sections_fall_back_to_defaults() {
        let config = GameConfig::from_toml(
            r#"
            [window]
            width = 640

            [ship]
            turn_rate = 0.1

            [collision]
            ship_check = "all-asteroids"

            [controls]
            fire = ["Space", "Enter"]
            "#,
        )
        .unwrap();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.ship.turn_rate, 0.1);
        assert_eq!(config.ship.friction, 0.99);
        assert_eq!(config.collision.ship_check, ShipCollisionScope::AllAsteroids);
        assert_eq!(config.controls.fire, vec![KeyCode::Space, KeyCode::Enter]);
        assert_eq!(config.controls.left, vec![KeyCode::ArrowLeft]);
    }

    #[test]
    fn seed_is_optional() {
        let config = GameConfig::from_toml("[world]\nseed = 42").unwrap();
        assert_eq!(config.world.seed, Some(42));
        assert_eq!(GameConfig::default().world.seed, None);
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = GameConfig::from_toml("[window\nwidth = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_scope_is_parse_error() {
        let err = GameConfig::from_toml("[collision]\nship_check = \"nearest\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    //=====================================================================
    // Validation
    //=====================================================================

    #[test]
    fn inverted_radius_range_rejected() {
        let err = GameConfig::from_toml(
            "[world]\nasteroid_min_radius = 50.0\nasteroid_max_radius = 30.0",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_window_rejected() {
        let mut config = GameConfig::default();
        config.window.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_cooldown_rejected() {
        let mut config = GameConfig::default();
        config.ship.fire_cooldown = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn friction_above_one_rejected() {
        let mut config = GameConfig::default();
        config.ship.friction = 1.01;
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_values_rejected() {
        let mut config = GameConfig::default();
        config.ship.bullet_speed = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.world.asteroid_max_speed = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn infinite_asteroid_radius_rejected() {
        let err = GameConfig::from_toml("[world]\nasteroid_max_radius = inf\nseed = 1").unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("asteroid_max_radius"), "{}", msg),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn infinite_values_rejected() {
        let cases: [(&str, fn(&mut GameConfig)); 6] = [
            ("star_max_radius", |c| c.world.star_max_radius = f32::INFINITY),
            ("asteroid_min_radius", |c| c.world.asteroid_min_radius = f32::INFINITY),
            ("asteroid_max_radius", |c| c.world.asteroid_max_radius = f32::INFINITY),
            ("asteroid_max_speed", |c| c.world.asteroid_max_speed = f32::INFINITY),
            ("ship.radius", |c| c.ship.radius = f32::INFINITY),
            ("bullet_speed", |c| c.ship.bullet_speed = f32::INFINITY),
        ];

        for (name, apply) in cases {
            let mut config = GameConfig::default();
            apply(&mut config);
            match config.validate() {
                Err(ConfigError::Invalid(msg)) => assert!(msg.contains(name), "{}: {}", name, msg),
                other => panic!("{} = inf accepted: {:?}", name, other),
            }
        }
    }

    #[test]
    fn negative_infinity_speed_rejected() {
        let mut config = GameConfig::default();
        config.world.asteroid_max_speed = f32::NEG_INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn game_over_section_parses() {
        let config = GameConfig::from_toml("[game_over]\nwait_for_fire = false").unwrap();
        assert!(!config.game_over.wait_for_fire);
    }

    //=====================================================================
    // File IO
    //=====================================================================

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[world]\nasteroid_count = 3\nseed = 7").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.world.asteroid_count, 3);
        assert_eq!(config.world.seed, Some(7));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");

        let mut config = GameConfig::default();
        config.window.title = "Test".to_string();
        config.collision.ship_check = ShipCollisionScope::AllAsteroids;
        config.controls.up.push(KeyCode::KeyW);
        config.save(&path).unwrap();

        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }
}
