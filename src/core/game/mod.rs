//=========================================================================
// Game Driver
//
// Runs the simulation one tick at a time and records what to draw.
//
// Responsibilities:
// - Own the World and the RNG used to (re)generate it
// - Advance every entity in a fixed order each tick
// - Resolve collisions and end the round when the ship is destroyed
// - Hold the finished round on screen until the player restarts
//
// Tick order while Running:
// ```text
// clear → stars → ship.update → bullets + ship → asteroids (update, draw)
//       → collision::resolve → [ship destroyed? → Over + GAME OVER banner]
// ```
//
// While Over the field is frozen and redrawn under the banner. Fire has to
// be released and pressed again to regenerate the world and return to
// Running; with `game_over.wait_for_fire = false` the next tick does it.
//
// Notes:
// Owned by the CoreSystemsOrchestrator on the logic thread. Nothing here
// blocks or fails; the driver only reads the ControlState it is handed.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod collision;
pub mod entity;
pub mod math;
pub mod world;

//=== External Crates =====================================================
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

//=== Internal Imports ====================================================
use crate::config::{GameConfig, ShipCollisionScope, ShipConfig, WorldConfig};
use crate::core::input::control::ControlState;
use crate::core::render::{Color, DrawList};
use collision::CollisionReport;
use entity::Entity;
use math::{Bounds, Vector2};
use world::World;

//=== Banner Layout =======================================================

const BANNER_SCALE: f32 = 8.0;
const HINT_SCALE: f32 = 3.0;
const HINT_OFFSET: f32 = 60.0;

//=== GamePhase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// The ship was destroyed; the last field stays on screen until the
    /// next round starts.
    Over,
}

//=== TickOutcome =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The ship was destroyed this tick and the driver is now `Over`.
    /// `round` counts game overs since startup.
    GameOver { round: u32 },
    /// A fresh world replaced the finished one this tick.
    Restarted,
}

//=== GameDriver ==========================================================

pub struct GameDriver {
    world: World,
    phase: GamePhase,
    round: u32,
    rng: StdRng,

    /// Set once fire is seen released while Over, so a held fire button
    /// does not skip the banner.
    restart_armed: bool,

    //--- Generation / Rules ----------------------------------------------
    world_config: WorldConfig,
    ship_config: ShipConfig,
    ship_check: ShipCollisionScope,
    wait_for_fire: bool,
}

impl GameDriver {
    //--- Construction -----------------------------------------------------
    //
    // Seeds the RNG from `world.seed` when set, otherwise from entropy, and
    // generates the first world.
    //
    pub fn new(bounds: Bounds, config: &GameConfig) -> Self {
        let mut rng = match config.world.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let world = World::generate(bounds, &config.world, &config.ship, &mut rng);

        debug!(
            target: "game",
            "World generated: {}x{}, {} stars, {} asteroids",
            bounds.width,
            bounds.height,
            world.stars.len(),
            world.asteroids.len()
        );

        Self {
            world,
            phase: GamePhase::Running,
            round: 0,
            rng,
            restart_armed: false,
            world_config: config.world.clone(),
            ship_config: config.ship.clone(),
            ship_check: config.collision.ship_check,
            wait_for_fire: config.game_over.wait_for_fire,
        }
    }

    //--- tick() -----------------------------------------------------------
    //
    // Advances the game by one tick and records the frame into `list`
    // (previous contents are discarded).
    //
    pub fn tick(&mut self, controls: ControlState, list: &mut DrawList) -> TickOutcome {
        list.reset();
        list.clear(Color::BLACK);

        match self.phase {
            GamePhase::Running => self.step(controls, list),
            GamePhase::Over => self.await_restart(controls, list),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn step(&mut self, controls: ControlState, list: &mut DrawList) -> TickOutcome {
        let world = &mut self.world;
        let bounds = world.bounds;

        for star in &world.stars {
            Entity::Star(star).draw(list);
        }

        world.ship.update(controls, &bounds);
        for bullet in &world.ship.bullets {
            Entity::Bullet(bullet).draw(list);
        }
        Entity::Ship(&world.ship).draw(list);

        for asteroid in &mut world.asteroids {
            asteroid.update(&bounds);
            Entity::Asteroid(asteroid).draw(list);
        }

        let report = collision::resolve(world, self.ship_check);
        if report.ship_destroyed {
            return self.game_over(report, list);
        }
        TickOutcome::Continue
    }

    fn game_over(&mut self, report: CollisionReport, list: &mut DrawList) -> TickOutcome {
        self.phase = GamePhase::Over;
        self.round += 1;
        self.restart_armed = false;

        warn!(
            target: "game",
            "Game over #{}: ship hit an asteroid ({} bullet(s) in flight, {} asteroid(s) left)",
            self.round,
            self.world.ship.bullets.len(),
            self.world.asteroids.len()
        );
        debug!(target: "game", "Final collision pass: {:?}", report);

        self.draw_notice(list);
        TickOutcome::GameOver { round: self.round }
    }

    /// Over: redraw the frozen field, or start the next round once fire
    /// goes from released to pressed.
    fn await_restart(&mut self, controls: ControlState, list: &mut DrawList) -> TickOutcome {
        if !controls.fire {
            self.restart_armed = true;
        }

        if !self.wait_for_fire || (self.restart_armed && controls.fire) {
            self.reset();
            self.draw_world(list);
            return TickOutcome::Restarted;
        }

        self.draw_world(list);
        self.draw_notice(list);
        TickOutcome::Continue
    }

    /// Replaces the whole world with a freshly generated one of the same size.
    fn reset(&mut self) {
        self.world = World::generate(
            self.world.bounds,
            &self.world_config,
            &self.ship_config,
            &mut self.rng,
        );
        self.phase = GamePhase::Running;
        info!(target: "game", "Round {} started", self.round + 1);
    }

    fn draw_world(&self, list: &mut DrawList) {
        let world = &self.world;
        for star in &world.stars {
            Entity::Star(star).draw(list);
        }
        for bullet in &world.ship.bullets {
            Entity::Bullet(bullet).draw(list);
        }
        Entity::Ship(&world.ship).draw(list);
        for asteroid in &world.asteroids {
            Entity::Asteroid(asteroid).draw(list);
        }
    }

    fn draw_notice(&self, list: &mut DrawList) {
        let center = self.world.bounds.center();
        list.text_centered(center, BANNER_SCALE, "GAME OVER", Color::WHITE);
        if self.wait_for_fire {
            let hint = center + Vector2::new(0.0, HINT_OFFSET);
            list.text_centered(hint, HINT_SCALE, "PRESS FIRE", Color::GRAY);
        }
    }

    //--- Query Methods ----------------------------------------------------

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Game overs since startup.
    pub fn round(&self) -> u32 {
        self.round
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
