//=========================================================================
// World
//=========================================================================
//
// Everything a round is played with: playfield bounds, stars, asteroids
// and the ship (which owns the bullets).
//
// Generation draws from the caller's RNG so a seeded driver produces the
// same world every time.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== Internal Dependencies ===============================================

use super::entity::{Asteroid, Ship, Star};
use super::math::{Bounds, Vector2};
use crate::config::{ShipConfig, WorldConfig};

//=== World ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub bounds: Bounds,
    pub stars: Vec<Star>,
    pub asteroids: Vec<Asteroid>,
    pub ship: Ship,
}

impl World {
    /// A world with a centered ship and nothing else.
    pub fn empty(bounds: Bounds, ship: &ShipConfig) -> Self {
        Self {
            bounds,
            stars: Vec::new(),
            asteroids: Vec::new(),
            ship: Ship::new(bounds.center(), ship),
        }
    }

    /// Scatters stars and asteroids uniformly over the playfield and puts
    /// a fresh ship at the center.
    pub fn generate<R: Rng + ?Sized>(
        bounds: Bounds,
        world: &WorldConfig,
        ship: &ShipConfig,
        rng: &mut R,
    ) -> Self {
        let stars = (0..world.star_count)
            .map(|_| Star {
                position: random_position(bounds, rng),
                radius: rng.gen_range(0.0..world.star_max_radius),
            })
            .collect();

        let asteroids = (0..world.asteroid_count)
            .map(|_| Asteroid {
                position: random_position(bounds, rng),
                radius: rng.gen_range(world.asteroid_min_radius..world.asteroid_max_radius),
                velocity: Vector2::new(
                    random_component(world.asteroid_max_speed, rng),
                    random_component(world.asteroid_max_speed, rng),
                ),
            })
            .collect();

        Self {
            bounds,
            stars,
            asteroids,
            ship: Ship::new(bounds.center(), ship),
        }
    }
}

//=== Generation Helpers ==================================================

fn random_position<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Vector2 {
    Vector2::new(
        rng.gen::<f32>() * bounds.width,
        rng.gen::<f32>() * bounds.height,
    )
}

/// Uniform in `[-max, max)`.
fn random_component<R: Rng + ?Sized>(max: f32, rng: &mut R) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0 * max
}

//=========================================================================
// Unit Tests
//=========================================================================
