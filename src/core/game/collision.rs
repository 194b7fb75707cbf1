//=========================================================================
// Collision Resolver
//=========================================================================
//
// Runs once per tick after everything has moved.
//
// Phases:
//   1. Mark:  each bullet, in order, finds the first still-intact asteroid
//             whose radius contains it. Both are marked doomed.
//   2. Apply: bullets and asteroids are rebuilt without the doomed ones,
//             order preserved.
//   3. Ship:  the ship is tested against the surviving asteroids selected
//             by `ShipCollisionScope`.
//
// Marking before removing means no entity is tested after it has been
// destroyed, and indices never shift mid-scan.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::entity::Asteroid;
use super::math::Vector2;
use super::world::World;
use crate::config::ShipCollisionScope;

//=== CollisionReport =====================================================

/// What one resolver pass destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    pub bullets_destroyed: usize,
    pub asteroids_destroyed: usize,
    pub ship_destroyed: bool,
}

//=== resolve() ===========================================================

pub fn resolve(world: &mut World, scope: ShipCollisionScope) -> CollisionReport {
    //--- Phase 1: mark ----------------------------------------------------
    let mut bullet_doomed = vec![false; world.ship.bullets.len()];
    let mut asteroid_doomed = vec![false; world.asteroids.len()];

    for (bullet, bullet_hit) in world.ship.bullets.iter().zip(bullet_doomed.iter_mut()) {
        let target = world
            .asteroids
            .iter()
            .zip(asteroid_doomed.iter())
            .position(|(asteroid, &doomed)| !doomed && overlaps(bullet.position, asteroid));

        if let Some(index) = target {
            *bullet_hit = true;
            asteroid_doomed[index] = true;
        }
    }

    //--- Phase 2: apply ---------------------------------------------------
    let bullets_destroyed = bullet_doomed.iter().filter(|&&doomed| doomed).count();
    let asteroids_destroyed = asteroid_doomed.iter().filter(|&&doomed| doomed).count();

    if bullets_destroyed > 0 {
        world.ship.bullets = retain_unmarked(std::mem::take(&mut world.ship.bullets), &bullet_doomed);
        world.asteroids = retain_unmarked(std::mem::take(&mut world.asteroids), &asteroid_doomed);
        log::trace!(
            target: "game",
            "Collision pass destroyed {} bullet(s), {} asteroid(s)",
            bullets_destroyed,
            asteroids_destroyed
        );
    }

    //--- Phase 3: ship ----------------------------------------------------
    let candidates = match scope {
        ShipCollisionScope::FirstAsteroid => 1,
        ShipCollisionScope::AllAsteroids => world.asteroids.len(),
    };
    let ship_destroyed = world
        .asteroids
        .iter()
        .take(candidates)
        .any(|asteroid| overlaps(world.ship.position, asteroid));

    CollisionReport {
        bullets_destroyed,
        asteroids_destroyed,
        ship_destroyed,
    }
}

//=== Helpers =============================================================

/// Center-distance test against the asteroid's radius only.
fn overlaps(point: Vector2, asteroid: &Asteroid) -> bool {
    point.distance(asteroid.position) < asteroid.radius
}

fn retain_unmarked<T>(items: Vec<T>, doomed: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(doomed)
        .filter_map(|(item, &doomed)| (!doomed).then_some(item))
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================
