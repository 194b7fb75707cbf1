//=========================================================================
// Entities
//=========================================================================
//
// The four things that live in the playfield and how each one moves.
//
// Star:     Static backdrop dot.
// Asteroid: Drifts at constant velocity.
// Bullet:   Flies straight at constant speed. Owned by the ship.
// Ship:     Player-controlled; turns, thrusts, coasts with friction, fires.
//
// Every moving entity jump-wraps at the playfield edges after it moves
// (see `Bounds::wrap`). Drawing goes through the closed `Entity` view.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::math::{Bounds, Vector2};
use crate::config::ShipConfig;
use crate::core::input::control::ControlState;
use crate::core::render::{Color, DrawList};

//=== Drawing Constants ===================================================

/// Bullets are drawn as filled dots of this radius.
pub const BULLET_DRAW_RADIUS: f32 = 2.0;

const ASTEROID_LINE_WIDTH: f32 = 1.0;
const SHIP_LINE_WIDTH: f32 = 2.0;

//=== Star ================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vector2,
    pub radius: f32,
}

//=== Asteroid ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub position: Vector2,
    pub radius: f32,
    pub velocity: Vector2,
}

impl Asteroid {
    pub fn update(&mut self, bounds: &Bounds) {
        self.position += self.velocity;
        bounds.wrap(&mut self.position);
    }
}

//=== Bullet ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub position: Vector2,
    pub angle: f32,
    pub speed: f32,
}

impl Bullet {
    pub fn update(&mut self, bounds: &Bounds) {
        self.position += Vector2::from_angle(self.angle) * self.speed;
        bounds.wrap(&mut self.position);
    }
}

//=== Ship ================================================================

/// The player ship and every bullet it has fired.
///
/// Bullets never expire; they only leave the ship's list when they hit an
/// asteroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub position: Vector2,
    pub radius: f32,
    /// Heading in radians. 0 points along +x.
    pub angle: f32,
    pub velocity: Vector2,

    //--- Handling ---------------------------------------------------------
    pub acceleration: f32,
    pub friction: f32,
    pub turn_rate: f32,
    pub fire_cooldown: u32,
    pub bullet_speed: f32,

    //--- Weapon State -----------------------------------------------------
    /// Ticks until the next shot is allowed.
    pub shooting_cooldown: u32,
    pub bullets: Vec<Bullet>,
}

impl Ship {
    /// A ship at rest at `position`, facing +x.
    pub fn new(position: Vector2, config: &ShipConfig) -> Self {
        Self {
            position,
            radius: config.radius,
            angle: 0.0,
            velocity: Vector2::ZERO,
            acceleration: config.acceleration,
            friction: config.friction,
            turn_rate: config.turn_rate,
            fire_cooldown: config.fire_cooldown,
            bullet_speed: config.bullet_speed,
            shooting_cooldown: 0,
            bullets: Vec::new(),
        }
    }

    //--- update() ---------------------------------------------------------
    //
    // One tick: steer, thrust, friction, move, fire, then advance bullets.
    // Left beats right and up beats down when both are held.
    //
    pub fn update(&mut self, controls: ControlState, bounds: &Bounds) {
        if controls.left {
            self.angle -= self.turn_rate;
        } else if controls.right {
            self.angle += self.turn_rate;
        }

        let thrust = Vector2::from_angle(self.angle) * self.acceleration;
        if controls.up {
            self.velocity += thrust;
        } else if controls.down {
            self.velocity -= thrust;
        }

        self.velocity *= self.friction;
        self.position += self.velocity;
        bounds.wrap(&mut self.position);

        if controls.fire && self.shooting_cooldown == 0 {
            self.shoot();
            self.shooting_cooldown = self.fire_cooldown;
        }
        // Also runs on the firing tick
        self.shooting_cooldown = self.shooting_cooldown.saturating_sub(1);

        for bullet in &mut self.bullets {
            bullet.update(bounds);
        }
    }

    fn shoot(&mut self) {
        self.bullets.push(Bullet {
            position: self.position,
            angle: self.angle,
            speed: self.bullet_speed,
        });
    }

    /// Triangle outline in canvas space: nose at local `(0, -r)`, rear
    /// corners at `(±r, r)`, rotated by `angle` about the ship center.
    pub fn hull(&self) -> [Vector2; 3] {
        let r = self.radius;
        [Vector2::new(0.0, -r), Vector2::new(r, r), Vector2::new(-r, r)]
            .map(|local| self.position + local.rotated(self.angle))
    }
}

//=== Entity ==============================================================

/// Borrowed view over any drawable entity.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Star(&'a Star),
    Asteroid(&'a Asteroid),
    Bullet(&'a Bullet),
    Ship(&'a Ship),
}

impl Entity<'_> {
    /// Records this entity's shape.
    pub fn draw(&self, list: &mut DrawList) {
        match self {
            Entity::Star(star) => list.fill_circle(star.position, star.radius, Color::WHITE),
            Entity::Asteroid(asteroid) => list.stroke_circle(
                asteroid.position,
                asteroid.radius,
                ASTEROID_LINE_WIDTH,
                Color::GRAY,
            ),
            Entity::Bullet(bullet) => {
                list.fill_circle(bullet.position, BULLET_DRAW_RADIUS, Color::WHITE)
            }
            Entity::Ship(ship) => list.stroke_triangle(ship.hull(), SHIP_LINE_WIDTH, Color::WHITE),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::control::Control;
    use crate::core::render::DrawCommand;
    use approx::assert_relative_eq;

    //--- Test Helpers -----------------------------------------------------

    const BOUNDS: Bounds = Bounds::new(1000.0, 800.0);

    fn ship_at(x: f32, y: f32) -> Ship {
        Ship::new(Vector2::new(x, y), &ShipConfig::default())
    }

    fn hold(controls: &[Control]) -> ControlState {
        ControlState::holding(controls)
    }

    //=====================================================================
    // Asteroid / Bullet Movement
    //=====================================================================

    #[test]
    fn asteroid_moves_by_velocity() {
        let mut asteroid = Asteroid {
            position: Vector2::new(100.0, 100.0),
            radius: 40.0,
            velocity: Vector2::new(0.5, -0.25),
        };
        asteroid.update(&BOUNDS);
        assert_eq!(asteroid.position, Vector2::new(100.5, 99.75));
    }

    #[test]
    fn asteroid_past_right_edge_wraps_to_zero() {
        let mut asteroid = Asteroid {
            position: Vector2::new(BOUNDS.width - 1.0, 300.0),
            radius: 40.0,
            velocity: Vector2::new(2.0, 0.0),
        };
        asteroid.update(&BOUNDS);
        assert_eq!(asteroid.position.x, 0.0);
        assert_eq!(asteroid.position.y, 300.0);
    }

    #[test]
    fn asteroid_past_top_wraps_to_bottom() {
        let mut asteroid = Asteroid {
            position: Vector2::new(10.0, 0.5),
            radius: 40.0,
            velocity: Vector2::new(0.0, -1.0),
        };
        asteroid.update(&BOUNDS);
        assert_eq!(asteroid.position.y, BOUNDS.height);
    }

    #[test]
    fn bullet_advances_along_angle() {
        let mut bullet = Bullet {
            position: Vector2::new(500.0, 500.0),
            angle: 0.0,
            speed: 5.0,
        };
        bullet.update(&BOUNDS);
        assert_eq!(bullet.position, Vector2::new(505.0, 500.0));
    }

    #[test]
    fn bullet_wraps() {
        let mut bullet = Bullet {
            position: Vector2::new(2.0, 400.0),
            angle: std::f32::consts::PI,
            speed: 5.0,
        };
        bullet.update(&BOUNDS);
        assert_eq!(bullet.position.x, BOUNDS.width);
    }

    //=====================================================================
    // Ship Steering & Thrust
    //=====================================================================

    #[test]
    fn left_wins_over_right() {
        let mut ship = ship_at(100.0, 100.0);
        ship.update(hold(&[Control::Left, Control::Right]), &BOUNDS);
        assert_relative_eq!(ship.angle, -0.05);

        let mut ship = ship_at(100.0, 100.0);
        ship.update(hold(&[Control::Right]), &BOUNDS);
        assert_relative_eq!(ship.angle, 0.05);
    }

    #[test]
    fn thrust_then_friction() {
        let mut ship = ship_at(100.0, 100.0);
        ship.update(hold(&[Control::Up]), &BOUNDS);

        assert_relative_eq!(ship.velocity.x, 0.1 * 0.99);
        assert_relative_eq!(ship.velocity.y, 0.0);
        assert_relative_eq!(ship.position.x, 100.0 + 0.1 * 0.99);
    }

    #[test]
    fn up_wins_over_down_and_down_reverses() {
        let mut ship = ship_at(100.0, 100.0);
        ship.update(hold(&[Control::Up, Control::Down]), &BOUNDS);
        assert!(ship.velocity.x > 0.0);

        let mut ship = ship_at(100.0, 100.0);
        ship.update(hold(&[Control::Down]), &BOUNDS);
        assert_relative_eq!(ship.velocity.x, -0.1 * 0.99);
    }

    #[test]
    fn velocity_approaches_terminal_speed_from_below() {
        let mut ship = ship_at(100.0, 100.0);
        let up = hold(&[Control::Up]);

        let mut previous = 0.0;
        for _ in 0..10 {
            ship.update(up, &BOUNDS);
            assert!(ship.velocity.x > previous);
            assert!(ship.velocity.x < 10.0);
            previous = ship.velocity.x;
        }

        for _ in 0..5000 {
            ship.update(up, &BOUNDS);
        }
        // (v + a) * f = v  =>  v = a * f / (1 - f)
        assert!(ship.velocity.x < 10.0);
        assert_relative_eq!(ship.velocity.x, 0.1 * 0.99 / 0.01, epsilon = 1e-2);
        assert_relative_eq!(ship.velocity.y, 0.0);
    }

    #[test]
    fn coasting_decays_velocity() {
        let mut ship = ship_at(100.0, 100.0);
        ship.velocity = Vector2::new(4.0, 0.0);
        ship.update(ControlState::RELEASED, &BOUNDS);
        assert_relative_eq!(ship.velocity.x, 4.0 * 0.99);
    }

    //=====================================================================
    // Firing
    //=====================================================================

    #[test]
    fn fire_spawns_bullet_and_advances_it_same_tick() {
        let mut ship = ship_at(500.0, 500.0);
        ship.update(hold(&[Control::Fire]), &BOUNDS);

        assert_eq!(ship.bullets.len(), 1);
        assert_eq!(ship.bullets[0].position, Vector2::new(505.0, 500.0));
        assert_eq!(ship.bullets[0].speed, 5.0);
        assert_eq!(ship.shooting_cooldown, 14);
    }

    #[test]
    fn presses_within_cooldown_fire_once() {
        let mut ship = ship_at(500.0, 500.0);
        let fire = hold(&[Control::Fire]);

        ship.update(fire, &BOUNDS);
        for tick in 1..14 {
            let controls = if tick % 2 == 0 { fire } else { ControlState::RELEASED };
            ship.update(controls, &BOUNDS);
        }
        assert_eq!(ship.bullets.len(), 1);
    }

    #[test]
    fn presses_every_cooldown_period_each_fire() {
        let mut ship = ship_at(500.0, 500.0);
        let fire = hold(&[Control::Fire]);

        for attempt in 0..5 {
            ship.update(fire, &BOUNDS);
            assert_eq!(ship.bullets.len(), attempt + 1);
            for _ in 1..15 {
                ship.update(ControlState::RELEASED, &BOUNDS);
            }
        }
    }

    #[test]
    fn held_fire_shoots_every_cooldown_period() {
        let mut ship = ship_at(500.0, 500.0);
        let fire = hold(&[Control::Fire]);

        for _ in 0..45 {
            ship.update(fire, &BOUNDS);
        }
        // Ticks 0, 15 and 30
        assert_eq!(ship.bullets.len(), 3);
    }

    #[test]
    fn cooldown_counts_down_to_zero_and_stops() {
        let mut ship = ship_at(500.0, 500.0);
        ship.update(hold(&[Control::Fire]), &BOUNDS);

        let mut last = ship.shooting_cooldown;
        for _ in 0..30 {
            ship.update(ControlState::RELEASED, &BOUNDS);
            assert!(ship.shooting_cooldown == last.saturating_sub(1));
            last = ship.shooting_cooldown;
        }
        assert_eq!(ship.shooting_cooldown, 0);
    }

    #[test]
    fn bullets_inherit_heading_and_persist() {
        let mut ship = ship_at(500.0, 500.0);
        ship.angle = 1.0;
        ship.update(hold(&[Control::Fire]), &BOUNDS);

        for _ in 0..1000 {
            ship.update(ControlState::RELEASED, &BOUNDS);
        }
        assert_eq!(ship.bullets.len(), 1);
        assert_relative_eq!(ship.bullets[0].angle, 1.0);
    }

    //=====================================================================
    // Wrap Invariant
    //=====================================================================

    #[test]
    fn everything_stays_in_bounds() {
        let mut ship = ship_at(990.0, 5.0);
        let mut asteroids: Vec<Asteroid> = (0..8)
            .map(|i| Asteroid {
                position: Vector2::new(i as f32 * 125.0, 799.0 - i as f32 * 100.0),
                radius: 35.0,
                velocity: Vector2::new(3.0 - i as f32, i as f32 * 0.7 - 2.5),
            })
            .collect();
        let controls = hold(&[Control::Up, Control::Left, Control::Fire]);

        for _ in 0..2000 {
            ship.update(controls, &BOUNDS);
            for asteroid in &mut asteroids {
                asteroid.update(&BOUNDS);
                assert!(BOUNDS.contains(asteroid.position));
            }
            assert!(BOUNDS.contains(ship.position));
            assert!(ship.bullets.iter().all(|b| BOUNDS.contains(b.position)));
        }
    }

    //=====================================================================
    // Drawing
    //=====================================================================

    #[test]
    fn hull_points_nose_then_rear_corners() {
        let ship = ship_at(100.0, 100.0);
        let hull = ship.hull();
        assert_eq!(hull[0], Vector2::new(100.0, 80.0));
        assert_eq!(hull[1], Vector2::new(120.0, 120.0));
        assert_eq!(hull[2], Vector2::new(80.0, 120.0));
    }

    #[test]
    fn entity_draw_commands() {
        let star = Star {
            position: Vector2::new(1.0, 2.0),
            radius: 1.5,
        };
        let asteroid = Asteroid {
            position: Vector2::new(50.0, 50.0),
            radius: 30.0,
            velocity: Vector2::ZERO,
        };
        let bullet = Bullet {
            position: Vector2::new(7.0, 8.0),
            angle: 0.0,
            speed: 5.0,
        };
        let ship = ship_at(100.0, 100.0);

        let mut list = DrawList::new();
        for entity in [
            Entity::Star(&star),
            Entity::Asteroid(&asteroid),
            Entity::Bullet(&bullet),
            Entity::Ship(&ship),
        ] {
            entity.draw(&mut list);
        }

        assert_eq!(
            list.commands(),
            &[
                DrawCommand::FillCircle {
                    center: star.position,
                    radius: 1.5,
                    color: Color::WHITE
                },
                DrawCommand::StrokeCircle {
                    center: asteroid.position,
                    radius: 30.0,
                    width: 1.0,
                    color: Color::GRAY
                },
                DrawCommand::FillCircle {
                    center: bullet.position,
                    radius: BULLET_DRAW_RADIUS,
                    color: Color::WHITE
                },
                DrawCommand::StrokeTriangle {
                    points: ship.hull(),
                    width: 2.0,
                    color: Color::WHITE
                },
            ]
        );
    }
}
