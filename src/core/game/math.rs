//=========================================================================
// Game Math
//=========================================================================
//
// 2D vector type and the playfield bounds every entity wraps within.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

//=== Vector2 =============================================================

/// 2D vector in canvas pixels. +x right, +y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians): `(cos, sin)`.
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: Self) -> f32 {
        (*self - other).length()
    }

    /// Rotates the vector about the origin by `angle` radians.
    pub fn rotated(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

//=== Bounds ==============================================================

/// Playfield size, fixed when the world is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Jump wrap, each axis on its own.
    ///
    /// A coordinate below zero jumps to the far edge; one past the far edge
    /// jumps to zero. Coordinates exactly on an edge are left alone, so the
    /// result always lies in `[0, dimension]`.
    pub fn wrap(&self, position: &mut Vector2) {
        position.x = wrap_axis(position.x, self.width);
        position.y = wrap_axis(position.y, self.height);
    }

    pub fn contains(&self, position: Vector2) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }
}

fn wrap_axis(value: f32, dimension: f32) -> f32 {
    if value < 0.0 {
        dimension
    } else if value > dimension {
        0.0
    } else {
        value
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
