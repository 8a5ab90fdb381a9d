//! Two-dimensional vector value type.
//!
//! `Vector` is `Copy` and its operators return new values. The named
//! mutators (`add_to`, `set_length`, `set_angle`) are the only operations
//! that change a vector in place.
//!
//! Zero-length conventions: the zero vector has angle 0, and neither
//! `set_length` nor `set_angle` can give it a direction, so both leave it
//! at zero.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2D vector in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a vector from a direction in radians and a magnitude.
    ///
    /// A negative `length` points the vector opposite to `angle`.
    pub fn from_polar(angle: f64, length: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: cos * length,
            y: sin * length,
        }
    }

    /// Euclidean magnitude.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction in radians, in (-π, π]. The zero vector reports 0.
    pub fn angle(&self) -> f64 {
        if self.is_zero() {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }

    /// Rescales to magnitude `target`, keeping the direction.
    ///
    /// The zero vector has no direction and stays zero.
    pub fn set_length(&mut self, target: f64) {
        if self.is_zero() {
            return;
        }
        *self = Self::from_polar(self.angle(), target);
    }

    /// Points the vector at `theta` radians, keeping the magnitude.
    ///
    /// The zero vector has no magnitude to keep and stays zero.
    pub fn set_angle(&mut self, theta: f64) {
        if self.is_zero() {
            return;
        }
        *self = Self::from_polar(theta, self.length());
    }

    /// In-place component-wise addition.
    pub fn add_to(&mut self, other: Vector) {
        self.x += other.x;
        self.y += other.y;
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        self.add_to(rhs);
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<glam::DVec2> for Vector {
    fn from(v: glam::DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for glam::DVec2 {
    fn from(v: Vector) -> Self {
        glam::DVec2::new(v.x, v.y)
    }
}
