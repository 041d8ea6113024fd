//! Core state types for the three-body simulation.
//!
//! - `Body`   one point mass, using `NVec2` for position and velocity
//! - `System` the ordered list of bodies plus the current simulation time `t`
//!
//! Index order inside `System::bodies` is what the force loop iterates over, so
//! it must stay stable for the duration of a step.

use std::fmt;

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Opaque display color of a body, stored as 8-bit RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BodyColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels as floats in `[0, 1]`
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for BodyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass, > 0 and never mutated
    pub color: BodyColor, // display color
}

impl Body {
    pub fn new(x: [f64; 2], v: [f64; 2], m: f64, color: BodyColor) -> Self {
        Self {
            x: NVec2::new(x[0], x[1]),
            v: NVec2::new(v[0], v[1]),
            m,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // 2d collection of bodies
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Mass-weighted center of the system, zero for an empty or massless system
    pub fn centroid(&self) -> NVec2 {
        let mass = self.total_mass();
        if mass <= 0.0 {
            return NVec2::zeros();
        }
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.x * b.m)
            / mass
    }

    /// Total linear momentum
    pub fn momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.v * b.m)
    }

    /// Kinetic plus pairwise gravitational potential energy.
    /// Coincident pairs are skipped in the potential term.
    pub fn total_energy(&self, g: f64) -> f64 {
        let kinetic: f64 = self
            .bodies
            .iter()
            .map(|b| 0.5 * b.m * b.v.norm_squared())
            .sum();

        let mut potential = 0.0;
        for (i, bi) in self.bodies.iter().enumerate() {
            for bj in &self.bodies[i + 1..] {
                let r = (bj.x - bi.x).norm();
                if r > 0.0 {
                    potential -= g * bi.m * bj.m / r;
                }
            }
        }

        kinetic + potential
    }
}
