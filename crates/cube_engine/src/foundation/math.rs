//! Math utilities and types
//!
//! Provides the vector aliases, colors and spawn volumes used by the scene core.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// White
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a color, clamping each channel into `[0, 1]`
    ///
    /// Non-finite channels become `0.0`.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        let channel = |c: f32| if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    /// Build a color from a packed `0xRRGGBB` value
    pub fn from_rgb_u32(packed: u32) -> Self {
        let [_, r, g, b] = packed.to_be_bytes();
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Pack into `0xRRGGBB`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb_u32(self) -> u32 {
        let byte = |c: f32| u32::from((c * 255.0).round() as u8);
        (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    /// Format as a CSS-style `#rrggbb` string
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.to_rgb_u32())
    }

    /// Parse a `#rrggbb` (or `rrggbb`) string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_rgb_u32)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Axis-aligned box used as a spawn volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create a box centered on the origin with the given half extents
    pub fn centered(half_extents: Vec3) -> Self {
        Self::new(-half_extents, half_extents)
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half of the box size on each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Inclusive containment test
    pub fn contains(&self, point: &Vec3) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Closest point inside the box
    pub fn clamp_point(&self, point: &Vec3) -> Vec3 {
        point.sup(&self.min).inf(&self.max)
    }

    /// Whether both corners are finite and ordered
    pub fn is_valid(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|c| c.is_finite())
            && (0..3).all(|axis| self.min[axis] <= self.max[axis])
    }
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}
