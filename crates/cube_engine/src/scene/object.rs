//! Per-cube state

use std::fmt;

use crate::foundation::math::{Color, Vec3};
use crate::physics::BoundingSphere;

use super::adapter::BodyHandle;

/// Unique, never-reused object identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cube#{}", self.0)
    }
}

/// Color and collision-set scale produced by a response policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// New surface color
    pub color: Color,
    /// New base scale
    pub scale: f32,
}

/// Closed interval a collision-set scale is kept in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    /// Smallest allowed scale (positive)
    pub min: f32,
    /// Largest allowed scale
    pub max: f32,
}

impl ScaleLimits {
    /// Create limits; the bounds are reordered if given backwards
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Bring `scale` into the interval
    ///
    /// Non-finite input resets to `1.0` (itself clamped).
    pub fn clamp(&self, scale: f32) -> f32 {
        if scale.is_finite() {
            scale.clamp(self.min, self.max)
        } else {
            log::warn!("Non-finite scale {scale}; resetting to 1.0");
            1.0_f32.clamp(self.min, self.max)
        }
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self::new(0.1, 10.0)
    }
}

/// One cube's visual and physical state
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableObject {
    pub(crate) id: ObjectId,
    pub(crate) size: f32,
    pub(crate) base_scale: f32,
    pub(crate) scale: f32,
    pub(crate) spin: f32,
    /// World position (owned by the adapter, mirrored each tick)
    pub position: Vec3,
    /// Euler rotation in radians
    pub rotation: Vec3,
    /// Linear velocity (owned by the adapter, mirrored each tick)
    pub velocity: Vec3,
    /// Surface color
    pub color: Color,
    /// Adapter body, once registered
    pub body: Option<BodyHandle>,
}

impl RenderableObject {
    pub(crate) fn new(id: ObjectId, position: Vec3, size: f32, color: Color, spin: f32) -> Self {
        Self {
            id,
            size,
            base_scale: 1.0,
            scale: 1.0,
            spin,
            position,
            rotation: Vec3::zeros(),
            velocity: Vec3::zeros(),
            color,
            body: None,
        }
    }

    /// Identifier
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Unscaled edge length
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Scale last set by a collision response
    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    /// Rendered scale (base scale plus oscillation)
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Object-specific rotation speed factor
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Rendered edge length
    pub fn extent(&self) -> f32 {
        self.size * self.scale
    }

    /// Sphere enclosing the rendered cube
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::enclosing_cube(self.position, self.extent())
    }

    /// Current color and base scale
    pub fn visual(&self) -> VisualState {
        VisualState {
            color: self.color,
            scale: self.base_scale,
        }
    }

    /// Adopt a response policy's output
    ///
    /// The rendered scale snaps to the new base until the next animation pass.
    pub fn apply_visual(&mut self, visual: VisualState) {
        self.color = visual.color;
        self.base_scale = visual.scale;
        self.scale = visual.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_limits_clamp() {
        let limits = ScaleLimits::new(0.1, 10.0);
        assert_eq!(limits.clamp(0.01), 0.1);
        assert_eq!(limits.clamp(25.0), 10.0);
        assert_eq!(limits.clamp(2.5), 2.5);
        assert_eq!(limits.clamp(f32::NAN), 1.0);
        assert_eq!(limits.clamp(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_scale_limits_reset_respects_bounds() {
        let limits = ScaleLimits::new(4.0, 2.0);
        assert_eq!(limits.min, 2.0);
        assert_eq!(limits.clamp(f32::NAN), 2.0);
    }

    #[test]
    fn test_apply_visual_sets_base_and_rendered_scale() {
        let mut object = RenderableObject::new(ObjectId(0), Vec3::zeros(), 0.5, Color::WHITE, 1.0);
        object.apply_visual(VisualState {
            color: Color::new(1.0, 0.0, 0.0),
            scale: 2.0,
        });
        assert_eq!(object.base_scale(), 2.0);
        assert_eq!(object.scale(), 2.0);
        assert_eq!(object.extent(), 1.0);
        assert_eq!(object.color, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ObjectId(12).to_string(), "cube#12");
    }
}
