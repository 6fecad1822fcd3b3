//! Collision response policies

use crate::config::CollisionConfig;
use crate::foundation::rng::SceneRng;

use super::object::{RenderableObject, ScaleLimits, VisualState};

/// Maps a collision on `object` to its next color and base scale
pub trait CollisionResponsePolicy {
    /// Compute the post-collision visual state
    fn respond(&self, object: &RenderableObject, rng: &mut SceneRng) -> VisualState;
}

/// Uniform recolor plus a multiplicative random walk on scale
///
/// Each hit multiplies the base scale by `U(lo, hi)`; the product is clamped
/// into [`ScaleLimits`] so repeated hits can neither collapse a cube to zero
/// nor blow it up to infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomWalkResponse {
    factor_range: (f32, f32),
    limits: ScaleLimits,
    recolor: bool,
}

impl RandomWalkResponse {
    /// Create a policy with explicit parameters
    pub fn new(factor_range: (f32, f32), limits: ScaleLimits, recolor: bool) -> Self {
        Self {
            factor_range,
            limits,
            recolor,
        }
    }

    /// Create a policy from the collision section of a scene config
    pub fn from_config(config: &CollisionConfig) -> Self {
        Self::new(
            config.scale_factor_range,
            ScaleLimits::new(config.min_scale, config.max_scale),
            config.recolor,
        )
    }

    /// Scale bounds enforced after every hit
    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }
}

impl Default for RandomWalkResponse {
    fn default() -> Self {
        Self::from_config(&CollisionConfig::default())
    }
}

impl CollisionResponsePolicy for RandomWalkResponse {
    fn respond(&self, object: &RenderableObject, rng: &mut SceneRng) -> VisualState {
        let (lo, hi) = self.factor_range;
        let factor = rng.range(lo, hi);
        let raw = object.base_scale() * factor;
        let scale = self.limits.clamp(raw);
        if (scale - raw).abs() > f32::EPSILON && raw.is_finite() {
            log::debug!("{} scale {:.3} clamped to {:.3}", object.id(), raw, scale);
        }

        // Always drawn: the rng sequence is independent of `recolor`.
        let color = rng.color();
        VisualState {
            color: if self.recolor { color } else { object.color },
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Color, Vec3};
    use crate::scene::ObjectId;

    fn cube(scale: f32) -> RenderableObject {
        let mut object = RenderableObject::new(ObjectId(1), Vec3::zeros(), 1.0, Color::WHITE, 1.0);
        object.apply_visual(VisualState {
            color: Color::WHITE,
            scale,
        });
        object
    }

    #[test]
    fn test_single_hit_within_factor_range() {
        let policy = RandomWalkResponse::new((0.8, 1.3), ScaleLimits::new(0.01, 100.0), true);
        let mut rng = SceneRng::seeded(5);
        for _ in 0..500 {
            let next = policy.respond(&cube(2.0), &mut rng);
            assert!(next.scale >= 1.6 && next.scale < 2.6, "scale {}", next.scale);
        }
    }

    #[test]
    fn test_repeated_hits_stay_positive_and_finite() {
        // Seeded sweep over prior scales and hit counts
        let mut driver = SceneRng::seeded(0xC0FFEE);
        for trial in 0..200 {
            let policy = RandomWalkResponse::default();
            let mut rng = SceneRng::seeded(trial);
            let mut object = cube(driver.range(0.1, 10.0));
            let hits = 1 + (driver.range(0.0, 5000.0) as usize);
            for _ in 0..hits {
                let next = policy.respond(&object, &mut rng);
                object.apply_visual(next);
                assert!(object.base_scale() > 0.0);
                assert!(object.base_scale().is_finite());
                assert!(object.base_scale() >= policy.limits().min);
                assert!(object.base_scale() <= policy.limits().max);
            }
        }
    }

    #[test]
    fn test_shrinking_walk_saturates_at_min() {
        let policy = RandomWalkResponse::new((0.5, 0.6), ScaleLimits::new(0.1, 10.0), true);
        let mut rng = SceneRng::seeded(3);
        let mut object = cube(1.0);
        for _ in 0..100 {
            let next = policy.respond(&object, &mut rng);
            object.apply_visual(next);
        }
        assert_eq!(object.base_scale(), 0.1);
    }

    #[test]
    fn test_recolor_flag() {
        let keep = RandomWalkResponse::new((1.0, 1.0), ScaleLimits::default(), false);
        let mut rng = SceneRng::seeded(8);
        let next = keep.respond(&cube(1.0), &mut rng);
        assert_eq!(next.color, Color::WHITE);
        assert_eq!(next.scale, 1.0);
    }
}
