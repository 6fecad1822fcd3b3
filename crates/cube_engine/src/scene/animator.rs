//! Per-tick animation

use std::f32::consts::TAU;

use crate::config::AnimationConfig;
use crate::foundation::math::Vec3;

use super::object::RenderableObject;

/// Rotation and scale an object should render with at a given time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated {
    /// New Euler rotation, each angle wrapped into `[0, 2π)`
    pub rotation: Vec3,
    /// New rendered scale
    pub scale: f32,
}

/// Applies the per-tick rotation and scale oscillation
///
/// Rotation advances by `rotation_step * spin` every tick. Scale is
/// `base_scale * (1 + ε·sin(k·t))`, so the oscillation rides on top of the
/// last collision-set value and stays inside `[base(1-ε), base(1+ε)]`.
///
/// `ε` is relative to the base scale: the absolute swing is `ε·base_scale`,
/// not `ε`. A host porting an additive `scale += ε·sin(k·t)` rule gets the
/// same motion only for cubes whose base scale is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnimator {
    rotation_step: Vec3,
    frequency: f32,
    amplitude: f32,
}

impl FrameAnimator {
    /// Create an animator from the animation section of a scene config
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            rotation_step: config.rotation_step,
            frequency: config.oscillation_frequency,
            amplitude: config.oscillation_amplitude.clamp(0.0, 0.999),
        }
    }

    /// Relative oscillation amplitude `ε`
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Compute the next rotation and scale for `object` at `time_seconds`
    ///
    /// Pure: the same object and time always give the same result.
    #[allow(clippy::cast_possible_truncation)]
    pub fn animate(&self, object: &RenderableObject, time_seconds: f64) -> Animated {
        let rotation = (object.rotation + self.rotation_step * object.spin())
            .map(|angle| angle.rem_euclid(TAU));

        let wave = (time_seconds * f64::from(self.frequency)).sin() as f32;
        let scale = object.base_scale() * (1.0 + self.amplitude * wave);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            object.base_scale()
        };

        Animated { rotation, scale }
    }

    /// Animate every object in place
    pub fn apply(&self, objects: &mut [RenderableObject], time_seconds: f64) {
        for object in objects.iter_mut() {
            let next = self.animate(object, time_seconds);
            object.rotation = next.rotation;
            object.scale = next.scale;
        }
        log::trace!("Animated {} objects at t={:.3}s", objects.len(), time_seconds);
    }
}

impl Default for FrameAnimator {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}
