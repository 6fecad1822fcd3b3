//! Scene configuration and the built-in presets

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{Aabb, Vec3};

/// What a pointer click on a cube does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickAction {
    /// Roll `spawn_probability` and add a new cube on success
    Spawn,
    /// Give the clicked cube a new random color
    Recolor,
    /// Recolor the clicked cube, then roll for a spawn
    SpawnAndRecolor,
}

/// Where and how new cubes appear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Volume new cubes are placed in
    pub volume: Aabb,
    /// Edge length range `[lo, hi)`
    pub size_range: (f32, f32),
    /// Each initial velocity axis is uniform in `[-speed/2, speed/2)`
    pub initial_speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            volume: Aabb::centered(Vec3::new(10.0, 5.0, 10.0)),
            size_range: (0.3, 1.0),
            initial_speed: 3.0,
        }
    }
}

/// Click response policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Click behavior
    pub action: ClickAction,
    /// Probability that a click spawns a cube
    pub spawn_probability: f32,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            action: ClickAction::Spawn,
            spawn_probability: 0.5,
        }
    }
}

/// Collision response policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Whether collisions change cubes at all
    pub enabled: bool,
    /// Scale multiplier range `[lo, hi)` applied per collision
    pub scale_factor_range: (f32, f32),
    /// Lower scale clamp
    pub min_scale: f32,
    /// Upper scale clamp
    pub max_scale: f32,
    /// Whether a collision assigns a new color
    pub recolor: bool,
    /// Chance that a collision also adds a new cube
    pub spawn_probability: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale_factor_range: (0.8, 1.3),
            min_scale: 0.1,
            max_scale: 10.0,
            recolor: true,
            spawn_probability: 0.0,
        }
    }
}

/// Per-tick animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Rotation added each tick (radians per axis), before the spin factor
    pub rotation_step: Vec3,
    /// Range of the per-object spin factor
    pub spin_range: (f32, f32),
    /// Angular frequency `k` of the scale oscillation (radians per second)
    pub oscillation_frequency: f32,
    /// Amplitude `ε` of the scale oscillation, as a fraction of the base scale
    pub oscillation_amplitude: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotation_step: Vec3::new(0.01, 0.01, 0.0),
            spin_range: (0.5, 1.5),
            oscillation_frequency: 1.0,
            oscillation_amplitude: 0.02,
        }
    }
}

/// Parameters handed to the scene adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration
    pub gravity: Vec3,
    /// Height of the floor plane, if any
    pub floor_height: Option<f32>,
    /// Fraction of normal speed kept after a floor bounce
    pub restitution: f32,
    /// Step size hosts should tick with
    pub fixed_timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -1.0, 0.0),
            floor_height: Some(-1.0),
            restitution: 0.3,
            fixed_timestep: 1.0 / 60.0,
        }
    }
}

/// Viewing camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Orbit speed around the target (radians per second)
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 25.0),
            target: Vec3::zeros(),
            fov_degrees: 50.0,
            auto_rotate_speed: 0.3,
        }
    }
}

/// Complete scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Random seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Cubes spawned when the scene is built
    pub initial_count: usize,
    /// Optional population cap for click spawns
    pub max_objects: Option<usize>,
    /// Spawn parameters
    pub spawn: SpawnConfig,
    /// Click policy
    pub click: ClickConfig,
    /// Collision policy
    pub collision: CollisionConfig,
    /// Animation parameters
    pub animation: AnimationConfig,
    /// Adapter physics parameters
    pub physics: PhysicsConfig,
    /// Camera parameters
    pub camera: CameraConfig,
    /// Default log filter
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut config = Self::cluster();
        config.click.spawn_probability = 0.5;
        config
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Falling, colliding cube cluster that multiplies on click
    pub fn cluster() -> Self {
        Self {
            seed: None,
            initial_count: 15,
            max_objects: None,
            spawn: SpawnConfig::default(),
            click: ClickConfig {
                action: ClickAction::Spawn,
                spawn_probability: 1.0,
            },
            collision: CollisionConfig::default(),
            animation: AnimationConfig::default(),
            physics: PhysicsConfig::default(),
            camera: CameraConfig::default(),
            log_level: "info".to_string(),
        }
    }

    /// Static grid of unit cubes that spin and recolor on click
    pub fn gallery() -> Self {
        Self {
            seed: None,
            initial_count: 10,
            max_objects: None,
            spawn: SpawnConfig {
                volume: Aabb::centered(Vec3::new(3.0, 3.0, 3.0)),
                size_range: (1.0, 1.0),
                initial_speed: 0.0,
            },
            click: ClickConfig {
                action: ClickAction::Recolor,
                spawn_probability: 0.0,
            },
            collision: CollisionConfig {
                enabled: false,
                ..CollisionConfig::default()
            },
            animation: AnimationConfig {
                rotation_step: Vec3::new(0.01, 0.01, 0.0),
                spin_range: (1.0, 1.0),
                oscillation_frequency: 0.0,
                oscillation_amplitude: 0.0,
            },
            physics: PhysicsConfig {
                gravity: Vec3::zeros(),
                floor_height: None,
                ..PhysicsConfig::default()
            },
            camera: CameraConfig {
                position: Vec3::new(0.0, 0.0, 10.0),
                auto_rotate_speed: 0.0,
                ..CameraConfig::default()
            },
            log_level: "info".to_string(),
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "cluster" => Some(Self::cluster()),
            "gallery" => Some(Self::gallery()),
            "default" => Some(Self::default()),
            _ => None,
        }
    }

    /// Set the seed (builder pattern)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max) = self.max_objects {
            if self.initial_count > max {
                return invalid(format!(
                    "initial_count {} exceeds max_objects {}",
                    self.initial_count, max
                ));
            }
        }

        if !self.spawn.volume.is_valid() {
            return invalid("spawn.volume must have finite, ordered corners");
        }
        check_range("spawn.size_range", self.spawn.size_range)?;
        if self.spawn.size_range.0 <= 0.0 {
            return invalid("spawn.size_range must be positive");
        }
        check_non_negative("spawn.initial_speed", self.spawn.initial_speed)?;

        let p = self.click.spawn_probability;
        if !(0.0..=1.0).contains(&p) {
            return invalid(format!("click.spawn_probability {p} outside [0, 1]"));
        }

        let collision = &self.collision;
        let p = collision.spawn_probability;
        if !(0.0..=1.0).contains(&p) {
            return invalid(format!("collision.spawn_probability {p} outside [0, 1]"));
        }
        check_range("collision.scale_factor_range", collision.scale_factor_range)?;
        if collision.scale_factor_range.0 <= 0.0 {
            return invalid("collision.scale_factor_range must be positive");
        }
        if !(collision.min_scale.is_finite() && collision.min_scale > 0.0) {
            return invalid("collision.min_scale must be positive");
        }
        if !collision.max_scale.is_finite() || collision.min_scale > collision.max_scale {
            return invalid("collision.min_scale must not exceed collision.max_scale");
        }

        let animation = &self.animation;
        if !animation.rotation_step.iter().all(|c| c.is_finite()) {
            return invalid("animation.rotation_step must be finite");
        }
        check_range("animation.spin_range", animation.spin_range)?;
        if !animation.oscillation_frequency.is_finite() {
            return invalid("animation.oscillation_frequency must be finite");
        }
        if !(0.0..1.0).contains(&animation.oscillation_amplitude) {
            return invalid("animation.oscillation_amplitude must be in [0, 1)");
        }

        let physics = &self.physics;
        if !physics.gravity.iter().all(|c| c.is_finite()) {
            return invalid("physics.gravity must be finite");
        }
        if physics.floor_height.is_some_and(|h| !h.is_finite()) {
            return invalid("physics.floor_height must be finite");
        }
        if !(0.0..=1.0).contains(&physics.restitution) {
            return invalid("physics.restitution must be in [0, 1]");
        }
        if !(physics.fixed_timestep.is_finite() && physics.fixed_timestep > 0.0) {
            return invalid("physics.fixed_timestep must be positive");
        }

        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return invalid("camera.fov_degrees must be in (0, 180)");
        }

        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(reason.into()))
}

fn check_range(name: &str, (lo, hi): (f32, f32)) -> Result<(), ConfigError> {
    if !(lo.is_finite() && hi.is_finite()) {
        return invalid(format!("{name} must be finite"));
    }
    if lo > hi {
        return invalid(format!("{name} is inverted ({lo} > {hi})"));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        invalid(format!("{name} must be a non-negative number"))
    }
}
