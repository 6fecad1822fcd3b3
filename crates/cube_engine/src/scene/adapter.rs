//! Boundary to the rendering/physics engine

use crate::config::ConfigError;
use crate::events::EventQueue;
use crate::foundation::math::Vec3;

use super::object::RenderableObject;

slotmap::new_key_type! {
    /// Handle to an engine-side body
    pub struct BodyHandle;
}

/// Errors crossing the adapter boundary
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// The adapter no longer knows this handle
    #[error("stale body handle {0:?}")]
    StaleHandle(BodyHandle),

    /// The scene configuration was rejected
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Rendering/physics engine as seen by the scene core
///
/// The engine owns rigid-body integration, contact detection, rendering and
/// picking. The core only registers bodies, subscribes them to callbacks,
/// sets initial velocities and writes back the animated transform. Callbacks
/// are never invoked directly: during [`SceneAdapter::step`] the engine
/// pushes what it would have called back with onto the [`EventQueue`].
pub trait SceneAdapter {
    /// Create an engine body mirroring `object`
    fn register_object(&mut self, object: &RenderableObject) -> Result<BodyHandle, SceneError>;

    /// Report contact starts for this body as `Collided` events
    fn subscribe_collision(&mut self, handle: BodyHandle) -> Result<(), SceneError>;

    /// Report pointer hits on this body as `Clicked` events
    fn subscribe_click(&mut self, handle: BodyHandle) -> Result<(), SceneError>;

    /// Overwrite a body's linear velocity
    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> Result<(), SceneError>;

    /// Current body position
    fn read_position(&self, handle: BodyHandle) -> Result<Vec3, SceneError>;

    /// Current body velocity
    fn read_velocity(&self, handle: BodyHandle) -> Result<Vec3, SceneError>;

    /// Push rotation, scale and color to the engine
    fn write_transform(
        &mut self,
        handle: BodyHandle,
        object: &RenderableObject,
    ) -> Result<(), SceneError>;

    /// Advance the engine by `dt` seconds, queueing any callbacks it fired
    fn step(&mut self, dt: f32, events: &mut EventQueue);

    /// Drop every body (scene reset)
    fn clear(&mut self);
}
