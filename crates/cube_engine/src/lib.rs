//! # Cube Engine
//!
//! Bookkeeping core for scenes of animated, clickable cubes.
//!
//! The rendering and rigid-body work belongs to an external engine reached
//! through the [`scene::SceneAdapter`] trait. This crate owns what happens on
//! top of it:
//!
//! - **Population**: spawning cubes with randomized size, position and velocity
//! - **Collision response**: recoloring and random-walk rescaling on contact
//! - **Frame animation**: per-tick rotation and scale oscillation
//! - **Events**: click and collision callbacks queued and consumed per tick
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cube_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let config = SceneConfig::cluster();
//!     let adapter = HeadlessScene::new(&config.physics);
//!     let mut scene = CubeScene::build(config, adapter)?;
//!
//!     for _ in 0..600 {
//!         scene.tick(1.0 / 60.0)?;
//!     }
//!     println!("{} cubes alive", scene.population().len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod physics;
pub mod camera;
pub mod scene;
pub mod headless;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::{MouseState, OrbitCamera},
        config::{Config, ConfigError, SceneConfig, ClickAction},
        events::{Contact, EventQueue, SceneEvent},
        foundation::{
            math::{Aabb, Color, Vec3},
            rng::SceneRng,
            time::FrameClock,
        },
        headless::HeadlessScene,
        physics::{BoundingSphere, Ray},
        scene::{
            BodyHandle, ClickOutcome, CollisionResponsePolicy, CubeScene, FrameAnimator,
            ObjectId, PopulationController, RandomWalkResponse, RenderableObject,
            SceneAdapter, SceneError, TickReport, VisualState,
        },
    };
}
