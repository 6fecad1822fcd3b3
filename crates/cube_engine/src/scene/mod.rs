//! Scene core: cube lifecycle, animation and collision response
//!
//! ```text
//! SceneAdapter ──step──▶ EventQueue ──drain──▶ PopulationController
//!      ▲                                  │            │
//!      │                                  │   CollisionResponsePolicy
//!      └──────── write_transform ◀── FrameAnimator ◀───┘
//! ```
//!
//! [`CubeScene`] runs that loop once per tick. Everything here is
//! single-threaded; events are consumed between adapter steps, never during
//! iteration over the objects.

mod object;
mod response;
mod animator;
mod population;
mod adapter;
mod driver;

#[cfg(test)]
mod tests;

pub use object::{ObjectId, RenderableObject, ScaleLimits, VisualState};
pub use response::{CollisionResponsePolicy, RandomWalkResponse};
pub use animator::{Animated, FrameAnimator};
pub use population::{
    ClickOutcome, CollisionOutcome, PopulationController, PopulationStats, SpawnRoll,
};
pub use adapter::{BodyHandle, SceneAdapter, SceneError};
pub use driver::{CubeScene, TickReport};
