//! Collision primitives shared by picking and the headless adapter
//!
//! Rigid-body dynamics belong to the scene adapter; this module only carries
//! the geometric tests the core needs to resolve clicks and contacts.

pub mod collision;

pub use collision::{BoundingSphere, Ray, RayHit};
