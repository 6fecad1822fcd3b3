//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Frame timing
//! - Seedable randomness
//! - Logging utilities

pub mod math;
pub mod time;
pub mod rng;
pub mod logging;
