//! Physics type re-exports from glam
//!
//! The whole crate works in a 2D world plane; everything is expressed in
//! `Vec2` with +Y pointing up.

pub use glam::Vec2;

/// Default world gravity (m/s²) before any per-projectile scale is applied.
pub const WORLD_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);
