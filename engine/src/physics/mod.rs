//! Physics module
//!
//! Kinematics for arrows in a 2D world plane. No external physics engine:
//! the preview arc and the live arrow share the same constant-acceleration
//! model so they can be compared directly.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, +Y up, time in seconds.
//!
//! # Submodules
//!
//! - [`types`] - `Vec2` re-export and world gravity
//! - [`trajectory`] - closed-form path prediction for the dotted preview
//! - [`ballistics`] - projectile body integrated by the projectile system

pub mod ballistics;
pub mod trajectory;
pub mod types;

pub use ballistics::{BallisticsConfig, Projectile, ProjectileState};
pub use trajectory::{Trajectory, TrajectorySamples, aim_line};
pub use types::{Vec2, WORLD_GRAVITY};
