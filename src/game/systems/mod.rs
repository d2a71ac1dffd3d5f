//! Game systems: self-contained modules that own state and logic.

pub mod aim_system;
pub mod projectile_system;

pub use aim_system::{AimSystem, AimSystemBuilder, FiredShot, TickReport};
pub use projectile_system::{
    Arrow, DestroyReason, Launch, ProjectileHandle, ProjectileSpawner, ProjectileSystem,
    ProjectileUpdate,
};
