//! Game Module
//!
//! Archery gameplay built on top of the engine: aim configuration, the
//! drag-to-aim state machine, character poses, and the aim/projectile
//! systems.

pub mod config;
pub mod error;
pub mod input;
pub mod pose;
pub mod systems;

pub use config::{AimConfig, AimMode, PoseKind};
pub use error::{ConfigError, SpawnError};
pub use input::{AimPhase, AimState, AimTransition, Shot, step_aim};
pub use pose::{AimPose, PoseContext, PoseCue, RigPose, TransformPose};
pub use systems::{
    AimSystem, AimSystemBuilder, DestroyReason, FiredShot, Launch, ProjectileHandle,
    ProjectileSpawner, ProjectileSystem, ProjectileUpdate, TickReport,
};
