//! Config Module
//!
//! Centralized configuration for aiming, preview, projectiles and the rig.

pub mod aim_config;

pub use aim_config::{
    AimConfig, AimLineConfig, AimMode, AnimationNames, BoneLimit, PoseKind, PowerConfig,
    ProjectileConfig, RigConfig, TrajectoryConfig, VerticalAimConfig,
};
