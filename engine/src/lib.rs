//! Bowshot Engine Library
//!
//! Drag-to-aim archery core for a 2D side view: pull the bowstring with the
//! pointer, watch the dotted ballistic arc, release to launch an arrow.
//! The host engine is reached only through small traits (pointer input,
//! skeletal rig, projectile spawner, trajectory renderer), so every piece
//! runs headless in tests.
//!
//! # Modules
//!
//! - [`physics`] - Trajectory prediction and projectile integration
//! - [`input`] - Pointer state and the [`input::InputSource`] contract
//! - [`camera`] - Window pixels to world plane
//! - [`rig`] - Skeletal rig contract and bone smoothing
//! - [`render`] - Preview renderer contract and the pooled dot set
//! - [`game`] - Aim configuration, state machine, poses and systems
//!
//! # Example
//!
//! ```ignore
//! use bowshot_engine::game::{AimConfig, AimSystem, ProjectileSystem};
//! use bowshot_engine::input::PointerFrame;
//! use bowshot_engine::render::DotPool;
//! use glam::Vec2;
//!
//! let config = AimConfig::default();
//! let mut aim = AimSystem::builder(config.clone())
//!     .trajectory_renderer(DotPool::new(config.trajectory.sample_count, Vec2::ZERO))
//!     .without_pose()
//!     .build()?;
//! let mut arrows = ProjectileSystem::from_config(&config);
//!
//! aim.tick(&PointerFrame::press(Vec2::ZERO), &mut arrows, 1.0 / 60.0)?;
//! aim.tick(&PointerFrame::release(Vec2::new(-3.0, 0.0)), &mut arrows, 1.0 / 60.0)?;
//! arrows.update(1.0 / 60.0);
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod render;
pub mod rig;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use camera::OrthoCamera2D;
pub use input::{InputSource, MouseButton, MouseState, PointerFrame};
pub use physics::{BallisticsConfig, Projectile, ProjectileState, Trajectory};
pub use render::{DotPool, TrajectoryRenderer};
pub use rig::{BoneId, SkeletalRig};
