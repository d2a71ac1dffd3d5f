//! Input Module
//!
//! Pointer-driven aim state machine.

pub mod aim_state;

pub use aim_state::{
    AimPhase, AimState, AimTransition, Shot, cancel_aim, launch_direction, launch_power, step_aim,
};
