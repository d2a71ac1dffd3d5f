//! Input Module
//!
//! Pointer handling for drag-to-aim. Decoupled from any windowing system:
//! the window layer writes into [`MouseState`], the aim logic reads a
//! [`PointerFrame`] through the [`InputSource`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use bowshot_engine::input::{InputSource, MouseButton, MouseState};
//! use glam::Vec2;
//!
//! let mut mouse = MouseState::new();
//! mouse.set_world_position(Vec2::new(2.0, 1.0));
//! mouse.set_button(MouseButton::Left, true);
//! let frame = mouse.frame(); // pressed + held
//! mouse.end_frame();
//! ```

pub mod mouse;
pub mod pointer;

pub use mouse::{ButtonState, MouseButton, MouseState};
pub use pointer::{InputSource, PointerFrame};
