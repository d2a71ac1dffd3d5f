//! Mouse Input Module
//!
//! Mouse state tracking with per-frame button edges. Decoupled from winit:
//! the window layer feeds positions and button events in, the aim logic
//! reads it back through [`InputSource`].

use glam::Vec2;

use super::pointer::InputSource;

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// Level and edge state of the three main buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    down: [bool; 3],
    went_down: [bool; 3],
    went_up: [bool; 3],
}

impl ButtonState {
    /// Create a new button state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(button: MouseButton) -> Option<usize> {
        match button {
            MouseButton::Left => Some(0),
            MouseButton::Middle => Some(1),
            MouseButton::Right => Some(2),
            MouseButton::Other(_) => None,
        }
    }

    /// Record a press or release, latching the edge for this frame.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        let Some(i) = Self::slot(button) else {
            return;
        };
        if pressed && !self.down[i] {
            self.went_down[i] = true;
        } else if !pressed && self.down[i] {
            self.went_up[i] = true;
        }
        self.down[i] = pressed;
    }

    /// Check if a specific button is down.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        Self::slot(button).is_some_and(|i| self.down[i])
    }

    /// Button went down since the last [`ButtonState::end_frame`].
    pub fn just_pressed(&self, button: MouseButton) -> bool {
        Self::slot(button).is_some_and(|i| self.went_down[i])
    }

    /// Button went up since the last [`ButtonState::end_frame`].
    pub fn just_released(&self, button: MouseButton) -> bool {
        Self::slot(button).is_some_and(|i| self.went_up[i])
    }

    /// Check if any button is down.
    pub fn any_pressed(&self) -> bool {
        self.down.iter().any(|d| *d)
    }

    /// Drop this frame's edges, keeping levels.
    pub fn end_frame(&mut self) {
        self.went_down = [false; 3];
        self.went_up = [false; 3];
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete mouse state as seen by the aim logic.
///
/// Positions are stored in world space; the caller converts window pixels
/// (see [`crate::camera::OrthoCamera2D`]) before handing them in.
#[derive(Debug, Clone)]
pub struct MouseState {
    /// Pointer position in world space
    pub world_position: Vec2,
    /// Button levels and edges
    pub buttons: ButtonState,
    /// Button that drives aiming
    pub aim_button: MouseButton,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            world_position: Vec2::ZERO,
            buttons: ButtonState::default(),
            aim_button: MouseButton::Left,
        }
    }
}

impl MouseState {
    /// Create a new mouse state aiming with the left button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the pointer position (world space).
    pub fn set_world_position(&mut self, position: Vec2) {
        self.world_position = position;
    }

    /// Handle a mouse button press/release event.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons.set(button, pressed);
    }

    /// Call once after the frame's logic has read the edges.
    pub fn end_frame(&mut self) {
        self.buttons.end_frame();
    }

    /// Reset all mouse state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl InputSource for MouseState {
    fn pointer_position(&self) -> Vec2 {
        self.world_position
    }

    fn pressed(&self) -> bool {
        self.buttons.just_pressed(self.aim_button)
    }

    fn released(&self) -> bool {
        self.buttons.just_released(self.aim_button)
    }

    fn held(&self) -> bool {
        self.buttons.is_pressed(self.aim_button)
    }
}
