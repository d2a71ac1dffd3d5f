//! Pointer contract consumed by the aim logic.
//!
//! The aim state machine never talks to a window or device directly; it
//! reads one [`PointerFrame`] per tick, built from whatever implements
//! [`InputSource`].

use glam::Vec2;

/// Per-frame pointer queries, in world coordinates.
///
/// `pressed` and `released` are edges (true only on the frame the button
/// changed), `held` is the level.
pub trait InputSource {
    /// Pointer position in world space.
    fn pointer_position(&self) -> Vec2;
    /// Button went down this frame.
    fn pressed(&self) -> bool;
    /// Button went up this frame.
    fn released(&self) -> bool;
    /// Button is currently down.
    fn held(&self) -> bool;

    /// Snapshot all four queries into a [`PointerFrame`].
    fn frame(&self) -> PointerFrame {
        PointerFrame {
            position: self.pointer_position(),
            pressed: self.pressed(),
            released: self.released(),
            held: self.held(),
        }
    }
}

/// Immutable snapshot of the pointer for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    pub position: Vec2,
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
}

impl PointerFrame {
    /// Pointer resting at `position` with the button up.
    pub fn idle(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Frame on which the button goes down.
    pub fn press(position: Vec2) -> Self {
        Self {
            position,
            pressed: true,
            released: false,
            held: true,
        }
    }

    /// Frame with the button kept down.
    pub fn drag(position: Vec2) -> Self {
        Self {
            position,
            pressed: false,
            released: false,
            held: true,
        }
    }

    /// Frame on which the button goes up.
    pub fn release(position: Vec2) -> Self {
        Self {
            position,
            pressed: false,
            released: true,
            held: false,
        }
    }
}

impl InputSource for PointerFrame {
    fn pointer_position(&self) -> Vec2 {
        self.position
    }

    fn pressed(&self) -> bool {
        self.pressed
    }

    fn released(&self) -> bool {
        self.released
    }

    fn held(&self) -> bool {
        self.held
    }

    fn frame(&self) -> PointerFrame {
        *self
    }
}
