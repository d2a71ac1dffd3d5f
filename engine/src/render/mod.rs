//! Render Module
//!
//! Drawing itself belongs to the host engine. This module owns the CPU side
//! of the aim visuals: the [`TrajectoryRenderer`] seam the aim system writes
//! preview points into, and [`DotPool`], the pooled dot set a host draws.

pub mod dot_pool;

pub use dot_pool::{Dot, DotPool};

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

/// Receives the preview points (trajectory arc or aim line) each frame.
pub trait TrajectoryRenderer {
    /// Replace the displayed points.
    fn set_points(&mut self, points: &[Vec2]);

    /// Hide the preview.
    fn clear(&mut self);
}

impl<T: TrajectoryRenderer + ?Sized> TrajectoryRenderer for Box<T> {
    fn set_points(&mut self, points: &[Vec2]) {
        (**self).set_points(points);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Lets the host keep reading a pool it handed to the aim system.
impl<T: TrajectoryRenderer + ?Sized> TrajectoryRenderer for Rc<RefCell<T>> {
    fn set_points(&mut self, points: &[Vec2]) {
        self.borrow_mut().set_points(points);
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }
}
