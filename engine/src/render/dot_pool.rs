//! Pre-allocated pool of trajectory dots.
//!
//! All dots are created once at startup and only toggled visible/hidden
//! and moved afterwards, so updating the preview every frame never
//! allocates.

use glam::Vec2;

use super::TrajectoryRenderer;

/// One preview dot. The host renderer draws every visible dot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dot {
    pub position: Vec2,
    pub visible: bool,
}

/// Fixed-capacity arena of dots indexed `0..capacity`.
#[derive(Debug, Clone)]
pub struct DotPool {
    dots: Vec<Dot>,
}

impl DotPool {
    /// Allocate `capacity` hidden dots at `rest` (usually the fire point).
    pub fn new(capacity: usize, rest: Vec2) -> Self {
        Self {
            dots: vec![
                Dot {
                    position: rest,
                    visible: false,
                };
                capacity
            ],
        }
    }

    /// Number of dots in the pool.
    pub fn capacity(&self) -> usize {
        self.dots.len()
    }

    /// All dots, visible or not.
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Iterate over visible dot positions.
    pub fn visible(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.dots.iter().filter(|d| d.visible).map(|d| d.position)
    }

    /// Number of visible dots.
    pub fn visible_count(&self) -> usize {
        self.dots.iter().filter(|d| d.visible).count()
    }
}

impl TrajectoryRenderer for DotPool {
    /// Show one dot per point; points beyond capacity are dropped and
    /// unused dots are hidden.
    fn set_points(&mut self, points: &[Vec2]) {
        for (i, dot) in self.dots.iter_mut().enumerate() {
            match points.get(i) {
                Some(p) => {
                    dot.position = *p;
                    dot.visible = true;
                }
                None => dot.visible = false,
            }
        }
    }

    fn clear(&mut self) {
        for dot in &mut self.dots {
            dot.visible = false;
        }
    }
}
