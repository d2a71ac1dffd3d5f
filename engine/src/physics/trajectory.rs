//! Closed-form trajectory prediction for the aim preview.
//!
//! The preview never steps a simulation: each sample is evaluated directly
//! from the launch parameters, so a sample costs O(1) and the dotted arc
//! has exactly as many points as requested no matter how hard the bow is
//! pulled.
//!
//! # Example
//!
//! ```ignore
//! use bowshot_engine::physics::trajectory::Trajectory;
//! use glam::Vec2;
//!
//! let arc = Trajectory::new(Vec2::ZERO, Vec2::new(20.0, 5.0), Vec2::new(0.0, -7.8));
//! let dots: Vec<Vec2> = arc.samples(10, 3.0).collect();
//! assert_eq!(dots.len(), 10);
//! ```

use glam::Vec2;

/// Launch parameters of a ballistic path in the world plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    /// Launch position (world space)
    pub origin: Vec2,
    /// Initial velocity (direction * power)
    pub velocity: Vec2,
    /// Gravity acceleration, already multiplied by the projectile's gravity scale
    pub gravity: Vec2,
    /// Seconds after launch before gravity starts acting
    pub gravity_delay: f32,
}

impl Trajectory {
    /// Trajectory with gravity active from the first instant.
    pub fn new(origin: Vec2, velocity: Vec2, gravity: Vec2) -> Self {
        Self {
            origin,
            velocity,
            gravity,
            gravity_delay: 0.0,
        }
    }

    /// Keep the path straight for `delay` seconds before gravity engages,
    /// the same way a projectile spawned with a gravity delay flies.
    pub fn with_gravity_delay(mut self, delay: f32) -> Self {
        self.gravity_delay = delay.max(0.0);
        self
    }

    /// Time spent under gravity at flight time `t`.
    #[inline]
    fn falling_time(&self, t: f32) -> f32 {
        (t - self.gravity_delay).max(0.0)
    }

    /// Position at flight time `t` (seconds).
    ///
    /// `pos(t) = origin + velocity*t + 0.5*gravity*(t - delay)²`, the
    /// gravity term being zero until the delay has elapsed.
    pub fn position_at(&self, t: f32) -> Vec2 {
        let tg = self.falling_time(t);
        self.origin + self.velocity * t + 0.5 * self.gravity * tg * tg
    }

    /// Velocity at flight time `t` (seconds).
    pub fn velocity_at(&self, t: f32) -> Vec2 {
        self.velocity + self.gravity * self.falling_time(t)
    }

    /// Time and position of the highest point of the arc.
    ///
    /// Returns `None` when the path never climbs (launch velocity pointing
    /// with gravity or no gravity at all).
    pub fn apex(&self) -> Option<(f32, Vec2)> {
        let g_len_sq = self.gravity.length_squared();
        if g_len_sq <= f32::EPSILON {
            return None;
        }
        // Component of velocity against gravity
        let up = -self.gravity / g_len_sq.sqrt();
        let climb = self.velocity.dot(up);
        if climb <= 0.0 {
            return None;
        }
        let t = self.gravity_delay + climb / g_len_sq.sqrt();
        Some((t, self.position_at(t)))
    }

    /// Lazily sample `count` points spread evenly over `[0, horizon]`.
    ///
    /// Sample `i` sits at `t = i * horizon / (count - 1)`; a single sample
    /// is the launch point itself.
    pub fn samples(&self, count: usize, horizon: f32) -> TrajectorySamples {
        let step = if count > 1 {
            horizon.max(0.0) / (count - 1) as f32
        } else {
            0.0
        };
        TrajectorySamples {
            trajectory: *self,
            step,
            next: 0,
            count,
        }
    }

    /// Write samples into a caller-owned buffer, reusing its allocation.
    pub fn fill_samples(&self, count: usize, horizon: f32, out: &mut Vec<Vec2>) {
        out.clear();
        out.extend(self.samples(count, horizon));
    }
}

/// Finite, restartable iterator over trajectory sample points.
///
/// Cloning gives an independent cursor; [`TrajectorySamples::restart`]
/// rewinds in place.
#[derive(Debug, Clone)]
pub struct TrajectorySamples {
    trajectory: Trajectory,
    step: f32,
    next: usize,
    count: usize,
}

impl TrajectorySamples {
    /// Rewind to the first sample.
    pub fn restart(&mut self) {
        self.next = 0;
    }

    /// Time step between consecutive samples.
    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Iterator for TrajectorySamples {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.next >= self.count {
            return None;
        }
        let t = self.next as f32 * self.step;
        self.next += 1;
        Some(self.trajectory.position_at(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrajectorySamples {}

/// Straight aim-guide line: `count` points from `origin` along `direction`,
/// point `i` at `i / count * length`.
pub fn aim_line(
    origin: Vec2,
    direction: Vec2,
    length: f32,
    count: usize,
) -> impl Iterator<Item = Vec2> {
    let dir = direction.normalize_or_zero();
    (0..count).map(move |i| origin + dir * (i as f32 / count as f32) * length)
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: Vec2 = Vec2::new(0.0, -9.81);

    #[test]
    fn test_first_sample_is_origin() {
        let origin = Vec2::new(3.5, -1.25);
        let arc = Trajectory::new(origin, Vec2::new(40.0, 12.0), G * 0.8);
        let first = arc.samples(10, 3.0).next();
        assert_eq!(first, Some(origin));
        assert_eq!(arc.position_at(0.0), origin);
    }

    #[test]
    fn test_sample_count_is_fixed() {
        for power in [0.0, 15.0, 50.0, 500.0] {
            let arc = Trajectory::new(Vec2::ZERO, Vec2::X * power, G);
            let samples = arc.samples(10, 3.0);
            assert_eq!(samples.len(), 10);
            assert_eq!(samples.count(), 10);
        }
    }

    #[test]
    fn test_single_sample() {
        let arc = Trajectory::new(Vec2::ONE, Vec2::new(5.0, 5.0), G);
        let points: Vec<Vec2> = arc.samples(1, 3.0).collect();
        assert_eq!(points, vec![Vec2::ONE]);
    }

    #[test]
    fn test_last_sample_at_horizon() {
        let arc = Trajectory::new(Vec2::ZERO, Vec2::new(10.0, 5.0), G);
        let last = arc.samples(10, 3.0).last().unwrap();
        let expected = arc.position_at(3.0);
        assert!((last - expected).length() < 1e-4);
    }

    #[test]
    fn test_closed_form_values() {
        let arc = Trajectory::new(Vec2::ZERO, Vec2::new(10.0, 5.0), Vec2::new(0.0, -10.0));
        let p = arc.position_at(1.0);
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.y - 0.0).abs() < 1e-5); // 5 - 0.5 * 10
        let v = arc.velocity_at(1.0);
        assert!((v.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_restartable() {
        let arc = Trajectory::new(Vec2::ZERO, Vec2::new(10.0, 5.0), G);
        let mut samples = arc.samples(5, 2.0);
        let first_pass: Vec<Vec2> = samples.by_ref().collect();
        assert_eq!(samples.len(), 0);
        samples.restart();
        let second_pass: Vec<Vec2> = samples.collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_gravity_delay_keeps_path_straight() {
        let arc = Trajectory::new(Vec2::ZERO, Vec2::new(10.0, 5.0), G).with_gravity_delay(0.2);
        let p = arc.position_at(0.2);
        assert!((p - Vec2::new(2.0, 1.0)).length() < 1e-5);
        assert_eq!(arc.velocity_at(0.1), Vec2::new(10.0, 5.0));
        assert!(arc.velocity_at(0.3).y < 5.0);
    }

    #[test]
    fn test_apex() {
        let arc = Trajectory::new(Vec2::ZERO, Vec2::new(3.0, 10.0), Vec2::new(0.0, -10.0));
        let (t, pos) = arc.apex().unwrap();
        assert!((t - 1.0).abs() < 1e-5);
        assert!((pos.y - 5.0).abs() < 1e-4);

        let falling = Trajectory::new(Vec2::ZERO, Vec2::new(3.0, -1.0), G);
        assert!(falling.apex().is_none());
    }

    #[test]
    fn test_fill_samples_reuses_buffer() {
        let arc = Trajectory::new(Vec2::ZERO, Vec2::new(10.0, 5.0), G);
        let mut buf = Vec::with_capacity(16);
        arc.fill_samples(10, 3.0, &mut buf);
        let cap = buf.capacity();
        arc.fill_samples(10, 3.0, &mut buf);
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_aim_line_spacing() {
        let points: Vec<Vec2> = aim_line(Vec2::ZERO, Vec2::new(2.0, 0.0), 10.0, 20).collect();
        assert_eq!(points.len(), 20);
        assert_eq!(points[0], Vec2::ZERO);
        assert!((points[10].x - 5.0).abs() < 1e-5);
        // Never reaches the full length
        assert!(points[19].x < 10.0);
    }
}
