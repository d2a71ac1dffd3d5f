//! Clamped, frame-rate independent angle smoothing for aim bones.
//!
//! Angles are in degrees throughout, matching what skeletal rigs store.

use glam::Vec2;

/// Signed shortest rotation from `from` to `to`, in (-180, 180].
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Bearing of `direction` in degrees (0 = +X, counter-clockwise positive).
///
/// With `mirror_vertical` the Y component is negated first, for rigs whose
/// bone rotations run clockwise.
pub fn bearing_degrees(direction: Vec2, mirror_vertical: bool) -> f32 {
    let dir = direction.normalize_or_zero();
    let y = if mirror_vertical { -dir.y } else { dir.y };
    y.atan2(dir.x).to_degrees()
}

/// Fraction of the remaining gap closed in `dt` seconds.
///
/// `1 - e^(-rate*dt)` stays in [0, 1) for any step size, so the angle never
/// passes its target.
#[inline]
pub fn smoothing_alpha(rate: f32, dt: f32) -> f32 {
    if rate <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// Per-bone smoothing state: a current angle chasing a clamped target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSmoother {
    /// Current angle in degrees
    pub current: f32,
    /// Largest deflection either side of zero
    pub max_deflection: f32,
    /// Convergence rate (1/s)
    pub rate: f32,
}

impl AngleSmoother {
    pub fn new(max_deflection: f32, rate: f32) -> Self {
        Self {
            current: 0.0,
            max_deflection: max_deflection.abs(),
            rate,
        }
    }

    /// Start from an angle already on the rig.
    pub fn starting_at(mut self, current: f32) -> Self {
        self.current = current;
        self
    }

    /// Clamp a raw bearing to this bone's deflection range.
    pub fn target_for(&self, bearing: f32) -> f32 {
        bearing.clamp(-self.max_deflection, self.max_deflection)
    }

    /// Advance toward `bearing` (clamped) and return the new angle.
    pub fn update(&mut self, bearing: f32, dt: f32) -> f32 {
        let target = self.target_for(bearing);
        let alpha = smoothing_alpha(self.rate, dt);
        self.current += shortest_angle_delta(self.current, target) * alpha;
        self.current
    }
}
