//! Aim State Machine
//!
//! Idle → Dragging on press, Dragging → Idle on release. While dragging the
//! pull vector (anchor − pointer) is turned into a launch direction and a
//! power every frame. [`step_aim`] is a pure function of the previous phase,
//! the pointer frame and the config, so it can be driven from any loop.

use glam::Vec2;

use crate::game::config::{AimConfig, AimMode};
use crate::input::PointerFrame;

/// Everything known about the shot being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimState {
    /// Pointer position when the drag started
    pub anchor: Vec2,
    /// Pointer position this frame
    pub pointer: Vec2,
    /// Raw pull vector, `anchor - pointer`
    pub pull: Vec2,
    /// Pull length clamped to `[0, max_pull_distance]`
    pub pull_distance: f32,
    /// `pull_distance / max_pull_distance`, in `[0, 1]`
    pub pull_normalized: f32,
    /// Unit launch direction
    pub direction: Vec2,
    /// Launch speed
    pub power: f32,
}

impl AimState {
    /// Recompute the aim for a drag from `anchor` to `pointer`.
    pub fn compute(anchor: Vec2, pointer: Vec2, config: &AimConfig) -> Self {
        let pull = anchor - pointer;
        let pull_distance = pull.length().clamp(0.0, config.max_pull_distance);
        let pull_normalized = pull_distance / config.max_pull_distance;

        Self {
            anchor,
            pointer,
            pull,
            pull_distance,
            pull_normalized,
            direction: launch_direction(pull, config),
            power: launch_power(pull_normalized, config),
        }
    }

    /// Launch velocity (`direction * power`).
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.power
    }

    /// Freeze this aim into a shot leaving `origin`.
    pub fn to_shot(&self, origin: Vec2, rotation_offset: f32) -> Shot {
        Shot {
            origin,
            direction: self.direction,
            power: self.power,
            rotation_degrees: self.direction.y.atan2(self.direction.x).to_degrees()
                + rotation_offset,
        }
    }
}

/// Launch direction for a pull vector.
///
/// `Locked` shoots along +X, tilted by the scaled vertical pull within the
/// configured range. `Free` follows the pull itself, falling back to +X for
/// a zero pull.
pub fn launch_direction(pull: Vec2, config: &AimConfig) -> Vec2 {
    match config.mode {
        AimMode::Locked => {
            let tilt = (pull.y * config.vertical.sensitivity)
                .clamp(config.vertical.min, config.vertical.max);
            Vec2::new(1.0, tilt).normalize()
        }
        AimMode::Free => pull.normalize_or(Vec2::X),
    }
}

/// `lerp(min_power, max_power, pull_normalized ^ power_curve)`.
///
/// The input is clamped to `[0, 1]` first, so the result never leaves the
/// configured power range.
pub fn launch_power(pull_normalized: f32, config: &AimConfig) -> f32 {
    let t = pull_normalized.clamp(0.0, 1.0).powf(config.power.power_curve);
    config.power.min_power + (config.power.max_power - config.power.min_power) * t
}

/// A released shot, ready to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Vec2,
    pub direction: Vec2,
    pub power: f32,
    /// Sprite orientation: launch heading plus the configured offset
    pub rotation_degrees: f32,
}

impl Shot {
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.power
    }
}

/// Aim input phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum AimPhase {
    #[default]
    Idle,
    Dragging(AimState),
}

impl AimPhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, AimPhase::Dragging(_))
    }

    /// Current aim, if dragging.
    pub fn aim(&self) -> Option<&AimState> {
        match self {
            AimPhase::Dragging(state) => Some(state),
            AimPhase::Idle => None,
        }
    }
}

/// Notable transitions produced by [`step_aim`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimTransition {
    /// Drag started (or restarted) at this anchor.
    Started { anchor: Vec2 },
    /// Pointer released; this is the final aim.
    Released(AimState),
    /// Drag abandoned without a shot.
    Cancelled,
}

/// Abandon any drag in progress (focus lost, menu opened).
///
/// Cancelling while idle is a no-op and reports nothing.
pub fn cancel_aim(phase: AimPhase) -> (AimPhase, Option<AimTransition>) {
    match phase {
        AimPhase::Dragging(_) => (AimPhase::Idle, Some(AimTransition::Cancelled)),
        AimPhase::Idle => (AimPhase::Idle, None),
    }
}

/// Advance the aim phase by one pointer frame.
///
/// A press and a release in the same frame produce a zero-pull release.
/// A release while idle is ignored. A press while dragging re-anchors.
/// A drag whose button is found up without a release edge is cancelled.
pub fn step_aim(
    phase: AimPhase,
    frame: &PointerFrame,
    config: &AimConfig,
) -> (AimPhase, Option<AimTransition>) {
    let mut transition = None;

    let phase = if frame.pressed {
        let anchor = frame.position;
        transition = Some(AimTransition::Started { anchor });
        AimPhase::Dragging(AimState::compute(anchor, frame.position, config))
    } else {
        phase
    };

    match phase {
        AimPhase::Idle => (AimPhase::Idle, transition),
        AimPhase::Dragging(state) => {
            let aim = AimState::compute(state.anchor, frame.position, config);
            if frame.released {
                // A same-frame press+release still reports the release
                (AimPhase::Idle, Some(AimTransition::Released(aim)))
            } else if frame.held || frame.pressed {
                (AimPhase::Dragging(aim), transition)
            } else {
                // Button came up without a release edge (focus loss etc.)
                (AimPhase::Idle, Some(AimTransition::Cancelled))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bow() -> AimConfig {
        AimConfig::default()
    }

    #[test]
    fn test_release_scenario() {
        // anchor (0,0), release at (-3,0), max pull 5
        let config = bow();
        let (phase, t) = step_aim(AimPhase::Idle, &PointerFrame::press(Vec2::ZERO), &config);
        assert_eq!(t, Some(AimTransition::Started { anchor: Vec2::ZERO }));

        let (phase, t) = step_aim(phase, &PointerFrame::release(Vec2::new(-3.0, 0.0)), &config);
        assert_eq!(phase, AimPhase::Idle);
        let Some(AimTransition::Released(aim)) = t else {
            panic!("expected release, got {t:?}");
        };
        assert_eq!(aim.pull, Vec2::new(3.0, 0.0));
        assert!((aim.pull_normalized - 0.6).abs() < 1e-6);
        assert!((aim.direction - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_free_mode_scenario_points_away_from_drag() {
        let config = AimConfig::slingshot();
        let aim = AimState::compute(Vec2::ZERO, Vec2::new(-3.0, 0.0), &config);
        assert!((aim.direction - Vec2::X).length() < 1e-6);

        let aim = AimState::compute(Vec2::ZERO, Vec2::new(-3.0, -4.0), &config);
        assert!((aim.direction - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_zero_pull_gives_min_power() {
        let config = bow();
        let (_, t) = step_aim(
            AimPhase::Idle,
            &PointerFrame {
                position: Vec2::new(2.0, 1.0),
                pressed: true,
                released: true,
                held: false,
            },
            &config,
        );
        let Some(AimTransition::Released(aim)) = t else {
            panic!("expected release, got {t:?}");
        };
        assert_eq!(aim.pull_distance, 0.0);
        assert_eq!(aim.power, config.power.min_power);
    }

    #[test]
    fn test_pull_is_clamped() {
        let config = bow();
        for pointer in [
            Vec2::new(-1.0, 0.0),
            Vec2::new(-4.99, 0.0),
            Vec2::new(-30.0, 12.0),
            Vec2::new(100.0, -100.0),
        ] {
            let aim = AimState::compute(Vec2::ZERO, pointer, &config);
            assert!(aim.pull_distance <= config.max_pull_distance);
            assert!((0.0..=1.0).contains(&aim.pull_normalized));
            if aim.pull.length() <= config.max_pull_distance {
                let expected = aim.pull.length() / config.max_pull_distance;
                assert!((aim.pull_normalized - expected).abs() < 1e-6);
            }
            assert!(aim.power >= config.power.min_power);
            assert!(aim.power <= config.power.max_power);
        }
    }

    #[test]
    fn test_power_is_monotonic() {
        let config = bow();
        let mut last = f32::MIN;
        for i in 0..=100 {
            let p = launch_power(i as f32 / 100.0, &config);
            assert!(p >= last, "power dropped at {i}");
            last = p;
        }
        assert_eq!(launch_power(0.0, &config), 15.0);
        assert!((launch_power(1.0, &config) - 50.0).abs() < 1e-4);
        // Never extrapolated
        assert!((launch_power(3.0, &config) - 50.0).abs() < 1e-4);
        assert_eq!(launch_power(-1.0, &config), 15.0);
    }

    #[test]
    fn test_power_curve_biases_low_end() {
        let config = bow();
        let halfway = launch_power(0.5, &config);
        // 0.5^1.5 ≈ 0.354, below the linear midpoint
        assert!(halfway < 32.5);
        assert!((halfway - (15.0 + 35.0 * 0.5f32.powf(1.5))).abs() < 1e-4);
    }

    #[test]
    fn test_locked_vertical_clamp() {
        let config = bow();
        // Pull far down → pointer above anchor → negative pull.y
        let dir = launch_direction(Vec2::new(1.0, -50.0), &config);
        assert!((dir - Vec2::new(1.0, -0.2).normalize()).length() < 1e-6);
        let dir = launch_direction(Vec2::new(1.0, 50.0), &config);
        assert!((dir - Vec2::new(1.0, 0.5).normalize()).length() < 1e-6);
        let dir = launch_direction(Vec2::new(3.0, 1.0), &config);
        assert!((dir - Vec2::new(1.0, 0.2).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_drag_updates_every_frame() {
        let config = bow();
        let press = PointerFrame::press(Vec2::new(1.0, 1.0));
        let (phase, _) = step_aim(AimPhase::Idle, &press, &config);
        let (phase, t) = step_aim(phase, &PointerFrame::drag(Vec2::new(0.0, 1.0)), &config);
        assert!(t.is_none());
        let aim = phase.aim().unwrap();
        assert_eq!(aim.anchor, Vec2::new(1.0, 1.0));
        assert_eq!(aim.pull, Vec2::new(1.0, 0.0));

        let (phase, _) = step_aim(phase, &PointerFrame::drag(Vec2::new(-1.0, 1.0)), &config);
        assert_eq!(phase.aim().unwrap().pull, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_release_while_idle_ignored() {
        let (phase, t) = step_aim(AimPhase::Idle, &PointerFrame::release(Vec2::ONE), &bow());
        assert_eq!(phase, AimPhase::Idle);
        assert!(t.is_none());
    }

    #[test]
    fn test_press_while_dragging_reanchors() {
        let config = bow();
        let (phase, _) = step_aim(AimPhase::Idle, &PointerFrame::press(Vec2::ZERO), &config);
        let (phase, _) = step_aim(phase, &PointerFrame::drag(Vec2::new(-2.0, 0.0)), &config);
        let (phase, t) = step_aim(phase, &PointerFrame::press(Vec2::new(5.0, 5.0)), &config);
        assert_eq!(t, Some(AimTransition::Started { anchor: Vec2::new(5.0, 5.0) }));
        assert_eq!(phase.aim().unwrap().pull, Vec2::ZERO);
    }

    #[test]
    fn test_lost_button_drops_drag() {
        let config = bow();
        let (phase, _) = step_aim(AimPhase::Idle, &PointerFrame::press(Vec2::ZERO), &config);
        let (phase, t) = step_aim(phase, &PointerFrame::idle(Vec2::new(-2.0, 0.0)), &config);
        assert_eq!(phase, AimPhase::Idle);
        assert_eq!(t, Some(AimTransition::Cancelled));

        // Already idle: further idle frames report nothing
        let (phase, t) = step_aim(phase, &PointerFrame::idle(Vec2::new(-2.0, 0.0)), &config);
        assert_eq!(phase, AimPhase::Idle);
        assert!(t.is_none());
    }

    #[test]
    fn test_cancel() {
        let config = bow();
        let (phase, _) = step_aim(AimPhase::Idle, &PointerFrame::press(Vec2::ZERO), &config);
        let (phase, t) = cancel_aim(phase);
        assert_eq!(phase, AimPhase::Idle);
        assert_eq!(t, Some(AimTransition::Cancelled));
        assert_eq!(cancel_aim(AimPhase::Idle), (AimPhase::Idle, None));
    }

    #[test]
    fn test_shot_rotation_offset() {
        let config = bow();
        let aim = AimState::compute(Vec2::ZERO, Vec2::new(-3.0, 0.0), &config);
        let shot = aim.to_shot(Vec2::ONE, -90.0);
        assert!((shot.rotation_degrees + 90.0).abs() < 1e-4);
        assert_eq!(shot.velocity(), aim.velocity());
    }
}
