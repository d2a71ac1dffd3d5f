//! Aim Configuration
//!
//! Every tunable of the bow in one struct. `Default` is the rig-driven bow;
//! [`AimConfig::slingshot`] is the simpler free-aim setup. Both can be
//! overridden from JSON, missing fields keeping their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::error::ConfigError;
use crate::physics::WORLD_GRAVITY;

/// How the launch direction is derived from the pull vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AimMode {
    /// Shoot along +X; pulling up/down only tilts the shot within the
    /// vertical aim range.
    #[default]
    Locked,
    /// Shoot straight along the pull vector (slingshot style).
    Free,
}

/// Which pose strategy follows the aim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseKind {
    /// Rotate head/body bones of a skeletal rig toward the cursor
    #[default]
    Rig,
    /// Rotate the whole character transform to face the pull
    Transform,
    /// No pose feedback
    None,
}

/// Pull-to-power mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Launch speed at zero pull
    pub min_power: f32,
    /// Launch speed at full pull
    pub max_power: f32,
    /// Exponent applied to the normalized pull before interpolating
    pub power_curve: f32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            min_power: 15.0,
            max_power: 50.0,
            power_curve: 1.5,
        }
    }
}

/// Vertical tilt limits for [`AimMode::Locked`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalAimConfig {
    /// Lowest Y component of the unnormalized direction
    pub min: f32,
    /// Highest Y component of the unnormalized direction
    pub max: f32,
    /// Pull Y to direction Y scale
    pub sensitivity: f32,
}

impl Default for VerticalAimConfig {
    fn default() -> Self {
        Self {
            min: -0.2,
            max: 0.5,
            sensitivity: 0.2,
        }
    }
}

/// Dotted preview sampling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Number of dots (fixed, independent of pull)
    pub sample_count: usize,
    /// Flight time covered by the last dot (seconds)
    pub horizon: f32,
    /// Bend the preview only after the projectile's gravity delay, so it
    /// matches the live arrow. Off reproduces a preview that falls early.
    pub model_gravity_delay: bool,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            sample_count: 10,
            horizon: 3.0,
            model_gravity_delay: true,
        }
    }
}

/// Straight aim-guide line drawn from the character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimLineConfig {
    pub length: f32,
    pub points: usize,
}

impl Default for AimLineConfig {
    fn default() -> Self {
        Self {
            length: 10.0,
            points: 20,
        }
    }
}

/// Projectile world and per-arrow launch settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Unscaled world gravity
    pub gravity: Vec2,
    /// Multiplier applied to gravity for arrows (and the preview)
    pub gravity_scale: f32,
    /// Seconds of straight flight before gravity engages
    pub gravity_delay: f32,
    /// Added to the launch heading to orient the arrow sprite (degrees)
    pub rotation_offset: f32,
    /// Most arrows alive at once
    pub max_projectiles: usize,
    /// Seconds before an arrow that never hit anything is removed
    pub max_lifetime: Option<f32>,
    /// Flat ground plane arrows collide with
    pub ground_y: Option<f32>,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            gravity: WORLD_GRAVITY,
            gravity_scale: 0.8,
            gravity_delay: 0.2,
            rotation_offset: -90.0,
            max_projectiles: 32,
            max_lifetime: Some(10.0),
            ground_y: None,
        }
    }
}

impl ProjectileConfig {
    /// Gravity actually acting on an arrow once enabled.
    pub fn scaled_gravity(&self) -> Vec2 {
        self.gravity * self.gravity_scale
    }
}

/// Name and deflection limit of one aim bone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneLimit {
    pub name: String,
    /// Degrees either side of the setup pose
    pub max_deflection: f32,
}

/// Animation names played around a shot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationNames {
    /// Looped while drawing the bow
    pub aim: String,
    /// Played once on release
    pub shoot: String,
}

impl Default for AnimationNames {
    fn default() -> Self {
        Self {
            aim: "attack_target".to_string(),
            shoot: "attack_finish".to_string(),
        }
    }
}

/// Skeletal rig pose settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub head: BoneLimit,
    pub body: BoneLimit,
    /// Convergence rate of bone angles toward their targets (1/s)
    pub smoothing: f32,
    /// Negate the cursor bearing's Y (rigs with clockwise-positive bones)
    pub mirror_vertical: bool,
    pub animations: AnimationNames,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            head: BoneLimit {
                name: "head".to_string(),
                max_deflection: 40.0,
            },
            body: BoneLimit {
                name: "body".to_string(),
                max_deflection: 35.0,
            },
            smoothing: 8.0,
            mirror_vertical: true,
            animations: AnimationNames::default(),
        }
    }
}

/// Complete aim configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    pub mode: AimMode,
    pub pose: PoseKind,
    /// Pull length that counts as full draw
    pub max_pull_distance: f32,
    pub power: PowerConfig,
    pub vertical: VerticalAimConfig,
    /// Where arrows spawn (world space)
    pub fire_point: Vec2,
    /// Character origin the cursor bearing is measured from
    pub pivot: Vec2,
    pub trajectory: TrajectoryConfig,
    /// Optional straight guide line along the character's facing
    pub aim_line: Option<AimLineConfig>,
    pub projectile: ProjectileConfig,
    pub rig: RigConfig,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            mode: AimMode::Locked,
            pose: PoseKind::Rig,
            max_pull_distance: 5.0,
            power: PowerConfig::default(),
            vertical: VerticalAimConfig::default(),
            fire_point: Vec2::new(0.6, 1.2),
            pivot: Vec2::ZERO,
            trajectory: TrajectoryConfig::default(),
            aim_line: None,
            projectile: ProjectileConfig::default(),
            rig: RigConfig::default(),
        }
    }
}

impl AimConfig {
    /// Free-aim slingshot: the shot follows the pull, the character
    /// transform turns to face it, gravity acts from the first instant and
    /// the preview shows 30 dots a tenth of a second apart.
    pub fn slingshot() -> Self {
        Self {
            mode: AimMode::Free,
            pose: PoseKind::Transform,
            max_pull_distance: 5.0,
            power: PowerConfig {
                min_power: 0.0,
                max_power: 50.0,
                power_curve: 1.0,
            },
            trajectory: TrajectoryConfig {
                sample_count: 30,
                horizon: 2.9,
                model_gravity_delay: true,
            },
            projectile: ProjectileConfig {
                gravity_scale: 1.0,
                gravity_delay: 0.0,
                rotation_offset: 0.0,
                ..ProjectileConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject configurations that would break the aim invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_pull_distance > 0.0 && self.max_pull_distance.is_finite()) {
            return Err(ConfigError::invalid(
                "max_pull_distance",
                "must be a positive finite number",
            ));
        }
        if !(self.power.min_power.is_finite() && self.power.max_power.is_finite()) {
            return Err(ConfigError::invalid("power", "min/max power must be finite"));
        }
        if self.power.min_power > self.power.max_power {
            return Err(ConfigError::invalid(
                "power.min_power",
                format!(
                    "{} exceeds max_power {}",
                    self.power.min_power, self.power.max_power
                ),
            ));
        }
        if !(self.power.power_curve > 0.0 && self.power.power_curve.is_finite()) {
            return Err(ConfigError::invalid(
                "power.power_curve",
                "must be a positive finite exponent",
            ));
        }
        if self.vertical.min > self.vertical.max {
            return Err(ConfigError::invalid(
                "vertical.min",
                "vertical aim range is inverted",
            ));
        }
        if self.trajectory.sample_count == 0 {
            return Err(ConfigError::invalid(
                "trajectory.sample_count",
                "at least one sample is required",
            ));
        }
        if !(self.trajectory.horizon >= 0.0) {
            return Err(ConfigError::invalid(
                "trajectory.horizon",
                "must not be negative",
            ));
        }
        if !(self.projectile.gravity_delay >= 0.0) {
            return Err(ConfigError::invalid(
                "projectile.gravity_delay",
                "must not be negative",
            ));
        }
        if self.projectile.max_projectiles == 0 {
            return Err(ConfigError::invalid(
                "projectile.max_projectiles",
                "must allow at least one projectile",
            ));
        }
        if let Some(lifetime) = self.projectile.max_lifetime {
            if !(lifetime > 0.0) {
                return Err(ConfigError::invalid(
                    "projectile.max_lifetime",
                    "must be positive when set",
                ));
            }
        }
        if let Some(line) = &self.aim_line {
            if line.points == 0 {
                return Err(ConfigError::invalid("aim_line.points", "must be positive"));
            }
        }
        if self.pose == PoseKind::Rig {
            if self.rig.smoothing < 0.0 {
                return Err(ConfigError::invalid("rig.smoothing", "must not be negative"));
            }
            if self.rig.head.max_deflection < 0.0 || self.rig.body.max_deflection < 0.0 {
                return Err(ConfigError::invalid(
                    "rig.max_deflection",
                    "bone deflection limits must not be negative",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        AimConfig::default().validate().unwrap();
        AimConfig::slingshot().validate().unwrap();
    }

    #[test]
    fn test_default_values() {
        let config = AimConfig::default();
        assert_eq!(config.mode, AimMode::Locked);
        assert_eq!(config.max_pull_distance, 5.0);
        assert_eq!(config.power.min_power, 15.0);
        assert_eq!(config.power.max_power, 50.0);
        assert_eq!(config.trajectory.sample_count, 10);
        assert_eq!(config.projectile.gravity_delay, 0.2);
        assert_eq!(config.rig.head.max_deflection, 40.0);
        assert_eq!(config.rig.body.max_deflection, 35.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AimConfig::from_json_str(
            r#"{ "mode": "free", "power": { "max_power": 80.0 }, "fire_point": [1.0, 2.0] }"#,
        )
        .unwrap();
        assert_eq!(config.mode, AimMode::Free);
        assert_eq!(config.power.max_power, 80.0);
        assert_eq!(config.power.min_power, 15.0);
        assert_eq!(config.fire_point, Vec2::new(1.0, 2.0));
        assert_eq!(config.trajectory.sample_count, 10);
    }

    #[test]
    fn test_json_round_trip() {
        let config = AimConfig::slingshot();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AimConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_inverted_power() {
        let mut config = AimConfig::default();
        config.power.min_power = 60.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "power.min_power", .. }
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases: [fn(&mut AimConfig); 8] = [
            |c: &mut AimConfig| c.max_pull_distance = 0.0,
            |c: &mut AimConfig| c.power.power_curve = 0.0,
            |c: &mut AimConfig| c.vertical.min = 1.0,
            |c: &mut AimConfig| c.trajectory.sample_count = 0,
            |c: &mut AimConfig| c.trajectory.horizon = -1.0,
            |c: &mut AimConfig| c.projectile.gravity_delay = -0.1,
            |c: &mut AimConfig| c.projectile.max_projectiles = 0,
            |c: &mut AimConfig| c.projectile.max_lifetime = Some(0.0),
        ];
        for mutate in cases {
            let mut config = AimConfig::default();
            mutate(&mut config);
            assert!(config.validate().is_err(), "accepted {config:?}");
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = AimConfig::from_json_str("{ \"mode\": 3 }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AimConfig::load(Path::new("/nonexistent/bowshot.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_scaled_gravity() {
        let config = ProjectileConfig::default();
        assert!((config.scaled_gravity().y + 9.81 * 0.8).abs() < 1e-5);
    }
}
