//! Bow aiming and fire coordination system.
//!
//! Wraps the pure aim state machine with the collaborators it drives: the
//! trajectory preview, an optional straight aim line, the character pose and
//! the projectile spawner. The main loop only calls [`AimSystem::tick`] once
//! per frame.

use glam::Vec2;
use tracing::{info, warn};

use crate::game::config::{AimConfig, PoseKind};
use crate::game::error::{ConfigError, SpawnError};
use crate::game::input::{AimPhase, AimState, AimTransition, Shot, cancel_aim, step_aim};
use crate::game::pose::{AimPose, PoseContext, PoseCue, RigPose, TransformPose};
use crate::game::systems::projectile_system::{Launch, ProjectileHandle, ProjectileSpawner};
use crate::input::InputSource;
use crate::physics::trajectory::{Trajectory, aim_line};
use crate::render::TrajectoryRenderer;
use crate::rig::SkeletalRig;

/// A shot that made it into the projectile world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiredShot {
    pub shot: Shot,
    pub handle: ProjectileHandle,
}

/// What happened during one [`AimSystem::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Anchor of a drag that started this frame
    pub started: Option<Vec2>,
    /// Shot released and spawned this frame
    pub fired: Option<FiredShot>,
}

/// Builder for [`AimSystem`].
///
/// All collaborator checks happen in [`build`](Self::build), so a missing
/// renderer or bone is reported once at startup.
pub struct AimSystemBuilder {
    config: AimConfig,
    trajectory: Option<Box<dyn TrajectoryRenderer>>,
    aim_line: Option<Box<dyn TrajectoryRenderer>>,
    pose: Option<Result<Box<dyn AimPose>, ConfigError>>,
    without_pose: bool,
}

impl AimSystemBuilder {
    /// Renderer for the dotted trajectory arc. Required.
    pub fn trajectory_renderer(mut self, renderer: impl TrajectoryRenderer + 'static) -> Self {
        self.trajectory = Some(Box::new(renderer));
        self
    }

    /// Renderer for the straight aim guide. Required when `aim_line` is configured.
    pub fn aim_line_renderer(mut self, renderer: impl TrajectoryRenderer + 'static) -> Self {
        self.aim_line = Some(Box::new(renderer));
        self
    }

    /// Drive head/body bones of `rig` using the configured bone names.
    pub fn rig<R: SkeletalRig + 'static>(mut self, rig: R) -> Self {
        let pose = RigPose::new(rig, &self.config.rig).map(|p| Box::new(p) as Box<dyn AimPose>);
        self.pose = Some(pose);
        self
    }

    /// Use a custom pose strategy instead of the configured one.
    pub fn pose(mut self, pose: impl AimPose + 'static) -> Self {
        self.pose = Some(Ok(Box::new(pose)));
        self
    }

    /// Run without any pose, whatever the config asks for.
    pub fn without_pose(mut self) -> Self {
        self.without_pose = true;
        self
    }

    pub fn build(self) -> Result<AimSystem, ConfigError> {
        self.config.validate()?;

        let trajectory = self
            .trajectory
            .ok_or(ConfigError::MissingCollaborator("trajectory renderer"))?;

        if self.config.aim_line.is_some() && self.aim_line.is_none() {
            return Err(ConfigError::MissingCollaborator("aim line renderer"));
        }

        let pose = if self.without_pose {
            None
        } else {
            match (self.pose, self.config.pose) {
                (Some(pose), _) => Some(pose?),
                (None, PoseKind::Rig) => {
                    return Err(ConfigError::MissingCollaborator("skeletal rig"));
                }
                (None, PoseKind::Transform) => {
                    Some(Box::new(TransformPose::new()) as Box<dyn AimPose>)
                }
                (None, PoseKind::None) => None,
            }
        };

        let sample_count = self.config.trajectory.sample_count;
        let line_count = self.config.aim_line.as_ref().map_or(0, |line| line.points);

        Ok(AimSystem {
            fire_point: self.config.fire_point,
            pivot: self.config.pivot,
            config: self.config,
            phase: AimPhase::Idle,
            trajectory,
            aim_line: self.aim_line,
            pose,
            samples: Vec::with_capacity(sample_count),
            line_points: Vec::with_capacity(line_count),
        })
    }
}

/// Manages the aim phase, preview, pose and firing.
pub struct AimSystem {
    config: AimConfig,
    phase: AimPhase,
    fire_point: Vec2,
    pivot: Vec2,
    trajectory: Box<dyn TrajectoryRenderer>,
    aim_line: Option<Box<dyn TrajectoryRenderer>>,
    pose: Option<Box<dyn AimPose>>,
    /// Scratch buffers reused every frame
    samples: Vec<Vec2>,
    line_points: Vec<Vec2>,
}

impl AimSystem {
    pub fn builder(config: AimConfig) -> AimSystemBuilder {
        AimSystemBuilder {
            config,
            trajectory: None,
            aim_line: None,
            pose: None,
            without_pose: false,
        }
    }

    /// Advance one frame.
    ///
    /// On release the preview is hidden and the shot is handed to `spawner`.
    /// A failed spawn is returned as an error; the aim is already back to
    /// idle, so the next frame proceeds normally.
    pub fn tick(
        &mut self,
        input: &impl InputSource,
        spawner: &mut impl ProjectileSpawner,
        dt: f32,
    ) -> Result<TickReport, SpawnError> {
        let frame = input.frame();
        let (phase, transition) = step_aim(self.phase, &frame, &self.config);
        self.phase = phase;

        let mut report = TickReport::default();
        let mut released = None;

        match transition {
            Some(AimTransition::Started { anchor }) => {
                info!(x = anchor.x, y = anchor.y, "Aim started");
                self.cue(PoseCue::AimStarted);
                report.started = Some(anchor);
            }
            Some(AimTransition::Released(aim)) => released = Some(aim),
            Some(AimTransition::Cancelled) => {
                info!("Aim dropped without release");
                self.hide_preview();
                self.cue(PoseCue::AimCancelled);
            }
            None => {}
        }

        if let Some(pose) = self.pose.as_mut() {
            let aim = self.phase.aim().or(released.as_ref());
            let ctx = PoseContext {
                pointer: frame.position,
                pivot: self.pivot,
                aim,
            };
            pose.update(&ctx, dt);
        }

        if let AimPhase::Dragging(aim) = self.phase {
            self.refresh_preview(&aim);
        }

        if let Some(aim) = released {
            report.fired = Some(self.release(&aim, spawner)?);
        }

        Ok(report)
    }

    /// Abandon the current drag without firing.
    ///
    /// Returns `true` if a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        let (phase, transition) = cancel_aim(self.phase);
        self.phase = phase;
        if transition.is_none() {
            return false;
        }
        info!("Aim cancelled");
        self.hide_preview();
        self.cue(PoseCue::AimCancelled);
        true
    }

    fn release(
        &mut self,
        aim: &AimState,
        spawner: &mut impl ProjectileSpawner,
    ) -> Result<FiredShot, SpawnError> {
        self.hide_preview();
        self.cue(PoseCue::ShotReleased);

        let projectile = &self.config.projectile;
        let shot = aim.to_shot(self.fire_point, projectile.rotation_offset);
        let launch = Launch {
            origin: shot.origin,
            velocity: shot.velocity(),
            rotation_degrees: shot.rotation_degrees,
            gravity_scale: projectile.gravity_scale,
            gravity_delay: projectile.gravity_delay,
        };

        match spawner.spawn(&launch) {
            Ok(handle) => {
                info!(
                    handle = handle.0,
                    power = shot.power,
                    pull = aim.pull_normalized,
                    dx = shot.direction.x,
                    dy = shot.direction.y,
                    "Arrow fired"
                );
                Ok(FiredShot { shot, handle })
            }
            Err(e) => {
                warn!(error = %e, power = shot.power, "Arrow spawn failed");
                Err(e)
            }
        }
    }

    fn refresh_preview(&mut self, aim: &AimState) {
        let preview = self.preview_for(aim);
        preview.fill_samples(
            self.config.trajectory.sample_count,
            self.config.trajectory.horizon,
            &mut self.samples,
        );
        self.trajectory.set_points(&self.samples);

        let line_config = self.config.aim_line.as_ref();
        if let (Some(renderer), Some(line)) = (self.aim_line.as_mut(), line_config) {
            self.line_points.clear();
            self.line_points
                .extend(aim_line(self.fire_point, aim.direction, line.length, line.points));
            renderer.set_points(&self.line_points);
        }
    }

    fn hide_preview(&mut self) {
        self.trajectory.clear();
        if let Some(renderer) = self.aim_line.as_mut() {
            renderer.clear();
        }
    }

    fn cue(&mut self, cue: PoseCue) {
        if let Some(pose) = self.pose.as_mut() {
            pose.on_cue(cue);
        }
    }

    /// Predicted path for the given aim from the current fire point.
    pub fn preview_for(&self, aim: &AimState) -> Trajectory {
        let projectile = &self.config.projectile;
        let trajectory =
            Trajectory::new(self.fire_point, aim.velocity(), projectile.scaled_gravity());
        if self.config.trajectory.model_gravity_delay {
            trajectory.with_gravity_delay(projectile.gravity_delay)
        } else {
            trajectory
        }
    }

    /// Points of the last preview written to the renderer.
    pub fn preview_points(&self) -> &[Vec2] {
        &self.samples
    }

    pub fn phase(&self) -> &AimPhase {
        &self.phase
    }

    pub fn is_aiming(&self) -> bool {
        self.phase.is_dragging()
    }

    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    pub fn fire_point(&self) -> Vec2 {
        self.fire_point
    }

    /// Move the fire point (e.g. the character walked).
    pub fn set_fire_point(&mut self, fire_point: Vec2) {
        self.fire_point = fire_point;
    }

    /// Move the point bone bearings are measured from.
    pub fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = pivot;
    }
}
