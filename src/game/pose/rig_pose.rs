//! Skeletal rig pose: head and body bones turn toward the pointer.

use tracing::debug;

use super::{AimPose, PoseContext, PoseCue};
use crate::game::config::{AnimationNames, BoneLimit, RigConfig};
use crate::game::error::ConfigError;
use crate::rig::{AngleSmoother, BoneId, SkeletalRig, bearing_degrees};

#[derive(Debug, Clone, Copy)]
struct AimBone {
    id: BoneId,
    smoother: AngleSmoother,
}

impl AimBone {
    fn resolve<R: SkeletalRig>(rig: &R, limit: &BoneLimit, rate: f32) -> Result<Self, ConfigError> {
        let id = rig
            .find_bone(&limit.name)
            .ok_or_else(|| ConfigError::MissingBone(limit.name.clone()))?;
        let smoother = AngleSmoother::new(limit.max_deflection, rate);
        Ok(Self {
            id,
            smoother: smoother.starting_at(rig.bone_angle(id)),
        })
    }
}

/// Drives the aim bones of a [`SkeletalRig`] and its aim/shoot animations.
///
/// Bones are resolved once when the pose is built; a missing bone is a
/// startup error, never a per-frame check.
pub struct RigPose<R: SkeletalRig> {
    rig: R,
    head: AimBone,
    body: AimBone,
    mirror_vertical: bool,
    animations: AnimationNames,
}

impl<R: SkeletalRig> RigPose<R> {
    pub fn new(rig: R, config: &RigConfig) -> Result<Self, ConfigError> {
        let head = AimBone::resolve(&rig, &config.head, config.smoothing)?;
        let body = AimBone::resolve(&rig, &config.body, config.smoothing)?;
        Ok(Self {
            rig,
            head,
            body,
            mirror_vertical: config.mirror_vertical,
            animations: config.animations.clone(),
        })
    }

    pub fn rig(&self) -> &R {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut R {
        &mut self.rig
    }

    /// Current (head, body) angles in degrees.
    pub fn angles(&self) -> (f32, f32) {
        (self.head.smoother.current, self.body.smoother.current)
    }
}

impl<R: SkeletalRig> AimPose for RigPose<R> {
    fn update(&mut self, ctx: &PoseContext<'_>, dt: f32) {
        let bearing = bearing_degrees(ctx.pointer - ctx.pivot, self.mirror_vertical);

        for bone in [&mut self.head, &mut self.body] {
            let angle = bone.smoother.update(bearing, dt);
            self.rig.set_bone_angle(bone.id, angle);
        }
        self.rig.update_world_transform();
    }

    fn on_cue(&mut self, cue: PoseCue) {
        match cue {
            PoseCue::AimStarted => {
                debug!(animation = %self.animations.aim, "Playing aim animation");
                self.rig.play_animation(&self.animations.aim, true);
            }
            PoseCue::ShotReleased => {
                debug!(animation = %self.animations.shoot, "Playing shoot animation");
                self.rig.play_animation(&self.animations.shoot, false);
                self.rig.clear_animation();
            }
            PoseCue::AimCancelled => self.rig.clear_animation(),
        }
    }
}
