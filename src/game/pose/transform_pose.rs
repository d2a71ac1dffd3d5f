//! Transform pose: the whole character rotates to face the pull.

use super::{AimPose, PoseContext};

/// Rotation of the character transform, in degrees.
///
/// Only changes while a drag is in progress; the last rotation is kept
/// after release.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformPose {
    pub rotation_degrees: f32,
}

impl TransformPose {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AimPose for TransformPose {
    fn update(&mut self, ctx: &PoseContext<'_>, _dt: f32) {
        if let Some(aim) = ctx.aim {
            self.rotation_degrees = aim.pull.y.atan2(aim.pull.x).to_degrees();
        }
    }
}
