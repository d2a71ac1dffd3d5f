//! Pose Module
//!
//! How the character follows the aim. The bow archer turns head and body
//! bones on a skeletal rig ([`RigPose`]); the slingshot variant just rotates
//! its transform to face the pull ([`TransformPose`]). Both sit behind
//! [`AimPose`] so the aim system never cares which one it drives.

pub mod rig_pose;
pub mod transform_pose;

pub use rig_pose::RigPose;
pub use transform_pose::TransformPose;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::game::input::AimState;

/// Per-frame inputs to a pose.
#[derive(Debug, Clone, Copy)]
pub struct PoseContext<'a> {
    /// Pointer position in world space
    pub pointer: Vec2,
    /// Character origin that bearings are measured from
    pub pivot: Vec2,
    /// Current aim, if a drag is in progress
    pub aim: Option<&'a AimState>,
}

/// Discrete moments a pose may react to (animation triggers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseCue {
    AimStarted,
    ShotReleased,
    AimCancelled,
}

/// Strategy that orients the character each frame.
pub trait AimPose {
    fn update(&mut self, ctx: &PoseContext<'_>, dt: f32);

    fn on_cue(&mut self, _cue: PoseCue) {}
}

impl<P: AimPose + ?Sized> AimPose for Box<P> {
    fn update(&mut self, ctx: &PoseContext<'_>, dt: f32) {
        (**self).update(ctx, dt);
    }

    fn on_cue(&mut self, cue: PoseCue) {
        (**self).on_cue(cue);
    }
}

/// Lets the host read a pose (e.g. [`TransformPose::rotation_degrees`])
/// after handing it to the aim system.
impl<P: AimPose + ?Sized> AimPose for Rc<RefCell<P>> {
    fn update(&mut self, ctx: &PoseContext<'_>, dt: f32) {
        self.borrow_mut().update(ctx, dt);
    }

    fn on_cue(&mut self, cue: PoseCue) {
        self.borrow_mut().on_cue(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingPose {
        updates: u32,
        cues: Vec<PoseCue>,
    }

    impl AimPose for CountingPose {
        fn update(&mut self, _ctx: &PoseContext<'_>, _dt: f32) {
            self.updates += 1;
        }

        fn on_cue(&mut self, cue: PoseCue) {
            self.cues.push(cue);
        }
    }

    #[test]
    fn test_shared_pose_forwards_update_and_cues() {
        let shared = Rc::new(RefCell::new(CountingPose::default()));
        let mut pose: Box<dyn AimPose> = Box::new(shared.clone());
        let ctx = PoseContext {
            pointer: Vec2::ONE,
            pivot: Vec2::ZERO,
            aim: None,
        };

        pose.update(&ctx, 0.016);
        pose.update(&ctx, 0.016);
        pose.on_cue(PoseCue::AimStarted);
        pose.on_cue(PoseCue::AimCancelled);

        assert_eq!(shared.borrow().updates, 2);
        assert_eq!(shared.borrow().cues, vec![PoseCue::AimStarted, PoseCue::AimCancelled]);
    }
}
