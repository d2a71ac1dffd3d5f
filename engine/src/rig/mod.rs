//! Skeletal Rig Module
//!
//! The character's skeleton lives in the host animation runtime; this
//! module only defines what the aim logic needs from it ([`SkeletalRig`])
//! and the smoothing math used to turn a cursor bearing into bone angles.
//!
//! Bone angles are local rotations in degrees.

pub mod smoothing;

use std::cell::RefCell;
use std::rc::Rc;

pub use smoothing::{AngleSmoother, bearing_degrees, shortest_angle_delta, smoothing_alpha};

/// Opaque handle to a bone, resolved once by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneId(pub u32);

/// Query/mutate access to a skeletal animation rig.
pub trait SkeletalRig {
    /// Resolve a bone by name.
    fn find_bone(&self, name: &str) -> Option<BoneId>;

    /// Current local rotation of a bone (degrees).
    fn bone_angle(&self, bone: BoneId) -> f32;

    /// Overwrite the local rotation of a bone (degrees).
    fn set_bone_angle(&mut self, bone: BoneId, degrees: f32);

    /// Recompute world transforms after bone edits.
    fn update_world_transform(&mut self) {}

    /// Start a named animation on the main track.
    fn play_animation(&mut self, _name: &str, _looped: bool) {}

    /// Fade the main track back to the setup pose.
    fn clear_animation(&mut self) {}
}

/// Lets the host keep reading a rig it handed to the aim system.
impl<R: SkeletalRig + ?Sized> SkeletalRig for Rc<RefCell<R>> {
    fn find_bone(&self, name: &str) -> Option<BoneId> {
        self.borrow().find_bone(name)
    }

    fn bone_angle(&self, bone: BoneId) -> f32 {
        self.borrow().bone_angle(bone)
    }

    fn set_bone_angle(&mut self, bone: BoneId, degrees: f32) {
        self.borrow_mut().set_bone_angle(bone, degrees);
    }

    fn update_world_transform(&mut self) {
        self.borrow_mut().update_world_transform();
    }

    fn play_animation(&mut self, name: &str, looped: bool) {
        self.borrow_mut().play_animation(name, looped);
    }

    fn clear_animation(&mut self) {
        self.borrow_mut().clear_animation();
    }
}

/// In-memory rig: named bones with angles, and a log of animation calls.
///
/// Stands in for a real runtime in tests and in the headless arena.
#[derive(Debug, Clone, Default)]
pub struct MemoryRig {
    bones: Vec<(String, f32)>,
    /// Animations started, in order, with their loop flag
    pub animations: Vec<(String, bool)>,
    /// Number of world transform recomputes
    pub world_updates: u32,
}

impl MemoryRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bone at angle zero.
    pub fn with_bone(mut self, name: &str) -> Self {
        self.bones.push((name.to_string(), 0.0));
        self
    }

    /// Angle of a bone looked up by name.
    pub fn angle_of(&self, name: &str) -> Option<f32> {
        self.bones
            .iter()
            .find(|(bone, _)| bone == name)
            .map(|(_, angle)| *angle)
    }

    /// Name of the animation currently playing, if any.
    pub fn current_animation(&self) -> Option<&str> {
        self.animations.last().map(|(name, _)| name.as_str())
    }
}

impl SkeletalRig for MemoryRig {
    fn find_bone(&self, name: &str) -> Option<BoneId> {
        self.bones
            .iter()
            .position(|(bone, _)| bone == name)
            .map(|i| BoneId(i as u32))
    }

    fn bone_angle(&self, bone: BoneId) -> f32 {
        self.bones
            .get(bone.0 as usize)
            .map_or(0.0, |(_, angle)| *angle)
    }

    fn set_bone_angle(&mut self, bone: BoneId, degrees: f32) {
        if let Some((_, angle)) = self.bones.get_mut(bone.0 as usize) {
            *angle = degrees;
        }
    }

    fn update_world_transform(&mut self) {
        self.world_updates += 1;
    }

    fn play_animation(&mut self, name: &str, looped: bool) {
        self.animations.push((name.to_string(), looped));
    }

    fn clear_animation(&mut self) {
        self.animations.push((String::new(), false));
    }
}
