use std::ops::Deref;

use glam::{Quat, Vec3};
use smallvec::SmallVec;

use crate::scene::JointHandle;
use crate::scene::skeleton::Skeleton;

/// Mutable view of a [`Skeleton`] restricted to a set of owned joints.
///
/// This is the only public way to mutate joints. The controller builds one
/// per pose layer from the handles that layer resolved, and the layers take
/// nothing else, so each joint has exactly one writer per frame. Reads go
/// through `Deref` and may touch any joint. A write to a joint outside the
/// owned set is dropped and logged.
pub struct JointWriter<'a> {
    skeleton: &'a mut Skeleton,
    owned: SmallVec<[JointHandle; 8]>,
}

impl<'a> JointWriter<'a> {
    pub(crate) fn new(skeleton: &'a mut Skeleton, owned: &[JointHandle]) -> Self {
        Self {
            skeleton,
            owned: owned.iter().copied().collect(),
        }
    }

    /// Joints this writer may modify.
    #[inline]
    #[must_use]
    pub fn owned(&self) -> &[JointHandle] {
        &self.owned
    }

    #[inline]
    #[must_use]
    pub fn owns(&self, handle: JointHandle) -> bool {
        self.owned.contains(&handle)
    }

    fn check(&self, handle: JointHandle, op: &str) -> bool {
        if self.owns(handle) {
            true
        } else {
            log::error!(
                "{op} on joint '{}' rejected: not owned by this writer",
                self.skeleton.name(handle).unwrap_or("<stale>")
            );
            false
        }
    }

    pub fn set_local_position(&mut self, handle: JointHandle, position: Vec3) {
        if self.check(handle, "set_local_position") {
            self.skeleton.set_local_position(handle, position);
        }
    }

    pub fn set_local_rotation(&mut self, handle: JointHandle, rotation: Quat) {
        if self.check(handle, "set_local_rotation") {
            self.skeleton.set_local_rotation(handle, rotation);
        }
    }

    pub fn set_local_euler(&mut self, handle: JointHandle, euler: Vec3) {
        if self.check(handle, "set_local_euler") {
            self.skeleton.set_local_euler(handle, euler);
        }
    }

    pub fn set_world_position(&mut self, handle: JointHandle, position: Vec3) {
        if self.check(handle, "set_world_position") {
            self.skeleton.set_world_position(handle, position);
        }
    }

    pub fn set_world_rotation(&mut self, handle: JointHandle, rotation: Quat) {
        if self.check(handle, "set_world_rotation") {
            self.skeleton.set_world_rotation(handle, rotation);
        }
    }
}

impl Deref for JointWriter<'_> {
    type Target = Skeleton;

    fn deref(&self) -> &Skeleton {
        self.skeleton
    }
}
