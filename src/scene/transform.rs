use glam::{Affine3A, Quat, Vec3};

use crate::utils::math::{euler_to_quat, quat_to_euler};

/// Transform component
///
/// Local position, rotation and scale of a joint relative to its parent.
/// World-space values are derived by the [`Skeleton`](super::Skeleton) on
/// demand, so a write is visible to the very next read in the same frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Local TRS matrix.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    // ========================================================================
    // Euler helpers (degrees)
    // ========================================================================

    /// Sets the rotation from an Euler triple in degrees.
    pub fn set_rotation_euler(&mut self, euler: Vec3) {
        self.rotation = euler_to_quat(euler);
    }

    /// Current rotation as an Euler triple in degrees, each in `[0, 360)`.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        quat_to_euler(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
