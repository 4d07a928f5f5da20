use glam::{Quat, Vec3};

use crate::scene::{JointHandle, JointWriter};
use crate::settings::EyeTrackingSettings;
use crate::utils::math::{look_rotation, normalize_angle};

#[derive(Debug, Clone, Copy)]
pub struct EyeJoints {
    pub body: JointHandle,
    pub head: JointHandle,
    pub left: JointHandle,
    pub right: JointHandle,
}

/// Both eyes chase the target independently; each eye's yaw is clamped to
/// its own asymmetric range so they never cross.
#[derive(Debug, Clone)]
pub struct EyeTracking {
    joints: EyeJoints,
    owned: [JointHandle; 2],
    pub settings: EyeTrackingSettings,
}

impl EyeTracking {
    #[must_use]
    pub fn new(joints: EyeJoints, settings: EyeTrackingSettings) -> Self {
        Self {
            owned: [joints.left, joints.right],
            joints,
            settings,
        }
    }

    #[must_use]
    pub fn owned_joints(&self) -> &[JointHandle] {
        &self.owned
    }

    pub fn update(&mut self, w: &mut JointWriter<'_>, target: Vec3, dt: f32, enabled: bool) {
        let j = self.joints;
        let s = self.settings;

        if !enabled {
            w.set_local_rotation(j.left, Quat::IDENTITY);
            w.set_local_rotation(j.right, Quat::IDENTITY);
            return;
        }

        // Aim from the head, not the eye origin; per-eye aiming looks cross-eyed
        let body_up = w.world_rotation(j.body) * Vec3::Y;
        let Some(target_rotation) = look_rotation(target - w.world_position(j.head), body_up)
        else {
            return;
        };

        let blend = 1.0 - (-s.speed * dt).exp();

        for (eye, min_yaw, max_yaw) in [
            (j.left, s.left_min_yaw, s.left_max_yaw),
            (j.right, s.right_min_yaw, s.right_max_yaw),
        ] {
            let current = w.world_rotation(eye);
            w.set_world_rotation(eye, current.slerp(target_rotation, blend));

            let euler = w.local_euler(eye);
            let yaw = normalize_angle(euler.y).clamp(min_yaw, max_yaw);
            w.set_local_euler(eye, Vec3::new(euler.x, yaw, euler.z));
        }
    }
}
