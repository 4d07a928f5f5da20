//! Head tracking over a 1–3 joint neck chain, with hip counter-tilt.

use glam::{Quat, Vec3};

use crate::animation::smooth::SmoothEuler;
use crate::scene::{JointHandle, JointWriter};
use crate::settings::HeadTrackingSettings;
use crate::utils::math::{
    delta_angle, look_rotation, project_on_plane, quat_to_euler, rotate_towards, slerp_direction,
};

#[derive(Debug, Clone, Copy)]
pub struct HeadJoints {
    pub body: JointHandle,
    pub hip: JointHandle,
    pub spine1: JointHandle,
    pub spine2: JointHandle,
    pub head: JointHandle,
}

#[derive(Debug, Clone)]
pub struct HeadTracking {
    joints: HeadJoints,
    owned: [JointHandle; 4],
    local_euler: SmoothEuler,
    pub settings: HeadTrackingSettings,
}

impl HeadTracking {
    #[must_use]
    pub fn new(joints: HeadJoints, settings: HeadTrackingSettings) -> Self {
        Self {
            owned: [joints.head, joints.spine1, joints.spine2, joints.hip],
            joints,
            local_euler: SmoothEuler::default(),
            settings,
        }
    }

    /// Head, neck chain and hip.
    #[must_use]
    pub fn owned_joints(&self) -> &[JointHandle] {
        &self.owned
    }

    /// Current smoothed local head rotation (Euler degrees).
    #[must_use]
    pub fn local_euler(&self) -> Vec3 {
        self.local_euler.value()
    }

    pub fn update(&mut self, w: &mut JointWriter<'_>, target: Vec3, dt: f32, enabled: bool) {
        let j = self.joints;

        if !enabled {
            for joint in self.owned {
                w.set_local_rotation(joint, Quat::IDENTITY);
            }
            return;
        }

        let body = w.world_pose(j.body);
        let (forward, up) = (body.forward(), body.up());

        // Clamp from the body forward rather than the head's rest orientation,
        // since several joints share the rotation.
        let mut look_dir = rotate_towards(
            forward,
            target - w.world_position(j.head),
            self.settings.max_turn_angle,
        );

        // Behind the creature, flatten toward the horizontal look direction
        // to avoid the head flipping up or down.
        let planar = project_on_plane(look_dir, up).normalize_or_zero();
        let dot = forward.dot(look_dir);
        if dot < 0.0 {
            look_dir = look_dir.lerp(project_on_plane(planar, up), (-dot).min(1.0));
        }

        let look_up = slerp_direction(up, Vec3::Y, 0.5);
        let Some(target_world) = look_rotation(look_dir, look_up) else {
            return;
        };

        // Head world rotation with a zero local rotation
        let rest_world = w.world_rotation(j.head) * w.local_rotation(j.head).inverse();
        let target_local = rest_world.inverse() * target_world;

        let bone_count = self.settings.bone_count.clamp(1, 3);
        let speed = self.settings.speed / bone_count as f32;
        let euler = self.local_euler.step(quat_to_euler(target_local), speed, dt);

        w.set_local_euler(j.head, euler);

        if bone_count > 1 {
            w.set_local_euler(j.spine1, euler);
        } else {
            w.set_local_rotation(j.spine1, Quat::IDENTITY);
        }
        if bone_count > 2 {
            w.set_local_euler(j.spine2, euler);
        } else {
            w.set_local_rotation(j.spine2, Quat::IDENTITY);
        }

        // Tilt the hips forward against head pitch so the front feet stay planted
        let head_pitch = w.local_euler(j.head).x;
        let tilt = delta_angle(head_pitch * bone_count as f32, 0.0) * self.settings.hip_tilt_influence;
        w.set_local_euler(j.hip, Vec3::new(tilt, 0.0, 0.0));
    }
}
