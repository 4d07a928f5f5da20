//! Body translation and turning toward the target.

use glam::{Quat, Vec3};

use crate::animation::smooth::{SmoothFloat, SmoothVec3};
use crate::scene::{JointHandle, JointWriter};
use crate::settings::RootMotionSettings;
use crate::utils::math::{inverse_lerp, project_on_plane, signed_angle};

/// Turning starts ramping in at this facing error (degrees)...
pub const TURN_RAMP_START: f32 = 20.0;
/// ...and reaches full turn speed here.
pub const TURN_RAMP_END: f32 = 45.0;
/// Facing errors at or beyond this turn in place without translating.
pub const TURN_IN_PLACE_ANGLE: f32 = 90.0;
/// Speed factor applied while backing away from the target.
pub const REVERSE_SPEED_FACTOR: f32 = 0.66;
/// Translation is fully allowed up to this fraction of the max turn rate.
pub const TRANSLATE_TURN_FRACTION: f32 = 0.2;

/// Desired turn rate (degrees/s) for a signed facing error (degrees).
#[must_use]
pub fn target_angular_velocity(angle_to_target: f32, turn_speed: f32) -> f32 {
    angle_to_target.signum()
        * inverse_lerp(TURN_RAMP_START, TURN_RAMP_END, angle_to_target.abs())
        * turn_speed
}

#[derive(Debug, Clone)]
pub struct RootMotion {
    body: [JointHandle; 1],
    velocity: SmoothVec3,
    angular_velocity: SmoothFloat,
    pub settings: RootMotionSettings,
}

impl RootMotion {
    #[must_use]
    pub fn new(body: JointHandle, settings: RootMotionSettings) -> Self {
        Self {
            body: [body],
            velocity: SmoothVec3::default(),
            angular_velocity: SmoothFloat::default(),
            settings,
        }
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> JointHandle {
        self.body[0]
    }

    #[must_use]
    pub fn owned_joints(&self) -> &[JointHandle] {
        &self.body
    }

    /// Smoothed linear velocity, world units per second.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity.value()
    }

    /// Smoothed turn rate about body up, degrees per second.
    #[inline]
    #[must_use]
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity.value()
    }

    pub fn update(&mut self, w: &mut JointWriter<'_>, target: Vec3, dt: f32) {
        let s = self.settings;
        let body = self.body[0];

        let pose = w.world_pose(body);
        let up = pose.up();
        let toward_target = project_on_plane(target - pose.position, up);

        let angle_to_target = signed_angle(pose.forward(), toward_target, up);
        self.angular_velocity.step(
            target_angular_velocity(angle_to_target, s.turn_speed),
            s.turn_acceleration,
            dt,
        );

        let mut target_velocity = Vec3::ZERO;

        if angle_to_target.abs() < TURN_IN_PLACE_ANGLE {
            let distance = toward_target.length();
            let direction = toward_target.normalize_or_zero();

            if distance > s.max_dist_to_target {
                target_velocity = direction * s.move_speed;
            } else if distance < s.min_dist_to_target {
                target_velocity = -direction * s.move_speed * REVERSE_SPEED_FACTOR;
            }

            target_velocity *= inverse_lerp(
                s.turn_speed,
                s.turn_speed * TRANSLATE_TURN_FRACTION,
                self.angular_velocity.value().abs(),
            );
        }

        self.velocity.step(target_velocity, s.move_acceleration, dt);

        let turn = Quat::from_axis_angle(Vec3::Y, (self.angular_velocity.value() * dt).to_radians());
        w.set_world_position(body, pose.position + self.velocity.value() * dt);
        w.set_world_rotation(body, (pose.rotation * turn).normalize());
    }
}
