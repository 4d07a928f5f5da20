use glam::Quat;
use smallvec::SmallVec;

use crate::animation::smooth::SmoothFloat;
use crate::scene::{JointHandle, JointWriter, Skeleton};
use crate::settings::TailSettings;

/// Curls the tail against the body's turn rate.
#[derive(Debug, Clone)]
pub struct TailSway {
    joints: SmallVec<[JointHandle; 8]>,
    home_rotations: SmallVec<[Quat; 8]>,
    curl: SmoothFloat,
    pub settings: TailSettings,
}

impl TailSway {
    /// Captures each joint's current local rotation as its home.
    #[must_use]
    pub fn new(skeleton: &Skeleton, joints: &[JointHandle], settings: TailSettings) -> Self {
        Self {
            joints: joints.iter().copied().collect(),
            home_rotations: joints.iter().map(|&j| skeleton.local_rotation(j)).collect(),
            curl: SmoothFloat::default(),
            settings,
        }
    }

    /// Current smoothed curl, degrees.
    #[inline]
    #[must_use]
    pub fn curl(&self) -> f32 {
        self.curl.value()
    }

    #[must_use]
    pub fn owned_joints(&self) -> &[JointHandle] {
        &self.joints
    }

    pub fn update(
        &mut self,
        w: &mut JointWriter<'_>,
        angular_velocity: f32,
        turn_speed: f32,
        dt: f32,
        enabled: bool,
    ) {

        if !enabled {
            for (&joint, &home) in self.joints.iter().zip(&self.home_rotations) {
                w.set_local_rotation(joint, home);
            }
            return;
        }

        let target = -angular_velocity / turn_speed * self.settings.turn_multiplier;
        let curl = self.curl.step(target, self.settings.turn_speed, dt);
        let rotation = Quat::from_rotation_y(curl.to_radians());

        for (&joint, &home) in self.joints.iter().zip(&self.home_rotations) {
            w.set_local_rotation(joint, rotation * home);
        }
    }
}
