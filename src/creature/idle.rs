use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::animation::smooth::SmoothFloat;
use crate::scene::{JointHandle, JointWriter, Skeleton};
use crate::settings::IdleBobbingSettings;

/// Speed fraction (of max move or turn speed) at which idle motion is fully faded out.
pub const IDLE_FADE_FRACTION: f32 = 0.25;

/// Target blend weight of the idle motion.
///
/// Each of translation and turning fades the weight linearly from 1 at rest
/// to 0 at [`IDLE_FADE_FRACTION`] of its maximum; the stronger fade wins.
#[must_use]
pub fn target_idle_weight(speed: f32, angular_velocity: f32, move_speed: f32, turn_speed: f32) -> f32 {
    let turn_fraction = angular_velocity.abs() / turn_speed;
    let move_fraction = speed / move_speed;

    let weight =
        (1.0 - turn_fraction / IDLE_FADE_FRACTION).min(1.0 - move_fraction / IDLE_FADE_FRACTION);
    weight.clamp(0.0, 1.0)
}

/// Sinusoidal sway of the root joint while the creature stands still.
#[derive(Debug, Clone)]
pub struct IdleBobbing {
    root: [JointHandle; 1],
    home_position: Vec3,
    weight: SmoothFloat,
    pub settings: IdleBobbingSettings,
}

impl IdleBobbing {
    /// Captures the root joint's current local position as home.
    #[must_use]
    pub fn new(skeleton: &Skeleton, root: JointHandle, settings: IdleBobbingSettings) -> Self {
        Self {
            root: [root],
            home_position: skeleton.local_position(root),
            weight: SmoothFloat::default(),
            settings,
        }
    }

    #[inline]
    #[must_use]
    pub fn weight(&self) -> f32 {
        self.weight.value()
    }

    #[inline]
    #[must_use]
    pub fn home_position(&self) -> Vec3 {
        self.home_position
    }

    #[must_use]
    pub fn owned_joints(&self) -> &[JointHandle] {
        &self.root
    }

    pub fn update(
        &mut self,
        w: &mut JointWriter<'_>,
        time: f32,
        target_weight: f32,
        dt: f32,
        enabled: bool,
    ) {
        let root = self.root[0];
        let s = &self.settings;

        if !enabled {
            w.set_local_position(root, self.home_position);
            w.set_local_rotation(root, Quat::IDENTITY);
            return;
        }

        let weight = self.weight.step(target_weight, s.weight_change_speed, dt);
        let t = time * s.speed_multiplier;

        let rotation = Vec3::new(
            (t * s.rotation_speed.x + s.rotation_cycle_offset.x * TAU).sin() * s.rotation_amplitude.x,
            (t * s.rotation_speed.y + s.rotation_cycle_offset.y * TAU).sin() * s.rotation_amplitude.y,
            (t * s.rotation_speed.z + s.rotation_cycle_offset.z * TAU).sin() * s.rotation_amplitude.z,
        ) * weight;
        w.set_local_euler(root, rotation);

        let offset = Vec3::new(
            (t * s.motion_speed.x).sin() * s.motion_amplitude.x,
            (t * s.motion_speed.y).sin() * s.motion_amplitude.y,
            (t * s.motion_speed.z).sin() * s.motion_amplitude.z,
        ) * weight;
        w.set_local_position(root, self.home_position + offset);
    }
}
