//! Analytic two-bone inverse kinematics.
//!
//! Solves a fixed three-joint chain (root → mid → end) in closed form:
//!
//! 1. Aim the root at the target, with its up axis toward the pole.
//! 2. Bend the root away from the target line by the law-of-cosines angle
//!    of the triangle (root length, target distance, mid length).
//! 3. Aim the mid joint at the target.
//! 4. Optionally copy the target rotation onto the end joint.
//!
//! Bone lengths are measured from the current joint positions on every
//! solve, so a chain whose joints move keeps solving correctly.

use glam::{Quat, Vec3};

use crate::scene::{JointHandle, JointWriter, Pose, Skeleton};
use crate::utils::math::{euler_to_quat, look_rotation};

/// Fraction of the full chain length the target distance is clamped to,
/// which keeps the triangle strictly solvable.
pub const REACH_LIMIT: f32 = 0.9999;

const AXIS_EPSILON: f32 = 1e-8;

/// Constant local rotation offsets (Euler degrees) applied after aiming each joint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChainOffsets {
    pub root: Vec3,
    pub mid: Vec3,
    pub end: Vec3,
}

#[derive(Debug, Clone)]
pub struct TwoBoneIk {
    chain: [JointHandle; 3],
    root_offset: Quat,
    mid_offset: Quat,
    end_offset: Quat,
    /// Copy the target rotation onto the end joint.
    pub align_end: bool,
    active: bool,
    last_hinge_angle: Option<f32>,
}

impl TwoBoneIk {
    /// Creates an inactive solver; call [`activate`](Self::activate) before solving.
    #[must_use]
    pub fn new(
        root: JointHandle,
        mid: JointHandle,
        end: JointHandle,
        offsets: ChainOffsets,
        align_end: bool,
    ) -> Self {
        Self {
            chain: [root, mid, end],
            root_offset: euler_to_quat(offsets.root),
            mid_offset: euler_to_quat(offsets.mid),
            end_offset: euler_to_quat(offsets.end),
            align_end,
            active: false,
            last_hinge_angle: None,
        }
    }

    /// Validates the joint references once. An invalid chain stays inactive
    /// for the rest of the session and every solve becomes a no-op.
    pub fn activate(&mut self, skeleton: &Skeleton) -> bool {
        let [root, mid, end] = self.chain;
        let all_present = self.chain.iter().all(|&h| skeleton.contains(h));
        let distinct = root != mid && mid != end && root != end;

        self.active = all_present && distinct;
        if !self.active {
            log::error!(
                "IK chain not initialized (root: {:?}, mid: {:?}, end: {:?}); solver disabled",
                skeleton.name(root),
                skeleton.name(mid),
                skeleton.name(end),
            );
        }
        self.active
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[JointHandle; 3] {
        &self.chain
    }

    /// Hinge angle (degrees) of the most recent solve, `None` if it was unsolvable.
    #[inline]
    #[must_use]
    pub fn last_hinge_angle(&self) -> Option<f32> {
        self.last_hinge_angle
    }

    /// Reaches for `target`. `w` must own the three chain joints.
    pub fn solve(&mut self, w: &mut JointWriter<'_>, target: Pose, pole: Vec3) {
        if !self.active {
            return;
        }
        let [root, mid, end] = self.chain;

        let root_pos = w.world_position(root);
        let mid_pos = w.world_position(mid);
        let end_pos = w.world_position(end);

        let toward_pole = pole - root_pos;
        let toward_target = target.position - root_pos;

        let root_length = root_pos.distance(mid_pos);
        let mid_length = mid_pos.distance(end_pos);
        let total_length = root_length + mid_length;

        // Align root with target
        if let Some(aim) = look_rotation(toward_target, toward_pole) {
            w.set_world_rotation(root, aim * self.root_offset);
        }

        let toward_mid = w.world_position(mid) - root_pos;

        let target_distance = root_pos
            .distance(target.position)
            .min(total_length * REACH_LIMIT);

        let adjacent = (root_length * root_length + target_distance * target_distance
            - mid_length * mid_length)
            / (2.0 * target_distance * root_length);
        let angle = adjacent.acos().to_degrees();

        // Bend about the axis orthogonal to both pole and first bone
        let cross = toward_pole.cross(toward_mid);

        if angle.is_nan() {
            self.last_hinge_angle = None;
            log::trace!("IK hinge unsolvable this frame (distance {target_distance}); root bend skipped");
        } else {
            self.last_hinge_angle = Some(angle);
            if cross.length_squared() > AXIS_EPSILON {
                let bend = Quat::from_axis_angle(cross.normalize(), (-angle).to_radians());
                let bent = (bend * w.world_rotation(root)).normalize();
                w.set_world_rotation(root, bent);
            }
        }

        // The root is in place; the elbow just looks at the target
        let mid_pos = w.world_position(mid);
        if let Some(aim) = look_rotation(target.position - mid_pos, cross) {
            w.set_world_rotation(mid, aim * self.mid_offset);
        }

        if self.align_end {
            w.set_world_rotation(end, target.rotation * self.end_offset);
        }
    }
}
