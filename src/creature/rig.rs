//! Default gecko skeleton.
//!
//! A small procedural rig with every joint the controller resolves, laid out
//! with +Z forward and +Y up:
//!
//! ```text
//! body
//! ├── root
//! │   └── hip ─────────────── back legs, tail.0 → tail.1 → …
//! │       └── spine1
//! │           └── spine2 ──── front legs
//! │               └── head
//! │                   ├── eye.L
//! │                   └── eye.R
//! ├── home.FL … home.BR
//! └── pole.FL … pole.BR
//! ```
//!
//! Leg bones point along their local +Z axis toward the next joint.

use glam::{Quat, Vec3};

use crate::errors::Result;
use crate::scene::{JointHandle, Skeleton, Transform};
use crate::settings::{LegNames, RigNames};
use crate::utils::math::look_rotation;

pub const BODY_HEIGHT: f32 = 0.5;
pub const SPINE_SEGMENT: f32 = 0.4;
pub const TAIL_SEGMENT: f32 = 0.3;

const FRONT_LEG_Z: f32 = 2.0 * SPINE_SEGMENT;
const BACK_LEG_Z: f32 = -0.1;

fn local(position: Vec3) -> Transform {
    Transform::from_position_rotation(position, Quat::IDENTITY)
}

/// Adds a three-joint leg under `parent` plus its home and pole targets under `body`.
///
/// `side` is -1 for the left legs and +1 for the right.
fn add_leg(
    skeleton: &mut Skeleton,
    names: &LegNames,
    body: JointHandle,
    parent: JointHandle,
    side: f32,
    z: f32,
) -> Result<()> {
    let upper_pos = Vec3::new(side * 0.25, BODY_HEIGHT, z);
    let lower_pos = Vec3::new(side * 0.55, BODY_HEIGHT - 0.05, z);
    let foot_pos = Vec3::new(side * 0.65, 0.0, z);

    let bone = |from: Vec3, to: Vec3| look_rotation(to - from, Vec3::Y).unwrap_or(Quat::IDENTITY);

    let upper = skeleton.add_joint(&names.upper, Some(parent), Transform::new())?;
    skeleton.set_world_position(upper, upper_pos);
    skeleton.set_world_rotation(upper, bone(upper_pos, lower_pos));

    let lower = skeleton.add_joint(&names.lower, Some(upper), Transform::new())?;
    skeleton.set_world_position(lower, lower_pos);
    skeleton.set_world_rotation(lower, bone(lower_pos, foot_pos));

    let foot = skeleton.add_joint(&names.foot, Some(lower), Transform::new())?;
    skeleton.set_world_position(foot, foot_pos);
    skeleton.set_world_rotation(foot, Quat::IDENTITY);

    skeleton.add_joint(&names.home, Some(body), local(Vec3::new(side * 0.6, 0.0, z)))?;
    skeleton.add_joint(&names.pole, Some(body), local(Vec3::new(side * 0.6, 1.0, z)))?;
    Ok(())
}

/// Builds the default gecko skeleton with the joint names from `names`.
pub fn build_gecko_skeleton(names: &RigNames) -> Result<Skeleton> {
    let mut skeleton = Skeleton::new();

    let body = skeleton.add_joint(&names.body, None, Transform::new())?;
    let root = skeleton.add_joint(&names.root, Some(body), local(Vec3::Y * BODY_HEIGHT))?;
    let hip = skeleton.add_joint(&names.hip, Some(root), Transform::new())?;
    let spine1 = skeleton.add_joint(&names.spine1, Some(hip), local(Vec3::Z * SPINE_SEGMENT))?;
    let spine2 = skeleton.add_joint(&names.spine2, Some(spine1), local(Vec3::Z * SPINE_SEGMENT))?;
    let head = skeleton.add_joint(&names.head, Some(spine2), local(Vec3::new(0.0, 0.05, 0.35)))?;
    skeleton.add_joint(&names.left_eye, Some(head), local(Vec3::new(-0.1, 0.08, 0.15)))?;
    skeleton.add_joint(&names.right_eye, Some(head), local(Vec3::new(0.1, 0.08, 0.15)))?;

    let mut parent = hip;
    for name in &names.tail {
        parent = skeleton.add_joint(name, Some(parent), local(Vec3::Z * -TAIL_SEGMENT))?;
    }

    add_leg(&mut skeleton, &names.front_left, body, spine2, -1.0, FRONT_LEG_Z)?;
    add_leg(&mut skeleton, &names.front_right, body, spine2, 1.0, FRONT_LEG_Z)?;
    add_leg(&mut skeleton, &names.back_left, body, hip, -1.0, BACK_LEG_Z)?;
    add_leg(&mut skeleton, &names.back_right, body, hip, 1.0, BACK_LEG_Z)?;

    Ok(skeleton)
}
