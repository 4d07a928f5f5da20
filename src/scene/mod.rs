//! Skeleton and world-query module
//!
//! - Node: a joint (parent/children + local transform)
//! - Transform: local TRS component
//! - Skeleton: keyed joint table with local/world get/set
//! - JointWriter: ownership-scoped mutable skeleton view
//! - probe: ground ray-cast service

pub mod node;
pub mod probe;
pub mod skeleton;
pub mod transform;
pub mod writer;

pub use node::Node;
pub use probe::{GroundPlane, GroundProbe, GroundRect, GroundSet, LayerMask, NoGround, RayHit};
pub use skeleton::{Pose, Skeleton};
pub use transform::Transform;
pub use writer::JointWriter;

use slotmap::new_key_type;

new_key_type! {
    pub struct JointHandle;
}
