//! Creature layers
//!
//! - RootMotion: body translation and turning toward the target
//! - HeadTracking / EyeTracking: look-at layers
//! - TailSway / IdleBobbing: secondary motion
//! - Leg: stepper + IK chain per leg
//! - GeckoController: owns the layers and runs them in frame order
//! - rig: default gecko skeleton

pub mod commands;
pub mod controller;
pub mod eyes;
pub mod head;
pub mod idle;
pub mod leg;
pub mod rig;
pub mod root_motion;
pub mod tail;
pub mod target;

pub use commands::CommandRegistry;
pub use controller::{GeckoController, TOGGLE_LEG_IK};
pub use eyes::{EyeJoints, EyeTracking};
pub use head::{HeadJoints, HeadTracking};
pub use idle::{IdleBobbing, target_idle_weight};
pub use leg::Leg;
pub use rig::build_gecko_skeleton;
pub use root_motion::RootMotion;
pub use tail::TailSway;
pub use target::{TargetProvider, WaypointTarget};
