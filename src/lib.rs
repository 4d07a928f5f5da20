#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod creature;
pub mod errors;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{GaitScheduler, LegId, LegStepper, SmoothDamp, TwoBoneIk};
pub use creature::{GeckoController, TargetProvider, WaypointTarget, build_gecko_skeleton};
pub use errors::{GeckoError, Result};
pub use scene::{GroundPlane, GroundProbe, JointHandle, Pose, Skeleton, Transform};
pub use settings::GeckoSettings;
pub use utils::FrameClock;
