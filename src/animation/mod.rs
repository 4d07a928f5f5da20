pub mod easing;
pub mod gait;
pub mod ik;
pub mod smooth;
pub mod stepper;

pub use gait::{Diagonal, GaitPhase, GaitScheduler, LegId};
pub use ik::{ChainOffsets, TwoBoneIk};
pub use smooth::{SNAP_THRESHOLD, SmoothAngle, SmoothDamp, SmoothEuler, SmoothFloat, SmoothVec3};
pub use stepper::{LegStepper, StepState, StepTrajectory};
