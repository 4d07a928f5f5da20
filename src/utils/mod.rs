//! Utility Module
//!
//! This module provides various utility functions and types:
//!
//! - [`math`]: Angle, direction and Euler helpers (degrees, `+Z` forward)
//! - [`FrameClock`]: Frame delta / elapsed time source
//! - [`debug_draw`]: Observation-only gizmo hooks
//!
//! # Angles
//!
//! Tuning constants are authored in degrees, so the helpers take and return
//! degrees. Conversion to radians happens only where a `Quat` is built.
//!
//! ```rust,ignore
//! use gecko_rig::utils::math::delta_angle;
//!
//! assert_eq!(delta_angle(359.0, 1.0), 2.0); // short path across the wrap
//! ```

pub mod debug_draw;
pub mod math;
pub mod time;

pub use debug_draw::{DebugDraw, DrawCommand, NullDraw, RecordingDraw};
pub use time::FrameClock;
