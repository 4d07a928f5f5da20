//! Rig Settings
//!
//! Every tuning constant of the rig lives here, grouped by layer. The whole
//! tree is serde-(de)serializable and every struct is `#[serde(default)]`, so
//! a settings file only needs to list what it changes.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use gecko_rig::settings::GeckoSettings;
//!
//! // Defaults
//! let settings = GeckoSettings::default();
//!
//! // Partial override from JSON
//! let settings = GeckoSettings::from_json_str(r#"{ "root_motion": { "move_speed": 3.0 } }"#)?;
//! ```
//!
//! Angles are in degrees, speeds are per second, distances in world units.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{GeckoError, Result};
use crate::scene::LayerMask;

// ---------------------------------------------------------------------------
// Toggles
// ---------------------------------------------------------------------------

/// Per-layer enable switches. A disabled layer writes its neutral pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerToggles {
    pub root_motion: bool,
    pub idle_bobbing: bool,
    pub head_tracking: bool,
    pub eye_tracking: bool,
    pub tail_sway: bool,
    pub leg_stepping: bool,
    pub leg_ik: bool,
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            root_motion: true,
            idle_bobbing: true,
            head_tracking: true,
            eye_tracking: true,
            tail_sway: true,
            leg_stepping: true,
            leg_ik: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Root motion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootMotionSettings {
    /// Maximum turn rate, degrees per second.
    pub turn_speed: f32,
    /// Maximum translation speed.
    pub move_speed: f32,
    pub turn_acceleration: f32,
    pub move_acceleration: f32,
    /// Closer than this the creature backs off.
    pub min_dist_to_target: f32,
    /// Farther than this the creature approaches.
    pub max_dist_to_target: f32,
}

impl Default for RootMotionSettings {
    fn default() -> Self {
        Self {
            turn_speed: 100.0,
            move_speed: 2.0,
            turn_acceleration: 5.0,
            move_acceleration: 5.0,
            min_dist_to_target: 4.5,
            max_dist_to_target: 6.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Head & eyes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadTrackingSettings {
    /// Joints driven by head tracking: 1 = head, 2 = + spine1, 3 = + spine2.
    pub bone_count: usize,
    /// Cone half-angle around body forward the look direction is clamped to.
    pub max_turn_angle: f32,
    pub speed: f32,
    /// Hip pitch per degree of head pitch.
    pub hip_tilt_influence: f32,
}

impl Default for HeadTrackingSettings {
    fn default() -> Self {
        Self {
            bone_count: 1,
            max_turn_angle: 70.0,
            speed: 8.0,
            hip_tilt_influence: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeTrackingSettings {
    pub speed: f32,
    pub left_min_yaw: f32,
    pub left_max_yaw: f32,
    pub right_min_yaw: f32,
    pub right_max_yaw: f32,
}

impl Default for EyeTrackingSettings {
    fn default() -> Self {
        Self {
            speed: 30.0,
            left_min_yaw: -180.0,
            left_max_yaw: 10.0,
            right_min_yaw: -10.0,
            right_max_yaw: 180.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tail & idle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailSettings {
    /// Curl in degrees at full turn rate.
    pub turn_multiplier: f32,
    pub turn_speed: f32,
}

impl Default for TailSettings {
    fn default() -> Self {
        Self {
            turn_multiplier: 30.0,
            turn_speed: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleBobbingSettings {
    /// Degrees per axis.
    pub rotation_amplitude: Vec3,
    /// Angular frequency per axis, radians per second.
    pub rotation_speed: Vec3,
    /// Phase per axis, in cycles.
    pub rotation_cycle_offset: Vec3,
    pub motion_amplitude: Vec3,
    pub motion_speed: Vec3,
    pub speed_multiplier: f32,
    pub weight_change_speed: f32,
}

impl Default for IdleBobbingSettings {
    fn default() -> Self {
        Self {
            rotation_amplitude: Vec3::new(2.0, 1.5, 1.0),
            rotation_speed: Vec3::new(1.5, 1.0, 1.2),
            rotation_cycle_offset: Vec3::new(0.0, 0.25, 0.5),
            motion_amplitude: Vec3::new(0.0, 0.02, 0.0),
            motion_speed: Vec3::new(0.0, 2.0, 0.0),
            speed_multiplier: 1.0,
            weight_change_speed: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Legs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperSettings {
    /// Distance from home beyond which the foot wants to step.
    pub trigger_distance: f32,
    /// Rotation from home (degrees) beyond which the foot wants to step.
    pub trigger_angle: f32,
    /// How far past home the foot lands, as a fraction of `trigger_distance`.
    pub overshoot_fraction: f32,
    pub step_duration: f32,
    /// Rest height of the foot joint above the ground contact.
    pub height_offset: f32,
    /// Height above home the ground probe starts at.
    pub probe_height: f32,
    /// Raw bits of the [`LayerMask`] considered ground.
    pub ground_mask: u32,
}

impl Default for StepperSettings {
    fn default() -> Self {
        Self {
            trigger_distance: 0.6,
            trigger_angle: 135.0,
            overshoot_fraction: 0.8,
            step_duration: 0.15,
            height_offset: 0.0,
            probe_height: 2.0,
            ground_mask: LayerMask::EVERYTHING.bits(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IkSettings {
    pub root_offset: Vec3,
    pub mid_offset: Vec3,
    pub end_offset: Vec3,
    pub align_end: bool,
}

impl Default for IkSettings {
    fn default() -> Self {
        Self {
            root_offset: Vec3::ZERO,
            mid_offset: Vec3::ZERO,
            end_offset: Vec3::ZERO,
            align_end: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Joint names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegNames {
    pub upper: String,
    pub lower: String,
    pub foot: String,
    pub home: String,
    pub pole: String,
}

impl LegNames {
    #[must_use]
    pub fn for_label(label: &str) -> Self {
        Self {
            upper: format!("leg.{label}.upper"),
            lower: format!("leg.{label}.lower"),
            foot: format!("leg.{label}.foot"),
            home: format!("home.{label}"),
            pole: format!("pole.{label}"),
        }
    }
}

/// Names the controller resolves joints by at activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigNames {
    pub body: String,
    pub root: String,
    pub hip: String,
    pub spine1: String,
    pub spine2: String,
    pub head: String,
    pub left_eye: String,
    pub right_eye: String,
    pub tail: Vec<String>,
    pub front_left: LegNames,
    pub front_right: LegNames,
    pub back_left: LegNames,
    pub back_right: LegNames,
}

impl Default for RigNames {
    fn default() -> Self {
        Self {
            body: "body".into(),
            root: "root".into(),
            hip: "hip".into(),
            spine1: "spine1".into(),
            spine2: "spine2".into(),
            head: "head".into(),
            left_eye: "eye.L".into(),
            right_eye: "eye.R".into(),
            tail: (0..4).map(|i| format!("tail.{i}")).collect(),
            front_left: LegNames::for_label("FL"),
            front_right: LegNames::for_label("FR"),
            back_left: LegNames::for_label("BL"),
            back_right: LegNames::for_label("BR"),
        }
    }
}

// ---------------------------------------------------------------------------
// GeckoSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeckoSettings {
    pub toggles: LayerToggles,
    pub root_motion: RootMotionSettings,
    pub head: HeadTrackingSettings,
    pub eyes: EyeTrackingSettings,
    pub tail: TailSettings,
    pub idle: IdleBobbingSettings,
    pub legs: StepperSettings,
    pub ik: IkSettings,
    pub rig: RigNames,
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(GeckoError::InvalidSettings(message()))
    }
}

impl GeckoSettings {
    /// Parses and validates settings from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every constant against its valid range.
    pub fn validate(&self) -> Result<()> {
        let rm = &self.root_motion;
        ensure(rm.turn_speed > 0.0, || format!("root_motion.turn_speed must be > 0 (got {})", rm.turn_speed))?;
        ensure(rm.move_speed > 0.0, || format!("root_motion.move_speed must be > 0 (got {})", rm.move_speed))?;
        ensure(rm.turn_acceleration >= 0.0 && rm.move_acceleration >= 0.0, || {
            "root_motion accelerations must be >= 0".to_string()
        })?;
        ensure(rm.min_dist_to_target <= rm.max_dist_to_target, || {
            format!(
                "root_motion.min_dist_to_target ({}) exceeds max_dist_to_target ({})",
                rm.min_dist_to_target, rm.max_dist_to_target
            )
        })?;

        ensure((1..=3).contains(&self.head.bone_count), || {
            format!("head.bone_count must be in 1..=3 (got {})", self.head.bone_count)
        })?;
        ensure(self.head.speed >= 0.0 && self.head.max_turn_angle >= 0.0, || {
            "head.speed and head.max_turn_angle must be >= 0".to_string()
        })?;

        let eyes = &self.eyes;
        ensure(eyes.speed >= 0.0, || "eyes.speed must be >= 0".to_string())?;
        ensure(
            eyes.left_min_yaw <= eyes.left_max_yaw && eyes.right_min_yaw <= eyes.right_max_yaw,
            || "eye yaw ranges must have min <= max".to_string(),
        )?;

        ensure(self.tail.turn_speed >= 0.0, || "tail.turn_speed must be >= 0".to_string())?;
        ensure(self.tail.turn_multiplier.is_finite(), || {
            format!("tail.turn_multiplier must be finite (got {})", self.tail.turn_multiplier)
        })?;

        let idle = &self.idle;
        ensure(idle.weight_change_speed >= 0.0, || {
            "idle.weight_change_speed must be >= 0".to_string()
        })?;
        ensure(
            idle.speed_multiplier.is_finite()
                && [
                    idle.rotation_speed,
                    idle.rotation_amplitude,
                    idle.rotation_cycle_offset,
                    idle.motion_speed,
                    idle.motion_amplitude,
                ]
                .iter()
                .all(|v| v.is_finite()),
            || "idle speeds, amplitudes and offsets must be finite".to_string(),
        )?;

        ensure(
            [self.ik.root_offset, self.ik.mid_offset, self.ik.end_offset]
                .iter()
                .all(|v| v.is_finite()),
            || "ik offsets must be finite".to_string(),
        )?;

        let legs = &self.legs;
        ensure(legs.trigger_distance > 0.0, || "legs.trigger_distance must be > 0".to_string())?;
        ensure((0.0..=1.0).contains(&legs.overshoot_fraction), || {
            format!("legs.overshoot_fraction must be in [0, 1] (got {})", legs.overshoot_fraction)
        })?;
        ensure(legs.step_duration > 0.0, || {
            format!("legs.step_duration must be > 0 (got {})", legs.step_duration)
        })?;
        ensure((0.0..=180.0).contains(&legs.trigger_angle), || {
            format!("legs.trigger_angle must be in [0, 180] (got {})", legs.trigger_angle)
        })?;
        ensure(legs.probe_height.is_finite() && legs.probe_height >= 0.0, || {
            format!("legs.probe_height must be finite and >= 0 (got {})", legs.probe_height)
        })?;
        ensure(legs.height_offset.is_finite(), || {
            format!("legs.height_offset must be finite (got {})", legs.height_offset)
        })?;
        Ok(())
    }
}
