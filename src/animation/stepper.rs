//! Per-leg stepping state machine.
//!
//! A [`LegStepper`] owns one foot target. While idle the foot stays planted
//! in world space; the body moving away from it makes the foot diverge from
//! its *home* (a reference point carried by the body). Once the divergence
//! exceeds the trigger distance or angle, [`LegStepper::try_move`] probes the
//! ground just past home and commits a step: an eased quadratic Bezier arc
//! for position and a slerp for rotation.
//!
//! ```text
//!   Idle ──try_move (diverged && probe hit)──▶ Stepping
//!    ▲                                            │
//!    └────────── advance: elapsed ≥ duration ─────┘
//! ```
//!
//! A trajectory cannot be cancelled or replaced; `try_move` while stepping
//! is a no-op.

use glam::{Quat, Vec3};

use crate::animation::easing::{ease_in_out_cubic, quadratic_bezier};
use crate::scene::{GroundProbe, LayerMask, Pose};
use crate::settings::StepperSettings;
use crate::utils::debug_draw::{DebugDraw, GREEN, RED};
use crate::utils::math::{look_rotation, project_on_plane, quat_angle};

const GIZMO_FOOT_RADIUS: f32 = 0.25;
const GIZMO_HOME_SIZE: f32 = 0.1;

/// A committed foot trajectory and its progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTrajectory {
    pub start: Pose,
    pub end: Pose,
    /// Bezier control point: the midpoint lifted by half the step length.
    pub control: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

impl StepTrajectory {
    fn new(start: Pose, end: Pose, up: Vec3, duration: f32) -> Self {
        let lift = up * (start.position.distance(end.position) / 2.0);
        Self {
            start,
            end,
            control: (start.position + end.position) / 2.0 + lift,
            elapsed: 0.0,
            duration,
        }
    }

    /// Pose at eased normalized time `t` in `[0, 1]`.
    #[must_use]
    pub fn sample(&self, t: f32) -> Pose {
        Pose::new(
            quadratic_bezier(self.start.position, self.control, self.end.position, t),
            self.start.rotation.slerp(self.end.rotation, t.clamp(0.0, 1.0)),
        )
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepState {
    Idle,
    Stepping(StepTrajectory),
}

#[derive(Debug, Clone)]
pub struct LegStepper {
    foot: Pose,
    state: StepState,
    pub settings: StepperSettings,
}

impl LegStepper {
    #[must_use]
    pub fn new(settings: StepperSettings, foot: Pose) -> Self {
        Self {
            foot,
            state: StepState::Idle,
            settings,
        }
    }

    /// Places the foot on the ground directly below `home`.
    ///
    /// Falls back to the home pose when nothing is below.
    pub fn initialize(&mut self, home: Pose, probe: &dyn GroundProbe) {
        self.state = StepState::Idle;
        let origin = home.position + home.up() * self.settings.probe_height;
        match probe.cast(origin, -home.up(), f32::INFINITY, self.mask()) {
            Some(hit) => {
                self.foot = Pose::new(
                    hit.point + home.up() * self.settings.height_offset,
                    Self::grounded_rotation(home, hit.normal),
                );
            }
            None => {
                log::warn!("No ground below leg home at {}; foot starts at home", home.position);
                self.foot = home;
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn foot(&self) -> Pose {
        self.foot
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &StepState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self.state, StepState::Stepping(_))
    }

    fn mask(&self) -> LayerMask {
        LayerMask::from_bits_retain(self.settings.ground_mask)
    }

    /// Whether the foot has drifted far enough from `home` to want a step.
    #[must_use]
    pub fn wants_step(&self, home: Pose) -> bool {
        let distance = self.foot.position.distance(home.position);
        let angle = quat_angle(self.foot.rotation, home.rotation);
        distance > self.settings.trigger_distance || angle > self.settings.trigger_angle
    }

    /// Facing home's forward, lying in the plane of `normal`.
    fn grounded_rotation(home: Pose, normal: Vec3) -> Quat {
        look_rotation(project_on_plane(home.forward(), normal), normal).unwrap_or(home.rotation)
    }

    /// Ground point past home, in the direction the foot has to travel.
    fn grounded_end(&self, home: Pose, probe: &dyn GroundProbe) -> Option<(Vec3, Vec3)> {
        let toward_home = (home.position - self.foot.position).normalize_or_zero();

        // Overshoot must stay below the trigger distance or the landing point
        // falls outside the trigger radius and the leg never settles.
        let overshoot =
            toward_home * (self.settings.trigger_distance * self.settings.overshoot_fraction);
        let origin = home.position + overshoot + home.up() * self.settings.probe_height;

        probe
            .cast(origin, -home.up(), f32::INFINITY, self.mask())
            .map(|hit| (hit.point, hit.normal))
    }

    /// Starts a step if the foot has diverged and a landing point exists.
    ///
    /// Returns `true` when a new trajectory was committed.
    pub fn try_move(&mut self, home: Pose, probe: &dyn GroundProbe) -> bool {
        if self.is_moving() || !self.wants_step(home) {
            return false;
        }

        let Some((point, normal)) = self.grounded_end(home, probe) else {
            log::trace!("Step wanted but no ground found near {}", home.position);
            return false;
        };

        let end = Pose::new(
            point + home.up() * self.settings.height_offset,
            Self::grounded_rotation(home, normal),
        );
        log::debug!("Step {} -> {}", self.foot.position, end.position);

        self.state = StepState::Stepping(StepTrajectory::new(
            self.foot,
            end,
            home.up(),
            self.settings.step_duration,
        ));
        true
    }

    /// Moves the foot along the active trajectory.
    ///
    /// The last frame always lands exactly on the destination, even when
    /// `elapsed` overshoots the duration.
    pub fn advance(&mut self, dt: f32) {
        let StepState::Stepping(trajectory) = &mut self.state else {
            return;
        };

        trajectory.elapsed += dt;

        if trajectory.is_finished() {
            self.foot = trajectory.end;
            self.state = StepState::Idle;
            log::debug!("Step landed at {}", self.foot.position);
        } else {
            let t = ease_in_out_cubic(trajectory.elapsed / trajectory.duration);
            self.foot = trajectory.sample(t);
        }
    }

    pub fn draw_gizmos(&self, home: Pose, draw: &mut dyn DebugDraw) {
        let color = if self.is_moving() { GREEN } else { RED };
        draw.wire_sphere(self.foot.position, GIZMO_FOOT_RADIUS, color);
        draw.line(self.foot.position, home.position, color);
        draw.wire_cube(home.position, Vec3::splat(GIZMO_HOME_SIZE), color);
    }
}
