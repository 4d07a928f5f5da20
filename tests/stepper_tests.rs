//! Leg stepper tests
//!
//! Tests for:
//! - Trigger thresholds (distance and angle)
//! - Landing point: overshoot past home, height offset, exact final frame
//! - try_move while stepping
//! - Probe misses and layer masks
//! - Foot initialization and gizmos

use gecko_rig::animation::{LegStepper, StepState};
use gecko_rig::scene::{GroundPlane, GroundRect, LayerMask, NoGround, Pose};
use gecko_rig::settings::StepperSettings;
use gecko_rig::utils::debug_draw::{GREEN, RED};
use gecko_rig::utils::{DrawCommand, NullDraw, RecordingDraw};
use glam::{Quat, Vec2, Vec3};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;
const DT: f32 = 0.01;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < EPSILON
}

fn home() -> Pose {
    Pose::IDENTITY
}

fn stepper_at(position: Vec3) -> LegStepper {
    LegStepper::new(StepperSettings::default(), Pose::new(position, Quat::IDENTITY))
}

/// Advances until the step lands, returning the number of frames taken.
fn run_step(stepper: &mut LegStepper) -> usize {
    let mut frames = 0;
    while stepper.is_moving() {
        stepper.advance(DT);
        frames += 1;
        assert!(frames < 1000, "step never finished");
    }
    frames
}

// ============================================================================
// Triggering
// ============================================================================

#[test]
fn foot_near_home_does_not_step() {
    let mut stepper = stepper_at(Vec3::new(0.3, 0.0, 0.0));
    assert!(!stepper.wants_step(home()));
    assert!(!stepper.try_move(home(), &GroundPlane::horizontal(0.0)));
    assert_eq!(*stepper.state(), StepState::Idle);
}

#[test]
fn distance_beyond_trigger_starts_step() {
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    assert!(stepper.try_move(home(), &GroundPlane::horizontal(0.0)));
    assert!(stepper.is_moving());
}

#[test]
fn rotation_beyond_trigger_starts_step() {
    let foot = Pose::new(Vec3::ZERO, Quat::from_rotation_y(170_f32.to_radians()));
    let mut stepper = LegStepper::new(StepperSettings::default(), foot);
    assert!(stepper.wants_step(home()));
    assert!(stepper.try_move(home(), &GroundPlane::horizontal(0.0)));
}

#[test]
fn try_move_while_stepping_is_noop() {
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    let ground = GroundPlane::horizontal(0.0);
    assert!(stepper.try_move(home(), &ground));

    stepper.advance(DT);
    let StepState::Stepping(before) = *stepper.state() else {
        panic!("expected an active step");
    };

    // Home jumps far away; the committed trajectory must not change
    let moved_home = Pose::new(Vec3::new(5.0, 0.0, 5.0), Quat::IDENTITY);
    assert!(!stepper.try_move(moved_home, &ground));
    assert_eq!(*stepper.state(), StepState::Stepping(before));
}

// ============================================================================
// Landing
// ============================================================================

#[test]
fn step_lands_past_home_on_the_ground() {
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    assert!(stepper.try_move(home(), &GroundPlane::horizontal(0.0)));
    run_step(&mut stepper);

    // overshoot = trigger_distance * overshoot_fraction along foot -> home
    let expected = Vec3::new(0.6 * 0.8, 0.0, 0.0);
    assert!(vec3_approx(stepper.foot().position, expected), "{}", stepper.foot().position);
    assert!(!stepper.wants_step(home()));
}

#[test]
fn step_applies_height_offset() {
    let settings = StepperSettings {
        height_offset: 0.1,
        ..StepperSettings::default()
    };
    let mut stepper = LegStepper::new(settings, Pose::new(Vec3::new(0.0, 0.0, -1.0), Quat::IDENTITY));
    assert!(stepper.try_move(home(), &GroundPlane::horizontal(-0.5)));
    run_step(&mut stepper);

    assert!(vec3_approx(stepper.foot().position, Vec3::new(0.0, -0.4, 0.48)));
}

#[test]
fn step_finishes_once_elapsed_reaches_duration() {
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    assert!(stepper.try_move(home(), &GroundPlane::horizontal(0.0)));

    let frames = run_step(&mut stepper);
    let duration = StepperSettings::default().step_duration;
    let expected = (duration / DT).round() as usize;
    assert!((expected - 1..=expected + 1).contains(&frames), "took {frames} frames");
    assert_eq!(*stepper.state(), StepState::Idle);
}

#[test]
fn large_final_frame_snaps_to_destination() {
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    assert!(stepper.try_move(home(), &GroundPlane::horizontal(0.0)));
    let StepState::Stepping(trajectory) = *stepper.state() else {
        panic!("expected an active step");
    };

    stepper.advance(0.05);
    stepper.advance(10.0);
    assert!(!stepper.is_moving());
    assert_eq!(stepper.foot(), trajectory.end);
}

#[test]
fn foot_lifts_during_step() {
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    assert!(stepper.try_move(home(), &GroundPlane::horizontal(0.0)));

    let mut peak = 0.0_f32;
    while stepper.is_moving() {
        stepper.advance(DT);
        peak = peak.max(stepper.foot().position.y);
    }
    assert!(peak > 0.2, "peak height {peak}");
}

// ============================================================================
// Probe misses
// ============================================================================

#[test]
fn probe_miss_leaves_stepper_idle() {
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    assert!(!stepper.try_move(home(), &NoGround));
    assert_eq!(*stepper.state(), StepState::Idle);
    assert_eq!(stepper.foot().position, Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn ledge_beyond_rect_is_a_miss() {
    let ledge = GroundRect {
        center: Vec3::new(-2.0, 0.0, 0.0),
        half_extents: Vec2::splat(1.0),
        layers: LayerMask::GROUND,
    };
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    // Landing point x = 0.48 lies outside the rect
    assert!(!stepper.try_move(home(), &ledge));
}

#[test]
fn ground_outside_mask_is_ignored() {
    let settings = StepperSettings {
        ground_mask: LayerMask::OBSTACLE.bits(),
        ..StepperSettings::default()
    };
    let mut stepper = LegStepper::new(settings, Pose::new(Vec3::new(-1.0, 0.0, 0.0), Quat::IDENTITY));
    assert!(!stepper.try_move(home(), &GroundPlane::horizontal(0.0)));
}

// ============================================================================
// Initialization & gizmos
// ============================================================================

#[test]
fn initialize_snaps_foot_below_home() {
    let mut stepper = stepper_at(Vec3::new(3.0, 3.0, 3.0));
    let home = Pose::new(Vec3::new(1.0, 0.5, 2.0), Quat::IDENTITY);
    stepper.initialize(home, &GroundPlane::horizontal(0.0));
    assert!(vec3_approx(stepper.foot().position, Vec3::new(1.0, 0.0, 2.0)));
}

#[test]
fn initialize_without_ground_uses_home() {
    let mut stepper = stepper_at(Vec3::new(3.0, 3.0, 3.0));
    let home = Pose::new(Vec3::new(1.0, 0.5, 2.0), Quat::IDENTITY);
    stepper.initialize(home, &NoGround);
    assert_eq!(stepper.foot(), home);
}

#[test]
fn gizmo_colour_tracks_state() {
    let mut stepper = stepper_at(Vec3::new(-1.0, 0.0, 0.0));
    let mut draw = RecordingDraw::new();

    // Observation only: drawing never changes the stepper
    stepper.draw_gizmos(home(), &mut NullDraw);
    assert!(!stepper.is_moving());

    stepper.draw_gizmos(home(), &mut draw);
    assert_eq!(draw.commands.len(), 3);
    assert!(matches!(draw.commands[0], DrawCommand::Sphere { radius, color, .. } if radius == 0.25 && color == RED));

    draw.clear();
    assert!(stepper.try_move(home(), &GroundPlane::horizontal(0.0)));
    stepper.draw_gizmos(home(), &mut draw);
    assert!(draw.commands.iter().all(|c| match c {
        DrawCommand::Sphere { color, .. } | DrawCommand::Line { color, .. } | DrawCommand::Cube { color, .. } =>
            *color == GREEN,
    }));
}
