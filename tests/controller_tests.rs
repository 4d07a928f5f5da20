//! GeckoController tests
//!
//! Tests for:
//! - End-to-end walk toward a target and settling inside the distance band
//! - Diagonal gait invariant with real steppers
//! - Leg IK reaching the foot targets, and the IK toggle command
//! - Layer toggles writing neutral poses
//! - Head tracking convergence, look cone and hip tilt
//! - Disjoint joint ownership between layers
//! - Eye yaw limits, tail curl, idle weight
//! - Activation with missing joints

use gecko_rig::animation::LegId;
use gecko_rig::creature::{
    GeckoController, TOGGLE_LEG_IK, build_gecko_skeleton, target_idle_weight,
};
use gecko_rig::errors::GeckoError;
use gecko_rig::scene::{GroundPlane, JointHandle, Skeleton, Transform};
use gecko_rig::settings::GeckoSettings;
use gecko_rig::utils::{FrameClock, RecordingDraw};
use gecko_rig::utils::math::{angle_between, delta_angle, normalize_angle};
use glam::{Quat, Vec3};

// ============================================================================
// Helper
// ============================================================================

const DT: f32 = 1.0 / 60.0;

struct Rig {
    skeleton: Skeleton,
    gecko: GeckoController,
    clock: FrameClock,
    ground: GroundPlane,
}

impl Rig {
    fn new(settings: GeckoSettings) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let skeleton = build_gecko_skeleton(&settings.rig).unwrap();
        let ground = GroundPlane::horizontal(0.0);
        let mut gecko = GeckoController::new(&skeleton, settings).unwrap();
        gecko.initialize(&skeleton, &ground);

        Self {
            skeleton,
            gecko,
            clock: FrameClock::new(),
            ground,
        }
    }

    fn step(&mut self, target: Vec3) {
        self.clock.advance(DT);
        self.gecko.frame(&mut self.skeleton, &self.clock, &target, &self.ground);
    }

    fn run(&mut self, target: Vec3, seconds: f32) {
        for _ in 0..(seconds / DT).round() as usize {
            self.step(target);
        }
    }

    fn joint(&self, name: &str) -> JointHandle {
        self.skeleton.find(name).unwrap()
    }

    fn body_position(&self) -> Vec3 {
        self.skeleton.world_position(self.joint("body"))
    }

    fn diagonals_moving(&self) -> (bool, bool) {
        let moving = |id| self.gecko.leg(id).is_some_and(|leg| leg.is_moving());
        (
            moving(LegId::FrontLeft) || moving(LegId::BackRight),
            moving(LegId::FrontRight) || moving(LegId::BackLeft),
        )
    }
}

fn quat_approx(a: Quat, b: Quat) -> bool {
    a.dot(b).abs() > 1.0 - 1e-6
}

// ============================================================================
// Root motion
// ============================================================================

#[test]
fn walks_toward_target_then_settles() {
    let mut rig = Rig::new(GeckoSettings::default());
    let target = Vec3::new(0.0, 0.0, 10.0);
    let rm = rig.gecko.settings().root_motion;

    rig.run(target, 1.5);
    let motion = rig.gecko.root_motion();
    assert!(motion.angular_velocity().abs() < 1e-3);
    assert!(motion.velocity().z > 0.95 * rm.move_speed);
    assert!(rig.body_position().distance(target) > rm.max_dist_to_target);

    rig.run(target, 6.5);
    let motion = rig.gecko.root_motion();
    let distance = rig.body_position().distance(target);
    assert!(motion.velocity().length() < 0.05, "still moving at {}", motion.velocity());
    assert!(
        (rm.min_dist_to_target..=rm.max_dist_to_target).contains(&distance),
        "settled at distance {distance}"
    );
}

#[test]
fn target_behind_turns_in_place() {
    let mut rig = Rig::new(GeckoSettings::default());
    rig.run(Vec3::new(0.0, 0.0, -10.0), 0.5);

    assert!(rig.gecko.root_motion().angular_velocity() > 10.0);
    assert!(rig.body_position().length() < 1e-3, "moved to {}", rig.body_position());
}

#[test]
fn target_too_close_backs_away() {
    let mut rig = Rig::new(GeckoSettings::default());
    rig.run(Vec3::new(0.0, 0.0, 2.0), 1.0);
    assert!(rig.gecko.root_motion().velocity().z < -0.5);
    assert!(rig.body_position().z < 0.0);
}

// ============================================================================
// Gait
// ============================================================================

#[test]
fn only_one_diagonal_steps_while_walking() {
    let mut rig = Rig::new(GeckoSettings::default());
    let target = Vec3::new(3.0, 0.0, 20.0);
    let mut frames_stepping = 0;

    for frame in 0..600 {
        rig.step(target);
        let (flbr, frbl) = rig.diagonals_moving();
        assert!(!(flbr && frbl), "both diagonals stepping at frame {frame}");
        if flbr || frbl {
            frames_stepping += 1;
        }
    }
    assert!(frames_stepping > 60, "legs barely stepped ({frames_stepping} frames)");

    for leg in rig.gecko.legs() {
        let foot = leg.stepper().foot().position;
        assert!(foot.is_finite());
        if !leg.is_moving() {
            assert!(foot.y.abs() < 1e-3, "{:?} foot floating at {foot}", leg.id());
        }
    }
}

#[test]
fn stepping_toggle_freezes_feet() {
    let mut rig = Rig::new(GeckoSettings::default());
    rig.gecko.toggles_mut().leg_stepping = false;

    let before: Vec<Vec3> = rig.gecko.legs().map(|l| l.stepper().foot().position).collect();
    rig.run(Vec3::new(0.0, 0.0, 20.0), 2.0);
    let after: Vec<Vec3> = rig.gecko.legs().map(|l| l.stepper().foot().position).collect();

    assert_eq!(before, after);
    assert!(rig.gecko.legs().all(|l| !l.is_moving()));
}

// ============================================================================
// Leg IK
// ============================================================================

#[test]
fn ik_places_feet_on_targets() {
    let mut rig = Rig::new(GeckoSettings::default());
    // Inside the distance band: the body stays put
    rig.step(Vec3::new(0.0, 0.0, 5.0));

    for leg in rig.gecko.legs() {
        let ik = leg.ik().unwrap();
        let end = rig.skeleton.world_position(ik.joints()[2]);
        let goal = leg.stepper().foot().position;
        assert!(end.distance(goal) < 1e-3, "{:?}: end {end} vs goal {goal}", leg.id());
    }
}

#[test]
fn ik_toggle_restores_rest_rotations() {
    let mut rig = Rig::new(GeckoSettings::default());
    let rest = rig.skeleton.clone();
    let target = Vec3::new(0.0, 0.0, 5.0);
    let uppers: Vec<_> = rig.gecko.legs().map(|l| l.ik().unwrap().joints()[0]).collect();

    rig.step(target);
    assert!(uppers
        .iter()
        .any(|&j| !quat_approx(rig.skeleton.local_rotation(j), rest.local_rotation(j))));

    rig.gecko.invoke(TOGGLE_LEG_IK).unwrap();
    assert!(!rig.gecko.toggles().leg_ik);
    rig.step(target);
    for leg in rig.gecko.legs() {
        for &joint in leg.ik().unwrap().joints() {
            assert_eq!(rig.skeleton.local_rotation(joint), rest.local_rotation(joint));
        }
    }

    rig.gecko.invoke(TOGGLE_LEG_IK).unwrap();
    rig.step(target);
    assert!(rig.gecko.toggles().leg_ik);
    assert!(uppers
        .iter()
        .any(|&j| !quat_approx(rig.skeleton.local_rotation(j), rest.local_rotation(j))));
}

#[test]
fn commands_are_listed_and_unknown_names_fail() {
    let mut rig = Rig::new(GeckoSettings::default());
    assert!(rig.gecko.commands().names().any(|n| n == TOGGLE_LEG_IK));

    let err = rig.gecko.invoke("dance").unwrap_err();
    assert!(matches!(err, GeckoError::UnknownCommand(name) if name == "dance"));
}

// ============================================================================
// Secondary layers
// ============================================================================

#[test]
fn disabled_head_writes_identity() {
    let mut settings = GeckoSettings::default();
    settings.head.bone_count = 3;
    let mut rig = Rig::new(settings);
    let target = Vec3::new(4.0, 1.0, 3.0);

    rig.run(target, 0.5);
    let head = rig.joint("head");
    assert!(!quat_approx(rig.skeleton.local_rotation(head), Quat::IDENTITY));

    rig.gecko.toggles_mut().head_tracking = false;
    rig.step(target);
    for name in ["head", "spine1", "spine2", "hip"] {
        assert_eq!(rig.skeleton.local_rotation(rig.joint(name)), Quat::IDENTITY, "{name}");
    }
}

/// Head tracking only: the body stays put facing +Z.
fn head_only_settings(bone_count: usize) -> GeckoSettings {
    let mut settings = GeckoSettings::default();
    settings.head.bone_count = bone_count;
    settings.toggles.root_motion = false;
    settings.toggles.idle_bobbing = false;
    settings
}

fn head_forward(rig: &Rig) -> Vec3 {
    rig.skeleton.world_rotation(rig.joint("head")) * Vec3::Z
}

#[test]
fn head_converges_on_target_with_hip_tilt() {
    let target = Vec3::new(3.0, 3.0, 6.0);

    for bone_count in 1..=3 {
        let settings = head_only_settings(bone_count);
        let influence = settings.head.hip_tilt_influence;
        let mut rig = Rig::new(settings);
        rig.run(target, 5.0);

        let head = rig.joint("head");
        let to_target = target - rig.skeleton.world_position(head);
        let error = angle_between(head_forward(&rig), to_target);
        assert!(error < 0.5, "bone_count {bone_count}: head off target by {error} degrees");

        let head_pitch = rig.skeleton.local_euler(head).x;
        let expected = delta_angle(head_pitch * bone_count as f32, 0.0) * influence;
        let hip_pitch = normalize_angle(rig.skeleton.local_euler(rig.joint("hip")).x);
        assert!(
            (hip_pitch - normalize_angle(expected)).abs() < 1e-2,
            "bone_count {bone_count}: hip pitch {hip_pitch}, expected {expected}"
        );
        assert!(hip_pitch.abs() > 1.0, "target above should tilt the hip");
    }
}

#[test]
fn head_is_clamped_to_look_cone() {
    let mut rig = Rig::new(head_only_settings(2));
    let max_turn = rig.gecko.settings().head.max_turn_angle;

    // Well behind and to the right, beyond the cone
    rig.run(Vec3::new(10.0, 0.5, -3.0), 5.0);

    let body_forward = rig.skeleton.world_rotation(rig.joint("body")) * Vec3::Z;
    let angle = angle_between(body_forward, head_forward(&rig));
    assert!((angle - max_turn).abs() < 0.5, "head turned {angle} degrees");
}

#[test]
fn eyes_respect_yaw_limits() {
    let mut settings = GeckoSettings::default();
    settings.toggles.root_motion = false;
    settings.toggles.head_tracking = false;
    settings.toggles.idle_bobbing = false;
    let mut rig = Rig::new(settings);

    // Straight to the right of the head
    rig.run(Vec3::new(10.0, 0.55, 1.15), 1.0);

    let left = normalize_angle(rig.skeleton.local_euler(rig.joint("eye.L")).y);
    let right = normalize_angle(rig.skeleton.local_euler(rig.joint("eye.R")).y);
    assert!(left <= 10.0 + 1e-3, "left eye crossed to {left}");
    assert!(right > 45.0, "right eye only reached {right}");
}

#[test]
fn tail_curls_against_turn() {
    let mut rig = Rig::new(GeckoSettings::default());
    rig.run(Vec3::new(0.0, 0.0, -10.0), 1.0);

    let turn = rig.gecko.root_motion().angular_velocity();
    let curl = rig.gecko.tail().unwrap().curl();
    assert!(turn > 0.0);
    assert!(curl < -10.0, "curl {curl}");

    rig.gecko.toggles_mut().tail_sway = false;
    rig.step(Vec3::new(0.0, 0.0, -10.0));
    for i in 0..4 {
        let joint = rig.joint(&format!("tail.{i}"));
        assert_eq!(rig.skeleton.local_rotation(joint), Quat::IDENTITY);
    }
}

#[test]
fn idle_bobbing_fades_in_at_rest() {
    let mut rig = Rig::new(GeckoSettings::default());
    let root = rig.joint("root");
    let home = rig.skeleton.local_position(root);

    rig.run(Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(rig.gecko.idle().unwrap().weight() > 0.5);
    assert!(rig.skeleton.local_position(root).distance(home) <= 0.021);

    rig.gecko.toggles_mut().idle_bobbing = false;
    rig.step(Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(rig.skeleton.local_position(root), home);
    assert_eq!(rig.skeleton.local_rotation(root), Quat::IDENTITY);
}

#[test]
fn idle_weight_reaches_zero_at_quarter_move_speed() {
    let settings = GeckoSettings::default().root_motion;
    let weight = target_idle_weight(0.25 * settings.move_speed, 0.0, settings.move_speed, settings.turn_speed);
    assert_eq!(weight, 0.0);
}

#[test]
fn gizmos_cover_every_leg() {
    let rig = Rig::new(GeckoSettings::default());
    let mut draw = RecordingDraw::new();
    rig.gecko.draw_gizmos(&rig.skeleton, &mut draw);
    assert_eq!(draw.commands.len(), 4 * 3);
}

// ============================================================================
// Joint ownership
// ============================================================================

#[test]
fn layers_own_disjoint_joints() {
    let rig = Rig::new(GeckoSettings::default());
    let gecko = &rig.gecko;

    let mut layers: Vec<(String, Vec<JointHandle>)> = vec![
        ("root motion".into(), gecko.root_motion().owned_joints().to_vec()),
        ("head".into(), gecko.head().unwrap().owned_joints().to_vec()),
        ("eyes".into(), gecko.eyes().unwrap().owned_joints().to_vec()),
        ("tail".into(), gecko.tail().unwrap().owned_joints().to_vec()),
        ("idle".into(), gecko.idle().unwrap().owned_joints().to_vec()),
    ];
    for leg in gecko.legs() {
        assert_eq!(leg.owned_joints().len(), 3);
        layers.push((format!("leg {:?}", leg.id()), leg.owned_joints().to_vec()));
    }

    for (i, (a_name, a)) in layers.iter().enumerate() {
        assert!(!a.is_empty(), "{a_name} owns nothing");
        for (b_name, b) in &layers[i + 1..] {
            for joint in a {
                assert!(
                    !b.contains(joint),
                    "{a_name} and {b_name} both own '{}'",
                    rig.skeleton.name(*joint).unwrap_or("?")
                );
            }
        }
    }
}

// ============================================================================
// Activation
// ============================================================================

#[test]
fn missing_body_is_fatal() {
    let skeleton = Skeleton::new();
    let err = GeckoController::new(&skeleton, GeckoSettings::default()).unwrap_err();
    assert!(matches!(err, GeckoError::MissingJoint(name) if name == "body"));
}

#[test]
fn invalid_settings_are_fatal() {
    let skeleton = build_gecko_skeleton(&GeckoSettings::default().rig).unwrap();
    let mut settings = GeckoSettings::default();
    settings.legs.step_duration = -1.0;
    let err = GeckoController::new(&skeleton, settings).unwrap_err();
    assert!(matches!(err, GeckoError::InvalidSettings(_)));
}

#[test]
fn missing_joints_disable_only_their_layer() {
    let mut skeleton = Skeleton::new();
    skeleton.add_joint("body", None, Transform::new()).unwrap();

    let mut gecko = GeckoController::new(&skeleton, GeckoSettings::default()).unwrap();
    assert!(gecko.head().is_none());
    assert!(gecko.eyes().is_none());
    assert!(gecko.tail().is_none());
    assert!(gecko.idle().is_none());
    assert_eq!(gecko.legs().count(), 0);

    // Root motion still runs
    let mut clock = FrameClock::new();
    let ground = GroundPlane::horizontal(0.0);
    for _ in 0..60 {
        clock.advance(DT);
        gecko.frame(&mut skeleton, &clock, &Vec3::new(0.0, 0.0, 10.0), &ground);
    }
    let body = skeleton.find("body").unwrap();
    assert!(skeleton.world_position(body).z > 0.5);
}

#[test]
fn missing_pole_disables_only_leg_ik() {
    let skeleton = build_gecko_skeleton(&GeckoSettings::default().rig).unwrap();
    let mut settings = GeckoSettings::default();
    settings.rig.front_left.pole = "pole.missing".into();
    let gecko = GeckoController::new(&skeleton, settings).unwrap();

    let leg = gecko.leg(LegId::FrontLeft).unwrap();
    assert!(leg.ik().is_none());
    assert!(gecko.leg(LegId::FrontRight).unwrap().ik().is_some());
}
