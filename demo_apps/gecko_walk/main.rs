//! Gecko Walk Demo
//!
//! Runs the full rig headless at a fixed timestep while a target hops
//! between waypoints, logging the body and feet once per second.
//!
//! Usage:
//! - `gecko_walk` runs with default settings
//! - `gecko_walk settings.json` loads tuning overrides from a file
//! - `RUST_LOG=debug gecko_walk` also logs every step start and landing

use anyhow::Context;
use gecko_rig::creature::{
    GeckoController, TOGGLE_LEG_IK, WaypointTarget, build_gecko_skeleton,
};
use gecko_rig::scene::{GroundPlane, GroundRect, GroundSet, LayerMask};
use gecko_rig::settings::GeckoSettings;
use gecko_rig::utils::{FrameClock, RecordingDraw};
use gecko_rig::TargetProvider;
use glam::{Vec2, Vec3};

const DT: f32 = 1.0 / 60.0;
const SECONDS: u32 = 20;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => GeckoSettings::from_json_file(&path)
            .with_context(|| format!("Failed to load settings from {path}"))?,
        None => GeckoSettings::default(),
    };

    let mut skeleton = build_gecko_skeleton(&settings.rig)?;
    let mut gecko = GeckoController::new(&skeleton, settings)?;

    // Flat floor with a raised platform the route crosses
    let ground = GroundSet::new()
        .with(GroundPlane::horizontal(0.0))
        .with(GroundRect {
            center: Vec3::new(0.0, 0.3, 12.0),
            half_extents: Vec2::new(3.0, 2.0),
            layers: LayerMask::GROUND,
        });

    let mut target = WaypointTarget::new(vec![
        Vec3::new(0.0, 0.0, 10.0),
        Vec3::new(8.0, 0.0, 14.0),
        Vec3::new(-6.0, 0.0, 18.0),
        Vec3::new(0.0, 0.0, 4.0),
    ]);

    gecko.initialize(&skeleton, &ground);

    let body = skeleton.require(&gecko.settings().rig.body)?;
    let mut clock = FrameClock::new();
    let mut gizmos = RecordingDraw::new();
    let frames_per_second = (1.0 / DT).round() as u64;

    while clock.elapsed_seconds() < SECONDS as f32 {
        clock.advance(DT);
        target.update(DT);
        gecko.frame(&mut skeleton, &clock, &target, &ground);

        if clock.frame_count % frames_per_second == 0 {
            gizmos.clear();
            gecko.draw_gizmos(&skeleton, &mut gizmos);

            let pose = skeleton.world_pose(body);
            let motion = gecko.root_motion();
            log::info!(
                "t={:>5.2}s body={:.2} speed={:.2} turn={:>6.1}°/s target={:.2} stepping={}",
                clock.elapsed_seconds(),
                pose.position,
                motion.velocity().length(),
                motion.angular_velocity(),
                target.position(),
                gecko.legs().filter(|leg| leg.is_moving()).count(),
            );
            for leg in gecko.legs() {
                log::debug!("  {:?} foot={:.2}", leg.id(), leg.stepper().foot().position);
            }
        }

        // Halfway through, drop the legs back to their rest pose
        if clock.frame_count == u64::from(SECONDS / 2) * frames_per_second {
            gecko.invoke(TOGGLE_LEG_IK)?;
        }
    }

    log::info!(
        "Finished after {} frames ({} gizmo commands in the last frame)",
        clock.frame_count,
        gizmos.commands.len()
    );
    Ok(())
}
