//! Gecko Controller
//!
//! Owns every pose layer of one creature and runs them in a fixed order
//! against a [`Skeleton`] the caller owns.
//!
//! # Frame Order
//!
//! ```text
//! update:       root motion → gait tick → leg trigger → leg advance
//! late_update:  idle bobbing → head → eyes → tail → leg IK
//! ```
//!
//! The late phase sees the final body pose of the frame. Each layer is
//! handed a [`JointWriter`](crate::scene::JointWriter) built from the joints it resolved at
//! construction and never sees the skeleton mutably, so no joint has two
//! writers.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut skeleton = build_gecko_skeleton(&settings.rig)?;
//! let mut gecko = GeckoController::new(&skeleton, settings)?;
//! gecko.initialize(&skeleton, &ground);
//!
//! loop {
//!     clock.advance(1.0 / 60.0);
//!     gecko.frame(&mut skeleton, &clock, &target, &ground);
//! }
//! ```

use crate::animation::gait::{GaitPhase, GaitScheduler, LegId};
use crate::creature::commands::CommandRegistry;
use crate::creature::eyes::{EyeJoints, EyeTracking};
use crate::creature::head::{HeadJoints, HeadTracking};
use crate::creature::idle::{IdleBobbing, target_idle_weight};
use crate::creature::leg::Leg;
use crate::creature::root_motion::RootMotion;
use crate::creature::tail::TailSway;
use crate::creature::target::TargetProvider;
use crate::errors::Result;
use crate::scene::{GroundProbe, JointHandle, Skeleton};
use crate::settings::{GeckoSettings, LayerToggles, LegNames, RigNames};
use crate::utils::{DebugDraw, FrameClock};

pub const TOGGLE_LEG_IK: &str = "toggle_leg_ik";

/// Resolves `names` for one layer, logging the first missing joint.
fn resolve_layer<const N: usize>(
    skeleton: &Skeleton,
    layer: &str,
    names: [&str; N],
) -> Option<[JointHandle; N]> {
    let mut handles = [JointHandle::default(); N];
    for (slot, name) in handles.iter_mut().zip(names) {
        match skeleton.find(name) {
            Some(handle) => *slot = handle,
            None => {
                log::error!("{layer}: joint '{name}' not found; layer disabled");
                return None;
            }
        }
    }
    Some(handles)
}

fn leg_names(rig: &RigNames, id: LegId) -> &LegNames {
    match id {
        LegId::FrontLeft => &rig.front_left,
        LegId::FrontRight => &rig.front_right,
        LegId::BackLeft => &rig.back_left,
        LegId::BackRight => &rig.back_right,
    }
}

#[derive(Debug)]
pub struct GeckoController {
    settings: GeckoSettings,
    root_motion: RootMotion,
    head: Option<HeadTracking>,
    eyes: Option<EyeTracking>,
    tail: Option<TailSway>,
    idle: Option<IdleBobbing>,
    legs: [Option<Leg>; 4],
    gait: GaitScheduler,
    /// Whether leg IK ran on the previous late update.
    ik_applied: bool,
    commands: CommandRegistry<GeckoController>,
}

impl GeckoController {
    /// Validates `settings` and resolves every layer's joints.
    ///
    /// Only a missing body joint is fatal. Any other missing joint disables
    /// the layer that needs it.
    pub fn new(skeleton: &Skeleton, settings: GeckoSettings) -> Result<Self> {
        settings.validate()?;
        let rig = &settings.rig;

        let body = skeleton.require(&rig.body)?;
        let root_motion = RootMotion::new(body, settings.root_motion);

        let head = resolve_layer(
            skeleton,
            "Head tracking",
            [rig.hip.as_str(), rig.spine1.as_str(), rig.spine2.as_str(), rig.head.as_str()],
        )
        .map(|[hip, spine1, spine2, head]| {
            HeadTracking::new(HeadJoints { body, hip, spine1, spine2, head }, settings.head)
        });

        let eyes = resolve_layer(
            skeleton,
            "Eye tracking",
            [rig.head.as_str(), rig.left_eye.as_str(), rig.right_eye.as_str()],
        )
        .map(|[head, left, right]| {
            EyeTracking::new(EyeJoints { body, head, left, right }, settings.eyes)
        });

        let tail = rig
            .tail
            .iter()
            .map(|name| {
                let handle = skeleton.find(name);
                if handle.is_none() {
                    log::error!("Tail sway: joint '{name}' not found; layer disabled");
                }
                handle
            })
            .collect::<Option<Vec<_>>>()
            .map(|joints| TailSway::new(skeleton, &joints, settings.tail));

        let idle = resolve_layer(skeleton, "Idle bobbing", [rig.root.as_str()])
            .map(|[root]| IdleBobbing::new(skeleton, root, settings.idle));

        let legs = LegId::ALL.map(|id| {
            Leg::resolve(skeleton, id, leg_names(rig, id), settings.legs, settings.ik)
        });

        let mut commands = CommandRegistry::new();
        commands.register(TOGGLE_LEG_IK, Self::toggle_leg_ik);

        Ok(Self {
            ik_applied: settings.toggles.leg_ik,
            settings,
            root_motion,
            head,
            eyes,
            tail,
            idle,
            legs,
            gait: GaitScheduler::new(),
            commands,
        })
    }

    /// Places every foot on the ground below its home.
    pub fn initialize(&mut self, skeleton: &Skeleton, probe: &dyn GroundProbe) {
        for leg in self.legs.iter_mut().flatten() {
            leg.initialize(skeleton, probe);
        }
    }

    // ========================================================================
    // Frame phases
    // ========================================================================

    /// Root motion and leg stepping.
    pub fn update(
        &mut self,
        skeleton: &mut Skeleton,
        clock: &FrameClock,
        target: &impl TargetProvider,
        probe: &dyn GroundProbe,
    ) {
        let dt = clock.dt_seconds();
        let toggles = self.settings.toggles;

        if toggles.root_motion {
            let mut w = skeleton.writer(self.root_motion.owned_joints());
            self.root_motion.update(&mut w, target.position(), dt);
        }

        let legs = &self.legs;
        let trigger = self.gait.tick(toggles.leg_stepping, |id| {
            legs[id.index()].as_ref().is_some_and(Leg::is_moving)
        });

        if let Some(pair) = trigger {
            for id in pair {
                if let Some(leg) = &mut self.legs[id.index()] {
                    leg.try_move(skeleton, probe);
                }
            }
        }

        for leg in self.legs.iter_mut().flatten() {
            leg.advance(dt);
        }
    }

    /// Secondary motion layers and leg IK, after the body pose is final.
    pub fn late_update(
        &mut self,
        skeleton: &mut Skeleton,
        clock: &FrameClock,
        target: &impl TargetProvider,
    ) {
        let dt = clock.dt_seconds();
        let toggles = self.settings.toggles;
        let rm = self.settings.root_motion;
        let angular_velocity = self.root_motion.angular_velocity();
        let look_at = target.position();

        if let Some(idle) = &mut self.idle {
            let weight = target_idle_weight(
                self.root_motion.velocity().length(),
                angular_velocity,
                rm.move_speed,
                rm.turn_speed,
            );
            let mut w = skeleton.writer(idle.owned_joints());
            idle.update(&mut w, clock.elapsed_seconds(), weight, dt, toggles.idle_bobbing);
        }

        if let Some(head) = &mut self.head {
            let mut w = skeleton.writer(head.owned_joints());
            head.update(&mut w, look_at, dt, toggles.head_tracking);
        }

        if let Some(eyes) = &mut self.eyes {
            let mut w = skeleton.writer(eyes.owned_joints());
            eyes.update(&mut w, look_at, dt, toggles.eye_tracking);
        }

        if let Some(tail) = &mut self.tail {
            let mut w = skeleton.writer(tail.owned_joints());
            tail.update(&mut w, angular_velocity, rm.turn_speed, dt, toggles.tail_sway);
        }

        if toggles.leg_ik {
            for leg in self.legs.iter_mut().flatten() {
                let mut w = skeleton.writer(leg.owned_joints());
                leg.solve_ik(&mut w);
            }
        } else if self.ik_applied {
            log::debug!("Leg IK disabled; restoring rest rotations");
            for leg in self.legs.iter().flatten() {
                let mut w = skeleton.writer(leg.owned_joints());
                leg.reset_chain(&mut w);
            }
        }
        self.ik_applied = toggles.leg_ik;
    }

    /// Runs both phases for one frame.
    pub fn frame(
        &mut self,
        skeleton: &mut Skeleton,
        clock: &FrameClock,
        target: &impl TargetProvider,
        probe: &dyn GroundProbe,
    ) {
        self.update(skeleton, clock, target, probe);
        self.late_update(skeleton, clock, target);
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Flips leg IK for every leg. Turning it off restores the chains' rest
    /// rotations on the next late update.
    pub fn toggle_leg_ik(&mut self) {
        let enabled = !self.settings.toggles.leg_ik;
        self.set_leg_ik_enabled(enabled);
    }

    pub fn set_leg_ik_enabled(&mut self, enabled: bool) {
        log::info!("Leg IK {}", if enabled { "enabled" } else { "disabled" });
        self.settings.toggles.leg_ik = enabled;
    }

    #[must_use]
    pub fn commands(&self) -> &CommandRegistry<GeckoController> {
        &self.commands
    }

    /// Runs a registered command by name.
    pub fn invoke(&mut self, name: &str) -> Result<()> {
        let command = self.commands.get(name)?;
        command(self);
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn settings(&self) -> &GeckoSettings {
        &self.settings
    }

    #[must_use]
    pub fn toggles(&self) -> LayerToggles {
        self.settings.toggles
    }

    pub fn toggles_mut(&mut self) -> &mut LayerToggles {
        &mut self.settings.toggles
    }

    #[must_use]
    pub fn root_motion(&self) -> &RootMotion {
        &self.root_motion
    }

    #[must_use]
    pub fn head(&self) -> Option<&HeadTracking> {
        self.head.as_ref()
    }

    #[must_use]
    pub fn eyes(&self) -> Option<&EyeTracking> {
        self.eyes.as_ref()
    }

    #[must_use]
    pub fn tail(&self) -> Option<&TailSway> {
        self.tail.as_ref()
    }

    #[must_use]
    pub fn idle(&self) -> Option<&IdleBobbing> {
        self.idle.as_ref()
    }

    #[must_use]
    pub fn leg(&self, id: LegId) -> Option<&Leg> {
        self.legs[id.index()].as_ref()
    }

    pub fn legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter().flatten()
    }

    #[must_use]
    pub fn gait_phase(&self) -> GaitPhase {
        self.gait.phase()
    }

    pub fn draw_gizmos(&self, skeleton: &Skeleton, draw: &mut dyn DebugDraw) {
        for leg in self.legs() {
            leg.draw_gizmos(skeleton, draw);
        }
    }
}
