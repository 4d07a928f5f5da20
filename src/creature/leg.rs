use glam::Quat;

use crate::animation::gait::LegId;
use crate::animation::ik::{ChainOffsets, TwoBoneIk};
use crate::animation::stepper::LegStepper;
use crate::scene::{GroundProbe, JointHandle, JointWriter, Skeleton};
use crate::settings::{IkSettings, LegNames, StepperSettings};
use crate::utils::DebugDraw;

/// One leg: a stepper driving the foot target and an optional IK chain
/// reaching for it.
#[derive(Debug, Clone)]
pub struct Leg {
    id: LegId,
    home: JointHandle,
    pole: Option<JointHandle>,
    stepper: LegStepper,
    ik: Option<TwoBoneIk>,
    rest_rotations: [Quat; 3],
}

impl Leg {
    /// Resolves the leg's joints by name.
    ///
    /// Returns `None` (and logs) when the home joint is missing. A missing
    /// chain joint or pole only disables IK for this leg.
    #[must_use]
    pub fn resolve(
        skeleton: &Skeleton,
        id: LegId,
        names: &LegNames,
        stepper: StepperSettings,
        ik: IkSettings,
    ) -> Option<Self> {
        let Some(home) = skeleton.find(&names.home) else {
            log::error!("Leg {}: home joint '{}' not found; leg disabled", id.label(), names.home);
            return None;
        };

        let pole = skeleton.find(&names.pole);
        let chain = (
            skeleton.find(&names.upper),
            skeleton.find(&names.lower),
            skeleton.find(&names.foot),
        );

        let mut rest_rotations = [Quat::IDENTITY; 3];
        let ik = match (chain, pole) {
            ((Some(upper), Some(lower), Some(foot)), Some(_)) => {
                let offsets = ChainOffsets {
                    root: ik.root_offset,
                    mid: ik.mid_offset,
                    end: ik.end_offset,
                };
                let mut solver = TwoBoneIk::new(upper, lower, foot, offsets, ik.align_end);
                if solver.activate(skeleton) {
                    for (rest, &joint) in rest_rotations.iter_mut().zip(solver.joints()) {
                        *rest = skeleton.local_rotation(joint);
                    }
                    Some(solver)
                } else {
                    None
                }
            }
            _ => {
                log::error!(
                    "Leg {}: IK chain '{}' -> '{}' -> '{}' with pole '{}' is incomplete; IK disabled",
                    id.label(),
                    names.upper,
                    names.lower,
                    names.foot,
                    names.pole,
                );
                None
            }
        };

        let stepper = LegStepper::new(stepper, skeleton.world_pose(home));

        Some(Self {
            id,
            home,
            pole,
            stepper,
            ik,
            rest_rotations,
        })
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> LegId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn stepper(&self) -> &LegStepper {
        &self.stepper
    }

    #[inline]
    #[must_use]
    pub fn ik(&self) -> Option<&TwoBoneIk> {
        self.ik.as_ref()
    }

    /// Chain joints written by IK; empty when IK is disabled for this leg.
    #[must_use]
    pub fn owned_joints(&self) -> &[JointHandle] {
        self.ik.as_ref().map_or(&[][..], |ik| &ik.joints()[..])
    }

    #[inline]
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.stepper.is_moving()
    }

    /// Snaps the foot to the ground below home.
    pub fn initialize(&mut self, skeleton: &Skeleton, probe: &dyn GroundProbe) {
        self.stepper.initialize(skeleton.world_pose(self.home), probe);
    }

    pub fn try_move(&mut self, skeleton: &Skeleton, probe: &dyn GroundProbe) -> bool {
        self.stepper.try_move(skeleton.world_pose(self.home), probe)
    }

    pub fn advance(&mut self, dt: f32) {
        self.stepper.advance(dt);
    }

    /// Reaches the chain for the current foot target.
    pub fn solve_ik(&mut self, w: &mut JointWriter<'_>) {
        let (Some(ik), Some(pole)) = (self.ik.as_mut(), self.pole) else {
            return;
        };
        let pole_position = w.world_position(pole);
        ik.solve(w, self.stepper.foot(), pole_position);
    }

    /// Restores the chain's local rotations captured at activation.
    pub fn reset_chain(&self, w: &mut JointWriter<'_>) {
        let Some(ik) = &self.ik else {
            return;
        };
        for (&joint, &rest) in ik.joints().iter().zip(&self.rest_rotations) {
            w.set_local_rotation(joint, rest);
        }
    }

    pub fn draw_gizmos(&self, skeleton: &Skeleton, draw: &mut dyn DebugDraw) {
        self.stepper.draw_gizmos(skeleton.world_pose(self.home), draw);
    }
}
