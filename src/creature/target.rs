use glam::{Quat, Vec3};

use crate::scene::Pose;

/// Read-only source of the point the creature walks toward and looks at.
///
/// Updated by the caller once per frame, before the controller runs.
pub trait TargetProvider {
    fn position(&self) -> Vec3;

    fn rotation(&self) -> Quat {
        Quat::IDENTITY
    }
}

impl TargetProvider for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

impl TargetProvider for Pose {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }
}

/// Target that hops between waypoints on a fixed cycle and eases toward the
/// current one.
#[derive(Debug, Clone)]
pub struct WaypointTarget {
    position: Vec3,
    waypoints: Vec<Vec3>,
    current: usize,
    timer: f32,
    /// Seconds spent on each waypoint before moving to the next.
    pub cycle: f32,
    /// Exponential approach rate toward the current waypoint.
    pub speed: f32,
}

impl WaypointTarget {
    pub const DEFAULT_CYCLE: f32 = 1.35;
    pub const DEFAULT_SPEED: f32 = 2.0;

    /// Starts at the first waypoint. An empty list keeps the target at the origin.
    #[must_use]
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self {
            position: waypoints.first().copied().unwrap_or(Vec3::ZERO),
            waypoints,
            current: 0,
            timer: 0.0,
            cycle: Self::DEFAULT_CYCLE,
            speed: Self::DEFAULT_SPEED,
        }
    }

    #[inline]
    #[must_use]
    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }

    pub fn update(&mut self, dt: f32) {
        if self.waypoints.is_empty() {
            return;
        }

        self.timer += dt;
        if self.timer >= self.cycle {
            self.timer -= self.cycle;
            self.current = (self.current + 1) % self.waypoints.len();
        }

        let goal = self.waypoints[self.current];
        self.position = self.position.lerp(goal, 1.0 - (-self.speed * dt).exp());
    }
}

impl TargetProvider for WaypointTarget {
    fn position(&self) -> Vec3 {
        self.position
    }
}
