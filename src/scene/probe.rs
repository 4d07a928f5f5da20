//! Ground probing service consumed by the leg steppers.
//!
//! The rig never owns collision geometry. It asks a [`GroundProbe`] to cast a
//! ray and reports the first hit, if any. A miss is a normal answer (a foot
//! hanging over a ledge), not an error.

use bitflags::bitflags;
use glam::{Vec2, Vec3};

bitflags! {
    /// Collision layers a probe may hit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        const DEFAULT  = 1 << 0;
        const GROUND   = 1 << 1;
        const OBSTACLE = 1 << 2;
        const EVERYTHING = u32::MAX;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::EVERYTHING
    }
}

/// First intersection along a probe ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

pub trait GroundProbe {
    /// Casts a ray from `origin` along `direction` (need not be normalized)
    /// and returns the closest hit within `max_distance` on any layer in `mask`.
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask)
    -> Option<RayHit>;
}

impl<F> GroundProbe for F
where
    F: Fn(Vec3, Vec3, f32, LayerMask) -> Option<RayHit>,
{
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self(origin, direction, max_distance, mask)
    }
}

fn intersect_plane(
    point: Vec3,
    normal: Vec3,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    let normal = normal.normalize_or_zero();
    let denom = normal.dot(dir);
    // Only front faces are hit.
    if denom > -1e-6 {
        return None;
    }
    let distance = (point - origin).dot(normal) / denom;
    if !(0.0..=max_distance).contains(&distance) {
        return None;
    }
    Some(RayHit {
        point: origin + dir * distance,
        normal,
        distance,
    })
}

/// Infinite plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub point: Vec3,
    pub normal: Vec3,
    pub layers: LayerMask,
}

impl GroundPlane {
    /// Horizontal plane at `height`.
    #[must_use]
    pub fn horizontal(height: f32) -> Self {
        Self {
            point: Vec3::new(0.0, height, 0.0),
            normal: Vec3::Y,
            layers: LayerMask::GROUND,
        }
    }
}

impl GroundProbe for GroundPlane {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        if !self.layers.intersects(mask) {
            return None;
        }
        intersect_plane(self.point, self.normal, origin, direction, max_distance)
    }
}

/// Horizontal rectangle; anything outside its `x`/`z` extents is a miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundRect {
    pub center: Vec3,
    /// Half size along world `x` (in `x`) and world `z` (in `y`).
    pub half_extents: Vec2,
    pub layers: LayerMask,
}

impl GroundProbe for GroundRect {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        if !self.layers.intersects(mask) {
            return None;
        }
        let hit = intersect_plane(self.center, Vec3::Y, origin, direction, max_distance)?;
        let offset = hit.point - self.center;
        (offset.x.abs() <= self.half_extents.x && offset.z.abs() <= self.half_extents.y)
            .then_some(hit)
    }
}

/// Several probes queried together; the nearest hit wins.
#[derive(Default)]
pub struct GroundSet {
    probes: Vec<Box<dyn GroundProbe>>,
}

impl GroundSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, probe: impl GroundProbe + 'static) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    pub fn push(&mut self, probe: Box<dyn GroundProbe>) {
        self.probes.push(probe);
    }
}

impl GroundProbe for GroundSet {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.probes
            .iter()
            .filter_map(|p| p.cast(origin, direction, max_distance, mask))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Never hits anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGround;

impl GroundProbe for NoGround {
    fn cast(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
        None
    }
}
