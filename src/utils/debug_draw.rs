//! Observation-only draw hooks.
//!
//! Components that have something worth visualising expose a
//! `draw_gizmos(&self, &mut dyn DebugDraw)` method. Implementations must not
//! feed anything back into the simulation.

use glam::{Vec3, Vec4};

pub const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

pub trait DebugDraw {
    fn wire_sphere(&mut self, center: Vec3, radius: f32, color: Vec4);
    fn line(&mut self, from: Vec3, to: Vec3, color: Vec4);
    fn wire_cube(&mut self, center: Vec3, size: Vec3, color: Vec4);
}

/// Discards every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDraw;

impl DebugDraw for NullDraw {
    fn wire_sphere(&mut self, _center: Vec3, _radius: f32, _color: Vec4) {}
    fn line(&mut self, _from: Vec3, _to: Vec3, _color: Vec4) {}
    fn wire_cube(&mut self, _center: Vec3, _size: Vec3, _color: Vec4) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Sphere { center: Vec3, radius: f32, color: Vec4 },
    Line { from: Vec3, to: Vec3, color: Vec4 },
    Cube { center: Vec3, size: Vec3, color: Vec4 },
}

/// Keeps every call so a frontend (or a test) can replay it later.
#[derive(Debug, Default, Clone)]
pub struct RecordingDraw {
    pub commands: Vec<DrawCommand>,
}

impl RecordingDraw {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DebugDraw for RecordingDraw {
    fn wire_sphere(&mut self, center: Vec3, radius: f32, color: Vec4) {
        self.commands.push(DrawCommand::Sphere { center, radius, color });
    }

    fn line(&mut self, from: Vec3, to: Vec3, color: Vec4) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn wire_cube(&mut self, center: Vec3, size: Vec3, color: Vec4) {
        self.commands.push(DrawCommand::Cube { center, size, color });
    }
}
