use glam::Vec3;

/// Cubic ease-in-out over `[0, 1]`; inputs outside that range are clamped.
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quadratic Bezier through `start` and `end`, pulled toward `control`.
#[must_use]
pub fn quadratic_bezier(start: Vec3, control: Vec3, end: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    start.lerp(control, t).lerp(control.lerp(end, t), t)
}
