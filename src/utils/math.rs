//! Angle and direction helpers shared by the rig.
//!
//! Conventions used everywhere in the crate:
//! - `+Z` is forward, `+Y` is up, `+X` is right (`right = up × forward`).
//! - Angles handed to and returned from these helpers are in **degrees**.
//! - Euler triples are stored as `Vec3(x = pitch, y = yaw, z = roll)` and
//!   applied yaw first, then pitch, then roll (`Ry · Rx · Rz`).

use glam::{EulerRot, Mat3, Quat, Vec3};

const DIR_EPSILON: f32 = 1e-6;

/// Wraps `t` into `[0, length)`.
#[inline]
#[must_use]
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Shortest signed difference from `current` to `target`, in `(-180, 180]`.
#[inline]
#[must_use]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = repeat(target - current, 360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Maps any angle into `(-180, 180]`.
#[inline]
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = repeat(angle, 360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Where `value` lies between `a` and `b`, clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}

/// Removes the component of `v` along `normal`.
#[must_use]
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let sq = normal.length_squared();
    if sq < DIR_EPSILON {
        v
    } else {
        v - normal * (v.dot(normal) / sq)
    }
}

/// Unsigned angle between two directions in degrees. Zero-length input yields `0`.
#[must_use]
pub fn angle_between(from: Vec3, to: Vec3) -> f32 {
    let denom = (from.length_squared() * to.length_squared()).sqrt();
    if denom < DIR_EPSILON {
        return 0.0;
    }
    (from.dot(to) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle from `from` to `to` in degrees, signed by the rotation sense about `axis`.
#[must_use]
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let unsigned = angle_between(from, to);
    if axis.dot(from.cross(to)) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Any unit vector perpendicular to `v`.
fn any_orthogonal(v: Vec3) -> Vec3 {
    let n = v.normalize_or_zero();
    if n == Vec3::ZERO {
        return Vec3::X;
    }
    n.any_orthonormal_vector()
}

/// Rotates `current` toward `target` by at most `max_degrees`, keeping the length of `current`.
#[must_use]
pub fn rotate_towards(current: Vec3, target: Vec3, max_degrees: f32) -> Vec3 {
    let len = current.length();
    let target_dir = target.normalize_or_zero();
    if len < DIR_EPSILON || target_dir == Vec3::ZERO {
        return current;
    }

    let angle = angle_between(current, target_dir);
    if angle <= max_degrees {
        return target_dir * len;
    }

    let mut axis = current.cross(target_dir);
    if axis.length_squared() < DIR_EPSILON {
        axis = any_orthogonal(current);
    }
    Quat::from_axis_angle(axis.normalize(), max_degrees.to_radians()) * current
}

/// Spherical interpolation between two directions; magnitudes are blended linearly.
#[must_use]
pub fn slerp_direction(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let (la, lb) = (a.length(), b.length());
    if la < DIR_EPSILON || lb < DIR_EPSILON {
        return a.lerp(b, t);
    }
    let arc = Quat::from_rotation_arc(a / la, b / lb);
    let dir = Quat::IDENTITY.slerp(arc, t) * (a / la);
    dir * (la + (lb - la) * t)
}

/// Rotation whose `+Z` points along `forward` and whose `+Y` leans toward `up`.
///
/// Returns `None` when `forward` has no length. When `up` is parallel to
/// `forward` the shortest arc from `+Z` is used instead.
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        return None;
    }

    let x = up.cross(z);
    if x.length_squared() < DIR_EPSILON {
        return Some(Quat::from_rotation_arc(Vec3::Z, z));
    }
    let x = x.normalize();
    let y = z.cross(x);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize())
}

/// Builds a rotation from an Euler triple in degrees.
#[inline]
#[must_use]
pub fn euler_to_quat(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

/// Decomposes a rotation into an Euler triple in degrees, each in `[0, 360)`.
#[must_use]
pub fn quat_to_euler(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(
        repeat(x.to_degrees(), 360.0) % 360.0,
        repeat(y.to_degrees(), 360.0) % 360.0,
        repeat(z.to_degrees(), 360.0) % 360.0,
    )
}

/// Angle between two rotations in degrees.
#[inline]
#[must_use]
pub fn quat_angle(a: Quat, b: Quat) -> f32 {
    let dot = a.dot(b).abs().min(1.0);
    (2.0 * dot.acos()).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn delta_angle_takes_short_path() {
        assert!(approx(delta_angle(359.0, 1.0), 2.0));
        assert!(approx(delta_angle(1.0, 359.0), -2.0));
        assert!(approx(delta_angle(0.0, 180.0), 180.0));
        assert!(approx(delta_angle(10.0, 10.0), 0.0));
    }

    #[test]
    fn normalize_angle_range() {
        assert!(approx(normalize_angle(270.0), -90.0));
        assert!(approx(normalize_angle(180.0), 180.0));
        assert!(approx(normalize_angle(-180.0), 180.0));
        assert!(approx(normalize_angle(725.0), 5.0));
    }

    #[test]
    fn inverse_lerp_clamps() {
        assert!(approx(inverse_lerp(20.0, 45.0, 10.0), 0.0));
        assert!(approx(inverse_lerp(20.0, 45.0, 32.5), 0.5));
        assert!(approx(inverse_lerp(20.0, 45.0, 90.0), 1.0));
        assert!(approx(inverse_lerp(100.0, 20.0, 60.0), 0.5));
    }

    #[test]
    fn signed_angle_sign_follows_axis() {
        assert!(approx(signed_angle(Vec3::Z, Vec3::X, Vec3::Y), 90.0));
        assert!(approx(signed_angle(Vec3::Z, -Vec3::X, Vec3::Y), -90.0));
    }

    #[test]
    fn rotate_towards_limits_angle() {
        let r = rotate_towards(Vec3::Z, Vec3::X, 30.0);
        assert!(approx(angle_between(Vec3::Z, r), 30.0));
        assert!(approx(r.length(), 1.0));
        let r = rotate_towards(Vec3::Z, Vec3::new(0.1, 0.0, 1.0), 30.0);
        assert!(approx(angle_between(r, Vec3::new(0.1, 0.0, 1.0)), 0.0));
    }

    #[test]
    fn look_rotation_axes() {
        let q = look_rotation(Vec3::X, Vec3::Y).unwrap();
        assert!((q * Vec3::Z - Vec3::X).length() < 1e-4);
        assert!((q * Vec3::Y - Vec3::Y).length() < 1e-4);
        assert!(look_rotation(Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn euler_round_trip() {
        let e = Vec3::new(20.0, 45.0, 10.0);
        let back = quat_to_euler(euler_to_quat(e));
        assert!(approx(back.x, 20.0) && approx(back.y, 45.0) && approx(back.z, 10.0));
    }
}
