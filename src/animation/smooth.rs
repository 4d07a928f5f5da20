use std::ops::{Add, Div, Mul, Sub};

use glam::Vec3;

use crate::utils::math::delta_angle;

/// `speed · dt` at or above this value copies the target instead of filtering.
pub const SNAP_THRESHOLD: f32 = 100_000_000.0;

/// Values the critically-damped filter can operate on.
pub trait Smoothable:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> + Div<f32, Output = Self>
{
}

impl<T> Smoothable for T where
    T: Copy
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<f32, Output = T>
        + Div<f32, Output = T>
{
}

/// Framerate-independent, velocity-driven smoothing of a continuous value.
///
/// Each [`step`](Self::step) treats the target as moving linearly since the
/// previous call and follows it with a critically-damped response, so a
/// target that keeps changing is tracked without lag build-up and a
/// constant target is approached exponentially.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothDamp<T> {
    current: T,
    past_target: T,
}

pub type SmoothFloat = SmoothDamp<f32>;
pub type SmoothVec3 = SmoothDamp<Vec3>;

impl<T: Smoothable> SmoothDamp<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            past_target: value,
        }
    }

    /// Jumps to `value` with no residual velocity.
    pub fn reset(&mut self, value: T) {
        self.current = value;
        self.past_target = value;
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> T {
        self.current
    }

    pub fn step(&mut self, target: T, speed: f32, dt: f32) -> T {
        let t = dt * speed;
        if t == 0.0 {
            return self.current;
        }

        if t < SNAP_THRESHOLD {
            let v = (target - self.past_target) / t;
            let f = self.current - self.past_target + v;

            self.past_target = target;
            self.current = target - v + f * (-t).exp();
        } else {
            self.current = target;
        }
        self.current
    }
}

/// Scalar angle filter (degrees) that always follows the short way around.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothAngle {
    inner: SmoothDamp<f32>,
}

impl SmoothAngle {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            inner: SmoothDamp::new(value),
        }
    }

    pub fn reset(&mut self, value: f32) {
        self.inner.reset(value);
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> f32 {
        self.inner.value()
    }

    pub fn step(&mut self, target: f32, speed: f32, dt: f32) -> f32 {
        let current = self.inner.value();
        let target = current + delta_angle(current, target);
        self.inner.step(target, speed, dt)
    }
}

/// Euler triple filter (degrees); each axis wraps independently.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothEuler {
    inner: SmoothDamp<Vec3>,
}

impl SmoothEuler {
    #[must_use]
    pub fn new(value: Vec3) -> Self {
        Self {
            inner: SmoothDamp::new(value),
        }
    }

    pub fn reset(&mut self, value: Vec3) {
        self.inner.reset(value);
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> Vec3 {
        self.inner.value()
    }

    pub fn step(&mut self, target: Vec3, speed: f32, dt: f32) -> Vec3 {
        let current = self.inner.value();
        let target = Vec3::new(
            current.x + delta_angle(current.x, target.x),
            current.y + delta_angle(current.y, target.y),
            current.z + delta_angle(current.z, target.z),
        );
        self.inner.step(target, speed, dt)
    }
}
