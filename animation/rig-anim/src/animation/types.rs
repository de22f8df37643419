//! Common types for the animation system

use glam::{Quat, Vec3};

/// Trait for sample types that can be blended between two keyframes
pub trait Interpolate: Copy {
    /// Blend from `self` towards `other` by factor `t` in `[0, 1]`
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vec3 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}

impl Interpolate for Quat {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        // Renormalise to remove slerp drift
        self.slerp(*other, t).normalize()
    }
}

/// How many times a clip should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Loops {
    /// Loop until told otherwise
    #[default]
    Infinite,
    /// Loop a fixed number of times
    Count(u32),
}

impl Loops {
    /// Convert from the signed convention used by callers (-1 = infinite)
    pub fn from_raw(raw: i32) -> Self {
        if raw < 0 {
            Self::Infinite
        } else {
            Self::Count(raw as u32)
        }
    }

    /// Convert to the signed convention (-1 = infinite)
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Infinite => -1,
            Self::Count(n) => n as i32,
        }
    }
}

/// Identifier of an animation slot in a [`SkeletalAnimator`](super::SkeletalAnimator)
///
/// Stable until the slot is erased; erased slots are reused by later adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl SlotId {
    /// Index into the slot pool
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot #{}", self.0)
    }
}
