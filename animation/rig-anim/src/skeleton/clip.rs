//! Animation clips and their per-node keyframe channels

use glam::{Quat, Vec3};

/// A single time-stamped sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
    /// Sample time in ticks
    pub time: f32,
    /// Sampled value
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Create a new keyframe
    pub const fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Position, rotation and scale tracks for one skeleton node
///
/// The three tracks are independent and may have different sample
/// counts and timings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeChannel {
    pub positions: Vec<Keyframe<Vec3>>,
    pub rotations: Vec<Keyframe<Quat>>,
    pub scales: Vec<Keyframe<Vec3>>,
}

impl NodeChannel {
    /// Create an empty channel (node keeps its rest transform)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any of the three tracks carries samples
    pub fn has_samples(&self) -> bool {
        !self.positions.is_empty() || !self.rotations.is_empty() || !self.scales.is_empty()
    }

    /// Check that every track is sorted ascending by time
    pub fn is_sorted(&self) -> bool {
        fn sorted<T>(track: &[Keyframe<T>]) -> bool {
            track.windows(2).all(|w| w[0].time <= w[1].time)
        }
        sorted(&self.positions) && sorted(&self.rotations) && sorted(&self.scales)
    }
}

/// A named animation authored against a skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Clip name
    pub name: String,
    /// Playback rate
    pub ticks_per_second: f32,
    /// Clip length in ticks
    pub duration_ticks: f32,
    /// One channel per skeleton node, indexed by node
    pub channels: Vec<NodeChannel>,
}

impl AnimationClip {
    /// Create a new clip
    pub fn new(
        name: impl Into<String>,
        ticks_per_second: f32,
        duration_ticks: f32,
        channels: Vec<NodeChannel>,
    ) -> Self {
        Self {
            name: name.into(),
            ticks_per_second,
            duration_ticks,
            channels,
        }
    }

    /// Get the channel for a node; nodes past the end have no samples
    pub fn channel(&self, node: usize) -> Option<&NodeChannel> {
        self.channels.get(node)
    }

    /// Clip length in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.duration_ticks as f64 / self.ticks_per_second as f64
    }
}
