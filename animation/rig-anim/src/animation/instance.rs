//! Per-slot animation playback state

use std::time::Duration;

use glam::Mat4;

use super::pose::Pose;
use super::types::Loops;
use crate::attachment::BoneAttachment;
use crate::skeleton::Skeleton;

/// One playing (or idle) animation slot
#[derive(Debug, Clone)]
pub struct AnimationInstance {
    /// Whether the slot is in use
    pub active: bool,
    /// Clip being played (None = unassigned, cannot animate)
    pub clip: Option<usize>,
    /// Clock time playback started at
    pub play_started_at: Duration,
    /// In-clip time of the last animate pass (ticks)
    pub time: f32,
    /// Advisory loop counter
    pub loops_completed: u32,
    /// Requested loop count
    pub loops: Loops,
    /// Whether the root follows a bone of another skeleton
    pub is_attachment: bool,
    /// Attachment descriptor, used when `is_attachment` is set
    pub attachment: BoneAttachment,
    /// Transform the skeleton roots are placed under
    pub root_transform: Mat4,
    /// World placement passed to the renderer
    pub model_transform: Mat4,
    /// Node and bone matrices of the last animate pass
    pub pose: Pose,
}

impl AnimationInstance {
    /// Create an idle instance bound to a skeleton
    pub fn new(skeleton: &Skeleton) -> Self {
        Self {
            active: true,
            clip: None,
            play_started_at: Duration::ZERO,
            time: 0.0,
            loops_completed: 0,
            loops: Loops::Infinite,
            is_attachment: false,
            attachment: BoneAttachment::default(),
            root_transform: Mat4::IDENTITY,
            model_transform: Mat4::IDENTITY,
            pose: Pose::new(skeleton),
        }
    }

    /// Return to the default state, keeping the pose buffers
    pub fn reset_state(&mut self) {
        self.active = true;
        self.clip = None;
        self.play_started_at = Duration::ZERO;
        self.time = 0.0;
        self.loops_completed = 0;
        self.loops = Loops::Infinite;
        self.is_attachment = false;
        self.attachment = BoneAttachment::default();
        self.root_transform = Mat4::IDENTITY;
        self.model_transform = Mat4::IDENTITY;
        self.pose.clear();
    }

    /// Re-anchor playback to `now`
    pub fn restart(&mut self, now: Duration) {
        self.play_started_at = now;
        self.time = 0.0;
        self.loops_completed = 0;
    }

    /// Playback time elapsed at `now`
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.play_started_at)
    }

    /// Check if a finite loop target has been reached
    pub fn is_finished(&self) -> bool {
        match self.loops {
            Loops::Infinite => false,
            Loops::Count(target) => self.loops_completed >= target,
        }
    }
}
