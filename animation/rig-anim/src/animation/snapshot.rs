//! Immutable copies of animation results for the render thread

use std::time::Duration;

use glam::Mat4;

use super::instance::AnimationInstance;
use super::types::SlotId;
use crate::attachment::BoneAttachment;

/// Read-only copy of one instance's results, replaced wholesale on each sync
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedSnapshot {
    pub slot: SlotId,
    pub active: bool,
    pub clip: Option<usize>,
    pub bone_matrices: Vec<Mat4>,
    pub node_transforms: Vec<Mat4>,
    pub root_transform: Mat4,
    pub model_transform: Mat4,
    pub attachment: BoneAttachment,
    /// Clock time playback started at
    pub play_started_at: Duration,
    /// Clock time the snapshot was taken
    pub captured_at: Duration,
}

impl SyncedSnapshot {
    /// Copy the current state of an instance
    pub fn capture(slot: SlotId, instance: &AnimationInstance, captured_at: Duration) -> Self {
        Self {
            slot,
            active: instance.active,
            clip: instance.clip,
            bone_matrices: instance.pose.bone_matrices().to_vec(),
            node_transforms: instance.pose.node_transforms().to_vec(),
            root_transform: instance.root_transform,
            model_transform: instance.model_transform,
            attachment: instance.attachment,
            play_started_at: instance.play_started_at,
            captured_at,
        }
    }

    /// Playback time covered by this snapshot
    pub fn played_for(&self) -> Duration {
        self.captured_at.saturating_sub(self.play_started_at)
    }
}
