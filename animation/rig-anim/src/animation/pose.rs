//! Hierarchical pose composition
//!
//! Turns interpolated per-node local transforms into world transforms and
//! final skinning matrices. Nodes are visited in index order; since every
//! parent precedes its children this single forward pass reads each parent
//! transform only after it has been written.

use glam::Mat4;

use super::interpolation::channel_transform;
use crate::attachment::BoneAttachment;
use crate::skeleton::{AnimationClip, Skeleton};

/// Per-instance transform buffers, sized once from the bound skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    /// World transform per node
    node_transforms: Vec<Mat4>,
    /// Final render matrix per bone
    bone_matrices: Vec<Mat4>,
}

impl Pose {
    /// Allocate buffers for a skeleton
    pub fn new(skeleton: &Skeleton) -> Self {
        Self {
            node_transforms: vec![Mat4::IDENTITY; skeleton.node_count()],
            bone_matrices: vec![Mat4::IDENTITY; skeleton.bone_count()],
        }
    }

    /// World transform per node
    pub fn node_transforms(&self) -> &[Mat4] {
        &self.node_transforms
    }

    /// Final render matrix per bone
    pub fn bone_matrices(&self) -> &[Mat4] {
        &self.bone_matrices
    }

    /// Reset every matrix to identity without resizing
    pub fn clear(&mut self) {
        self.node_transforms.fill(Mat4::IDENTITY);
        self.bone_matrices.fill(Mat4::IDENTITY);
    }

    /// Evaluate the pose of `clip` at in-clip `time`
    ///
    /// # Arguments
    /// * `skeleton` - Skeleton the buffers were sized for
    /// * `clip` - Clip being played
    /// * `time` - In-clip time in ticks
    /// * `root_transform` - Transform the root nodes are placed under
    /// * `attachment` - Set when this pose follows a bone of another skeleton
    pub fn update(
        &mut self,
        skeleton: &Skeleton,
        clip: &AnimationClip,
        time: f32,
        root_transform: Mat4,
        attachment: Option<&BoneAttachment>,
    ) {
        assert_eq!(
            self.node_transforms.len(),
            skeleton.node_count(),
            "pose buffers were sized for a different skeleton"
        );

        let asset_root = skeleton.root_transform();

        for (index, node) in skeleton.nodes().iter().enumerate() {
            let local = match clip.channel(index) {
                Some(channel) if channel.has_samples() => channel_transform(channel, time),
                _ => node.rest_transform,
            };

            let parent_transform = match node.parent {
                Some(parent) => self.node_transforms[parent],
                None => root_transform,
            };
            let world = parent_transform * local;
            self.node_transforms[index] = world;

            let Some(bone) = node.bone else {
                continue;
            };

            self.bone_matrices[bone] = match attachment {
                // The parent bone already carries the world placement
                Some(attachment) => {
                    world * attachment.parent_bone * attachment.child_bone * asset_root
                }
                None => asset_root * world * skeleton.bone(bone),
            };
        }
    }
}
