//! Skeleton definitions
//!
//! A [`Skeleton`] is immutable once constructed. It owns the node hierarchy,
//! the render bones and the animation clips authored against it. Animators
//! share it through an `Arc`, so it outlives every animator bound to it.
//!
//! Construction validates the invariants the animation pass relies on:
//!
//! - every non-root node has `parent < index` (topological order)
//! - every node bone index is in range
//! - no clip carries more channels than there are nodes
//! - keyframes are sorted and clip timing is positive

mod clip;
mod node;

pub use clip::{AnimationClip, Keyframe, NodeChannel};
pub use node::{Bone, SkeletonNode};

use glam::Mat4;

use crate::error::{AnimError, Result};

/// Immutable skeleton hierarchy with its animation clips
#[derive(Debug, Clone)]
pub struct Skeleton {
    name: String,
    nodes: Vec<SkeletonNode>,
    bones: Vec<Bone>,
    animations: Vec<AnimationClip>,
    root_transform: Mat4,
}

impl Skeleton {
    /// Create a skeleton, validating its hierarchy and clips
    ///
    /// # Arguments
    /// * `name` - Model name, used by attachment mappings
    /// * `nodes` - Nodes in topological order (parents before children)
    /// * `bones` - Render bones, indexed by `SkeletonNode::bone`
    /// * `animations` - Clips authored against this skeleton
    /// * `root_transform` - Corrective matrix applied to every evaluated pose
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<SkeletonNode>,
        bones: Vec<Bone>,
        animations: Vec<AnimationClip>,
        root_transform: Mat4,
    ) -> Result<Self> {
        for (index, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent
                && parent >= index
            {
                return Err(AnimError::InvalidHierarchy {
                    node: index,
                    parent,
                });
            }
            if let Some(bone) = node.bone
                && bone >= bones.len()
            {
                return Err(AnimError::BoneOutOfRange {
                    node: index,
                    bone,
                    bone_count: bones.len(),
                });
            }
        }

        for clip in &animations {
            if clip.channels.len() > nodes.len() {
                return Err(AnimError::ChannelMismatch {
                    clip: clip.name.clone(),
                    channels: clip.channels.len(),
                    nodes: nodes.len(),
                });
            }
            if !(clip.duration_ticks > 0.0) {
                return Err(AnimError::InvalidClip {
                    clip: clip.name.clone(),
                    reason: format!("duration must be positive, got {}", clip.duration_ticks),
                });
            }
            if !(clip.ticks_per_second > 0.0) {
                return Err(AnimError::InvalidClip {
                    clip: clip.name.clone(),
                    reason: format!(
                        "ticks per second must be positive, got {}",
                        clip.ticks_per_second
                    ),
                });
            }
            if let Some(node) = clip.channels.iter().position(|c| !c.is_sorted()) {
                return Err(AnimError::InvalidClip {
                    clip: clip.name.clone(),
                    reason: format!("keyframes for node {node} are not sorted by time"),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            nodes,
            bones,
            animations,
            root_transform,
        })
    }

    /// Model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All nodes in topological order
    pub fn nodes(&self) -> &[SkeletonNode] {
        &self.nodes
    }

    /// Get a node by index
    pub fn node(&self, index: usize) -> Option<&SkeletonNode> {
        self.nodes.get(index)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All render bones
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Number of render bones
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Inverse bind pose of a bone, or identity if out of range
    pub fn bone(&self, index: usize) -> Mat4 {
        self.bones
            .get(index)
            .map_or(Mat4::IDENTITY, |b| b.inverse_bind_pose)
    }

    /// All animation clips
    pub fn animations(&self) -> &[AnimationClip] {
        &self.animations
    }

    /// Get a clip by index
    pub fn animation(&self, index: usize) -> Option<&AnimationClip> {
        self.animations.get(index)
    }

    /// Number of animation clips
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Resolve a clip name to its index
    pub fn index_of_animation(&self, name: &str) -> Option<usize> {
        self.animations.iter().position(|a| a.name == name)
    }

    /// Resolve a clip name to its index, failing on unknown names
    pub fn require_animation(&self, name: &str) -> Result<usize> {
        self.index_of_animation(name)
            .ok_or_else(|| AnimError::UnknownAnimation(format!("'{name}' on '{}'", self.name)))
    }

    /// Asset-level corrective transform
    pub fn root_transform(&self) -> Mat4 {
        self.root_transform
    }

    /// Indices of the direct children of a node
    pub fn children(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .skip(node + 1)
            .filter(move |(_, n)| n.parent == Some(node))
            .map(|(i, _)| i)
    }
}
