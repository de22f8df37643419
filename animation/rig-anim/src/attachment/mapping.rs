//! Declarative bone attachment rules

use glam::{Quat, Vec3};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// "When `root_model` plays `root_animation`, attach `attached_model` playing
/// `attached_animation` to node `attach_to_node` with this offset."
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct BoneAttachmentMapping {
    pub root_model: String,
    pub root_animation: String,
    pub attached_model: String,
    pub attached_animation: String,
    /// Node on the root skeleton the attachment follows
    pub attach_to_node: Option<usize>,
    pub position: Vec3,
    pub rotation: Quat,
}

impl BoneAttachmentMapping {
    /// Create a mapping with no offset
    pub fn new(
        root_model: impl Into<String>,
        root_animation: impl Into<String>,
        attached_model: impl Into<String>,
        attached_animation: impl Into<String>,
        attach_to_node: Option<usize>,
    ) -> Self {
        Self {
            root_model: root_model.into(),
            root_animation: root_animation.into(),
            attached_model: attached_model.into(),
            attached_animation: attached_animation.into(),
            attach_to_node,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    /// Set the attachment offset
    pub fn with_offset(mut self, position: Vec3, rotation: Quat) -> Self {
        self.position = position;
        self.rotation = rotation;
        self
    }

    /// Check if both mappings bind the same attachment animation to the same root
    ///
    /// The root animation is not compared: at most one such mapping may exist.
    pub fn is_same_mapping(&self, other: &Self) -> bool {
        self.root_model == other.root_model
            && self.attached_model == other.attached_model
            && self.attached_animation == other.attached_animation
    }

    /// Human-readable form, e.g. `hero.walk -> sword.default`
    pub fn mapping_string(&self) -> String {
        format!(
            "{}.{} -> {}.{}",
            self.root_model, self.root_animation, self.attached_model, self.attached_animation
        )
    }
}

impl std::fmt::Display for BoneAttachmentMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.mapping_string())
    }
}
