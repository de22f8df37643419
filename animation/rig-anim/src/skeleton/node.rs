//! Skeleton nodes and render bones

use glam::Mat4;

/// One node of a skeleton hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonNode {
    /// Node name as authored
    pub name: String,
    /// Parent node index (None for a root node)
    pub parent: Option<usize>,
    /// Authored local transform, used when a clip has no samples for this node
    pub rest_transform: Mat4,
    /// Index into the skeleton's bone list if this node feeds a skinning matrix
    pub bone: Option<usize>,
}

impl SkeletonNode {
    /// Create a root node
    pub fn root(name: impl Into<String>, rest_transform: Mat4) -> Self {
        Self {
            name: name.into(),
            parent: None,
            rest_transform,
            bone: None,
        }
    }

    /// Create a node under `parent`
    pub fn child(name: impl Into<String>, parent: usize, rest_transform: Mat4) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            rest_transform,
            bone: None,
        }
    }

    /// Mark this node as a render bone
    pub fn with_bone(mut self, bone: usize) -> Self {
        self.bone = Some(bone);
        self
    }

    /// Check if this node has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A render bone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone {
    /// Inverse of the bone's bind-pose world transform
    pub inverse_bind_pose: Mat4,
}

impl Bone {
    /// Create a bone from its inverse bind-pose matrix
    pub const fn new(inverse_bind_pose: Mat4) -> Self {
        Self { inverse_bind_pose }
    }

    /// Create a bone from its bind-pose world transform
    pub fn from_bind_pose(bind_pose: Mat4) -> Self {
        Self {
            inverse_bind_pose: bind_pose.inverse(),
        }
    }
}

impl Default for Bone {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}
