//! Runtime descriptor binding one skeleton's root to a bone of another

use glam::{Mat4, Quat, Vec3};

/// Binds an animation instance's root to a bone of a different skeleton
///
/// `position` and `rotation` are the authored offset relative to the parent
/// bone. Call [`update`](Self::update) after editing them so the next
/// animate pass sees the new offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneAttachment {
    /// Node index on the parent skeleton the attachment follows
    pub parent: Option<usize>,
    /// Bone matrix of the parent skeleton at that node
    pub parent_bone: Mat4,
    /// Offset matrix derived from `position` and `rotation`
    pub child_bone: Mat4,
    /// Authored local offset
    pub position: Vec3,
    /// Authored local rotation
    pub rotation: Quat,
}

impl BoneAttachment {
    /// Create an attachment with the given offset, offset matrix already computed
    pub fn new(parent: Option<usize>, position: Vec3, rotation: Quat) -> Self {
        let mut attachment = Self {
            parent,
            position,
            rotation,
            ..Self::default()
        };
        attachment.update();
        attachment
    }

    /// Recompute the offset matrix from `position` and `rotation`
    pub fn update(&mut self) {
        self.child_bone =
            Mat4::from_translation(self.position) * Mat4::from_quat(self.rotation.normalize());
    }
}

impl Default for BoneAttachment {
    fn default() -> Self {
        Self {
            parent: None,
            parent_bone: Mat4::IDENTITY,
            child_bone: Mat4::IDENTITY,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_translation_then_rotation() {
        let mut attachment = BoneAttachment {
            position: Vec3::new(0.0, 1.0, 0.0),
            rotation: Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
            ..BoneAttachment::default()
        };
        attachment.update();

        let p = attachment.child_bone.transform_point3(Vec3::Y);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 1.0, 1.0), 1e-5));
    }

    #[test]
    fn test_update_normalizes_rotation() {
        let mut attachment = BoneAttachment {
            rotation: Quat::from_xyzw(0.0, 0.0, 0.0, 4.0),
            ..BoneAttachment::default()
        };
        attachment.update();
        assert!(attachment.child_bone.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }
}
