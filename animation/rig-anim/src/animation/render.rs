//! Render-side binding for skinned draws

use glam::Mat4;

use crate::skeleton::Skeleton;

/// Destination the animator writes to when drawing
///
/// Implemented by the renderer: `set_bone_matrices` typically uploads to
/// a shader uniform array, `draw_skeleton` issues the draw call for the
/// shared skeleton mesh.
pub trait RenderBinding {
    /// Bind the mesh shared by every instance, once per draw pass
    fn bind_skeleton(&mut self, _skeleton: &Skeleton) {}

    /// World placement of the next instance
    fn set_model_transform(&mut self, transform: Mat4);

    /// Skinning matrices of the next instance
    fn set_bone_matrices(&mut self, matrices: &[Mat4]);

    /// Draw the skeleton mesh with the current bindings
    fn draw_skeleton(&mut self, skeleton: &Skeleton);
}
