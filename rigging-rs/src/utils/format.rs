//! Formatting utilities

use glam::{Quat, Vec3};

/// Format an optional node index, `-` for none
pub fn format_node(node: Option<usize>) -> String {
    node.map_or_else(|| "-".to_string(), |n| n.to_string())
}

/// Format a vector as `(x, y, z)`
pub fn format_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

/// Format a quaternion as `(x, y, z, w)`
pub fn format_quat(q: Quat) -> String {
    format!("({:.3}, {:.3}, {:.3}, {:.3})", q.x, q.y, q.z, q.w)
}
