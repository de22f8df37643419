use std::io;
use thiserror::Error;

/// Error types for skeleton construction and attachment mapping persistence
#[derive(Error, Debug)]
pub enum AnimError {
    /// I/O Error during reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A node references a parent that is not strictly before it
    #[error("Invalid hierarchy: node {node} has parent {parent}")]
    InvalidHierarchy { node: usize, parent: usize },

    /// A node carries a bone index with no matching bone
    #[error("Bone index out of range: node {node} references bone {bone}, skeleton has {bone_count} bones")]
    BoneOutOfRange {
        node: usize,
        bone: usize,
        bone_count: usize,
    },

    /// A clip carries more channels than the skeleton has nodes
    #[error("Channel count mismatch in clip '{clip}': {channels} channels for {nodes} nodes")]
    ChannelMismatch {
        clip: String,
        channels: usize,
        nodes: usize,
    },

    /// Clip keyframes are not sorted by time or the clip timing is unusable
    #[error("Invalid clip '{clip}': {reason}")]
    InvalidClip { clip: String, reason: String },

    /// No clip with the given name exists on the skeleton
    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),

    /// Persisted mapping data could not be decoded
    #[error("Malformed mapping data: {0}")]
    MalformedMapping(String),
}

/// Result type using AnimError
pub type Result<T> = std::result::Result<T, AnimError>;
