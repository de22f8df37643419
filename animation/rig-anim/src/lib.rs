//! Skeletal animation evaluator
//!
//! `rig-anim` advances animation instances that play against a shared
//! [`Skeleton`], interpolates keyframes, composes the bone hierarchy and
//! publishes bone matrices for a render thread. One skeleton's pose can
//! follow a bone of another through [`BoneAttachment`]s, configured from a
//! persisted [`MappingStore`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use glam::Mat4;
//! use rig_anim::{AnimationClip, Loops, SkeletalAnimator, Skeleton, SkeletonNode};
//!
//! let skeleton = Skeleton::new(
//!     "hero",
//!     vec![SkeletonNode::root("root", Mat4::IDENTITY)],
//!     vec![],
//!     vec![AnimationClip::new("idle", 25.0, 50.0, vec![])],
//!     Mat4::IDENTITY,
//! )?;
//!
//! let animator = SkeletalAnimator::new(Arc::new(skeleton));
//! let slot = animator.add();
//! animator.play_named(slot, "idle", Loops::Infinite);
//! animator.animate();
//! animator.sync();
//! assert!(animator.can_animate(slot));
//! # Ok::<(), rig_anim::AnimError>(())
//! ```

pub mod animation;
pub mod attachment;
pub mod config;
pub mod error;
pub mod skeleton;

pub use animation::{
    AnimationInstance, Clock, Loops, ManualClock, RenderBinding, SkeletalAnimator, SlotId,
    SyncedSnapshot, SystemClock,
};
pub use attachment::{BoneAttachment, BoneAttachmentMapping, MappingStore};
pub use config::AnimatorConfig;
pub use error::{AnimError, Result};
pub use skeleton::{AnimationClip, Bone, Keyframe, NodeChannel, Skeleton, SkeletonNode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
