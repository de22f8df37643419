//! Skeletal animation playback
//!
//! This module provides the runtime side of the animation system:
//! - Keyframe search and interpolation (lerp for position/scale, slerp for rotation)
//! - Hierarchical pose composition into node and bone matrices
//! - A slot pool of animation instances sharing one skeleton
//! - Double-buffered snapshots for a separate render thread
//!
//! # Example
//!
//! ```rust,ignore
//! use rig_anim::animation::{Loops, SkeletalAnimator};
//!
//! let animator = SkeletalAnimator::new(skeleton);
//! let slot = animator.add();
//! animator.play_named(slot, "walk", Loops::Infinite);
//!
//! // Simulation thread, once per frame
//! animator.animate();
//! animator.sync();
//!
//! // Render thread
//! animator.draw(&mut renderer);
//! ```

mod animator;
mod clock;
mod instance;
mod interpolation;
mod pose;
mod render;
mod snapshot;
mod types;

pub use animator::SkeletalAnimator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use instance::AnimationInstance;
pub use interpolation::{
    channel_transform, clip_time, completed_cycles, find_keyframe_index, sample_track,
};
pub use pose::Pose;
pub use render::RenderBinding;
pub use snapshot::SyncedSnapshot;
pub use types::{Interpolate, Loops, SlotId};
