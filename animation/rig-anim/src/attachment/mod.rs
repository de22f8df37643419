//! Bone attachments
//!
//! - [`BoneAttachment`]: runtime descriptor an animation instance uses to
//!   follow a bone of another skeleton
//! - [`BoneAttachmentMapping`]: persisted rule describing which attachment
//!   goes where for a given root animation
//! - [`MappingStore`]: the persisted list of rules with its editor operations

mod bone;
mod io;
mod mapping;
mod store;

pub use bone::BoneAttachment;
pub use mapping::BoneAttachmentMapping;
pub use store::MappingStore;
