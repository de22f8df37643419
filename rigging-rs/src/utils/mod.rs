//! Shared utilities for the rigging-rs CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
