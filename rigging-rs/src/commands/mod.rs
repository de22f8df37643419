//! Command implementations

pub mod mappings;
