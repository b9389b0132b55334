//! Core types and constants for slab mechanics

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;
