//! Input validation and error taxonomy

pub mod error;
pub mod params;

pub use error::SlabError;
pub use params::{require_finite, require_non_negative, require_open_interval, require_positive};
