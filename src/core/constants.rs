//! Physical constants and model parameters

/// Standard gravitational acceleration (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Timoshenko shear-correction factor for a rectangular cross-section
pub const TIMOSHENKO_SHEAR_FACTOR: f64 = 5.0 / 6.0;

/// Touchdown shape constant γ of the solitary-wave model (Heierli 2005)
pub const HEIERLI_TOUCHDOWN_GAMMA: f64 = 2.331;
