//! Uncertain values and first-order error propagation

pub mod propagation;
pub mod value;

pub use propagation::{
    anticrack_propagation_speed_uncertain, long_wave_speed_uncertain, propagate,
    propagate_with_covariance, rayleigh_wave_speed_uncertain, shear_wave_speed_uncertain,
};
pub use value::UncertainValue;
