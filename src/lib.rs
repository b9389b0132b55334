//! Snow Slab Mechanics
//!
//! Mechanical and wave-propagation properties of snow slabs from
//! field-measured inputs, using closed-form empirical formulas and the
//! semi-analytical anticrack dispersion relation from the
//! avalanche-mechanics literature.

pub mod core;
pub mod algorithms;
pub mod mechanics;
pub mod uncertainty;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{
    DimensionlessState, PropagationSolution, SlabParameters, HEIERLI_TOUCHDOWN_GAMMA,
    STANDARD_GRAVITY, TIMOSHENKO_SHEAR_FACTOR,
};
pub use algorithms::anticrack::{
    anticrack_propagation_speed, dispersion_residual, AnticrackSolver, DEFAULT_INITIAL_GUESS,
};
pub use algorithms::fracture::{
    mcclung_fracture_speeds, solitary_wave_speed, solitary_wave_touchdown,
};
pub use algorithms::wave_speed::{
    long_wave_speed, pwave_modulus, rayleigh_wave_speed, shear_wave_speed,
};
pub use mechanics::{
    elastic_modulus_from_density, ModulusParametrization, ModulusUnit, ScalingPoint,
};
pub use uncertainty::{
    anticrack_propagation_speed_uncertain, long_wave_speed_uncertain, propagate,
    propagate_with_covariance, rayleigh_wave_speed_uncertain, shear_wave_speed_uncertain,
    UncertainValue,
};
pub use utils::SolverConfig;
pub use validation::SlabError;
