//! Density-based parametrizations of slab mechanical properties

pub mod elastic_modulus;

pub use elastic_modulus::{
    elastic_modulus_from_density, ModulusParametrization, ModulusUnit, ScalingPoint,
};
