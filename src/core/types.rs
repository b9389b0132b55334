//! Core data types for slab and weak-layer mechanics

use serde::{Serialize, Deserialize};

use crate::core::constants::TIMOSHENKO_SHEAR_FACTOR;
use crate::validation::{require_open_interval, require_positive, SlabError};

/// Mechanical and geometric description of a snow slab over a
/// collapsible weak layer, in SI units (angle in degrees).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabParameters {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Elastic modulus of the slab (Pa)
    pub e_modulus: f64,
    /// Poisson ratio of the slab, in (-1, 0.5)
    pub poisson_ratio: f64,
    /// Slab thickness (m)
    pub thickness: f64,
    /// Collapse height of the weak layer (m)
    pub collapse_height: f64,
    /// Mean slab density (kg/m³)
    pub density: f64,
    /// Slope angle (degrees)
    pub slope_angle_deg: f64,
    /// Touchdown distance behind the crack tip (m)
    pub touchdown_distance: f64,
}

impl SlabParameters {
    /// Check every field against its physical domain. Called by all
    /// entry points before any formula is evaluated.
    pub fn validate(&self) -> Result<(), SlabError> {
        require_positive("gravity", self.gravity)?;
        require_positive("e_modulus", self.e_modulus)?;
        require_open_interval("poisson_ratio", self.poisson_ratio, -1.0, 0.5)?;
        require_positive("thickness", self.thickness)?;
        require_positive("collapse_height", self.collapse_height)?;
        require_positive("density", self.density)?;
        crate::validation::require_finite("slope_angle_deg", self.slope_angle_deg)?;
        require_positive("touchdown_distance", self.touchdown_distance)?;
        Ok(())
    }

    /// Shear modulus G = E / (2(1+ν))
    pub fn shear_modulus(&self) -> f64 {
        self.e_modulus / (2.0 * (1.0 + self.poisson_ratio))
    }

    /// Derive the dimensionless quantities of the anticrack formulation
    /// (Heierli diss., Table 4.1). Assumes `validate` has passed.
    pub fn dimensionless(&self) -> DimensionlessState {
        let k = TIMOSHENKO_SHEAR_FACTOR;
        let shear_modulus = self.shear_modulus();
        let theta = self.slope_angle_deg.to_radians();

        let compressive = -self.density * self.gravity * self.thickness * theta.cos();
        let shear = self.density * self.gravity * self.thickness * theta.sin();

        DimensionlessState {
            touchdown_length: self.touchdown_distance / self.thickness,
            collapse_amplitude: self.collapse_height / self.thickness,
            compressive_stress: -compressive / (k * shear_modulus),
            shear_stress: shear / (k * shear_modulus),
            shear_coefficient: (self.e_modulus / (3.0 * k * shear_modulus)).sqrt(),
        }
    }
}

/// Dimensionless quantities derived from [`SlabParameters`].
///
/// Recomputed on every solve, never cached or mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionlessState {
    /// L = l/h
    pub touchdown_length: f64,
    /// H_f = h_f/h
    pub collapse_amplitude: f64,
    /// Σ = -σ/(kG) with σ the slope-normal compressive stress
    pub compressive_stress: f64,
    /// Τ = τ/(kG). Part of the published table of dimensionless
    /// variables; the propagation speed does not depend on it.
    pub shear_stress: f64,
    /// η = sqrt(E/(3kG)), the Timoshenko shear coefficient of the
    /// dispersion relation
    pub shear_coefficient: f64,
}

/// Converged result of the anticrack dispersion solve, with the solver
/// diagnostics needed to judge it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagationSolution {
    /// Crack propagation speed (m/s)
    pub speed_ms: f64,
    /// Root C* of the dispersion relation, a fraction of the
    /// shear-wave speed, in (0, 1)
    pub dimensionless_speed: f64,
    /// Shear-wave speed sqrt(kG/ρ) used for the conversion (m/s)
    pub shear_wave_speed_ms: f64,
    /// Iterations the root finder spent
    pub iterations: usize,
    /// Residual of the dispersion relation at C*
    pub residual: f64,
}
