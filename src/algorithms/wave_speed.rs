//! Elastic wave speeds in a slab from its moduli and density.
//!
//! Closed-form estimates; the Rayleigh speed uses the Bergmann
//! approximation. All inputs are SI (Pa, kg/m³), all speeds m/s.

use crate::validation::{require_open_interval, require_positive, SlabError};

/// Shear (S) wave speed, sqrt(G/ρ).
pub fn shear_wave_speed(shear_modulus: f64, density: f64) -> Result<f64, SlabError> {
    require_positive("shear_modulus", shear_modulus)?;
    require_positive("density", density)?;
    Ok((shear_modulus / density).sqrt())
}

/// Longitudinal (bar) wave speed, sqrt(E/ρ).
pub fn long_wave_speed(e_modulus: f64, density: f64) -> Result<f64, SlabError> {
    require_positive("e_modulus", e_modulus)?;
    require_positive("density", density)?;
    Ok((e_modulus / density).sqrt())
}

/// Rayleigh surface-wave speed via the Bergmann approximation,
/// c_R = c_S · sqrt((0.87 + 1.12ν)/(1 + ν)).
///
/// The approximation breaks down for strongly auxetic materials where
/// 0.87 + 1.12ν goes non-positive; that regime is reported as a domain
/// error rather than a NaN.
pub fn rayleigh_wave_speed(
    e_modulus: f64,
    shear_modulus: f64,
    density: f64,
    poisson_ratio: f64,
) -> Result<f64, SlabError> {
    require_positive("e_modulus", e_modulus)?;
    require_open_interval("poisson_ratio", poisson_ratio, -1.0, 0.5)?;

    let numerator = 0.87 + 1.12 * poisson_ratio;
    if numerator <= 0.0 {
        return Err(SlabError::numerical_domain(
            "Bergmann factor 0.87 + 1.12*nu",
            poisson_ratio,
        ));
    }
    let bergmann = (numerator / (1.0 + poisson_ratio)).sqrt();
    Ok(bergmann * shear_wave_speed(shear_modulus, density)?)
}

/// P-wave (constrained) modulus, E(1-ν)/((1+ν)(1-2ν)).
pub fn pwave_modulus(e_modulus: f64, poisson_ratio: f64) -> Result<f64, SlabError> {
    require_positive("e_modulus", e_modulus)?;
    require_open_interval("poisson_ratio", poisson_ratio, -1.0, 0.5)?;
    let denominator = (1.0 + poisson_ratio) * (1.0 - 2.0 * poisson_ratio);
    Ok(e_modulus * (1.0 - poisson_ratio) / denominator)
}
