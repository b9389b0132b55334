//! Closed-form crack-speed estimates from the avalanche literature.
//!
//! These are algebraic companions to the dispersion-relation solver in
//! [`super::anticrack`]: the solitary-wave model of Heierli (2005,
//! J. Geophys. Res., Eq. 7a) and the fracture-speed band of McClung
//! (2005, Geophys. Res. Lett., Eq. 1).

use crate::core::constants::HEIERLI_TOUCHDOWN_GAMMA;
use crate::validation::{require_open_interval, require_positive, SlabError};

/// Flexural rigidity D = E·h³/12 of the slab.
fn flexural_rigidity(e_modulus: f64, thickness: f64) -> f64 {
    e_modulus * thickness.powi(3) / 12.0
}

/// Solitary fracture-wave speed (Heierli 2005, Eq. 7a):
/// c⁴ = g·D / (2·h_f·ρ·h).
pub fn solitary_wave_speed(
    gravity: f64,
    e_modulus: f64,
    thickness: f64,
    collapse_height: f64,
    density: f64,
) -> Result<f64, SlabError> {
    require_positive("gravity", gravity)?;
    require_positive("e_modulus", e_modulus)?;
    require_positive("thickness", thickness)?;
    require_positive("collapse_height", collapse_height)?;
    require_positive("density", density)?;

    let rigidity = flexural_rigidity(e_modulus, thickness);
    let c4 = gravity * rigidity / (2.0 * collapse_height * density * thickness);
    Ok(c4.sqrt().sqrt())
}

/// Touchdown distance of the solitary fracture wave (Heierli 2005):
/// λ⁴ = γ⁴ · 2·h_f·D / (g·ρ·h), γ = 2.331.
pub fn solitary_wave_touchdown(
    gravity: f64,
    e_modulus: f64,
    thickness: f64,
    collapse_height: f64,
    density: f64,
) -> Result<f64, SlabError> {
    require_positive("gravity", gravity)?;
    require_positive("e_modulus", e_modulus)?;
    require_positive("thickness", thickness)?;
    require_positive("collapse_height", collapse_height)?;
    require_positive("density", density)?;

    let rigidity = flexural_rigidity(e_modulus, thickness);
    let lambda4 = HEIERLI_TOUCHDOWN_GAMMA.powi(4) * 2.0 * collapse_height * rigidity
        / (gravity * density * thickness);
    Ok(lambda4.sqrt().sqrt())
}

/// Approximate fracture-speed band for dry slab avalanches (McClung
/// 2005, Eq. 1): (0.7·sqrt(G/ρ), 0.9·sqrt(G/ρ)).
pub fn mcclung_fracture_speeds(
    poisson_ratio: f64,
    e_modulus: f64,
    density: f64,
) -> Result<(f64, f64), SlabError> {
    require_open_interval("poisson_ratio", poisson_ratio, -1.0, 0.5)?;
    require_positive("e_modulus", e_modulus)?;
    require_positive("density", density)?;

    let shear_modulus = e_modulus / (2.0 * (1.0 + poisson_ratio));
    let base = (shear_modulus / density).sqrt();
    Ok((0.7 * base, 0.9 * base))
}
