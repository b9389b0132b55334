//! First-order (linearized) error propagation through arbitrary scalar
//! functions.
//!
//! Any `Fn(&[f64]) -> Result<f64, SlabError>` can be called with
//! uncertain inputs: partial derivatives come from central finite
//! differences, and the output standard deviation is the usual
//! σ² = gᵀ Σ g quadratic form (diagonal Σ for independent inputs, full
//! covariance via [`propagate_with_covariance`]). The wrapped function
//! itself stays uncertainty-free.

use nalgebra::{DMatrix, DVector};

use super::value::UncertainValue;
use crate::algorithms::{anticrack, wave_speed};
use crate::core::types::SlabParameters;
use crate::validation::SlabError;

/// Central-difference step: cube root of machine epsilon, scaled to the
/// magnitude of the argument.
fn difference_step(x: f64) -> f64 {
    f64::EPSILON.cbrt() * x.abs().max(1.0)
}

fn numerical_gradient<F>(
    f: &F,
    nominal: &[f64],
    active: &[bool],
) -> Result<DVector<f64>, SlabError>
where
    F: Fn(&[f64]) -> Result<f64, SlabError>,
{
    let mut gradient = DVector::zeros(nominal.len());
    let mut point = nominal.to_vec();
    for i in 0..nominal.len() {
        // partials against exact inputs contribute nothing
        if !active[i] {
            continue;
        }
        let h = difference_step(nominal[i]);
        point[i] = nominal[i] + h;
        let forward = f(&point)?;
        point[i] = nominal[i] - h;
        let backward = f(&point)?;
        point[i] = nominal[i];
        gradient[i] = (forward - backward) / (2.0 * h);
    }
    Ok(gradient)
}

/// Apply `f` to uncertain inputs, treating them as independent.
pub fn propagate<F>(f: F, inputs: &[UncertainValue]) -> Result<UncertainValue, SlabError>
where
    F: Fn(&[f64]) -> Result<f64, SlabError>,
{
    if inputs.is_empty() {
        return Err(SlabError::invalid_parameter(
            "inputs",
            0.0,
            "at least one uncertain input required",
        ));
    }

    let nominal: Vec<f64> = inputs.iter().map(|u| u.value).collect();
    let active: Vec<bool> = inputs.iter().map(|u| u.std_dev > 0.0).collect();

    let value = f(&nominal)?;
    let gradient = numerical_gradient(&f, &nominal, &active)?;
    let sigmas = DVector::from_iterator(inputs.len(), inputs.iter().map(|u| u.std_dev));
    let variance = gradient.component_mul(&sigmas).norm_squared();

    Ok(UncertainValue {
        value,
        std_dev: variance.sqrt(),
    })
}

/// Apply `f` to correlated inputs with the given covariance matrix.
pub fn propagate_with_covariance<F>(
    f: F,
    values: &[f64],
    covariance: &DMatrix<f64>,
) -> Result<UncertainValue, SlabError>
where
    F: Fn(&[f64]) -> Result<f64, SlabError>,
{
    let n = values.len();
    if n == 0 {
        return Err(SlabError::invalid_parameter(
            "values",
            0.0,
            "at least one input required",
        ));
    }
    if covariance.nrows() != n || covariance.ncols() != n {
        return Err(SlabError::invalid_parameter(
            "covariance",
            covariance.nrows() as f64,
            "must be a square matrix matching the number of inputs",
        ));
    }

    let active = vec![true; n];
    let value = f(values)?;
    let gradient = numerical_gradient(&f, values, &active)?;
    let variance = (covariance * &gradient).dot(&gradient);
    // rounding can push an exactly-zero quadratic form marginally
    // negative; only a genuinely negative form is a caller error
    let scale = covariance.amax() * gradient.norm_squared();
    if variance < -1e3 * f64::EPSILON * scale.max(f64::MIN_POSITIVE) {
        return Err(SlabError::invalid_parameter(
            "covariance",
            variance,
            "must be positive semi-definite",
        ));
    }

    Ok(UncertainValue {
        value,
        std_dev: variance.max(0.0).sqrt(),
    })
}

/// Shear-wave speed with propagated uncertainty.
pub fn shear_wave_speed_uncertain(
    shear_modulus: UncertainValue,
    density: UncertainValue,
) -> Result<UncertainValue, SlabError> {
    propagate(|x| wave_speed::shear_wave_speed(x[0], x[1]), &[shear_modulus, density])
}

/// Longitudinal wave speed with propagated uncertainty.
pub fn long_wave_speed_uncertain(
    e_modulus: UncertainValue,
    density: UncertainValue,
) -> Result<UncertainValue, SlabError> {
    propagate(|x| wave_speed::long_wave_speed(x[0], x[1]), &[e_modulus, density])
}

/// Rayleigh wave speed with propagated uncertainty.
pub fn rayleigh_wave_speed_uncertain(
    e_modulus: UncertainValue,
    shear_modulus: UncertainValue,
    density: UncertainValue,
    poisson_ratio: UncertainValue,
) -> Result<UncertainValue, SlabError> {
    propagate(
        |x| wave_speed::rayleigh_wave_speed(x[0], x[1], x[2], x[3]),
        &[e_modulus, shear_modulus, density, poisson_ratio],
    )
}

/// Anticrack propagation speed with propagated uncertainty.
///
/// The underlying solve runs once per nominal evaluation and twice per
/// uncertain input (central differences); the initial guess is shared
/// across all evaluations so every solve converges to the same branch.
#[allow(clippy::too_many_arguments)]
pub fn anticrack_propagation_speed_uncertain(
    gravity: UncertainValue,
    e_modulus: UncertainValue,
    poisson_ratio: UncertainValue,
    thickness: UncertainValue,
    collapse_height: UncertainValue,
    density: UncertainValue,
    slope_angle_deg: UncertainValue,
    touchdown_distance: UncertainValue,
    initial_guess: f64,
) -> Result<UncertainValue, SlabError> {
    propagate(
        |x| {
            let params = SlabParameters {
                gravity: x[0],
                e_modulus: x[1],
                poisson_ratio: x[2],
                thickness: x[3],
                collapse_height: x[4],
                density: x[5],
                slope_angle_deg: x[6],
                touchdown_distance: x[7],
            };
            anticrack::AnticrackSolver::default()
                .solve(&params, initial_guess)
                .map(|solution| solution.speed_ms)
        },
        &[
            gravity,
            e_modulus,
            poisson_ratio,
            thickness,
            collapse_height,
            density,
            slope_angle_deg,
            touchdown_distance,
        ],
    )
}
