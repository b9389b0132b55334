//! Anticrack propagation-speed solver.
//!
//! Solves the Timoshenko-beam dispersion relation of the anticrack model
//! (Heierli, "Anticrack model for slab avalanche release", Eq. 5.17),
//! which links the dimensionless propagation speed C of the collapse
//! front to the touchdown length behind the crack tip:
//!
//! ```text
//! f(C) = (L²/C²)·[(η/(L·C·(1-C²)))·(1/sin(2CL/η) - 1/tan(2CL/η)) - 1] - 2H_f/Σ
//! ```
//!
//! The relation is transcendental and is solved with a local secant
//! search safeguarded by bisection once a sign change has been
//! bracketed. The root is not necessarily unique: seeds far from the
//! root found with the default guess may legitimately converge to a
//! different branch, matching the published method's use of a local
//! solver.

use crate::algorithms::wave_speed::shear_wave_speed;
use crate::core::constants::TIMOSHENKO_SHEAR_FACTOR;
use crate::core::types::{DimensionlessState, PropagationSolution, SlabParameters};
use crate::validation::{require_open_interval, SlabError};

/// Default seed for the dimensionless speed, as in the published method.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.5;

// The dispersion relation is undefined at C = 0 and C = 1; every
// evaluation is kept strictly inside this interval.
const SPEED_MIN: f64 = 1e-6;
const SPEED_MAX: f64 = 1.0 - 1e-6;

/// Offset applied when an evaluation lands on a trigonometric
/// singularity of the dispersion relation.
const DOMAIN_NUDGE: f64 = 1e-4;

/// Below this, sin(2CL/η) counts as singular.
const SINGULARITY_EPS: f64 = 1e-12;

/// Residual of the dispersion relation at dimensionless speed `c`.
///
/// Singular points (C at the interval endpoints, sin(2CL/η) ≈ 0) are
/// reported as [`SlabError::NumericalDomain`], never as NaN/∞.
pub fn dispersion_residual(state: &DimensionlessState, c: f64) -> Result<f64, SlabError> {
    if c <= 0.0 || c >= 1.0 {
        return Err(SlabError::numerical_domain("dimensionless speed outside (0, 1)", c));
    }

    let l = state.touchdown_length;
    let eta = state.shear_coefficient;
    let phase = 2.0 * c * l / eta;

    let sin_phase = phase.sin();
    if sin_phase.abs() < SINGULARITY_EPS {
        return Err(SlabError::numerical_domain("sin(2CL/eta)", phase));
    }
    // 1/tan is zero where tan diverges, so only the sine needs a guard
    let trig = 1.0 / sin_phase - 1.0 / phase.tan();

    let inner = (eta / (l * c * (1.0 - c * c))) * trig - 1.0;
    let residual = (l * l / (c * c)) * inner
        - 2.0 * state.collapse_amplitude / state.compressive_stress;

    if !residual.is_finite() {
        return Err(SlabError::numerical_domain("dispersion residual", c));
    }
    Ok(residual)
}

/// Root finder for the anticrack dispersion relation, with explicit
/// iteration and tolerance budgets.
///
/// The defaults reproduce the reference method (local solver seeded at
/// C₀ = 0.5) while refusing to return an unconverged result: exhausting
/// the iteration budget or stagnating above tolerance is a
/// [`SlabError::NonConvergence`], and repeated singular evaluations
/// escalate the same way after a bounded perturbation retry.
#[derive(Debug, Clone)]
pub struct AnticrackSolver {
    /// Maximum number of secant/bisection iterations
    pub max_iterations: usize,
    /// Absolute residual magnitude accepted as a root
    pub residual_tolerance: f64,
    /// Step size below which the search counts as stagnated
    pub step_tolerance: f64,
    /// Attempts to nudge an evaluation off a singularity before giving up
    pub max_domain_retries: usize,
}

impl Default for AnticrackSolver {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            residual_tolerance: 1e-8,
            step_tolerance: 1e-14,
            max_domain_retries: 4,
        }
    }
}

impl AnticrackSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve for the crack propagation speed of the slab described by
    /// `params`, seeding the search at `initial_guess` ∈ (0, 1).
    ///
    /// Returns the dimensional speed C*·c_s together with the root,
    /// the shear-wave speed and the solver diagnostics.
    pub fn solve(
        &self,
        params: &SlabParameters,
        initial_guess: f64,
    ) -> Result<PropagationSolution, SlabError> {
        params.validate()?;
        require_open_interval("initial_guess", initial_guess, 0.0, 1.0)?;

        let state = params.dimensionless();
        let shear_speed = shear_wave_speed(
            TIMOSHENKO_SHEAR_FACTOR * params.shear_modulus(),
            params.density,
        )?;

        let (root, iterations, residual) = self.find_root(&state, initial_guess)?;

        Ok(PropagationSolution {
            speed_ms: root * shear_speed,
            dimensionless_speed: root,
            shear_wave_speed_ms: shear_speed,
            iterations,
            residual,
        })
    }

    /// Secant search with bisection safeguard on the interval (0, 1).
    fn find_root(
        &self,
        state: &DimensionlessState,
        seed: f64,
    ) -> Result<(f64, usize, f64), SlabError> {
        let (mut a, mut fa) = self
            .evaluate_perturbed(state, seed)
            .map_err(|e| self.escalate(e, 0, f64::NAN, seed))?;
        if fa.abs() <= self.residual_tolerance {
            return Ok((a, 0, fa));
        }

        let second = if seed + DOMAIN_NUDGE < SPEED_MAX {
            seed + DOMAIN_NUDGE
        } else {
            seed - DOMAIN_NUDGE
        };
        let (mut b, mut fb) = self
            .evaluate_perturbed(state, second)
            .map_err(|e| self.escalate(e, 0, fa, second))?;

        // Most recent points on each side of zero; once both exist the
        // root is bracketed between them.
        let mut negative: Option<(f64, f64)> = None;
        let mut positive: Option<(f64, f64)> = None;
        remember(&mut negative, &mut positive, a, fa);
        remember(&mut negative, &mut positive, b, fb);

        for iteration in 1..=self.max_iterations {
            if fb.abs() <= self.residual_tolerance {
                return Ok((b, iteration, fb));
            }

            let denom = fb - fa;
            let secant = if denom != 0.0 && denom.is_finite() {
                b - fb * (b - a) / denom
            } else {
                f64::NAN
            };

            let next = match (negative, positive) {
                (Some((n, _)), Some((p, _))) => {
                    let lo = n.min(p);
                    let hi = n.max(p);
                    if secant.is_finite() && secant > lo && secant < hi {
                        secant
                    } else {
                        // secant left the bracket; bisect it instead
                        0.5 * (lo + hi)
                    }
                }
                _ => {
                    if !secant.is_finite() {
                        return Err(SlabError::NonConvergence {
                            iterations: iteration,
                            residual: fb,
                            last_estimate: b,
                        });
                    }
                    secant.clamp(SPEED_MIN, SPEED_MAX)
                }
            };

            if (next - b).abs() < self.step_tolerance {
                // stagnated above tolerance
                return Err(SlabError::NonConvergence {
                    iterations: iteration,
                    residual: fb,
                    last_estimate: b,
                });
            }

            let (c_next, f_next) = self
                .evaluate_perturbed(state, next)
                .map_err(|e| self.escalate(e, iteration, fb, next))?;
            remember(&mut negative, &mut positive, c_next, f_next);

            a = b;
            fa = fb;
            b = c_next;
            fb = f_next;
        }

        Err(SlabError::NonConvergence {
            iterations: self.max_iterations,
            residual: fb,
            last_estimate: b,
        })
    }

    /// Evaluate the residual at `c`, nudging away from singular points
    /// with alternating offsets of growing size, at most
    /// `max_domain_retries` times.
    fn evaluate_perturbed(
        &self,
        state: &DimensionlessState,
        c: f64,
    ) -> Result<(f64, f64), SlabError> {
        let mut last_err = None;
        for attempt in 0..=self.max_domain_retries {
            let offset = if attempt == 0 {
                0.0
            } else {
                let magnitude = ((attempt + 1) / 2) as f64 * DOMAIN_NUDGE;
                if attempt % 2 == 1 { magnitude } else { -magnitude }
            };
            let candidate = (c + offset).clamp(SPEED_MIN, SPEED_MAX);
            match dispersion_residual(state, candidate) {
                Ok(residual) => return Ok((candidate, residual)),
                Err(err @ SlabError::NumericalDomain { .. }) => last_err = Some(err),
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or_else(|| SlabError::numerical_domain("dispersion residual", c)))
    }

    /// A singularity that survives the perturbation retries counts as a
    /// convergence failure; parameter errors pass through unchanged.
    fn escalate(&self, err: SlabError, iterations: usize, residual: f64, estimate: f64) -> SlabError {
        match err {
            SlabError::NumericalDomain { .. } => SlabError::NonConvergence {
                iterations,
                residual,
                last_estimate: estimate,
            },
            other => other,
        }
    }
}

/// Track the most recent residual sample on each side of zero,
/// tightening the implied bracket whenever possible.
fn remember(
    negative: &mut Option<(f64, f64)>,
    positive: &mut Option<(f64, f64)>,
    c: f64,
    f: f64,
) {
    let (slot, opposite) = if f < 0.0 {
        (negative, *positive)
    } else {
        (positive, *negative)
    };
    match (*slot, opposite) {
        (Some((current, _)), Some((other, _))) => {
            if (c - other).abs() < (current - other).abs() {
                *slot = Some((c, f));
            }
        }
        _ => *slot = Some((c, f)),
    }
}

/// Crack propagation speed (m/s) of a weak-layer anticrack, mirroring
/// the published parameter list. Angles in degrees, everything else SI.
///
/// Convenience wrapper over [`AnticrackSolver`] with default budgets;
/// use the solver type directly to tune tolerances or inspect the
/// diagnostics.
#[allow(clippy::too_many_arguments)]
pub fn anticrack_propagation_speed(
    gravity: f64,
    e_modulus: f64,
    poisson_ratio: f64,
    thickness: f64,
    collapse_height: f64,
    density: f64,
    slope_angle_deg: f64,
    touchdown_distance: f64,
    initial_guess: f64,
) -> Result<f64, SlabError> {
    let params = SlabParameters {
        gravity,
        e_modulus,
        poisson_ratio,
        thickness,
        collapse_height,
        density,
        slope_angle_deg,
        touchdown_distance,
    };
    let solution = AnticrackSolver::default().solve(&params, initial_guess)?;
    Ok(solution.speed_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_slab() -> SlabParameters {
        SlabParameters {
            gravity: 9.81,
            e_modulus: 1.0e6,
            poisson_ratio: 0.2,
            thickness: 0.3,
            collapse_height: 0.02,
            density: 200.0,
            slope_angle_deg: 38.0,
            touchdown_distance: 1.0,
        }
    }

    #[test]
    fn test_reference_scenario_converges() {
        let solver = AnticrackSolver::default();
        let solution = solver.solve(&reference_slab(), 0.5).unwrap();

        assert!(solution.residual.abs() < 1e-6);
        assert!(solution.dimensionless_speed > 0.0 && solution.dimensionless_speed < 1.0);
        assert!(solution.speed_ms > 0.0);
        assert!(solution.speed_ms < solution.shear_wave_speed_ms);
        assert!(solution.iterations <= solver.max_iterations);
    }

    #[test]
    fn test_speed_is_fraction_of_shear_wave_speed() {
        let params = reference_slab();
        let k = TIMOSHENKO_SHEAR_FACTOR;
        let expected_cs = (k * params.shear_modulus() / params.density).sqrt();

        let solution = AnticrackSolver::default().solve(&params, 0.5).unwrap();
        assert!((solution.shear_wave_speed_ms - expected_cs).abs() < 1e-9);
        assert!(
            (solution.speed_ms - solution.dimensionless_speed * expected_cs).abs() < 1e-9
        );
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let solver = AnticrackSolver::default();
        let first = solver.solve(&reference_slab(), 0.5).unwrap();
        let second = solver.solve(&reference_slab(), 0.5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nearby_seeds_reach_the_same_root() {
        let solver = AnticrackSolver::default();
        let base = solver.solve(&reference_slab(), 0.3).unwrap();
        for seed in [0.28, 0.29, 0.31, 0.32] {
            let other = solver.solve(&reference_slab(), seed).unwrap();
            assert!(
                (other.dimensionless_speed - base.dimensionless_speed).abs() < 1e-6,
                "seed {} diverged: {} vs {}",
                seed,
                other.dimensionless_speed,
                base.dimensionless_speed
            );
        }
    }

    #[test]
    fn test_boundary_seeds_rejected() {
        let solver = AnticrackSolver::default();
        for seed in [0.0, 1.0, -0.5, 1.5] {
            let err = solver.solve(&reference_slab(), seed).unwrap_err();
            assert!(matches!(err, SlabError::InvalidParameter { .. }), "seed {}", seed);
        }
    }

    #[test]
    fn test_invalid_slab_rejected_before_solving() {
        let solver = AnticrackSolver::default();

        let mut p = reference_slab();
        p.poisson_ratio = 0.5;
        assert!(matches!(
            solver.solve(&p, 0.5),
            Err(SlabError::InvalidParameter { .. })
        ));

        let mut p = reference_slab();
        p.density = 0.0;
        assert!(matches!(
            solver.solve(&p, 0.5),
            Err(SlabError::InvalidParameter { .. })
        ));

        let mut p = reference_slab();
        p.thickness = 0.0;
        assert!(matches!(
            solver.solve(&p, 0.5),
            Err(SlabError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_iteration_budget_is_hard() {
        // One iteration cannot solve the transcendental relation from a
        // cold seed; the solver must refuse rather than return the
        // unconverged estimate.
        let solver = AnticrackSolver {
            max_iterations: 1,
            ..AnticrackSolver::default()
        };
        let err = solver.solve(&reference_slab(), 0.5).unwrap_err();
        match err {
            SlabError::NonConvergence { iterations, residual, .. } => {
                assert_eq!(iterations, 1);
                assert!(residual.abs() > 1e-8);
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
    }

    #[test]
    fn test_residual_rejects_interval_endpoints() {
        let state = reference_slab().dimensionless();
        assert!(matches!(
            dispersion_residual(&state, 0.0),
            Err(SlabError::NumericalDomain { .. })
        ));
        assert!(matches!(
            dispersion_residual(&state, 1.0),
            Err(SlabError::NumericalDomain { .. })
        ));
    }

    #[test]
    fn test_residual_rejects_trigonometric_singularity() {
        // sin(2CL/η) = 0 at C = πη/(2L)·n; build the n = 2 point exactly.
        let state = reference_slab().dimensionless();
        let singular = std::f64::consts::PI * state.shear_coefficient
            / (2.0 * state.touchdown_length)
            * 2.0;
        assert!(singular > 0.0 && singular < 1.0);
        // The floating-point sine at the constructed point is not exactly
        // zero, but the residual must still be finite or a domain error;
        // probe the guard with a point where sin underflows completely.
        let res = dispersion_residual(&state, singular);
        match res {
            Ok(value) => assert!(value.is_finite()),
            Err(SlabError::NumericalDomain { .. }) => {}
            Err(other) => panic!("unexpected error kind: {:?}", other),
        }
    }

    #[test]
    fn test_convenience_wrapper_matches_solver() {
        let p = reference_slab();
        let via_wrapper = anticrack_propagation_speed(
            p.gravity,
            p.e_modulus,
            p.poisson_ratio,
            p.thickness,
            p.collapse_height,
            p.density,
            p.slope_angle_deg,
            p.touchdown_distance,
            DEFAULT_INITIAL_GUESS,
        )
        .unwrap();
        let via_solver = AnticrackSolver::default().solve(&p, 0.5).unwrap();
        assert_eq!(via_wrapper, via_solver.speed_ms);
    }

    #[test]
    fn test_residual_at_root_is_small() {
        let solver = AnticrackSolver::default();
        let solution = solver.solve(&reference_slab(), 0.5).unwrap();
        let state = reference_slab().dimensionless();
        let check = dispersion_residual(&state, solution.dimensionless_speed).unwrap();
        assert!(check.abs() < 1e-6);
        assert!((check - solution.residual).abs() < 1e-12);
    }

    #[test]
    fn test_speed_grows_with_collapse_height_on_same_branch() {
        // A deeper collapse drives the front harder: seeding each solve
        // near the low-speed root, C* must grow with h_f.
        let solver = AnticrackSolver::default();
        let mut previous = 0.0;
        for collapse_height in [0.02, 0.03, 0.04] {
            let mut p = reference_slab();
            p.collapse_height = collapse_height;
            let solution = solver.solve(&p, 0.3).unwrap();
            assert!(solution.dimensionless_speed > previous);
            assert!(solution.speed_ms < solution.shear_wave_speed_ms);
            previous = solution.dimensionless_speed;
        }
    }

    #[test]
    fn test_flat_slope_still_solves() {
        // θ = 0 removes the shear stress but not the normal load.
        let mut p = reference_slab();
        p.slope_angle_deg = 0.0;
        let solution = AnticrackSolver::default().solve(&p, 0.5).unwrap();
        assert!(solution.speed_ms > 0.0);
        assert!(solution.speed_ms < solution.shear_wave_speed_ms);
    }
}
