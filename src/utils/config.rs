//! Solver configuration, loadable from JSON.

use serde::{Serialize, Deserialize};
use std::fs;
use std::path::Path;

use crate::algorithms::anticrack::{AnticrackSolver, DEFAULT_INITIAL_GUESS};
use crate::validation::{require_open_interval, require_positive, SlabError};

/// Tuning knobs of the anticrack root finder, with serde defaults so a
/// partial JSON document overrides only what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Iteration cap of the root finder
    pub max_iterations: usize,
    /// Absolute residual magnitude accepted as a root
    pub residual_tolerance: f64,
    /// Step size below which the search counts as stagnated
    pub step_tolerance: f64,
    /// Perturbation-retry budget for singular evaluations
    pub max_domain_retries: usize,
    /// Seed for the dimensionless speed, in (0, 1)
    pub initial_guess: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let solver = AnticrackSolver::default();
        Self {
            max_iterations: solver.max_iterations,
            residual_tolerance: solver.residual_tolerance,
            step_tolerance: solver.step_tolerance,
            max_domain_retries: solver.max_domain_retries,
            initial_guess: DEFAULT_INITIAL_GUESS,
        }
    }
}

impl SolverConfig {
    /// Parse from a JSON document, then validate.
    pub fn from_json_str(json: &str) -> Result<Self, SlabError> {
        let config: SolverConfig = serde_json::from_str(json).map_err(|e| {
            SlabError::InvalidParameter {
                parameter: "solver_config".to_string(),
                value: f64::NAN,
                constraint: format!("JSON parse failure: {}", e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SlabError> {
        let contents = fs::read_to_string(path).map_err(|e| SlabError::InvalidParameter {
            parameter: "solver_config".to_string(),
            value: f64::NAN,
            constraint: format!("config file read failure: {}", e),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, SlabError> {
        serde_json::to_string_pretty(self).map_err(|e| SlabError::InvalidParameter {
            parameter: "solver_config".to_string(),
            value: f64::NAN,
            constraint: format!("JSON serialization failure: {}", e),
        })
    }

    pub fn validate(&self) -> Result<(), SlabError> {
        if self.max_iterations == 0 {
            return Err(SlabError::invalid_parameter(
                "max_iterations",
                0.0,
                "must be >= 1",
            ));
        }
        require_positive("residual_tolerance", self.residual_tolerance)?;
        require_positive("step_tolerance", self.step_tolerance)?;
        require_open_interval("initial_guess", self.initial_guess, 0.0, 1.0)?;
        Ok(())
    }

    /// Build the solver this configuration describes.
    pub fn solver(&self) -> AnticrackSolver {
        AnticrackSolver {
            max_iterations: self.max_iterations,
            residual_tolerance: self.residual_tolerance,
            step_tolerance: self.step_tolerance,
            max_domain_retries: self.max_domain_retries,
        }
    }
}
