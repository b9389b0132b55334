use std::fmt;
use serde::{Serialize, Deserialize};

/// Error classification for the slab-mechanics computations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlabError {
    /// An input violates its physical domain. Raised before any
    /// computation touches the value.
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// A formula was evaluated at a point where it is mathematically
    /// undefined (trigonometric singularity, division by zero).
    NumericalDomain {
        context: String,
        argument: f64,
    },

    /// The root finder exhausted its iteration budget, or stagnated,
    /// without bringing the residual below tolerance. Callers may retry
    /// with a different initial guess.
    NonConvergence {
        iterations: usize,
        residual: f64,
        last_estimate: f64,
    },
}

impl SlabError {
    pub fn invalid_parameter(parameter: &str, value: f64, constraint: &str) -> Self {
        SlabError::InvalidParameter {
            parameter: parameter.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }

    pub fn numerical_domain(context: &str, argument: f64) -> Self {
        SlabError::NumericalDomain {
            context: context.to_string(),
            argument,
        }
    }
}

impl fmt::Display for SlabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlabError::InvalidParameter { parameter, value, constraint } => {
                write!(f, "invalid parameter {}: {} (constraint: {})", parameter, value, constraint)
            }
            SlabError::NumericalDomain { context, argument } => {
                write!(f, "numerical domain error in {} at {}", context, argument)
            }
            SlabError::NonConvergence { iterations, residual, last_estimate } => {
                write!(
                    f,
                    "no convergence after {} iterations (residual {:e}, last estimate {})",
                    iterations, residual, last_estimate
                )
            }
        }
    }
}

impl std::error::Error for SlabError {}
