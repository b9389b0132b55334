//! A scalar with an attached symmetric standard deviation.

use std::ops::{Add, Div, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

use crate::validation::{require_finite, require_non_negative, SlabError};

/// A (nominal, standard deviation) pair under first-order Gaussian
/// error propagation with independent operands.
///
/// Arithmetic combines standard deviations in quadrature. Operations
/// are total: dividing by an exact zero produces non-finite components
/// the same way plain `f64` arithmetic does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertainValue {
    pub value: f64,
    pub std_dev: f64,
}

impl UncertainValue {
    pub fn new(value: f64, std_dev: f64) -> Result<Self, SlabError> {
        require_finite("value", value)?;
        require_non_negative("std_dev", std_dev)?;
        Ok(Self { value, std_dev })
    }

    /// A value with zero uncertainty.
    pub fn exact(value: f64) -> Self {
        Self { value, std_dev: 0.0 }
    }

    /// First-order uncertainty of self^exponent:
    /// σ = |n·x^(n-1)|·σ_x.
    pub fn powf(self, exponent: f64) -> Self {
        let value = self.value.powf(exponent);
        let derivative = exponent * self.value.powf(exponent - 1.0);
        Self {
            value,
            std_dev: (derivative * self.std_dev).abs(),
        }
    }

    pub fn powi(self, exponent: i32) -> Self {
        self.powf(exponent as f64)
    }
}

impl Add for UncertainValue {
    type Output = UncertainValue;
    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            std_dev: self.std_dev.hypot(rhs.std_dev),
        }
    }
}

impl Sub for UncertainValue {
    type Output = UncertainValue;
    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
            std_dev: self.std_dev.hypot(rhs.std_dev),
        }
    }
}

impl Mul for UncertainValue {
    type Output = UncertainValue;
    fn mul(self, rhs: Self) -> Self {
        Self {
            value: self.value * rhs.value,
            std_dev: (rhs.value * self.std_dev).hypot(self.value * rhs.std_dev),
        }
    }
}

impl Div for UncertainValue {
    type Output = UncertainValue;
    fn div(self, rhs: Self) -> Self {
        let value = self.value / rhs.value;
        let d_num = self.std_dev / rhs.value;
        let d_den = self.value * rhs.std_dev / (rhs.value * rhs.value);
        Self {
            value,
            std_dev: d_num.hypot(d_den),
        }
    }
}

impl Neg for UncertainValue {
    type Output = UncertainValue;
    fn neg(self) -> Self {
        Self {
            value: -self.value,
            std_dev: self.std_dev,
        }
    }
}
