//! Grid configuration and derived geometry
//!
//! Collocation points and the low-pass mask are pure functions of the
//! [`GridConfig`]; they are computed once when an engine is built.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::error::ChebError;

/// Smallest grid the derivative recurrence can run on
pub const MIN_POINTS: usize = 3;

/// Below this size the derivative loses most of its accuracy
pub const MIN_ACCURATE_POINTS: usize = 5;

/// Low-pass mask strength: mask[i] = exp(-ALPHA * (i/n)^ORDER)
const LOW_PASS_ALPHA: f64 = 40.0;
const LOW_PASS_ORDER: i32 = 10;

/// Grid size and interval bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of collocation points
    pub n: usize,
    /// Lower boundary of the interval
    pub lower: f64,
    /// Upper boundary of the interval
    pub upper: f64,
}

impl GridConfig {
    /// Build a validated configuration
    pub fn new(n: usize, lower: f64, upper: f64) -> Result<Self, ChebError> {
        let config = Self { n, lower, upper };
        config.validate()?;
        Ok(config)
    }

    /// Check n >= 3 and finite lower < upper
    ///
    /// The width and the midpoint must be representable too, otherwise the
    /// jacobian overflows and the points collapse to infinities.
    pub fn validate(&self) -> Result<(), ChebError> {
        if self.n < MIN_POINTS {
            return Err(ChebError::InvalidGridSize { n: self.n });
        }
        // NaN fails the comparison as well
        let ordered = self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper;
        if !(ordered && (self.upper - self.lower).is_finite() && (self.upper + self.lower).is_finite()) {
            return Err(ChebError::InvalidInterval {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }

    /// Scale factor from [-1, 1] to [lower, upper]
    pub fn jacobian(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }

    /// Center of the interval
    pub fn midpoint(&self) -> f64 {
        (self.upper + self.lower) / 2.0
    }

    /// Map a physical point to the canonical domain [-1, 1]
    pub fn to_canonical(&self, x: f64) -> f64 {
        (x - self.midpoint()) / self.jacobian()
    }
}

/// Chebyshev-Gauss-Lobatto points over [lower, upper]
///
/// Ordered from `upper` (i = 0) down to `lower` (i = n-1).
pub fn collocation_points(config: &GridConfig) -> Array1<f64> {
    let n = config.n;
    let jacobian = config.jacobian();
    let mid = config.midpoint();
    let mut pts = Array1::from_shape_fn(n, |i| {
        jacobian * (PI * i as f64 / (n - 1) as f64).cos() + mid
    });
    // jacobian * cos + mid can miss the bounds by an ulp
    pts[0] = config.upper;
    pts[n - 1] = config.lower;
    pts
}

/// Exponential low-pass weights in Chebyshev space
pub fn low_pass_mask(n: usize) -> Array1<f64> {
    Array1::from_shape_fn(n, |i| {
        (-LOW_PASS_ALPHA * (i as f64 / n as f64).powi(LOW_PASS_ORDER)).exp()
    })
}
