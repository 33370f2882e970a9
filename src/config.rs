//! Solver tuning knobs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default floor, in device units, below which a partition never shrinks.
pub const DEFAULT_MIN_LINE_SIZE: f32 = 5.0;

/// Default tolerance for comparing sizes and weights.
pub const DEFAULT_EPSILON: f32 = 0.01;

/// Configuration shared by every layout in a [`LayoutTree`](crate::LayoutTree).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Minimum size a partition keeps while absorbing a shrink.
    pub min_line_size: f32,
    /// Tolerance used by the fixed-point loops and weight checks.
    pub epsilon: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_line_size: DEFAULT_MIN_LINE_SIZE,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl LayoutConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the partition floor (builder). Negative values are treated as zero.
    pub fn with_min_line_size(mut self, min_line_size: f32) -> Self {
        self.min_line_size = min_line_size.max(0.0);
        self
    }

    /// Set the comparison tolerance (builder).
    ///
    /// The tolerance is kept strictly positive so the negotiation loops can
    /// always detect convergence.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = if epsilon.is_finite() && epsilon > 0.0 {
            epsilon
        } else {
            f32::EPSILON
        };
        self
    }
}
