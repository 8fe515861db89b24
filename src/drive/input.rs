// Input conditioning: range clipping and sign-preserving squaring

use crate::config::{DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN};

/// Errors raised when configuring the drivetrain
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DriveError {
    #[error("Invalid input range [{min}, {max}]: bounds must be finite with min <= max")]
    InvalidRange { min: f64, max: f64 },

    #[error("Invalid max speed {0}: must be finite and non-negative")]
    InvalidMaxSpeed(f64),
}

pub type Result<T> = std::result::Result<T, DriveError>;

/// Closed interval that drive inputs are saturated into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRange {
    min: f64,
    max: f64,
}

impl InputRange {
    /// Build a range, rejecting non-finite bounds and `min > max`
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(DriveError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Saturate `value` into the range
    pub fn clip(&self, value: f64) -> f64 {
        if value <= self.min {
            self.min
        } else if value >= self.max {
            self.max
        } else {
            value
        }
    }

    /// Square then clip when `square_inputs` is set, otherwise clip only
    pub fn condition(&self, value: f64, square_inputs: bool) -> f64 {
        if square_inputs {
            self.clip(square_input(value))
        } else {
            self.clip(value)
        }
    }
}

impl Default for InputRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_RANGE_MIN,
            max: DEFAULT_RANGE_MAX,
        }
    }
}

/// `sign(x) * x^2`: softer response near zero, same sign and full-scale endpoints
pub fn square_input(value: f64) -> f64 {
    value * value.abs()
}
