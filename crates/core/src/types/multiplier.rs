//! Sales multiplier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`SalesMultiplier`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SalesMultiplierError {
    /// The value is not a finite number.
    #[error("sales multiplier must be a finite number")]
    NotFinite,
    /// The value is outside the allowed range.
    #[error("sales multiplier must be between {min} and {max}")]
    OutOfRange {
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },
}

/// A bounded sales multiplier applied to simulated demand.
///
/// Scenarios scale their baseline sales projection by this factor. The
/// value is constrained at construction time, so a stored scenario can
/// never carry an out-of-range multiplier.
///
/// ## Constraints
///
/// - Must be a finite number (no NaN, no infinities)
/// - Range: 0.5 to 3.0 inclusive
///
/// ## Examples
///
/// ```
/// use planwise_core::SalesMultiplier;
///
/// // Boundary values are accepted
/// assert!(SalesMultiplier::new(0.5).is_ok());
/// assert!(SalesMultiplier::new(3.0).is_ok());
///
/// // Out-of-range values are rejected
/// assert!(SalesMultiplier::new(0.4).is_err());
/// assert!(SalesMultiplier::new(3.1).is_err());
/// assert!(SalesMultiplier::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "f64", into = "f64")]
pub struct SalesMultiplier(f64);

impl SalesMultiplier {
    /// Smallest accepted multiplier.
    pub const MIN: f64 = 0.5;

    /// Largest accepted multiplier.
    pub const MAX: f64 = 3.0;

    /// Construct a `SalesMultiplier` from a raw float.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is NaN or infinite
    /// - Is below 0.5 or above 3.0
    pub fn new(value: f64) -> Result<Self, SalesMultiplierError> {
        if !value.is_finite() {
            return Err(SalesMultiplierError::NotFinite);
        }

        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(SalesMultiplierError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            });
        }

        Ok(Self(value))
    }

    /// Returns the multiplier as a raw float.
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for SalesMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for SalesMultiplier {
    type Error = SalesMultiplierError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SalesMultiplier> for f64 {
    fn from(multiplier: SalesMultiplier) -> Self {
        multiplier.0
    }
}
