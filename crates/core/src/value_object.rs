//! Value objects: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values and are immutable once built.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A validated, strictly positive, finite amount.
///
/// Quantities are compared and summed exactly as given; no rounding or unit
/// normalization happens here, so callers keep their units consistent.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Quantity(f64);

impl Quantity {
    /// Validate `value` as a quantity.
    ///
    /// Zero, negative, NaN and infinite values are rejected with
    /// [`DomainError::InvalidArgument`].
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::invalid_argument("quantity must be a finite number"));
        }
        if value <= 0.0 {
            return Err(DomainError::invalid_argument("quantity must be positive"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl TryFrom<f64> for Quantity {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Quantity::new(raw).map_err(serde::de::Error::custom)
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
