use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, MaskError};

/// Value accepted by legacy interfaces to request the engine default.
pub const DEFAULT_SENTINEL: f64 = -1.0;

/// Largest linear size whose site count fits in 32-bit site indices.
pub const MAX_LINEAR_SIZE: u32 = 65_535;

/// Linear extent `L` of an `L x L` lattice. Always positive, at most
/// [`MAX_LINEAR_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct LinearSize(u32);

impl LinearSize {
    /// Validates a linear size, rejecting zero and sizes whose `L * L` sites
    /// cannot be indexed with `u32`.
    pub fn new(length: u32) -> Result<Self, MaskError> {
        if length == 0 {
            return Err(non_positive_size(0));
        }
        if length > MAX_LINEAR_SIZE {
            return Err(size_overflow(i64::from(length)));
        }
        Ok(Self(length))
    }

    /// Returns the linear extent.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of sites on the square lattice.
    pub fn num_sites(self) -> usize {
        let length = self.0 as usize;
        length * length
    }
}

impl TryFrom<i64> for LinearSize {
    type Error = MaskError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw <= 0 {
            return Err(non_positive_size(raw));
        }
        let length = u32::try_from(raw).map_err(|_| size_overflow(raw))?;
        Self::new(length)
    }
}

impl From<LinearSize> for i64 {
    fn from(size: LinearSize) -> Self {
        i64::from(size.0)
    }
}

impl fmt::Display for LinearSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn non_positive_size(raw: i64) -> MaskError {
    MaskError::Configuration(
        ErrorInfo::new("non-positive-size", "linear size must be positive")
            .with_context("size", raw.to_string()),
    )
}

fn size_overflow(raw: i64) -> MaskError {
    MaskError::Configuration(
        ErrorInfo::new(
            "size-overflow",
            "linear size exceeds the largest indexable lattice",
        )
        .with_context("size", raw.to_string())
        .with_context("max", MAX_LINEAR_SIZE.to_string()),
    )
}

/// Validates a signed sample count coming from an untyped boundary.
pub fn checked_sample_count(raw: i64) -> Result<usize, MaskError> {
    usize::try_from(raw).map_err(|_| {
        MaskError::Configuration(
            ErrorInfo::new("negative-sample-count", "sample count must be non-negative")
                .with_context("samples", raw.to_string()),
        )
    })
}

/// Model parameter handed to an engine at construction time.
///
/// `Default` asks the engine for its built-in value (the critical point for
/// both shipped models). Explicit values are validated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelParameter {
    /// Use the engine's built-in default.
    #[default]
    Default,
    /// Caller supplied value (inverse temperature or occupation probability).
    Value(f64),
}

impl ModelParameter {
    /// Converts the legacy numeric convention: any negative value means default.
    pub fn from_sentinel(raw: f64) -> Self {
        if raw < 0.0 {
            ModelParameter::Default
        } else {
            ModelParameter::Value(raw)
        }
    }

    /// Resolves the parameter against an engine default.
    pub fn resolve(self, default: f64) -> f64 {
        match self {
            ModelParameter::Default => default,
            ModelParameter::Value(value) => value,
        }
    }

    /// Numeric form used by legacy interfaces.
    pub fn as_sentinel(self) -> f64 {
        self.resolve(DEFAULT_SENTINEL)
    }
}

impl From<Option<f64>> for ModelParameter {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ModelParameter::Default, ModelParameter::Value)
    }
}

impl fmt::Display for ModelParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelParameter::Default => write!(f, "default"),
            ModelParameter::Value(value) => write!(f, "{value}"),
        }
    }
}
