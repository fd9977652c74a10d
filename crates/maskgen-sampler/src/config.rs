use std::fs;
use std::path::Path;

use maskgen_core::errors::ErrorInfo;
use maskgen_core::{checked_sample_count, LinearSize, MaskError, ModelParameter};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::sampler::{SweepSchedule, DEFAULT_INTERVAL, DEFAULT_THERMALIZATION};

/// Lattice model selected by a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Swendsen-Wang Ising model, parameterised by `beta`.
    Ising,
    /// Bond percolation, parameterised by `prob`.
    Percolation,
}

impl ModelKind {
    /// Label matching the engine's model name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Ising => "ising",
            ModelKind::Percolation => "percolation",
        }
    }
}

/// YAML-configurable description of a sample stream.
///
/// Sizes and counts are kept signed so that malformed files are rejected with
/// a configuration error rather than a parse error. `parameter` follows the
/// legacy convention: absent or negative selects the engine default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Model to sample.
    pub model: ModelKind,
    /// Seed of the engine's random stream.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Linear lattice size `L`.
    #[serde(default = "default_size")]
    pub size: i64,
    /// Number of configurations to emit.
    pub samples: i64,
    /// Model parameter (`beta` or `prob`).
    #[serde(default)]
    pub parameter: Option<f64>,
    /// Burn-in sweeps (Ising only).
    #[serde(default = "default_thermalization")]
    pub thermalization: usize,
    /// Extra sweeps between samples (Ising only).
    #[serde(default = "default_interval")]
    pub interval: usize,
}

fn default_seed() -> u64 {
    29833
}

fn default_size() -> i64 {
    8
}

fn default_thermalization() -> usize {
    DEFAULT_THERMALIZATION
}

fn default_interval() -> usize {
    DEFAULT_INTERVAL
}

fn default_sweeps() -> usize {
    1 << 16
}

impl SamplerConfig {
    /// Creates a configuration with default seed, size and spacing.
    pub fn new(model: ModelKind, samples: i64) -> Self {
        Self {
            model,
            seed: default_seed(),
            size: default_size(),
            samples,
            parameter: None,
            thermalization: default_thermalization(),
            interval: default_interval(),
        }
    }

    /// Validated lattice size.
    pub fn linear_size(&self) -> Result<LinearSize, MaskError> {
        LinearSize::try_from(self.size)
    }

    /// Validated sample count.
    pub fn sample_count(&self) -> Result<usize, MaskError> {
        checked_sample_count(self.samples)
    }

    /// Model parameter with the sentinel convention applied.
    pub fn model_parameter(&self) -> ModelParameter {
        self.parameter
            .map_or(ModelParameter::Default, ModelParameter::from_sentinel)
    }

    /// Sweep schedule for the configured model.
    pub fn schedule(&self) -> SweepSchedule {
        match self.model {
            ModelKind::Ising => SweepSchedule::thermalized(self.thermalization, self.interval),
            ModelKind::Percolation => SweepSchedule::independent(),
        }
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, MaskError> {
        parse_yaml(text, "sampler-config-parse")
    }

    /// Loads a YAML file.
    pub fn load(path: &Path) -> Result<Self, MaskError> {
        load_yaml(path, "sampler-config")
    }
}

/// YAML-configurable description of a measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureConfig {
    /// Model to simulate.
    pub model: ModelKind,
    /// Seed of the engine's random stream.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Linear lattice size `L`.
    #[serde(default = "default_size")]
    pub size: i64,
    /// Model parameter (`beta` or `prob`), sentinel convention.
    #[serde(default)]
    pub parameter: Option<f64>,
    /// Measured sweeps.
    #[serde(default = "default_sweeps")]
    pub sweeps: usize,
    /// Burn-in sweeps; defaults to one eighth of `sweeps` (Ising only).
    #[serde(default)]
    pub thermalization: Option<usize>,
}

impl MeasureConfig {
    /// Creates a configuration with the default seed, size and sweep count.
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            seed: default_seed(),
            size: default_size(),
            parameter: None,
            sweeps: default_sweeps(),
            thermalization: None,
        }
    }

    /// Validated lattice size.
    pub fn linear_size(&self) -> Result<LinearSize, MaskError> {
        LinearSize::try_from(self.size)
    }

    /// Model parameter with the sentinel convention applied.
    pub fn model_parameter(&self) -> ModelParameter {
        self.parameter
            .map_or(ModelParameter::Default, ModelParameter::from_sentinel)
    }

    /// Validated number of measured sweeps.
    pub fn measured_sweeps(&self) -> Result<usize, MaskError> {
        if self.sweeps == 0 {
            return Err(MaskError::Configuration(
                ErrorInfo::new("zero-sweeps", "a measurement needs at least one sweep")
                    .with_context("model", self.model.as_str()),
            ));
        }
        Ok(self.sweeps)
    }

    /// Burn-in length, `sweeps / 8` unless set explicitly.
    pub fn thermalization_sweeps(&self) -> usize {
        self.thermalization.unwrap_or(self.sweeps >> 3)
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, MaskError> {
        parse_yaml(text, "measure-config-parse")
    }

    /// Loads a YAML file.
    pub fn load(path: &Path) -> Result<Self, MaskError> {
        load_yaml(path, "measure-config")
    }
}

fn parse_yaml<T: DeserializeOwned>(text: &str, code: &str) -> Result<T, MaskError> {
    serde_yaml::from_str(text).map_err(|err| MaskError::Serde(ErrorInfo::new(code, err.to_string())))
}

fn load_yaml<T: DeserializeOwned>(path: &Path, code: &str) -> Result<T, MaskError> {
    let text = fs::read_to_string(path).map_err(|err| {
        MaskError::Serde(
            ErrorInfo::new(format!("{code}-read"), err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    serde_yaml::from_str(&text).map_err(|err| {
        MaskError::Serde(
            ErrorInfo::new(format!("{code}-parse"), err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
