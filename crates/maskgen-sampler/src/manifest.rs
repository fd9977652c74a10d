use std::fs;
use std::path::Path;

use maskgen_core::errors::ErrorInfo;
use maskgen_core::{Configuration, LinearSize, MaskError, ModelParameter};
use serde::{Deserialize, Serialize};

use crate::config::ModelKind;
use crate::sampler::SweepSchedule;

/// Record of an emitted sample stream, sufficient to verify a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleManifest {
    /// Model sampled.
    pub model: ModelKind,
    /// Engine seed.
    pub seed: u64,
    /// Linear lattice size.
    pub size: LinearSize,
    /// Model parameter as requested.
    pub parameter: ModelParameter,
    /// Sweep schedule in force.
    pub schedule: SweepSchedule,
    /// SHA-256 digest of every emitted configuration, in order.
    pub digests: Vec<String>,
}

impl SampleManifest {
    /// Starts an empty manifest.
    pub fn new(
        model: ModelKind,
        seed: u64,
        size: LinearSize,
        parameter: ModelParameter,
        schedule: SweepSchedule,
    ) -> Self {
        Self {
            model,
            seed,
            size,
            parameter,
            schedule,
            digests: Vec::new(),
        }
    }

    /// Appends the digest of an emitted configuration.
    pub fn record(&mut self, configuration: &Configuration) {
        self.digests.push(configuration.digest());
    }

    /// Number of recorded samples.
    pub fn samples(&self) -> usize {
        self.digests.len()
    }

    /// Total sweeps behind the recorded samples.
    pub fn total_sweeps(&self) -> usize {
        self.schedule.total_sweeps(self.samples())
    }

    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), MaskError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                MaskError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            MaskError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            MaskError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, MaskError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            MaskError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            MaskError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
