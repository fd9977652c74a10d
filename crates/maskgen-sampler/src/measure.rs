use std::fmt;

use maskgen_core::{Configuration, Engine, ErrorInfo, MaskError};
use maskgen_lattice::{IsingEngine, PercolationEngine};
use serde::{Deserialize, Serialize};

use crate::config::{MeasureConfig, ModelKind};

/// Running mean and standard error of a scalar observable.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    name: String,
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl Accumulator {
    /// Creates an empty accumulator.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Records one measurement.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Number of recorded measurements.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sample mean, `0` when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Unbiased sample variance, `0` with fewer than two measurements.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        ((self.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0)
    }

    /// Standard error of the mean, ignoring autocorrelation.
    pub fn error(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.variance() / self.count as f64).sqrt()
    }

    /// Serializable summary.
    pub fn summary(&self) -> ObservableSummary {
        ObservableSummary {
            name: self.name.clone(),
            count: self.count,
            mean: self.mean(),
            error: self.error(),
        }
    }
}

/// Frozen statistics of one observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservableSummary {
    /// Observable label.
    pub name: String,
    /// Number of measurements.
    pub count: u64,
    /// Sample mean.
    pub mean: f64,
    /// Standard error of the mean.
    pub error: f64,
}

impl fmt::Display for ObservableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} +- {}", self.name, self.mean, self.error)
    }
}

/// Result of an Ising measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsingReport {
    /// Engine seed.
    pub seed: u64,
    /// Linear lattice size.
    pub size: u32,
    /// Inverse temperature used.
    pub beta: f64,
    /// Burn-in sweeps.
    pub thermalization: usize,
    /// Measured sweeps.
    pub sweeps: usize,
    /// Energy per site.
    pub energy: ObservableSummary,
    /// Magnetization per site.
    pub magnetization: ObservableSummary,
    /// Squared magnetization per site.
    pub magnetization2: ObservableSummary,
    /// Configuration after the last sweep.
    pub final_configuration: Configuration,
}

/// Result of a percolation measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercolationReport {
    /// Engine seed.
    pub seed: u64,
    /// Linear lattice size.
    pub size: u32,
    /// Bond probability used.
    pub prob: f64,
    /// Number of draws.
    pub sweeps: usize,
    /// Number of clusters per draw.
    pub clusters: ObservableSummary,
    /// Largest cluster size over the number of sites.
    pub largest_density: ObservableSummary,
    /// Largest-cluster mask of the last draw.
    pub final_configuration: Configuration,
}

/// Report of either measurement run. Serializes as the inner report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasureReport {
    /// Ising run.
    Ising(IsingReport),
    /// Percolation run.
    Percolation(PercolationReport),
}

impl MeasureReport {
    /// Configuration after the last sweep of the run.
    pub fn final_configuration(&self) -> &Configuration {
        match self {
            MeasureReport::Ising(report) => &report.final_configuration,
            MeasureReport::Percolation(report) => &report.final_configuration,
        }
    }
}

/// Runs the measurement selected by `config.model`.
pub fn measure(config: &MeasureConfig) -> Result<MeasureReport, MaskError> {
    match config.model {
        ModelKind::Ising => measure_ising(config).map(MeasureReport::Ising),
        ModelKind::Percolation => measure_percolation(config).map(MeasureReport::Percolation),
    }
}

fn require_model(config: &MeasureConfig, expected: ModelKind) -> Result<(), MaskError> {
    if config.model != expected {
        return Err(MaskError::Configuration(
            ErrorInfo::new("model-mismatch", "configuration targets a different model")
                .with_context("expected", expected.as_str())
                .with_context("model", config.model.as_str()),
        ));
    }
    Ok(())
}

/// Runs burn-in followed by `sweeps` measured Swendsen-Wang sweeps.
pub fn measure_ising(config: &MeasureConfig) -> Result<IsingReport, MaskError> {
    require_model(config, ModelKind::Ising)?;
    let size = config.linear_size()?;
    let sweeps = config.measured_sweeps()?;
    let thermalization = config.thermalization_sweeps();
    let mut engine = IsingEngine::construct(config.seed, size, config.model_parameter())?;

    let mut energy = Accumulator::new("Energy Density");
    let mut magnetization = Accumulator::new("Magnetization");
    let mut magnetization2 = Accumulator::new("Magnetization^2");

    for _ in 0..thermalization {
        engine.advance()?;
    }
    for _ in 0..sweeps {
        engine.advance()?;
        let observables = engine.observables();
        energy.push(observables.energy);
        magnetization.push(observables.magnetization);
        magnetization2.push(observables.magnetization * observables.magnetization);
    }

    let report = IsingReport {
        seed: config.seed,
        size: size.get(),
        beta: engine.beta(),
        thermalization,
        sweeps,
        energy: energy.summary(),
        magnetization: magnetization.summary(),
        magnetization2: magnetization2.summary(),
        final_configuration: engine.snapshot()?,
    };
    tracing::info!(
        seed = report.seed,
        size = report.size,
        beta = report.beta,
        energy = report.energy.mean,
        magnetization2 = report.magnetization2.mean,
        "ising measurement finished"
    );
    Ok(report)
}

/// Runs `sweeps` independent percolation draws.
pub fn measure_percolation(config: &MeasureConfig) -> Result<PercolationReport, MaskError> {
    require_model(config, ModelKind::Percolation)?;
    let size = config.linear_size()?;
    let sweeps = config.measured_sweeps()?;
    let mut engine = PercolationEngine::construct(config.seed, size, config.model_parameter())?;

    let mut clusters = Accumulator::new("Number of Clusters");
    let mut largest = Accumulator::new("Size of Largest Cluster");

    for _ in 0..sweeps {
        engine.advance()?;
        let observables = engine.observables();
        clusters.push(observables.clusters as f64);
        largest.push(observables.largest_density);
    }

    let report = PercolationReport {
        seed: config.seed,
        size: size.get(),
        prob: engine.prob(),
        sweeps,
        clusters: clusters.summary(),
        largest_density: largest.summary(),
        final_configuration: engine.snapshot()?,
    };
    tracing::info!(
        seed = report.seed,
        size = report.size,
        prob = report.prob,
        largest_density = report.largest_density.mean,
        "percolation measurement finished"
    );
    Ok(report)
}
