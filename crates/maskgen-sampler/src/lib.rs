#![deny(missing_docs)]

//! Thermalize/decorrelate sampling protocol over `maskgen-core` engines.
//!
//! [`ising_samples`] and [`percolation_samples`] return lazy iterators that
//! own a single engine each. Nothing runs until the first item is requested.

/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation for independent runs.
pub mod determinism;
/// Sample manifest serialization.
pub mod manifest;
/// Observable accumulation and measurement runs.
pub mod measure;
/// Sample streams and sweep schedules.
pub mod sampler;

pub use config::{MeasureConfig, ModelKind, SamplerConfig};
pub use manifest::SampleManifest;
pub use measure::{
    measure, measure_ising, measure_percolation, Accumulator, IsingReport, MeasureReport,
    ObservableSummary, PercolationReport,
};
pub use sampler::{
    ising_samples, percolation_samples, samples, IsingOptions, Samples, SweepSchedule,
    DEFAULT_INTERVAL, DEFAULT_THERMALIZATION,
};
