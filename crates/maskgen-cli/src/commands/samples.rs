use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use maskgen_core::{Configuration, MaskError};
use maskgen_sampler::determinism::run_seed;
use maskgen_sampler::{
    ising_samples, percolation_samples, IsingOptions, ModelKind, SampleManifest, SamplerConfig,
};
use tracing::info;

use super::Model;

#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// Model to sample.
    #[arg(long, value_enum, required_unless_present = "config")]
    pub model: Option<Model>,
    /// YAML sampler configuration; flags override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seed of the engine's random stream.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Derive the seed of independent run `N` from `--seed`.
    #[arg(long, value_name = "N")]
    pub replica: Option<usize>,
    /// Linear lattice size.
    #[arg(long, allow_hyphen_values = true)]
    pub size: Option<i64>,
    /// Number of configurations to emit.
    #[arg(long, allow_hyphen_values = true, required_unless_present = "config")]
    pub count: Option<i64>,
    /// Model parameter (`beta` or `prob`); negative selects the engine default.
    #[arg(long, allow_hyphen_values = true)]
    pub param: Option<f64>,
    /// Burn-in sweeps (Ising only).
    #[arg(long)]
    pub therm: Option<usize>,
    /// Extra sweeps between samples (Ising only).
    #[arg(long)]
    pub interval: Option<usize>,
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Write a JSON manifest with per-sample digests.
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One block of rows per configuration.
    Text,
    /// One JSON object per line.
    Json,
}

impl SamplesArgs {
    /// Merges the configuration file (if any) with command-line overrides.
    pub fn resolve(&self) -> Result<SamplerConfig, MaskError> {
        let mut config = match (&self.config, self.model, self.count) {
            (Some(path), _, _) => SamplerConfig::load(path)?,
            (None, Some(model), Some(count)) => SamplerConfig::new(model.into(), count),
            (None, _, _) => {
                return Err(MaskError::configuration(
                    "missing-arguments",
                    "either --config or both --model and --count are required",
                ))
            }
        };
        if let Some(model) = self.model {
            config.model = model.into();
        }
        if let Some(count) = self.count {
            config.samples = count;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(param) = self.param {
            config.parameter = Some(param);
        }
        if let Some(therm) = self.therm {
            config.thermalization = therm;
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        Ok(config)
    }
}

pub fn run(args: &SamplesArgs) -> Result<(), Box<dyn Error>> {
    let config = args.resolve()?;
    let size = config.linear_size()?;
    let count = config.sample_count()?;
    let seed = args
        .replica
        .map_or(config.seed, |index| run_seed(config.seed, index));
    let parameter = config.model_parameter();
    info!(
        model = config.model.as_str(),
        seed,
        size = size.get(),
        count,
        parameter = %parameter,
        "sampling"
    );

    let mut manifest =
        SampleManifest::new(config.model, seed, size, parameter, config.schedule());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.model {
        ModelKind::Ising => {
            let options = IsingOptions {
                beta: parameter,
                thermalization: config.thermalization,
                interval: config.interval,
            };
            let stream = ising_samples(seed, size, count, options)?;
            emit(stream, &mut out, &mut manifest, args.format)?;
        }
        ModelKind::Percolation => {
            let stream = percolation_samples(seed, size, count, parameter)?;
            emit(stream, &mut out, &mut manifest, args.format)?;
        }
    }
    out.flush()?;

    if let Some(path) = &args.manifest {
        manifest.write(path)?;
        info!(path = %path.display(), samples = manifest.samples(), "manifest written");
    }
    Ok(())
}

fn emit(
    stream: impl Iterator<Item = Result<Configuration, MaskError>>,
    out: &mut impl Write,
    manifest: &mut SampleManifest,
    format: Format,
) -> Result<(), Box<dyn Error>> {
    for (index, sample) in stream.enumerate() {
        let configuration = sample?;
        manifest.record(&configuration);
        match format {
            Format::Text => {
                writeln!(out, "# sample {index}")?;
                write!(out, "{configuration}")?;
            }
            Format::Json => writeln!(out, "{}", serde_json::to_string(&configuration)?)?,
        }
    }
    Ok(())
}
