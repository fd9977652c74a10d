use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use maskgen_core::{Configuration, ErrorInfo, MaskError};
use maskgen_sampler::{measure, MeasureConfig, ModelKind};
use tracing::info;

use super::Model;

#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Model to measure.
    #[arg(long, value_enum, required_unless_present = "config")]
    pub model: Option<Model>,
    /// YAML measurement configuration; flags override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seed of the engine's random stream.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Linear lattice size.
    #[arg(long, allow_hyphen_values = true)]
    pub size: Option<i64>,
    /// Model parameter (`beta` or `prob`); negative selects the engine default.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "temperature")]
    pub param: Option<f64>,
    /// Ising temperature; sets `beta = 1 / T`.
    #[arg(long, short = 'T')]
    pub temperature: Option<f64>,
    /// Measured sweeps.
    #[arg(long)]
    pub sweeps: Option<usize>,
    /// Burn-in sweeps (defaults to `sweeps / 8`).
    #[arg(long)]
    pub therm: Option<usize>,
    /// Write the final configuration as text rows.
    #[arg(long)]
    pub final_config: Option<PathBuf>,
}

impl MeasureArgs {
    /// Merges the configuration file (if any) with command-line overrides.
    pub fn resolve(&self) -> Result<MeasureConfig, MaskError> {
        let mut config = match (&self.config, self.model) {
            (Some(path), _) => MeasureConfig::load(path)?,
            (None, Some(model)) => MeasureConfig::new(model.into()),
            (None, None) => {
                return Err(MaskError::configuration(
                    "missing-arguments",
                    "either --config or --model is required",
                ))
            }
        };
        if let Some(model) = self.model {
            config.model = model.into();
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
        if let Some(temperature) = self.temperature {
            config.parameter = Some(beta_from_temperature(config.model, temperature)?);
        }
        if let Some(sweeps) = self.sweeps {
            config.sweeps = sweeps;
        }
        if let Some(therm) = self.therm {
            config.thermalization = Some(therm);
        }
        Ok(config)
    }
}

fn beta_from_temperature(model: ModelKind, temperature: f64) -> Result<f64, MaskError> {
    if model != ModelKind::Ising {
        return Err(MaskError::configuration(
            "temperature-not-supported",
            format!("--temperature only applies to ising, not {}", model.as_str()),
        ));
    }
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(MaskError::parameter(
            model.as_str(),
            "temperature",
            temperature,
            "(0, inf)",
        ));
    }
    Ok(1.0 / temperature)
}

pub fn run(args: &MeasureArgs) -> Result<(), Box<dyn Error>> {
    let config = args.resolve()?;
    info!(model = config.model.as_str(), seed = config.seed, "measuring");
    let report = measure(&config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    if let Some(path) = &args.final_config {
        write_configuration(path, report.final_configuration())?;
    }
    Ok(())
}

fn write_configuration(path: &Path, configuration: &Configuration) -> Result<(), MaskError> {
    fs::write(path, configuration.to_string()).map_err(|err| {
        MaskError::Serde(
            ErrorInfo::new("final-config-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    info!(path = %path.display(), "final configuration written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskgen_core::ModelParameter;

    fn args(model: Option<Model>) -> MeasureArgs {
        MeasureArgs {
            model,
            config: None,
            seed: None,
            size: None,
            param: None,
            temperature: None,
            sweeps: None,
            therm: None,
            final_config: None,
        }
    }

    #[test]
    fn temperature_sets_inverse_beta() {
        let mut args = args(Some(Model::Ising));
        args.temperature = Some(2.0);
        let config = args.resolve().unwrap();
        assert_eq!(config.model_parameter(), ModelParameter::Value(0.5));
    }

    #[test]
    fn temperature_is_rejected_for_percolation() {
        let mut args = args(Some(Model::Percolation));
        args.temperature = Some(2.0);
        let err = args.resolve().unwrap_err();
        assert_eq!(err.info().code, "temperature-not-supported");
    }

    #[test]
    fn non_positive_temperature_is_a_parameter_error() {
        let mut args = args(Some(Model::Ising));
        args.temperature = Some(0.0);
        assert!(matches!(args.resolve(), Err(MaskError::Parameter(_))));
    }

    #[test]
    fn defaults_follow_measurement_config() {
        let config = args(Some(Model::Percolation)).resolve().unwrap();
        assert_eq!(config.seed, 29833);
        assert_eq!(config.size, 8);
        assert_eq!(config.model_parameter(), ModelParameter::Default);
    }
}
