pub mod measure;
pub mod samples;

use clap::ValueEnum;
use maskgen_sampler::ModelKind;

/// Model selector shared by every subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Model {
    Ising,
    Percolation,
}

impl From<Model> for ModelKind {
    fn from(model: Model) -> Self {
        match model {
            Model::Ising => ModelKind::Ising,
            Model::Percolation => ModelKind::Percolation,
        }
    }
}
