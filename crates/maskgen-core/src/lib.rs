#![deny(missing_docs)]
#![doc = "Core contract and shared values for maskgen: the engine trait, lattice configurations, model parameters, errors and seeded randomness."]

pub mod configuration;
pub mod errors;
pub mod rng;
mod types;

pub use configuration::Configuration;
pub use errors::{ErrorInfo, MaskError};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{
    checked_sample_count, LinearSize, ModelParameter, DEFAULT_SENTINEL, MAX_LINEAR_SIZE,
};

/// Contract every stochastic lattice engine satisfies.
///
/// An engine owns its lattice state and RNG stream. `advance` performs exactly
/// one Monte Carlo sweep and is the only operation that mutates state;
/// `snapshot` reads the state at the current sweep boundary and may be called
/// any number of times between sweeps with the same result.
pub trait Engine {
    /// Short model label used in logs and manifests.
    const MODEL: &'static str;

    /// Value returned by [`Engine::snapshot`].
    type Snapshot;

    /// Builds an engine seeded with `seed` on an `size x size` lattice.
    ///
    /// Explicit parameters outside the model's domain fail with
    /// [`MaskError::Parameter`].
    fn construct(seed: u64, size: LinearSize, parameter: ModelParameter) -> Result<Self, MaskError>
    where
        Self: Sized;

    /// Performs one full sweep over the lattice.
    fn advance(&mut self) -> Result<(), MaskError>;

    /// Returns the lattice state without mutating it.
    fn snapshot(&self) -> Result<Self::Snapshot, MaskError>;
}
