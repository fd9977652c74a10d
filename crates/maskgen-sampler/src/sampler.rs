use std::iter::FusedIterator;

use maskgen_core::{Engine, LinearSize, MaskError, ModelParameter};
use maskgen_lattice::{IsingEngine, PercolationEngine};
use serde::{Deserialize, Serialize};

/// Default Ising burn-in, in sweeps.
pub const DEFAULT_THERMALIZATION: usize = 128;
/// Default number of discarded sweeps between Ising samples, minus one.
pub const DEFAULT_INTERVAL: usize = 128;

/// Number of `advance` calls issued around each emitted sample.
///
/// On the first pull the sampler runs `thermalization` burn-in sweeps, even
/// when no sample is requested. It then runs `before_first` sweeps before
/// sample 0 and `between` sweeps before every later sample. The total number
/// of sweeps behind the `k`-th sample (`k >= 1`) is therefore
/// `thermalization + before_first + (k - 1) * between`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSchedule {
    /// Burn-in sweeps executed once, on the first pull.
    pub thermalization: usize,
    /// Sweeps executed before the first sample, after burn-in.
    pub before_first: usize,
    /// Sweeps executed between two consecutive samples.
    pub between: usize,
}

impl SweepSchedule {
    /// Markov-chain schedule: `thermalization` burn-in sweeps, the first
    /// sample read right after, then `interval + 1` sweeps separating
    /// consecutive samples.
    pub fn thermalized(thermalization: usize, interval: usize) -> Self {
        Self {
            thermalization,
            before_first: 0,
            between: interval.saturating_add(1),
        }
    }

    /// Memoryless schedule: no burn-in, exactly one fresh draw per sample.
    pub fn independent() -> Self {
        Self {
            thermalization: 0,
            before_first: 1,
            between: 1,
        }
    }

    /// Sweeps issued immediately before the sample at `index`, burn-in excluded.
    pub fn sweeps_before(&self, index: usize) -> usize {
        if index == 0 {
            self.before_first
        } else {
            self.between
        }
    }

    /// Sweeps needed to produce the first `samples` samples. For zero samples
    /// this is the burn-in alone.
    pub fn total_sweeps(&self, samples: usize) -> usize {
        match samples {
            0 => self.thermalization,
            k => self
                .thermalization
                .saturating_add(self.before_first)
                .saturating_add((k - 1).saturating_mul(self.between)),
        }
    }
}

impl Default for SweepSchedule {
    fn default() -> Self {
        Self::thermalized(DEFAULT_THERMALIZATION, DEFAULT_INTERVAL)
    }
}

/// Lazy, finite stream of snapshots drawn from one private engine.
///
/// Nothing is computed until [`Iterator::next`] is called. The first call runs
/// the burn-in, even for an empty stream. The stream yields exactly `n` items
/// unless the engine fails; the failure is yielded once and the stream then
/// ends. Dropping the stream early needs no cleanup.
#[derive(Debug)]
pub struct Samples<E: Engine> {
    engine: E,
    schedule: SweepSchedule,
    remaining: usize,
    emitted: usize,
    sweeps: u64,
    thermalized: bool,
    failed: bool,
}

impl<E: Engine> Samples<E> {
    /// Wraps an already constructed engine.
    pub fn new(engine: E, samples: usize, schedule: SweepSchedule) -> Self {
        Self {
            engine,
            schedule,
            remaining: samples,
            emitted: 0,
            sweeps: 0,
            thermalized: false,
            failed: false,
        }
    }

    /// Read-only access to the engine at the last sweep boundary.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Schedule driving the stream.
    pub fn schedule(&self) -> SweepSchedule {
        self.schedule
    }

    /// Number of samples emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Whether the burn-in has completed.
    pub fn is_thermalized(&self) -> bool {
        self.thermalized
    }

    /// Number of `advance` calls completed so far.
    pub fn sweeps_performed(&self) -> u64 {
        self.sweeps
    }

    fn sweep(&mut self, count: usize) -> Result<(), MaskError> {
        for _ in 0..count {
            self.engine.advance()?;
            self.sweeps += 1;
        }
        Ok(())
    }

    fn fail(&mut self, err: MaskError) -> Option<Result<E::Snapshot, MaskError>> {
        tracing::debug!(
            model = E::MODEL,
            emitted = self.emitted,
            sweeps = self.sweeps,
            error = %err,
            "sample stream terminated by engine failure"
        );
        self.failed = true;
        self.remaining = 0;
        Some(Err(err))
    }
}

impl<E: Engine> Iterator for Samples<E> {
    type Item = Result<E::Snapshot, MaskError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if !self.thermalized {
            let burn_in = self.schedule.thermalization;
            tracing::debug!(model = E::MODEL, sweeps = burn_in, "running burn-in sweeps");
            if let Err(err) = self.sweep(burn_in) {
                return self.fail(err);
            }
            self.thermalized = true;
        }
        if self.remaining == 0 {
            return None;
        }
        if let Err(err) = self.sweep(self.schedule.sweeps_before(self.emitted)) {
            return self.fail(err);
        }
        match self.engine.snapshot() {
            Ok(snapshot) => {
                self.remaining -= 1;
                self.emitted += 1;
                tracing::trace!(
                    model = E::MODEL,
                    sample = self.emitted,
                    sweeps = self.sweeps,
                    "emitted sample"
                );
                Some(Ok(snapshot))
            }
            Err(err) => self.fail(err),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // a pending burn-in on an empty stream can still yield its failure
        let pending = usize::from(
            !self.failed
                && !self.thermalized
                && self.remaining == 0
                && self.schedule.thermalization > 0,
        );
        (self.remaining, Some(self.remaining + pending))
    }
}

impl<E: Engine> FusedIterator for Samples<E> {}

/// Constructs an engine of type `E` and wraps it in a sample stream.
///
/// Construction errors surface here, before any sweep runs.
pub fn samples<E: Engine>(
    seed: u64,
    size: LinearSize,
    n: usize,
    parameter: ModelParameter,
    schedule: SweepSchedule,
) -> Result<Samples<E>, MaskError> {
    let engine = E::construct(seed, size, parameter)?;
    tracing::debug!(
        model = E::MODEL,
        seed,
        size = size.get(),
        samples = n,
        thermalization = schedule.thermalization,
        before_first = schedule.before_first,
        between = schedule.between,
        "sample stream ready"
    );
    Ok(Samples::new(engine, n, schedule))
}

/// Optional knobs of [`ising_samples`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsingOptions {
    /// Inverse temperature; `Default` selects the critical point.
    #[serde(default)]
    pub beta: ModelParameter,
    /// Burn-in sweeps before the first sample.
    #[serde(default = "default_thermalization")]
    pub thermalization: usize,
    /// Extra sweeps discarded between samples (the stride is `interval + 1`).
    #[serde(default = "default_interval")]
    pub interval: usize,
}

fn default_thermalization() -> usize {
    DEFAULT_THERMALIZATION
}

fn default_interval() -> usize {
    DEFAULT_INTERVAL
}

impl Default for IsingOptions {
    fn default() -> Self {
        Self {
            beta: ModelParameter::Default,
            thermalization: DEFAULT_THERMALIZATION,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl IsingOptions {
    /// Schedule implied by the thermalization and interval settings.
    pub fn schedule(&self) -> SweepSchedule {
        SweepSchedule::thermalized(self.thermalization, self.interval)
    }
}

/// Ising configurations: burn-in first, then samples spaced `interval + 1`
/// sweeps apart. The first sample is read right after burn-in.
pub fn ising_samples(
    seed: u64,
    size: LinearSize,
    n: usize,
    options: IsingOptions,
) -> Result<Samples<IsingEngine>, MaskError> {
    samples(seed, size, n, options.beta, options.schedule())
}

/// Percolation configurations: one fresh draw per sample, no burn-in.
pub fn percolation_samples(
    seed: u64,
    size: LinearSize,
    n: usize,
    prob: ModelParameter,
) -> Result<Samples<PercolationEngine>, MaskError> {
    samples(seed, size, n, prob, SweepSchedule::independent())
}
