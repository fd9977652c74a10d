use maskgen_core::{Configuration, Engine, LinearSize, MaskError, ModelParameter, RngHandle};
use serde::{Deserialize, Serialize};

use crate::cluster::{Clusters, UnionFind};
use crate::lattice::SquareLattice;

/// Inverse critical temperature of the square-lattice Ising model,
/// `ln(1 + sqrt 2) / 2`.
pub const CRITICAL_BETA: f64 = 0.440_686_793_509_771_5;

/// Energy and magnetization densities of an Ising state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsingObservables {
    /// Energy per site with unit ferromagnetic coupling.
    pub energy: f64,
    /// Magnetization per site, in `[-1, 1]`.
    pub magnetization: f64,
}

/// Ferromagnetic Ising model updated with the Swendsen-Wang cluster algorithm.
///
/// Spins are stored as `0`/`1` and start fully aligned (all `1`). One sweep
/// places a bond between every pair of equal neighbours with probability
/// `1 - exp(-2 beta)`, then flips each resulting cluster with probability 1/2.
#[derive(Debug, Clone)]
pub struct IsingEngine {
    rng: RngHandle,
    size: LinearSize,
    lattice: SquareLattice,
    beta: f64,
    bond_prob: f64,
    spins: Vec<u8>,
    forest: UnionFind,
    clusters: Clusters,
    flip: Vec<bool>,
    sweeps: u64,
}

impl IsingEngine {
    /// Inverse temperature in use.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Number of completed sweeps.
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    /// Spin at `site` as `0` or `1`.
    pub fn spin(&self, site: usize) -> u8 {
        self.spins[site]
    }

    /// Energy per site, `-sum_<ij> s_i s_j / N` with `s = +-1`.
    pub fn energy(&self) -> f64 {
        let mut energy = 0.0;
        for (source, target) in self.lattice.bonds() {
            energy -= if self.spins[source] == self.spins[target] {
                1.0
            } else {
                -1.0
            };
        }
        energy / self.lattice.num_sites() as f64
    }

    /// Magnetization per site, `sum (2 s - 1) / N`.
    pub fn magnetization(&self) -> f64 {
        let total: i64 = self
            .spins
            .iter()
            .map(|&spin| 2 * i64::from(spin) - 1)
            .sum();
        total as f64 / self.lattice.num_sites() as f64
    }

    /// Both observables at the current sweep boundary.
    pub fn observables(&self) -> IsingObservables {
        IsingObservables {
            energy: self.energy(),
            magnetization: self.magnetization(),
        }
    }
}

impl Engine for IsingEngine {
    const MODEL: &'static str = "ising";

    type Snapshot = Configuration;

    fn construct(
        seed: u64,
        size: LinearSize,
        parameter: ModelParameter,
    ) -> Result<Self, MaskError> {
        let beta = parameter.resolve(CRITICAL_BETA);
        if !beta.is_finite() || beta < 0.0 {
            return Err(MaskError::parameter(Self::MODEL, "beta", beta, "[0, inf)"));
        }
        let lattice = SquareLattice::new(size);
        let n = lattice.num_sites();
        tracing::debug!(seed, size = size.get(), beta, "constructing ising engine");
        Ok(Self {
            rng: RngHandle::from_seed(seed),
            size,
            lattice,
            beta,
            bond_prob: 1.0 - (-2.0 * beta).exp(),
            spins: vec![1; n],
            forest: UnionFind::new(n),
            clusters: Clusters::default(),
            flip: Vec::with_capacity(n),
            sweeps: 0,
        })
    }

    fn advance(&mut self) -> Result<(), MaskError> {
        self.forest.reset();
        for (source, target) in self.lattice.bonds() {
            if self.spins[source] == self.spins[target] && self.rng.uniform01() < self.bond_prob {
                self.forest.union(source, target);
            }
        }
        self.forest.label(&mut self.clusters);

        self.flip.clear();
        for _ in 0..self.clusters.count() {
            self.flip.push(self.rng.uniform01() < 0.5);
        }
        for (site, spin) in self.spins.iter_mut().enumerate() {
            if self.flip[self.clusters.id_of(site) as usize] {
                *spin ^= 1;
            }
        }
        self.sweeps += 1;
        Ok(())
    }

    fn snapshot(&self) -> Result<Configuration, MaskError> {
        Configuration::new(self.size, self.spins.clone())
    }
}
