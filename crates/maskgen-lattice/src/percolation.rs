use maskgen_core::{Configuration, Engine, LinearSize, MaskError, ModelParameter, RngHandle};
use serde::{Deserialize, Serialize};

use crate::cluster::{Clusters, UnionFind};
use crate::lattice::SquareLattice;

/// Bond percolation threshold of the square lattice.
pub const CRITICAL_PROB: f64 = 0.5;

/// Cluster statistics of one percolation draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercolationObservables {
    /// Number of connected clusters, isolated sites included.
    pub clusters: usize,
    /// Number of sites in the largest cluster.
    pub largest: u32,
    /// Largest cluster size divided by the number of sites.
    pub largest_density: f64,
}

/// Bond percolation on the periodic square lattice.
///
/// Every sweep is an independent draw: each bond is open with probability
/// `prob`, and the configuration marks the sites of the largest resulting
/// cluster. Before the first sweep every site is its own cluster.
#[derive(Debug, Clone)]
pub struct PercolationEngine {
    rng: RngHandle,
    size: LinearSize,
    lattice: SquareLattice,
    prob: f64,
    forest: UnionFind,
    clusters: Clusters,
    largest: (u32, u32),
    sweeps: u64,
}

impl PercolationEngine {
    /// Bond occupation probability in use.
    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Number of completed draws.
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    /// `1` when `site` belongs to the largest cluster, `0` otherwise.
    pub fn spin(&self, site: usize) -> u8 {
        u8::from(self.clusters.id_of(site) == self.largest.0)
    }

    /// Number of clusters in the current draw.
    pub fn num_clusters(&self) -> usize {
        self.clusters.count()
    }

    /// Size of the largest cluster in the current draw.
    pub fn max_size(&self) -> u32 {
        self.largest.1
    }

    /// Cluster statistics at the current sweep boundary.
    pub fn observables(&self) -> PercolationObservables {
        PercolationObservables {
            clusters: self.num_clusters(),
            largest: self.max_size(),
            largest_density: f64::from(self.max_size()) / self.lattice.num_sites() as f64,
        }
    }

    fn relabel(&mut self) {
        self.forest.label(&mut self.clusters);
        // a lattice always has at least one site, so there is a largest cluster
        self.largest = self.clusters.largest().unwrap_or((0, 0));
    }
}

impl Engine for PercolationEngine {
    const MODEL: &'static str = "percolation";

    type Snapshot = Configuration;

    fn construct(
        seed: u64,
        size: LinearSize,
        parameter: ModelParameter,
    ) -> Result<Self, MaskError> {
        let prob = parameter.resolve(CRITICAL_PROB);
        if !(0.0..=1.0).contains(&prob) {
            return Err(MaskError::parameter(Self::MODEL, "prob", prob, "[0, 1]"));
        }
        let lattice = SquareLattice::new(size);
        let n = lattice.num_sites();
        tracing::debug!(seed, size = size.get(), prob, "constructing percolation engine");
        let mut engine = Self {
            rng: RngHandle::from_seed(seed),
            size,
            lattice,
            prob,
            forest: UnionFind::new(n),
            clusters: Clusters::default(),
            largest: (0, 0),
            sweeps: 0,
        };
        engine.relabel();
        Ok(engine)
    }

    fn advance(&mut self) -> Result<(), MaskError> {
        self.forest.reset();
        for (source, target) in self.lattice.bonds() {
            if self.rng.uniform01() < self.prob {
                self.forest.union(source, target);
            }
        }
        self.relabel();
        self.sweeps += 1;
        Ok(())
    }

    fn snapshot(&self) -> Result<Configuration, MaskError> {
        let sites = (0..self.lattice.num_sites())
            .map(|site| self.spin(site))
            .collect();
        Configuration::new(self.size, sites)
    }
}
