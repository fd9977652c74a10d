#![deny(missing_docs)]

//! Square-lattice engines implementing the `maskgen-core` engine contract:
//! a Swendsen-Wang Ising model and independent bond percolation.

mod cluster;
mod ising;
mod lattice;
mod percolation;

pub use cluster::{Clusters, UnionFind};
pub use ising::{IsingEngine, IsingObservables, CRITICAL_BETA};
pub use lattice::SquareLattice;
pub use percolation::{PercolationEngine, PercolationObservables, CRITICAL_PROB};
