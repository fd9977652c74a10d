use maskgen_core::{Engine, LinearSize, ModelParameter};
use maskgen_lattice::{Clusters, PercolationEngine, SquareLattice, UnionFind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cluster_sizes_partition_the_sites(length in 1u32..9, bits in proptest::collection::vec(any::<bool>(), 0..162)) {
        let lattice = SquareLattice::new(LinearSize::new(length).unwrap());
        let mut forest = UnionFind::new(lattice.num_sites());
        for (bond, (source, target)) in lattice.bonds().enumerate() {
            if bits.get(bond).copied().unwrap_or(false) {
                forest.union(source, target);
            }
        }
        let mut clusters = Clusters::default();
        forest.label(&mut clusters);

        let total: u32 = clusters.sizes().iter().sum();
        prop_assert_eq!(total as usize, lattice.num_sites());
        for (source, target) in lattice.bonds() {
            if forest.find(source) == forest.find(target) {
                prop_assert_eq!(clusters.id_of(source), clusters.id_of(target));
            }
        }
        let (_, largest) = clusters.largest().unwrap();
        prop_assert!(clusters.sizes().iter().all(|&size| size <= largest));
    }

    #[test]
    fn percolation_observables_are_consistent(seed in any::<u64>(), length in 1u32..10, prob in 0.0f64..=1.0) {
        let mut engine =
            PercolationEngine::construct(seed, LinearSize::new(length).unwrap(), ModelParameter::Value(prob))
                .unwrap();
        engine.advance().unwrap();
        let observables = engine.observables();
        let n = (length * length) as usize;
        prop_assert!(observables.clusters >= 1 && observables.clusters <= n);
        prop_assert_eq!(engine.snapshot().unwrap().occupied(), observables.largest as usize);
        prop_assert!(observables.largest_density > 0.0 && observables.largest_density <= 1.0);
    }
}
