use maskgen_core::derive_substream_seed;

/// Derives the seed of an independent run from a master seed.
///
/// Independent sample streams started from one master seed should each use
/// their own derived seed so that their engines never share a random stream.
pub fn run_seed(master_seed: u64, run_index: usize) -> u64 {
    derive_substream_seed(master_seed, run_index as u64)
}

/// Seeds for `runs` independent streams.
pub fn run_seeds(master_seed: u64, runs: usize) -> Vec<u64> {
    (0..runs).map(|index| run_seed(master_seed, index)).collect()
}
