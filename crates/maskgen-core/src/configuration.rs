//! Lattice configuration snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{ErrorInfo, MaskError};
use crate::types::LinearSize;

/// Immutable per-site snapshot of an `L x L` lattice in row-major order.
///
/// Ising engines store spins as `0`/`1`; percolation engines store a `1` on
/// every site of the largest cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration")]
pub struct Configuration {
    size: LinearSize,
    sites: Vec<u8>,
}

/// Unchecked wire form; decoding goes through [`Configuration::new`].
#[derive(Deserialize)]
struct RawConfiguration {
    size: LinearSize,
    sites: Vec<u8>,
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = MaskError;

    fn try_from(raw: RawConfiguration) -> Result<Self, Self::Error> {
        Self::new(raw.size, raw.sites)
    }
}

impl Configuration {
    /// Wraps site values, checking that they cover the whole lattice and are
    /// all `0` or `1`.
    pub fn new(size: LinearSize, sites: Vec<u8>) -> Result<Self, MaskError> {
        if sites.len() != size.num_sites() {
            return Err(MaskError::Engine(
                ErrorInfo::new("configuration-shape", "site count does not match lattice")
                    .with_context("size", size.to_string())
                    .with_context("sites", sites.len().to_string()),
            ));
        }
        if let Some(index) = sites.iter().position(|&value| value > 1) {
            return Err(MaskError::Engine(
                ErrorInfo::new("configuration-value", "site values must be 0 or 1")
                    .with_context("site", index.to_string())
                    .with_context("value", sites[index].to_string()),
            ));
        }
        Ok(Self { size, sites })
    }

    /// Linear size of the lattice.
    pub fn size(&self) -> LinearSize {
        self.size
    }

    /// Site values in row-major order.
    pub fn sites(&self) -> &[u8] {
        &self.sites
    }

    /// Value at lattice coordinate `(x, y)`.
    pub fn site(&self, x: u32, y: u32) -> Option<u8> {
        let length = self.size.get();
        if x >= length || y >= length {
            return None;
        }
        self.sites
            .get(y as usize * length as usize + x as usize)
            .copied()
    }

    /// Number of sites holding a `1`.
    pub fn occupied(&self) -> usize {
        self.sites.iter().filter(|&&value| value != 0).count()
    }

    /// Iterates over lattice rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.sites.chunks(self.size.get() as usize)
    }

    /// Hex encoded SHA-256 digest of the size and site values.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.size.get().to_le_bytes());
        hasher.update(&self.sites);
        hex::encode(hasher.finalize())
    }
}

/// One row per line, each value followed by a space.
impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for value in row {
                write!(f, "{value} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
