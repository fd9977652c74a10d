use maskgen_core::LinearSize;

/// Periodic `L x L` square lattice.
///
/// Sites are indexed row-major, `s = L * y + x`. Every site owns two bonds:
/// bond `2 * s` points to its `+x` neighbour and bond `2 * s + 1` to its `+y`
/// neighbour, both wrapping around the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareLattice {
    length: u32,
}

impl SquareLattice {
    /// Creates the lattice for a validated linear size.
    pub fn new(size: LinearSize) -> Self {
        Self {
            length: size.get(),
        }
    }

    /// Linear extent `L`.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Number of sites, `L * L`.
    pub fn num_sites(&self) -> usize {
        self.length as usize * self.length as usize
    }

    /// Number of bonds, `2 * L * L`.
    pub fn num_bonds(&self) -> usize {
        2 * self.num_sites()
    }

    /// Site the bond starts from.
    pub fn source(&self, bond: usize) -> usize {
        bond >> 1
    }

    /// Site the bond points to.
    pub fn target(&self, bond: usize) -> usize {
        let length = self.length as usize;
        let site = self.source(bond);
        let mut x = site % length;
        let mut y = site / length;
        if bond & 1 == 0 {
            x = (x + 1) % length;
        } else {
            y = (y + 1) % length;
        }
        length * y + x
    }

    /// Iterates `(source, target)` pairs in bond order.
    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_bonds()).map(move |bond| (self.source(bond), self.target(bond)))
    }
}
