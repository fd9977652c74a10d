/// Weighted union-find over lattice sites with path halving.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
    weight: Vec<u32>,
}

impl UnionFind {
    /// Creates a forest of `n` singleton trees.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            weight: vec![1; n],
        }
    }

    /// Number of sites tracked by the forest.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true when the forest tracks no sites.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Splits every tree back into singletons.
    pub fn reset(&mut self) {
        for (site, parent) in self.parent.iter_mut().enumerate() {
            *parent = site as u32;
        }
        self.weight.fill(1);
    }

    /// Root of the tree containing `site`.
    pub fn find(&mut self, site: usize) -> usize {
        let mut x = site as u32;
        while self.parent[x as usize] != x {
            self.parent[x as usize] = self.parent[self.parent[x as usize] as usize];
            x = self.parent[x as usize];
        }
        x as usize
    }

    /// Merges the trees containing `a` and `b`, lighter under heavier.
    pub fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (heavy, light) = if self.weight[ra] < self.weight[rb] {
            (rb, ra)
        } else {
            (ra, rb)
        };
        self.parent[light] = heavy as u32;
        self.weight[heavy] += self.weight[light];
    }

    /// Assigns dense cluster ids and records cluster sizes into `out`.
    ///
    /// Ids are handed out in order of each root's site index, so labelling is
    /// independent of the order in which bonds were merged.
    pub fn label(&mut self, out: &mut Clusters) {
        let n = self.len();
        out.id.clear();
        out.id.resize(n, u32::MAX);
        out.sizes.clear();
        for site in 0..n {
            if self.parent[site] as usize == site {
                out.id[site] = out.sizes.len() as u32;
                out.sizes.push(self.weight[site]);
            }
        }
        for site in 0..n {
            let root = self.find(site);
            out.id[site] = out.id[root];
        }
    }
}

/// Cluster decomposition produced by [`UnionFind::label`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clusters {
    id: Vec<u32>,
    sizes: Vec<u32>,
}

impl Clusters {
    /// Number of clusters.
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Cluster id of `site`.
    pub fn id_of(&self, site: usize) -> u32 {
        self.id[site]
    }

    /// Number of sites in cluster `id`.
    pub fn size(&self, id: u32) -> u32 {
        self.sizes[id as usize]
    }

    /// Sizes indexed by cluster id.
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// Id and size of the largest cluster. Ties go to the highest id.
    pub fn largest(&self) -> Option<(u32, u32)> {
        let mut best: Option<(u32, u32)> = None;
        for (id, &size) in self.sizes.iter().enumerate() {
            if best.map_or(true, |(_, max)| size >= max) {
                best = Some((id as u32, size));
            }
        }
        best
    }
}
