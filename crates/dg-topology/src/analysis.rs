//! Whole-graph measures over the usable edges.

use rustc_hash::FxHashMap;

use dg_core::StationId;

use crate::ProximityGraph;

/// Usable edges over the edge count of the complete graph on `n` vertices,
/// i.e. `2m / (n(n-1))`.  `0.0` when `n < 2`.
pub fn density(usable_edges: usize, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let n = n as f64;
    2.0 * usable_edges as f64 / (n * (n - 1.0))
}

/// Number of connected components of the subgraph induced by `vertices`
/// and the usable edges of `graph`.
///
/// Edges with an endpoint outside `vertices` are ignored.  Isolated vertices
/// count as one component each.
pub fn connected_components(graph: &ProximityGraph, vertices: &[StationId]) -> usize {
    let index: FxHashMap<StationId, usize> = vertices
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i))
        .collect();
    let mut dsu = DisjointSet::new(vertices.len());

    for key in graph.usable_edges() {
        let (u, v) = key.endpoints();
        if let (Some(&a), Some(&b)) = (index.get(&u), index.get(&v)) {
            dsu.union(a, b);
        }
    }
    dsu.sets
}

/// Union-find with path halving and union by size.
struct DisjointSet {
    parent: Vec<usize>,
    size:   Vec<usize>,
    sets:   usize,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size:   vec![1; n],
            sets:   n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.sets -= 1;
    }
}
