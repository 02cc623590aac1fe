//! Ring perception over the cycle space of a molecule.
//!
//! Cycles are represented as edge bit vectors ([`EdgeSet`]); a set of cycles
//! is independent when no member is the XOR of others. Both perceptions here
//! start from Horton's candidate set (for every edge `uv` and every atom
//! `w`, the cycle `w → u`, `uv`, `v → w` built from shortest paths) sorted by
//! size.

use std::collections::VecDeque;

use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;

use crate::mol::Mol;

/// Bit vector over the bond indices of one molecule.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EdgeSet(Vec<u64>);

impl EdgeSet {
    fn of_ring<A, B>(ring: &[NodeIndex], mol: &Mol<A, B>) -> Self {
        let mut words = vec![0u64; mol.bond_count().div_ceil(64)];
        let len = ring.len();
        for i in 0..len {
            if let Some(edge) = mol.bond_between(ring[i], ring[(i + 1) % len]) {
                let idx = edge.index();
                words[idx / 64] |= 1u64 << (idx % 64);
            }
        }
        Self(words)
    }

    fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    fn contains(&self, bit: usize) -> bool {
        self.0[bit / 64] & (1u64 << (bit % 64)) != 0
    }

    fn lowest(&self) -> Option<usize> {
        for (i, &word) in self.0.iter().enumerate() {
            if word != 0 {
                return Some(i * 64 + word.trailing_zeros() as usize);
            }
        }
        None
    }

    fn xor_assign(&mut self, other: &EdgeSet) {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a ^= *b;
        }
    }
}

/// Rows kept in echelon form: each row's lowest bit is its pivot.
#[derive(Debug, Default)]
struct CycleBasis {
    rows: Vec<EdgeSet>,
}

impl CycleBasis {
    fn reduce(&self, candidate: &EdgeSet) -> EdgeSet {
        let mut v = candidate.clone();
        for row in &self.rows {
            if let Some(p) = row.lowest() {
                if v.contains(p) {
                    v.xor_assign(row);
                }
            }
        }
        v
    }

    /// Adds the candidate if it is independent of the current rows.
    fn insert(&mut self, candidate: &EdgeSet) -> bool {
        let reduced = self.reduce(candidate);
        if reduced.is_empty() {
            return false;
        }
        self.rows.push(reduced);
        true
    }

    fn spans(&self, candidate: &EdgeSet) -> bool {
        self.reduce(candidate).is_empty()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone)]
pub struct RingInfo {
    rings: Vec<Vec<NodeIndex>>,
}

impl RingInfo {
    /// Smallest set of smallest rings: a minimum cycle basis.
    pub fn sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let needed = Self::expected_ring_count(mol);
        if needed == 0 {
            return Self { rings: vec![] };
        }

        let mut basis = CycleBasis::default();
        let mut rings = Vec::with_capacity(needed);
        for ring in horton_candidates(mol) {
            if basis.len() >= needed {
                break;
            }
            let set = EdgeSet::of_ring(&ring, mol);
            if !set.is_empty() && basis.insert(&set) {
                rings.push(normalize_ring(&ring));
            }
        }

        sort_rings(&mut rings);
        Self { rings }
    }

    /// SSSR plus every Horton candidate lying in its cycle space that is not
    /// already present, giving a symmetric result on fused systems such as
    /// naphthalene (6, 6, and the 10-membered perimeter).
    pub fn symmetrized_sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let needed = Self::expected_ring_count(mol);
        if needed == 0 {
            return Self { rings: vec![] };
        }

        let candidates = horton_candidates(mol);
        let mut basis = CycleBasis::default();
        let mut kept: Vec<(EdgeSet, &Vec<NodeIndex>)> = Vec::new();

        for ring in &candidates {
            if basis.len() >= needed {
                break;
            }
            let set = EdgeSet::of_ring(ring, mol);
            if !set.is_empty() && basis.insert(&set) {
                kept.push((set, ring));
            }
        }

        for ring in &candidates {
            let set = EdgeSet::of_ring(ring, mol);
            if set.is_empty() || kept.iter().any(|(s, _)| *s == set) {
                continue;
            }
            if basis.spans(&set) {
                kept.push((set, ring));
            }
        }

        let mut rings: Vec<Vec<NodeIndex>> =
            kept.iter().map(|(_, ring)| normalize_ring(ring)).collect();
        sort_rings(&mut rings);
        rings.dedup();

        Self { rings }
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn rings(&self) -> &[Vec<NodeIndex>] {
        &self.rings
    }

    pub fn into_rings(self) -> Vec<Vec<NodeIndex>> {
        self.rings
    }

    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.rings.iter().any(|ring| ring.contains(&atom))
    }

    /// Cyclomatic number: `E - V + C`.
    pub fn expected_ring_count<A, B>(mol: &Mol<A, B>) -> usize {
        let v = mol.atom_count();
        let e = mol.bond_count();
        let c = connected_components(mol.graph());
        (e + c).saturating_sub(v)
    }
}

/// Shortest-path trees from every atom: distance and BFS parent.
struct PathTrees {
    dist: Vec<Vec<u32>>,
    parent: Vec<Vec<Option<NodeIndex>>>,
}

impl PathTrees {
    fn new<A, B>(mol: &Mol<A, B>) -> Self {
        let n = mol.atom_count();
        let mut dist = vec![vec![u32::MAX; n]; n];
        let mut parent = vec![vec![None; n]; n];
        for src in 0..n {
            dist[src][src] = 0;
            let mut queue = VecDeque::from([NodeIndex::new(src)]);
            while let Some(cur) = queue.pop_front() {
                let d = dist[src][cur.index()];
                for nb in mol.neighbors(cur) {
                    if dist[src][nb.index()] == u32::MAX {
                        dist[src][nb.index()] = d + 1;
                        parent[src][nb.index()] = Some(cur);
                        queue.push_back(nb);
                    }
                }
            }
        }
        Self { dist, parent }
    }

    fn path(&self, src: NodeIndex, dst: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![dst];
        let mut cur = dst;
        while cur != src {
            match self.parent[src.index()][cur.index()] {
                Some(p) => {
                    path.push(p);
                    cur = p;
                }
                None => return vec![],
            }
        }
        path.reverse();
        path
    }
}

fn horton_candidates<A, B>(mol: &Mol<A, B>) -> Vec<Vec<NodeIndex>> {
    let trees = PathTrees::new(mol);
    let mut candidates: Vec<Vec<NodeIndex>> = Vec::new();

    for edge in mol.bonds() {
        let Some((u, v)) = mol.bond_endpoints(edge) else {
            continue;
        };
        for w in mol.atoms() {
            let du = trees.dist[w.index()][u.index()];
            let dv = trees.dist[w.index()][v.index()];
            if du == u32::MAX || dv == u32::MAX || du as usize + dv as usize + 1 < 3 {
                continue;
            }
            let to_u = trees.path(w, u);
            let to_v = trees.path(w, v);
            if to_u.is_empty() || to_v.is_empty() {
                continue;
            }
            if to_u[1..].iter().any(|node| to_v[1..].contains(node)) {
                continue;
            }
            let mut ring = to_u;
            ring.extend(to_v[1..].iter().rev());
            candidates.push(ring);
        }
    }

    sort_rings(&mut candidates);
    candidates.dedup();
    candidates
}

pub(crate) fn sort_rings(rings: &mut [Vec<NodeIndex>]) {
    rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
}

/// Rotate so the lowest index leads, then orient towards the smaller
/// neighbor, so that each cycle has exactly one representation.
pub(crate) fn normalize_ring(ring: &[NodeIndex]) -> Vec<NodeIndex> {
    let Some(start) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, idx)| idx)
        .map(|(i, _)| i)
    else {
        return vec![];
    };

    let len = ring.len();
    let mut normalized: Vec<NodeIndex> = (0..len).map(|i| ring[(start + i) % len]).collect();
    if len > 2 && normalized[1] > normalized[len - 1] {
        normalized[1..].reverse();
    }
    normalized
}
