use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Molecular graph: atoms of type `A` on the nodes, bonds of type `B` on the
/// edges.
///
/// Atom and bond indices are stable for the lifetime of the molecule; there
/// is no removal API, so an index handed out by [`add_atom`](Self::add_atom)
/// or [`add_bond`](Self::add_bond) never dangles.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_atom(&self, idx: NodeIndex) -> bool {
        idx.index() < self.graph.node_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// The atom at the far end of `bond` as seen from `atom`.
    pub fn other_atom(&self, bond: EdgeIndex, atom: NodeIndex) -> Option<NodeIndex> {
        let (a, b) = self.bond_endpoints(bond)?;
        if a == atom {
            Some(b)
        } else if b == atom {
            Some(a)
        } else {
            None
        }
    }

    /// Rebuild the molecule with every atom replaced by `f(index, atom)`.
    ///
    /// Atom and bond indices are preserved.
    pub fn map_atoms<C, F>(&self, mut f: F) -> Mol<C, B>
    where
        B: Clone,
        F: FnMut(NodeIndex, &A) -> C,
    {
        Mol {
            graph: self.graph.map(|idx, atom| f(idx, atom), |_, bond| bond.clone()),
        }
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        if self.atoms().any(|idx| self.atom(idx) != other.atom(idx)) {
            return false;
        }
        self.bonds().all(|idx| {
            self.bond(idx) == other.bond(idx)
                && self.bond_endpoints(idx) == other.bond_endpoints(idx)
        })
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .finish()
    }
}
