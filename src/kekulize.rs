//! Kekulization: replace aromatic bond markers with alternating single and
//! double bonds.
//!
//! Atoms one bond short of a default valence each need exactly one double
//! bond drawn from their aromatic bonds, which is a perfect matching on
//! those atoms. It is built by augmenting paths, one start atom at a time.

use std::collections::VecDeque;

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;
use tracing::trace;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::element::Element;
use crate::mol::Mol;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KekulizeError {
    /// These atoms need a double bond and none could be placed.
    #[error("cannot kekulize aromatic system: unmatched atoms {}", format_atoms(.0))]
    Unkekulizable(Vec<NodeIndex>),
}

fn format_atoms(atoms: &[NodeIndex]) -> String {
    let list: Vec<String> = atoms.iter().map(|a| a.index().to_string()).collect();
    format!("[{}]", list.join(", "))
}

/// Assign a concrete order to every aromatic bond. Atom and bond
/// aromaticity flags are left as they were.
pub fn kekulize(mut mol: Mol<Atom, Bond>) -> Result<Mol<Atom, Bond>, KekulizeError> {
    let aromatic: Vec<EdgeIndex> = mol
        .bonds()
        .filter(|&e| mol.bond(e).order == BondOrder::Aromatic)
        .collect();
    if aromatic.is_empty() {
        return Ok(mol);
    }

    let mut matching = Matching::new(&mol, &aromatic);
    let candidates: Vec<NodeIndex> = mol
        .atoms()
        .filter(|&a| !matching.adj[a.index()].is_empty() && needs_double(&mol, a))
        .collect();
    for &atom in &candidates {
        matching.needs_double[atom.index()] = true;
    }

    for &start in &candidates {
        if matching.partner[start.index()].is_none() {
            matching.augment(start);
        }
    }

    let unmatched: Vec<NodeIndex> = candidates
        .into_iter()
        .filter(|a| matching.partner[a.index()].is_none())
        .collect();
    if !unmatched.is_empty() {
        return Err(KekulizeError::Unkekulizable(unmatched));
    }

    let doubles = matching.matched_bonds();
    trace!(aromatic = aromatic.len(), doubles = doubles.len(), "kekulized");
    for edge in aromatic {
        mol.bond_mut(edge).order = if doubles.contains(&edge) {
            BondOrder::Double
        } else {
            BondOrder::Single
        };
    }
    Ok(mol)
}

/// One short of the lowest charge-adjusted default valence, or a bare
/// charged atom two short (such as `[n+]` in pyridinium).
fn needs_double(mol: &Mol<Atom, Bond>, atom: NodeIndex) -> bool {
    let data = mol.atom(atom);
    let Some(elem) = Element::from_atomic_num(data.atomic_num) else {
        return false;
    };
    let used: u8 = mol
        .bonds_of(atom)
        .map(|e| mol.bond(e).order.valence_contribution().unwrap_or(1))
        .sum::<u8>()
        + data.hydrogen_count;

    let charge = i16::from(data.formal_charge);
    let target = elem
        .default_valences()
        .iter()
        .map(|&v| i16::from(v) + charge)
        .find(|&v| v > 0 && v >= i16::from(used));
    match target.map(|t| t - i16::from(used)) {
        Some(1) => true,
        Some(2) => data.hydrogen_count == 0 && data.formal_charge != 0,
        _ => false,
    }
}

struct Matching {
    /// Aromatic neighbours of each atom, with the connecting bond.
    adj: Vec<Vec<(NodeIndex, EdgeIndex)>>,
    needs_double: Vec<bool>,
    /// Matched partner and bond of each atom.
    partner: Vec<Option<(NodeIndex, EdgeIndex)>>,
}

impl Matching {
    fn new(mol: &Mol<Atom, Bond>, aromatic: &[EdgeIndex]) -> Self {
        let n = mol.atom_count();
        let mut adj = vec![Vec::new(); n];
        for &e in aromatic {
            if let Some((a, b)) = mol.bond_endpoints(e) {
                adj[a.index()].push((b, e));
                adj[b.index()].push((a, e));
            }
        }
        Self {
            adj,
            needs_double: vec![false; n],
            partner: vec![None; n],
        }
    }

    /// Breadth-first search for an alternating path from an unmatched
    /// `start` to another unmatched atom; flips it if found.
    fn augment(&mut self, start: NodeIndex) -> bool {
        let n = self.adj.len();
        let mut prev: Vec<Option<(NodeIndex, EdgeIndex)>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::from([start]);
        visited[start.index()] = true;

        while let Some(u) = queue.pop_front() {
            for &(v, e) in &self.adj[u.index()] {
                if !self.needs_double[v.index()] || visited[v.index()] {
                    continue;
                }
                visited[v.index()] = true;
                prev[v.index()] = Some((u, e));

                match self.partner[v.index()] {
                    None => {
                        flip(&mut self.partner, &prev, start, v);
                        return true;
                    }
                    Some((w, _)) if !visited[w.index()] => {
                        visited[w.index()] = true;
                        queue.push_back(w);
                    }
                    Some(_) => {}
                }
            }
        }
        false
    }

    fn matched_bonds(&self) -> Vec<EdgeIndex> {
        let mut bonds: Vec<EdgeIndex> = self.partner.iter().flatten().map(|&(_, e)| e).collect();
        bonds.sort();
        bonds.dedup();
        bonds
    }
}

/// Walk back from `end`, matching every other step of the path.
fn flip(
    partner: &mut [Option<(NodeIndex, EdgeIndex)>],
    prev: &[Option<(NodeIndex, EdgeIndex)>],
    start: NodeIndex,
    end: NodeIndex,
) {
    let mut cur = end;
    while cur != start {
        let Some((p, e)) = prev[cur.index()] else {
            return;
        };
        let next = partner[p.index()].map(|(q, _)| q);
        partner[cur.index()] = Some((p, e));
        partner[p.index()] = Some((cur, e));
        match next {
            Some(q) => cur = q,
            None => return,
        }
    }
}
