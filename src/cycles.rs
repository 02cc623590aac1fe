//! Candidate ring sources for aromaticity perception.
//!
//! A [`RingSource`] turns a molecule into atom cycles; the engine resolves
//! each into a [`Ring`] and never looks at how it was found. [`Cycles`] is
//! the built-in family: a minimum cycle basis, the symmetrized relevant set,
//! or every simple cycle up to a ceiling.

use std::fmt;
use std::str::FromStr;

use petgraph::algo::has_path_connecting;
use petgraph::graph::{EdgeIndex, EdgeReference, NodeIndex};
use petgraph::visit::{EdgeFiltered, EdgeRef};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{AromaticityError, ConfigError};
use crate::mol::Mol;
use crate::rings::{sort_rings, RingInfo};

/// Ceiling on the number of simple cycles [`Cycles::All`] will enumerate
/// before giving up.
pub const DEFAULT_CYCLE_LIMIT: usize = 1024;

/// Produces the candidate rings of a molecule, each an ordered cycle of at
/// least three atoms.
pub trait RingSource {
    fn rings<A, B>(&self, mol: &Mol<A, B>) -> Result<Vec<Vec<NodeIndex>>, AromaticityError>;
}

/// A candidate ring resolved against its molecule: the cyclic atom sequence
/// and the bond closing each consecutive pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    atoms: Vec<NodeIndex>,
    bonds: Vec<EdgeIndex>,
}

impl Ring {
    pub fn resolve<A, B>(mol: &Mol<A, B>, atoms: Vec<NodeIndex>) -> Result<Self, AromaticityError> {
        if atoms.len() < 3 {
            return Err(AromaticityError::RingTooShort { len: atoms.len() });
        }
        if let Some(bad) = atoms.iter().find(|&&a| !mol.contains_atom(a)) {
            return Err(AromaticityError::UnknownAtom { atom: bad.index() });
        }
        let mut seen = vec![false; mol.atom_count()];
        for &a in &atoms {
            if std::mem::replace(&mut seen[a.index()], true) {
                return Err(AromaticityError::RepeatedAtom { atom: a.index() });
            }
        }
        let len = atoms.len();
        let bonds = (0..len)
            .map(|i| {
                let (a, b) = (atoms[i], atoms[(i + 1) % len]);
                mol.bond_between(a, b).ok_or(AromaticityError::MissingBond {
                    a: a.index(),
                    b: b.index(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { atoms, bonds })
    }

    pub fn atoms(&self) -> &[NodeIndex] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[EdgeIndex] {
        &self.bonds
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// Built-in ring sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Cycles {
    /// Smallest set of smallest rings (a minimum cycle basis). Misses
    /// perimeters of fused systems such as azulene.
    Sssr,
    /// SSSR plus every equivalent short cycle, including fused perimeters
    /// reachable from shortest paths.
    Relevant,
    /// Every simple cycle, optionally no longer than `max_len` atoms. Fails
    /// with [`AromaticityError::TooManyCycles`] past `limit` cycles.
    All {
        #[serde(default)]
        max_len: Option<usize>,
        #[serde(default = "default_limit")]
        limit: usize,
    },
    /// Use `primary`; if it passes its ceiling, use `fallback` instead.
    Or {
        primary: Box<Cycles>,
        fallback: Box<Cycles>,
    },
}

fn default_limit() -> usize {
    DEFAULT_CYCLE_LIMIT
}

impl Cycles {
    pub fn sssr() -> Self {
        Cycles::Sssr
    }

    pub fn relevant() -> Self {
        Cycles::Relevant
    }

    pub fn all() -> Self {
        Cycles::All {
            max_len: None,
            limit: DEFAULT_CYCLE_LIMIT,
        }
    }

    pub fn all_up_to(max_len: usize) -> Self {
        Cycles::All {
            max_len: Some(max_len),
            limit: DEFAULT_CYCLE_LIMIT,
        }
    }

    pub fn or(self, fallback: Cycles) -> Self {
        Cycles::Or {
            primary: Box::new(self),
            fallback: Box::new(fallback),
        }
    }
}

impl Default for Cycles {
    fn default() -> Self {
        Cycles::all()
    }
}

impl RingSource for Cycles {
    fn rings<A, B>(&self, mol: &Mol<A, B>) -> Result<Vec<Vec<NodeIndex>>, AromaticityError> {
        match self {
            Cycles::Sssr => Ok(RingInfo::sssr(mol).into_rings()),
            Cycles::Relevant => Ok(RingInfo::symmetrized_sssr(mol).into_rings()),
            Cycles::All { max_len, limit } => all_cycles(mol, *max_len, *limit),
            Cycles::Or { primary, fallback } => match primary.rings(mol) {
                Err(AromaticityError::TooManyCycles { limit }) => {
                    warn!(limit, fallback = %fallback, "cycle ceiling reached, falling back");
                    fallback.rings(mol)
                }
                other => other,
            },
        }
    }
}

impl fmt::Display for Cycles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cycles::Sssr => write!(f, "sssr"),
            Cycles::Relevant => write!(f, "relevant"),
            Cycles::All { max_len: None, .. } => write!(f, "all"),
            Cycles::All {
                max_len: Some(n), ..
            } => write!(f, "all({})", n),
            Cycles::Or { primary, fallback } => write!(f, "{} or {}", primary, fallback),
        }
    }
}

impl FromStr for Cycles {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sssr" | "mcb" => Ok(Cycles::Sssr),
            "relevant" => Ok(Cycles::Relevant),
            "all" => Ok(Cycles::all()),
            _ => Err(ConfigError::UnknownCycles(s.to_string())),
        }
    }
}

/// Which bonds lie on at least one cycle: a bond is cyclic iff its
/// endpoints stay connected once it is removed.
pub fn cyclic_bonds<A, B>(mol: &Mol<A, B>) -> Vec<bool> {
    let graph = mol.graph();
    mol.bonds()
        .map(|edge| {
            let Some((u, v)) = mol.bond_endpoints(edge) else {
                return false;
            };
            let without = EdgeFiltered::from_fn(graph, |e: EdgeReference<'_, B>| e.id() != edge);
            has_path_connecting(&without, u, v, None)
        })
        .collect()
}

fn all_cycles<A, B>(
    mol: &Mol<A, B>,
    max_len: Option<usize>,
    limit: usize,
) -> Result<Vec<Vec<NodeIndex>>, AromaticityError> {
    let n = mol.atom_count();
    let cyclic = cyclic_bonds(mol);
    let mut adj: Vec<Vec<NodeIndex>> = vec![vec![]; n];
    for edge in mol.bonds().filter(|e| cyclic[e.index()]) {
        if let Some((u, v)) = mol.bond_endpoints(edge) {
            adj[u.index()].push(v);
            adj[v.index()].push(u);
        }
    }

    let mut search = CycleSearch {
        adj: &adj,
        max_len: max_len.unwrap_or(n),
        limit,
        on_path: vec![false; n],
        path: Vec::new(),
        cursor: Vec::new(),
        found: Vec::new(),
    };
    for start in mol.atoms().filter(|a| adj[a.index()].len() >= 2) {
        search.run_from(start)?;
    }

    let mut found = search.found;
    sort_rings(&mut found);
    trace!(cycles = found.len(), "enumerated simple cycles");
    Ok(found)
}

/// Depth-first walk over paths whose atoms all have a larger index than
/// the start, so each cycle is rooted at its lowest atom. A cycle is kept
/// only in the orientation where its second atom is smaller than its last.
///
/// The walk keeps its own stack, so path length is bounded by memory rather
/// than by the thread's call stack.
struct CycleSearch<'a> {
    adj: &'a [Vec<NodeIndex>],
    max_len: usize,
    limit: usize,
    on_path: Vec<bool>,
    path: Vec<NodeIndex>,
    /// Next neighbour to try for each atom on `path`.
    cursor: Vec<usize>,
    found: Vec<Vec<NodeIndex>>,
}

impl CycleSearch<'_> {
    fn run_from(&mut self, start: NodeIndex) -> Result<(), AromaticityError> {
        let adj = self.adj;
        self.enter(start);
        while let Some(&cur) = self.path.last() {
            let depth = self.path.len() - 1;
            let Some(&next) = adj[cur.index()].get(self.cursor[depth]) else {
                self.leave();
                continue;
            };
            self.cursor[depth] += 1;

            if next == start {
                let closes = self.path.len() >= 3 && self.path[1] < cur;
                if closes {
                    if self.found.len() >= self.limit {
                        return Err(AromaticityError::TooManyCycles { limit: self.limit });
                    }
                    self.found.push(self.path.clone());
                }
                continue;
            }
            if next < start || self.on_path[next.index()] || self.path.len() >= self.max_len {
                continue;
            }
            self.enter(next);
        }
        Ok(())
    }

    fn enter(&mut self, atom: NodeIndex) {
        self.path.push(atom);
        self.cursor.push(0);
        self.on_path[atom.index()] = true;
    }

    fn leave(&mut self) {
        if let Some(atom) = self.path.pop() {
            self.on_path[atom.index()] = false;
        }
        self.cursor.pop();
    }
}
