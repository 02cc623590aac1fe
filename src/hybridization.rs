//! Hybridization perception: the atom-typing step that the classical
//! donation models expect to have run upstream.

use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};
use crate::valence::{free_electrons, total_degree};
use crate::wrappers::{Hybridization, WithHybridization};

fn has_multiple_bond<A, B: HasBondOrder>(mol: &Mol<A, B>, idx: NodeIndex) -> bool {
    mol.bonds_of(idx).any(|e| {
        matches!(
            mol.bond(e).bond_order(),
            BondOrder::Double | BondOrder::Triple | BondOrder::Aromatic
        )
    })
}

/// True if the atom sits next to a pi system it could donate a lone pair
/// into, as the oxygen of furan or the nitrogen of pyrrole does.
fn adjacent_to_pi<A, B: HasBondOrder>(mol: &Mol<A, B>, idx: NodeIndex) -> bool {
    mol.neighbors(idx).any(|nb| has_multiple_bond(mol, nb))
}

/// Steric number (sigma bonds plus lone pairs plus radicals) mapped onto a
/// hybridization state. Lone-pair bearing atoms with at most three sigma
/// partners next to a pi system are planar, hence `SP2`.
pub fn assign_hybridization_atom<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> Hybridization
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let degree = total_degree(mol, idx) as i16;
    let free = match free_electrons(mol, idx) {
        Some(f) => f as i16,
        None => return Hybridization::Other,
    };
    let lone_pairs = free / 2;
    let radicals = free % 2;

    match degree + lone_pairs + radicals {
        i16::MIN..=1 => Hybridization::S,
        2 => Hybridization::SP,
        3 => Hybridization::SP2,
        4 => {
            if degree <= 3 && lone_pairs > 0 && adjacent_to_pi(mol, idx) {
                Hybridization::SP2
            } else {
                Hybridization::SP3
            }
        }
        5 => Hybridization::SP3D,
        6 => Hybridization::SP3D2,
        _ => Hybridization::Other,
    }
}

pub fn assign_hybridization<A, B>(mol: &Mol<A, B>) -> Vec<Hybridization>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    mol.atoms()
        .map(|idx| assign_hybridization_atom(mol, idx))
        .collect()
}

/// Type every atom, returning a molecule whose atoms carry their
/// hybridization. Indices are preserved.
pub fn perceive_hybridization<A, B>(mol: &Mol<A, B>) -> Mol<WithHybridization<A>, B>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + Clone,
    B: HasBondOrder + Clone,
{
    let states = assign_hybridization(mol);
    mol.map_atoms(|idx, atom| WithHybridization {
        inner: atom.clone(),
        hybridization: states[idx.index()],
    })
}
