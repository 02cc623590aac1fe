use petgraph::graph::NodeIndex;

use crate::element::Element;
use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};

/// Sum of bond orders plus implicit hydrogens.
///
/// Returns `None` if any incident bond still carries the aromatic marker,
/// since its integral order is unknown until the molecule is kekulized.
pub fn total_valence<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> Option<u8>
where
    A: HasHydrogenCount,
    B: HasBondOrder,
{
    let mut sum = mol.atom(atom).hydrogen_count();
    for ei in mol.bonds_of(atom) {
        sum = sum.saturating_add(mol.bond(ei).bond_order().valence_contribution()?);
    }
    Some(sum)
}

/// Neighbors plus implicit hydrogens.
pub fn total_degree<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> u8
where
    A: HasHydrogenCount,
{
    (mol.neighbors(atom).count() as u8).saturating_add(mol.atom(atom).hydrogen_count())
}

/// Non-bonding electrons left on the atom: outer shell minus bonding
/// electrons minus formal charge. `None` for unknown elements, unknown
/// valence, or an over-bonded atom.
pub fn free_electrons<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> Option<u8>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let a = mol.atom(atom);
    let elem = Element::from_atomic_num(a.atomic_num())?;
    let valence = total_valence(mol, atom)? as i16;
    let free = elem.outer_electrons() as i16 - valence - a.formal_charge() as i16;
    u8::try_from(free).ok()
}

pub fn lone_pairs<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> Option<u8>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    free_electrons(mol, atom).map(|e| e / 2)
}

/// Whether `valence` is one the element normally adopts at `charge`.
///
/// Charge shifts the valence the way it shifts the electron count: a cation
/// of N, O or S gains a bond (pyridinium, pyrylium), an anion loses one,
/// and carbon loses a bond either way. Boron gains a bond as an anion.
pub fn is_normal_valence(elem: Element, charge: i8, valence: u8) -> bool {
    let charge = charge as i16;
    elem.default_valences().iter().any(|&v| {
        let expected = match elem.outer_electrons() {
            4 => v as i16 - charge.abs(),
            n if n < 4 => v as i16 - charge,
            _ => v as i16 + charge,
        };
        expected == valence as i16
    })
}
