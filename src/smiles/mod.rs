//! SMILES reader.
//!
//! Covers the organic subset, bracket atoms (isotope, chirality and atom
//! class are accepted and dropped), branches, ring closures including `%nn`,
//! and `.` separated components. Directional bonds read as single bonds.
//!
//! [`parse_smiles`] keeps lowercase atoms as written: aromatic flags set and
//! bonds between them carrying [`BondOrder::Aromatic`](crate::BondOrder).
//! [`from_smiles`] also kekulizes, which is the form the donation models
//! score.

mod builder;
pub mod error;
mod parse_tree;
mod tokenizer;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::kekulize::kekulize;
use crate::mol::Mol;
pub use error::SmilesError;

pub fn parse_smiles(s: &str) -> Result<Mol<Atom, Bond>, SmilesError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SmilesError::EmptyInput);
    }
    let tokens = tokenizer::tokenize(trimmed)?;
    let tree = parse_tree::build_parse_tree(&tokens)?;
    Ok(builder::build_mol(&tree))
}

/// Parse and kekulize. Aromatic flags from lowercase atoms survive, but
/// every bond gets a concrete single or double order.
///
/// ```
/// use aromacrab::{from_smiles, BondOrder};
///
/// let benzene = from_smiles("c1ccccc1").unwrap();
/// let doubles = benzene
///     .bonds()
///     .filter(|&b| benzene.bond(b).order == BondOrder::Double)
///     .count();
/// assert_eq!(doubles, 3);
/// ```
pub fn from_smiles(s: &str) -> Result<Mol<Atom, Bond>, SmilesError> {
    let mol = parse_smiles(s)?;
    Ok(kekulize(mol)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondOrder;
    use crate::kekulize::KekulizeError;
    use petgraph::graph::NodeIndex;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_smiles("").unwrap_err(), SmilesError::EmptyInput);
        assert_eq!(parse_smiles("  \n").unwrap_err(), SmilesError::EmptyInput);
    }

    #[test]
    fn ethanol() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.atom(n(2)).atomic_num, 8);
        assert_eq!(mol.atom(n(2)).hydrogen_count, 1);
    }

    #[test]
    fn pyrrole_nitrogen() {
        let mol = from_smiles("C1=CC=CN1").unwrap();
        assert_eq!(mol.atom(n(4)).atomic_num, 7);
        assert_eq!(mol.atom(n(4)).hydrogen_count, 1);

        let aromatic = from_smiles("c1cc[nH]c1").unwrap();
        assert_eq!(aromatic.atom(n(3)).hydrogen_count, 1);
        assert!(aromatic.atom(n(3)).is_aromatic);
    }

    #[test]
    fn charged_bracket_atoms() {
        let mol = parse_smiles("O=C1C=C[N-]C=C1").unwrap();
        assert_eq!(mol.atom(n(4)).formal_charge, -1);
        assert_eq!(mol.atom(n(4)).hydrogen_count, 0);
    }

    #[test]
    fn from_smiles_keeps_flags() {
        let mol = from_smiles("c1ccoc1").unwrap();
        assert!(mol.atoms().all(|a| mol.atom(a).is_aromatic));
        assert!(mol.bonds().all(|b| mol.bond(b).is_aromatic));
        assert!(mol
            .bonds()
            .all(|b| mol.bond(b).order != BondOrder::Aromatic));
    }

    #[test]
    fn kekulize_failure_surfaces() {
        assert!(matches!(
            from_smiles("c1cccc1"),
            Err(SmilesError::Kekulize(KekulizeError::Unkekulizable(_)))
        ));
    }
}
