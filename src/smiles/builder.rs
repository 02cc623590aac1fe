use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::mol::Mol;
use crate::smiles::parse_tree::ParseTree;
use crate::smiles::tokenizer::{AtomToken, BondToken};

/// Lay the parse tree out as a molecule. Bonds between two aromatic atoms
/// without an explicit symbol, and every `:` bond, get the aromatic marker.
pub fn build_mol(tree: &ParseTree) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let nodes: Vec<NodeIndex> = tree
        .atoms
        .iter()
        .map(|tok| {
            mol.add_atom(Atom {
                atomic_num: tok.element.atomic_num(),
                formal_charge: tok.charge,
                hydrogen_count: tok.hcount.unwrap_or(0),
                is_aromatic: tok.is_aromatic,
            })
        })
        .collect();

    for edge in &tree.edges {
        let order = resolve_bond_order(
            edge.bond,
            tree.atoms[edge.a].is_aromatic,
            tree.atoms[edge.b].is_aromatic,
        );
        let bond = Bond {
            order,
            is_aromatic: order == BondOrder::Aromatic,
        };
        mol.add_bond(nodes[edge.a], nodes[edge.b], bond);
    }

    for (tok, &node) in tree.atoms.iter().zip(&nodes) {
        if tok.hcount.is_none() {
            mol.atom_mut(node).hydrogen_count = implicit_hydrogens(&mol, node, tok);
        }
    }

    mol
}

fn resolve_bond_order(bond: Option<BondToken>, from_aromatic: bool, to_aromatic: bool) -> BondOrder {
    match bond {
        Some(BondToken::Single) => BondOrder::Single,
        Some(BondToken::Double) => BondOrder::Double,
        Some(BondToken::Triple) => BondOrder::Triple,
        Some(BondToken::Aromatic) => BondOrder::Aromatic,
        None if from_aromatic && to_aromatic => BondOrder::Aromatic,
        None => BondOrder::Single,
    }
}

/// Organic-subset hydrogens: fill up to the lowest default valence that
/// covers the explicit bonds, counting each aromatic bond as one. An
/// aromatic atom gives up one of those hydrogens to its pi bond.
fn implicit_hydrogens(mol: &Mol<Atom, Bond>, node: NodeIndex, tok: &AtomToken) -> u8 {
    let used: u8 = mol
        .bonds_of(node)
        .map(|e| mol.bond(e).order.valence_contribution().unwrap_or(1))
        .sum();
    let Some(target) = tok
        .element
        .default_valences()
        .iter()
        .copied()
        .find(|&v| v >= used)
    else {
        return 0;
    };
    let h = target - used;
    if tok.is_aromatic {
        h.saturating_sub(1)
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_tree::build_parse_tree;
    use crate::smiles::tokenizer::tokenize;

    fn parse(s: &str) -> Mol<Atom, Bond> {
        let tokens = tokenize(s).unwrap();
        build_mol(&build_parse_tree(&tokens).unwrap())
    }

    fn hydrogens(mol: &Mol<Atom, Bond>) -> Vec<u8> {
        mol.atoms().map(|a| mol.atom(a).hydrogen_count).collect()
    }

    #[test]
    fn saturated_and_unsaturated() {
        assert_eq!(hydrogens(&parse("C")), vec![4]);
        assert_eq!(hydrogens(&parse("CC=O")), vec![3, 1, 0]);
        assert_eq!(hydrogens(&parse("C#N")), vec![1, 0]);
    }

    #[test]
    fn higher_valences() {
        assert_eq!(hydrogens(&parse("CS(=O)(=O)C")), vec![3, 0, 0, 0, 3]);
        assert_eq!(hydrogens(&parse("OP(=O)(O)O")), vec![1, 0, 0, 1, 1]);
    }

    #[test]
    fn bracket_hydrogens_are_explicit() {
        assert_eq!(hydrogens(&parse("[CH4]")), vec![4]);
        assert_eq!(hydrogens(&parse("[C]")), vec![0]);
        assert_eq!(hydrogens(&parse("[CH-]1C=CC=C1"))[0], 1);
    }

    #[test]
    fn aromatic_atoms() {
        let mol = parse("c1ccncc1");
        assert_eq!(hydrogens(&mol), vec![1, 1, 1, 0, 1, 1]);
        assert!(mol.atoms().all(|a| mol.atom(a).is_aromatic));
        assert!(mol
            .bonds()
            .all(|b| mol.bond(b).order == BondOrder::Aromatic && mol.bond(b).is_aromatic));
    }

    #[test]
    fn exocyclic_bond_on_aromatic_atom() {
        let mol = parse("O=c1ccc(=O)cc1");
        assert_eq!(hydrogens(&mol), vec![0, 0, 1, 1, 0, 0, 1, 1]);
        assert_eq!(mol.bond(petgraph::graph::EdgeIndex::new(0)).order, BondOrder::Double);
        assert!(!mol.bond(petgraph::graph::EdgeIndex::new(0)).is_aromatic);
    }

    #[test]
    fn explicit_single_between_aromatic_atoms() {
        let mol = parse("c1ccccc1-c1ccccc1");
        let single = mol
            .bonds()
            .filter(|&b| mol.bond(b).order == BondOrder::Single)
            .count();
        assert_eq!(single, 1);
    }
}
