use std::collections::BTreeSet;

use aromacrab::{
    from_smiles, parse_smiles, perceive_hybridization, Aromaticity, AromaticityConfig,
    AromaticityError, Atom, Bond, Cycles, ElectronDonation, HasAromaticity, Mol, RingSource,
};
use petgraph::graph::{EdgeIndex, NodeIndex};

/// Hands back fixed atom cycles regardless of the molecule.
struct Fixed(Vec<Vec<usize>>);

impl RingSource for Fixed {
    fn rings<A, B>(&self, _mol: &Mol<A, B>) -> Result<Vec<Vec<NodeIndex>>, AromaticityError> {
        Ok(self
            .0
            .iter()
            .map(|ring| ring.iter().map(|&i| NodeIndex::new(i)).collect())
            .collect())
    }
}

fn flags(mol: &Mol<Atom, Bond>) -> (Vec<bool>, Vec<bool>) {
    (
        mol.atoms().map(|a| mol.atom(a).is_aromatic).collect(),
        mol.bonds().map(|b| mol.bond(b).is_aromatic).collect(),
    )
}

fn daylight() -> Aromaticity {
    Aromaticity::new(ElectronDonation::Daylight, Cycles::all())
}

#[test]
fn classical_benzene_and_furan() {
    let engine = Aromaticity::new(ElectronDonation::Classical, Cycles::all());
    let benzene = perceive_hybridization(&from_smiles("C1=CC=CC=C1").unwrap());
    let furan = perceive_hybridization(&from_smiles("C1=CC=CO1").unwrap());
    assert_eq!(engine.find_bonds(&benzene).unwrap().len(), 6);
    assert_eq!(engine.find_bonds(&furan).unwrap().len(), 5);
}

#[test]
fn quinone_depends_on_exocyclic_rule() {
    let mol = perceive_hybridization(&from_smiles("O=C1C=CC(=O)C=C1").unwrap());
    let classical = Aromaticity::new(ElectronDonation::Classical, Cycles::all());
    let exocyclic = Aromaticity::new(ElectronDonation::ClassicalExocyclic, Cycles::all());
    assert!(classical.find_bonds(&mol).unwrap().is_empty());
    assert_eq!(exocyclic.find_bonds(&mol).unwrap().len(), 6);
    assert!(daylight().find_bonds(&mol).unwrap().is_empty());
}

#[test]
fn azulene_via_perimeter() {
    let mol = from_smiles("C1=CC2=CC=CC=CC2=C1").unwrap();
    let bonds = daylight().find_bonds(&mol).unwrap();
    assert_eq!(bonds.len(), 10);
    let fusion = mol
        .bond_between(NodeIndex::new(2), NodeIndex::new(8))
        .unwrap();
    assert!(!bonds.contains(&fusion));
}

#[test]
fn lone_pair_model_accepts_pyridones() {
    let oxypyridinide = from_smiles("O=C1C=C[N-]C=C1").unwrap();
    let pyridone = from_smiles("O=C1NC=CC=C1").unwrap();
    assert_eq!(daylight().find_bonds(&oxypyridinide).unwrap().len(), 6);
    assert_eq!(daylight().find_bonds(&pyridone).unwrap().len(), 6);

    for model in [ElectronDonation::Classical, ElectronDonation::ClassicalExocyclic] {
        let engine = Aromaticity::new(model, Cycles::all());
        let typed = perceive_hybridization(&oxypyridinide);
        assert!(engine.find_bonds(&typed).unwrap().is_empty(), "{}", model);
    }
}

#[test]
fn cyclobutadiene_flags_cleared() {
    let mut mol = from_smiles("c1ccc1").unwrap();
    assert!(mol.atoms().all(|a| mol.atom(a).is_aromatic));
    assert!(!daylight().apply(&mut mol).unwrap());
    let (atoms, bonds) = flags(&mol);
    assert!(atoms.iter().all(|&f| !f));
    assert!(bonds.iter().all(|&f| !f));
}

#[test]
fn aromatic_quinone_input_flags_cleared() {
    let mut mol = from_smiles("O=c1ccc(=O)cc1").unwrap();
    assert!(!daylight().apply(&mut mol).unwrap());
    let (atoms, bonds) = flags(&mol);
    assert!(atoms.iter().all(|&f| !f));
    assert!(bonds.iter().all(|&f| !f));
}

#[test]
fn apply_matches_find_bonds() {
    let mut mol = from_smiles("Oc1ccc2ccccc2c1CC=C").unwrap();
    let engine = daylight();
    let bonds = engine.find_bonds(&mol).unwrap();
    let atoms = engine.find_atoms(&mol).unwrap();
    assert!(engine.apply(&mut mol).unwrap());

    let flagged: BTreeSet<EdgeIndex> = mol.bonds().filter(|&b| mol.bond(b).is_aromatic).collect();
    assert_eq!(flagged, bonds);
    let flagged: BTreeSet<NodeIndex> = mol.atoms().filter(|&a| mol.atom(a).is_aromatic).collect();
    assert_eq!(flagged, atoms);
    assert_eq!(atoms.len(), 10);
}

#[test]
fn apply_is_idempotent() {
    let mut mol = from_smiles("c1ccc2[nH]ccc2c1").unwrap();
    let engine = daylight();
    engine.apply(&mut mol).unwrap();
    let first = flags(&mol);
    engine.apply(&mut mol).unwrap();
    assert_eq!(flags(&mol), first);
}

#[test]
fn apply_ignores_previous_flags() {
    let mut stale = from_smiles("C1CCCCC1").unwrap();
    for a in stale.atoms().collect::<Vec<_>>() {
        stale.atom_mut(a).is_aromatic = true;
    }
    for b in stale.bonds().collect::<Vec<_>>() {
        stale.bond_mut(b).is_aromatic = true;
    }
    assert!(!daylight().apply(&mut stale).unwrap());
    let (atoms, bonds) = flags(&stale);
    assert!(atoms.iter().chain(&bonds).all(|&f| !f));
}

#[test]
fn one_engine_many_threads() {
    let engine = daylight();
    let inputs = ["c1ccccc1", "c1ccc2ccccc2c1", "C1=CC2=CC=CC=CC2=C1", "C1CCCCC1"];
    let expected = [6, 11, 10, 0];
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|smiles| {
                let engine = &engine;
                scope.spawn(move || {
                    let mol = from_smiles(smiles).unwrap();
                    engine.find_bonds(&mol).unwrap().len()
                })
            })
            .collect();
        for (handle, want) in handles.into_iter().zip(expected) {
            assert_eq!(handle.join().unwrap(), want);
        }
    });
}

#[test]
fn empty_candidate_set() {
    let mut mol = from_smiles("c1ccccc1").unwrap();
    let engine = Aromaticity::new(ElectronDonation::Daylight, Fixed(vec![]));
    assert!(engine.find_bonds(&mol).unwrap().is_empty());
    assert!(!engine.apply(&mut mol).unwrap());
    assert!(mol.atoms().all(|a| !mol.atom(a).is_aromatic()));
}

#[test]
fn custom_ring_source_is_used() {
    let mol = from_smiles("c1ccccc1").unwrap();
    let engine = Aromaticity::new(ElectronDonation::Daylight, Fixed(vec![vec![0, 1, 2, 3, 4, 5]]));
    assert_eq!(engine.find_bonds(&mol).unwrap().len(), 6);
}

#[test]
fn malformed_ring_leaves_molecule_untouched() {
    let mut mol = from_smiles("c1ccccc1").unwrap();
    let before = mol.clone();

    let skipping = Aromaticity::new(ElectronDonation::Daylight, Fixed(vec![vec![0, 2, 4]]));
    assert_eq!(
        skipping.apply(&mut mol),
        Err(AromaticityError::MissingBond { a: 0, b: 2 })
    );
    assert_eq!(mol, before);

    let unknown = Aromaticity::new(ElectronDonation::Daylight, Fixed(vec![vec![0, 1, 42]]));
    assert_eq!(
        unknown.find_bonds(&mol),
        Err(AromaticityError::UnknownAtom { atom: 42 })
    );

    let short = Aromaticity::new(ElectronDonation::Daylight, Fixed(vec![vec![0, 1]]));
    assert_eq!(
        short.apply(&mut mol),
        Err(AromaticityError::RingTooShort { len: 2 })
    );
    assert_eq!(mol, before);

    let mut cot = from_smiles("C1=CC=CC=CC=C1").unwrap();
    let untouched = cot.clone();
    let backtracking = Aromaticity::new(
        ElectronDonation::Daylight,
        Fixed(vec![vec![0, 1, 2, 3, 2, 1]]),
    );
    assert_eq!(
        backtracking.apply(&mut cot),
        Err(AromaticityError::RepeatedAtom { atom: 2 })
    );
    assert_eq!(cot, untouched);
}

#[test]
fn cycle_ceiling_error_and_fallback() {
    let mol = from_smiles("c1ccc2ccccc2c1").unwrap();
    let tight = Cycles::All {
        max_len: None,
        limit: 1,
    };
    let failing = Aromaticity::new(ElectronDonation::Daylight, tight.clone());
    assert_eq!(
        failing.find_bonds(&mol),
        Err(AromaticityError::TooManyCycles { limit: 1 })
    );

    let fallback = Aromaticity::new(ElectronDonation::Daylight, tight.or(Cycles::relevant()));
    assert_eq!(fallback.find_bonds(&mol).unwrap().len(), 11);
}

#[test]
fn configured_engine() {
    let config: AromaticityConfig =
        serde_json::from_str(r#"{ "model": "lone-pair", "cycles": { "kind": "relevant" } }"#)
            .unwrap();
    let engine = Aromaticity::from_config(&config);
    assert_eq!(engine.cycles(), &Cycles::Relevant);

    let named = Aromaticity::from_names("daylight", "relevant").unwrap();
    assert_eq!(engine, named);

    let mol = from_smiles("c1ccc2ccccc2c1").unwrap();
    assert_eq!(engine.find_bonds(&mol).unwrap().len(), 11);
}

#[test]
fn unkekulized_input_is_not_aromatic() {
    let mol = parse_smiles("c1ccccc1").unwrap();
    assert!(daylight().find_bonds(&mol).unwrap().is_empty());
}

#[test]
fn later_engine_replaces_earlier_result() {
    let mut mol = perceive_hybridization(&from_smiles("O=C1C=CC(=O)C=C1").unwrap());
    let exocyclic = Aromaticity::new(ElectronDonation::ClassicalExocyclic, Cycles::all());
    let classical = Aromaticity::new(ElectronDonation::Classical, Cycles::all());

    assert!(exocyclic.apply(&mut mol).unwrap());
    assert_eq!(mol.bonds().filter(|&b| mol.bond(b).is_aromatic()).count(), 6);

    assert!(!classical.apply(&mut mol).unwrap());
    assert!(mol.bonds().all(|b| !mol.bond(b).is_aromatic()));
    assert!(mol.atoms().all(|a| !mol.atom(a).is_aromatic()));
}

#[test]
fn shared_molecule_read_from_many_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Aromaticity>();

    let mol = from_smiles("c1ccc2[nH]ccc2c1").unwrap();
    let engine = daylight();
    let expected = engine.find_bonds(&mol).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.find_bonds(&mol).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
