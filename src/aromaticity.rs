use std::collections::BTreeSet;

use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::{debug, trace};

use crate::config::AromaticityConfig;
use crate::cycles::{Cycles, Ring, RingSource};
use crate::donation::{Contribution, DonationContext, ElectronDonation};
use crate::error::{AromaticityError, ConfigError};
use crate::mol::Mol;
use crate::traits::{
    HasAtomicNum, HasBondOrder, HasFormalCharge, HasHybridization, HasHydrogenCount,
    SetAromaticity,
};

/// Hückel's rule: a cyclic pi system is aromatic with `4n + 2` electrons.
/// Zero electrons is never aromatic.
pub fn valid_sum(electrons: i32) -> bool {
    electrons > 0 && electrons % 4 == 2
}

/// Total pi electrons of a ring, or 0 if any contribution is undefined or
/// negative. Zero always fails [`valid_sum`], so a single unscorable atom
/// rejects the ring.
///
/// ```
/// use aromacrab::electron_sum;
///
/// assert_eq!(electron_sum([1, 1, 1, 1]), 4);
/// assert_eq!(electron_sum([1, 1, -1, 1]), 0);
/// assert_eq!(electron_sum([Some(2), None, Some(1)]), 0);
/// ```
pub fn electron_sum<I>(contributions: I) -> i32
where
    I: IntoIterator,
    I::Item: Into<Option<i32>>,
{
    let mut sum = 0i32;
    for c in contributions {
        match c.into() {
            Some(n) if n >= 0 => sum = sum.saturating_add(n),
            _ => return 0,
        }
    }
    sum
}

/// Aromaticity perception: an electron donation model paired with a source
/// of candidate rings.
///
/// The engine is an immutable value holding no per-molecule state; one
/// instance can serve any number of molecules, from any number of threads.
///
/// A ring is aromatic if every atom in it has a defined contribution under
/// the model and the contributions sum to `4n + 2`. A bond (or atom) is
/// aromatic if it belongs to at least one aromatic ring, so fused systems
/// are found through whichever candidate rings pass, including perimeter
/// rings such as the 10-cycle of azulene.
///
/// # Examples
///
/// ```
/// use aromacrab::{from_smiles, Aromaticity, Cycles, ElectronDonation};
///
/// let furan = from_smiles("C1=CC=CO1").unwrap();
/// let daylight = Aromaticity::new(ElectronDonation::Daylight, Cycles::all());
/// assert_eq!(daylight.find_bonds(&furan).unwrap().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aromaticity<R = Cycles> {
    model: ElectronDonation,
    cycles: R,
}

impl Aromaticity<Cycles> {
    /// Build from a model name and a cycle finder name, e.g.
    /// `("daylight", "all")`.
    pub fn from_names(model: &str, cycles: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(model.parse()?, cycles.parse()?))
    }

    pub fn from_config(config: &AromaticityConfig) -> Self {
        Self::new(config.model, config.cycles.clone())
    }
}

impl<R: RingSource> Aromaticity<R> {
    pub fn new(model: ElectronDonation, cycles: R) -> Self {
        Self { model, cycles }
    }

    pub fn model(&self) -> ElectronDonation {
        self.model
    }

    pub fn cycles(&self) -> &R {
        &self.cycles
    }

    /// Bonds belonging to at least one aromatic ring. Does not touch any
    /// aromaticity flag.
    ///
    /// Fails only if the ring source does: an unknown atom, a ring step
    /// with no bond, a ring shorter than three atoms, or too many cycles.
    pub fn find_bonds<A, B>(&self, mol: &Mol<A, B>) -> Result<BTreeSet<EdgeIndex>, AromaticityError>
    where
        A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasHybridization,
        B: HasBondOrder,
    {
        let rings = self
            .cycles
            .rings(mol)?
            .into_iter()
            .map(|atoms| Ring::resolve(mol, atoms))
            .collect::<Result<Vec<_>, _>>()?;

        let mut bonds = BTreeSet::new();
        if !rings.is_empty() {
            let mut validator = RingValidator::new(mol, self.model);
            for ring in &rings {
                if validator.is_aromatic(ring) {
                    bonds.extend(ring.bonds().iter().copied());
                }
            }
        }

        debug!(
            model = %self.model,
            rings = rings.len(),
            aromatic_bonds = bonds.len(),
            "aromaticity perceived"
        );
        Ok(bonds)
    }

    /// Atoms belonging to at least one aromatic ring.
    pub fn find_atoms<A, B>(&self, mol: &Mol<A, B>) -> Result<BTreeSet<NodeIndex>, AromaticityError>
    where
        A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasHybridization,
        B: HasBondOrder,
    {
        let bonds = self.find_bonds(mol)?;
        Ok(bonds
            .iter()
            .filter_map(|&e| mol.bond_endpoints(e))
            .flat_map(|(a, b)| [a, b])
            .collect())
    }

    /// Replace every aromaticity flag in the molecule with this engine's
    /// verdict. Returns whether anything is aromatic.
    ///
    /// All flags are cleared first, so the result depends only on this call,
    /// never on earlier ones. On error the molecule is left untouched.
    pub fn apply<A, B>(&self, mol: &mut Mol<A, B>) -> Result<bool, AromaticityError>
    where
        A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasHybridization + SetAromaticity,
        B: HasBondOrder + SetAromaticity,
    {
        let aromatic = self.find_bonds(mol)?;

        let atoms: Vec<NodeIndex> = mol.atoms().collect();
        let bonds: Vec<EdgeIndex> = mol.bonds().collect();
        for idx in atoms {
            mol.atom_mut(idx).set_aromatic(false);
        }
        for idx in bonds {
            mol.bond_mut(idx).set_aromatic(false);
        }

        for &edge in &aromatic {
            mol.bond_mut(edge).set_aromatic(true);
            if let Some((a, b)) = mol.bond_endpoints(edge) {
                mol.atom_mut(a).set_aromatic(true);
                mol.atom_mut(b).set_aromatic(true);
            }
        }

        Ok(!aromatic.is_empty())
    }
}

/// Checks candidate rings of one molecule, scoring each atom at most once.
struct RingValidator<'m, A, B> {
    mol: &'m Mol<A, B>,
    model: ElectronDonation,
    ctx: DonationContext,
    memo: Vec<Option<Contribution>>,
}

impl<'m, A, B> RingValidator<'m, A, B>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasHybridization,
    B: HasBondOrder,
{
    fn new(mol: &'m Mol<A, B>, model: ElectronDonation) -> Self {
        Self {
            mol,
            model,
            ctx: DonationContext::new(mol),
            memo: vec![None; mol.atom_count()],
        }
    }

    fn contribution(&mut self, atom: NodeIndex) -> Contribution {
        if let Some(c) = self.memo[atom.index()] {
            return c;
        }
        let c = self.model.contribution(self.mol, atom, &self.ctx);
        self.memo[atom.index()] = Some(c);
        c
    }

    fn is_aromatic(&mut self, ring: &Ring) -> bool {
        let contributions: Vec<Contribution> =
            ring.atoms().iter().map(|&a| self.contribution(a)).collect();
        let electrons = electron_sum(contributions);
        let valid = valid_sum(electrons);
        trace!(size = ring.len(), electrons, valid, "ring checked");
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::{Bond, BondOrder};
    use crate::hybridization::perceive_hybridization;
    use crate::smiles::from_smiles;
    use crate::traits::HasAromaticity;

    fn classical() -> Aromaticity {
        Aromaticity::new(ElectronDonation::Classical, Cycles::all())
    }

    fn daylight() -> Aromaticity {
        Aromaticity::new(ElectronDonation::Daylight, Cycles::all())
    }

    fn typed_bonds(engine: &Aromaticity, smiles: &str) -> usize {
        let mol = perceive_hybridization(&from_smiles(smiles).unwrap());
        engine.find_bonds(&mol).unwrap().len()
    }

    fn bonds(engine: &Aromaticity, smiles: &str) -> usize {
        let mol = from_smiles(smiles).unwrap();
        engine.find_bonds(&mol).unwrap().len()
    }

    #[test]
    fn huckel_rule() {
        for n in [2, 6, 10, 14, 18] {
            assert!(valid_sum(n), "{} should be aromatic", n);
        }
        for n in [4, 8, 12, 16, 20] {
            assert!(!valid_sum(n), "{} is anti-aromatic", n);
        }
        for n in [0, 1, 3, 5, 7, 9, 11, 13, 15, -2, -6] {
            assert!(!valid_sum(n), "{} should not be aromatic", n);
        }
    }

    #[test]
    fn electron_sum_of_defined() {
        assert_eq!(electron_sum([1, 1, 1, 1]), 4);
        assert_eq!(electron_sum([2, 1, 1, 1, 1]), 6);
        assert_eq!(electron_sum(Vec::<i32>::new()), 0);
    }

    #[test]
    fn electron_sum_rejects_negative_and_undefined() {
        assert_eq!(electron_sum([1, 1, -1, 1]), 0);
        assert_eq!(electron_sum([Some(1), None, Some(1)]), 0);
        assert_eq!(
            electron_sum([Contribution::Electrons(2), Contribution::Undefined]),
            0
        );
    }

    #[test]
    fn benzene() {
        assert_eq!(typed_bonds(&classical(), "C1=CC=CC=C1"), 6);
        assert_eq!(bonds(&daylight(), "C1=CC=CC=C1"), 6);
    }

    #[test]
    fn furan() {
        assert_eq!(typed_bonds(&classical(), "C1=CC=CO1"), 5);
        assert_eq!(bonds(&daylight(), "C1=CC=CO1"), 5);
    }

    #[test]
    fn quinone() {
        let exo = Aromaticity::new(ElectronDonation::ClassicalExocyclic, Cycles::all());
        assert_eq!(typed_bonds(&classical(), "O=C1C=CC(=O)C=C1"), 0);
        assert_eq!(typed_bonds(&exo, "O=C1C=CC(=O)C=C1"), 6);
        assert_eq!(bonds(&daylight(), "O=C1C=CC(=O)C=C1"), 0);
    }

    #[test]
    fn azulene_perimeter() {
        assert_eq!(typed_bonds(&classical(), "C1=CC2=CC=CC=CC2=C1"), 10);
        assert_eq!(bonds(&daylight(), "C1=CC2=CC=CC=CC2=C1"), 10);
    }

    #[test]
    fn azulene_needs_perimeter_candidate() {
        let sssr = Aromaticity::new(ElectronDonation::Daylight, Cycles::sssr());
        assert_eq!(bonds(&sssr, "C1=CC2=CC=CC=CC2=C1"), 0);
    }

    #[test]
    fn naphthalene_includes_fusion_bond() {
        assert_eq!(bonds(&daylight(), "c1ccc2ccccc2c1"), 11);
    }

    #[test]
    fn heteroaromatics() {
        assert_eq!(bonds(&daylight(), "c1ccncc1"), 6);
        assert_eq!(bonds(&daylight(), "c1cc[nH]c1"), 5);
        assert_eq!(bonds(&daylight(), "c1ccsc1"), 5);
        assert_eq!(typed_bonds(&classical(), "c1cc[nH]c1"), 5);
    }

    #[test]
    fn charged_rings() {
        assert_eq!(bonds(&daylight(), "[cH-]1cccc1"), 5);
        assert_eq!(bonds(&daylight(), "[cH+]1cccccc1"), 7);
        assert_eq!(typed_bonds(&classical(), "[cH+]1cccccc1"), 7);
    }

    #[test]
    fn non_aromatic_rings() {
        assert_eq!(bonds(&daylight(), "C1CCCCC1"), 0);
        assert_eq!(bonds(&daylight(), "C1=CCC=C1"), 0);
        assert_eq!(bonds(&daylight(), "C1=CC=CC=CC=C1"), 0);
        assert_eq!(bonds(&daylight(), "CCCC"), 0);
    }

    #[test]
    fn phenol_oxygen_not_aromatic() {
        let mol = from_smiles("Oc1ccccc1").unwrap();
        let atoms = daylight().find_atoms(&mol).unwrap();
        assert_eq!(atoms.len(), 6);
        assert!(!atoms.contains(&NodeIndex::new(0)));
    }

    #[test]
    fn find_bonds_leaves_flags_alone() {
        let mol = from_smiles("c1ccc1").unwrap();
        assert!(daylight().find_bonds(&mol).unwrap().is_empty());
        assert!(mol.atoms().all(|a| mol.atom(a).is_aromatic()));
    }

    #[test]
    fn apply_on_kekulized_benzene() {
        let mut mol = Mol::new();
        let atoms: Vec<_> = (0..6)
            .map(|_| {
                mol.add_atom(Atom {
                    atomic_num: 6,
                    hydrogen_count: 1,
                    ..Atom::default()
                })
            })
            .collect();
        for i in 0..6 {
            let order = if i % 2 == 0 {
                BondOrder::Double
            } else {
                BondOrder::Single
            };
            mol.add_bond(atoms[i], atoms[(i + 1) % 6], Bond::new(order));
        }

        assert!(daylight().apply(&mut mol).unwrap());
        for idx in mol.atoms() {
            assert!(mol.atom(idx).is_aromatic, "atom {} should be aromatic", idx.index());
        }
        for idx in mol.bonds() {
            assert!(mol.bond(idx).is_aromatic);
        }
    }

    #[test]
    fn apply_clears_stale_flags() {
        let mut mol = from_smiles("c1ccc1").unwrap();
        assert!(!daylight().apply(&mut mol).unwrap());
        assert!(mol.atoms().all(|a| !mol.atom(a).is_aromatic));
        assert!(mol.bonds().all(|b| !mol.bond(b).is_aromatic));
    }

    #[test]
    fn from_names() {
        let engine = Aromaticity::from_names("daylight", "sssr").unwrap();
        assert_eq!(engine.model(), ElectronDonation::Daylight);
        assert_eq!(engine.cycles(), &Cycles::Sssr);
        assert_eq!(
            Aromaticity::from_names("huckel", "all"),
            Err(ConfigError::UnknownModel("huckel".into()))
        );
        assert_eq!(
            Aromaticity::from_names("daylight", "every"),
            Err(ConfigError::UnknownCycles("every".into()))
        );
    }

    #[test]
    fn default_engine() {
        let engine: Aromaticity = Aromaticity::default();
        assert_eq!(engine.model(), ElectronDonation::Classical);
        assert_eq!(engine.cycles(), &Cycles::all());
    }
}
