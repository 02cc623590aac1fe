//! Electron donation models: how many pi electrons a ring atom contributes.
//!
//! Every model is a pure function of the molecule's structure. Aromatic
//! flags are never consulted, so scoring is unaffected by a previous
//! [`apply`](crate::Aromaticity::apply). Atoms a model cannot place in a
//! conjugated ring score [`Contribution::Undefined`], which rejects every
//! candidate ring containing them.

use std::fmt;
use std::str::FromStr;

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::bond::BondOrder;
use crate::cycles::cyclic_bonds;
use crate::element::Element;
use crate::error::ConfigError;
use crate::mol::Mol;
use crate::traits::{
    HasAtomicNum, HasBondOrder, HasFormalCharge, HasHybridization, HasHydrogenCount,
};
use crate::valence::{is_normal_valence, lone_pairs, total_degree, total_valence};
use crate::wrappers::Hybridization;

/// Pi electrons an atom donates to a ring, or `Undefined` if it cannot take
/// part in one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contribution {
    Electrons(u8),
    Undefined,
}

impl Contribution {
    pub fn electrons(self) -> Option<u8> {
        match self {
            Contribution::Electrons(n) => Some(n),
            Contribution::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Contribution::Electrons(_))
    }
}

impl From<Option<u8>> for Contribution {
    fn from(value: Option<u8>) -> Self {
        value.map_or(Contribution::Undefined, Contribution::Electrons)
    }
}

impl From<Contribution> for Option<i32> {
    fn from(value: Contribution) -> Self {
        value.electrons().map(i32::from)
    }
}

/// Structural facts shared by every atom of one molecule.
#[derive(Debug, Clone)]
pub struct DonationContext {
    cyclic: Vec<bool>,
}

impl DonationContext {
    pub fn new<A, B>(mol: &Mol<A, B>) -> Self {
        Self {
            cyclic: cyclic_bonds(mol),
        }
    }

    pub fn is_cyclic(&self, bond: EdgeIndex) -> bool {
        self.cyclic.get(bond.index()).copied().unwrap_or(false)
    }
}

/// Electron counting convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElectronDonation {
    /// Atom-type model. Needs perceived hybridization; only `SP2` atoms
    /// donate, and a ring atom whose double bond leaves the ring is
    /// rejected.
    #[default]
    Classical,
    /// As [`Classical`](Self::Classical), but an atom with an exocyclic
    /// double bond still donates one electron, which makes quinones
    /// aromatic.
    ClassicalExocyclic,
    /// Lone-pair permissive model working from bond orders, charge and
    /// valence alone. An exocyclic double bond to an electronegative atom
    /// donates nothing, and lone pairs are accepted on any
    /// normally-bonded heteroatom or carbanion.
    #[serde(alias = "lone-pair")]
    Daylight,
    /// Only cyclic pi bonds count; lone pairs never do.
    PiBonds,
}

/// Pi-bond picture of one atom, shared by all models.
struct PiState {
    /// The single double bond, if there is exactly one.
    double: Option<EdgeIndex>,
    multiple_doubles: bool,
}

impl ElectronDonation {
    pub fn name(self) -> &'static str {
        match self {
            ElectronDonation::Classical => "classical",
            ElectronDonation::ClassicalExocyclic => "classical-exocyclic",
            ElectronDonation::Daylight => "daylight",
            ElectronDonation::PiBonds => "pi-bonds",
        }
    }

    pub fn contribution<A, B>(
        self,
        mol: &Mol<A, B>,
        atom: NodeIndex,
        ctx: &DonationContext,
    ) -> Contribution
    where
        A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasHybridization,
        B: HasBondOrder,
    {
        let Some(elem) = Element::from_atomic_num(mol.atom(atom).atomic_num()) else {
            return Contribution::Undefined;
        };
        let Some(pi) = pi_state(mol, atom) else {
            return Contribution::Undefined;
        };
        if pi.multiple_doubles {
            return Contribution::Undefined;
        }

        let electrons = match self {
            ElectronDonation::Classical => atom_type(mol, atom, ctx, &pi, false),
            ElectronDonation::ClassicalExocyclic => atom_type(mol, atom, ctx, &pi, true),
            ElectronDonation::Daylight => daylight(mol, atom, elem, ctx, &pi),
            ElectronDonation::PiBonds => pi.double.filter(|&e| ctx.is_cyclic(e)).map(|_| 1),
        };
        electrons.into()
    }

    /// Contribution of every atom, indexed by atom.
    pub fn contributions<A, B>(self, mol: &Mol<A, B>) -> Vec<Contribution>
    where
        A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasHybridization,
        B: HasBondOrder,
    {
        let ctx = DonationContext::new(mol);
        mol.atoms()
            .map(|idx| self.contribution(mol, idx, &ctx))
            .collect()
    }
}

/// `None` if the atom has a triple bond or an unresolved aromatic marker.
fn pi_state<A, B: HasBondOrder>(mol: &Mol<A, B>, atom: NodeIndex) -> Option<PiState> {
    let mut doubles = mol
        .bonds_of(atom)
        .filter(|&e| mol.bond(e).bond_order() == BondOrder::Double);
    let double = doubles.next();
    let multiple_doubles = doubles.next().is_some();
    let blocked = mol.bonds_of(atom).any(|e| {
        matches!(
            mol.bond(e).bond_order(),
            BondOrder::Triple | BondOrder::Aromatic
        )
    });
    if blocked {
        return None;
    }
    Some(PiState {
        double,
        multiple_doubles,
    })
}

fn atom_type<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    ctx: &DonationContext,
    pi: &PiState,
    allow_exocyclic: bool,
) -> Option<u8>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasHybridization,
    B: HasBondOrder,
{
    if mol.atom(atom).hybridization()? != Hybridization::SP2 {
        return None;
    }
    match pi.double {
        Some(e) if ctx.is_cyclic(e) || allow_exocyclic => Some(1),
        Some(_) => None,
        None if lone_pairs(mol, atom)? > 0 => Some(2),
        None if mol.atom(atom).formal_charge() == 1 => Some(0),
        None => None,
    }
}

fn daylight<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    elem: Element,
    ctx: &DonationContext,
    pi: &PiState,
) -> Option<u8>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let charge = mol.atom(atom).formal_charge();
    if !is_normal_valence(elem, charge, total_valence(mol, atom)?) {
        return None;
    }

    if let Some(e) = pi.double {
        if ctx.is_cyclic(e) {
            return Some(1);
        }
        let partner = mol.other_atom(e, atom)?;
        let partner = Element::from_atomic_num(mol.atom(partner).atomic_num())?;
        return partner.is_electronegative().then_some(0);
    }

    let degree = total_degree(mol, atom);
    match (elem, charge) {
        (Element::C, -1) => Some(2),
        (Element::C, 1) => Some(0),
        (Element::N | Element::P | Element::As, 0) if degree == 3 => Some(2),
        (Element::N | Element::P | Element::As, -1) if degree == 2 => Some(2),
        (Element::O | Element::S | Element::Se | Element::Te, 0) if degree == 2 => Some(2),
        (Element::B, 0) if degree == 3 => Some(0),
        _ => None,
    }
}

impl fmt::Display for ElectronDonation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElectronDonation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classical" => Ok(ElectronDonation::Classical),
            "classical-exocyclic" => Ok(ElectronDonation::ClassicalExocyclic),
            "daylight" | "lone-pair" => Ok(ElectronDonation::Daylight),
            "pi-bonds" => Ok(ElectronDonation::PiBonds),
            _ => Err(ConfigError::UnknownModel(s.to_string())),
        }
    }
}
