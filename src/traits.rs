use crate::bond::BondOrder;
use crate::wrappers::Hybridization;

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasAromaticity {
    fn is_aromatic(&self) -> bool;
}

pub trait SetAromaticity {
    fn set_aromatic(&mut self, aromatic: bool);
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

/// Pre-perceived hybridization. `None` means the atom was never typed.
pub trait HasHybridization {
    fn hybridization(&self) -> Option<Hybridization>;
}
