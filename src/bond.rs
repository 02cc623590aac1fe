#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    /// Aromatic marker left by an unkekulized input. The valence of an atom
    /// carrying one is unknown, so donation models do not score it.
    Aromatic,
}

impl BondOrder {
    /// Integral order, or `None` for the aromatic marker.
    pub fn valence_contribution(self) -> Option<u8> {
        match self {
            BondOrder::Single => Some(1),
            BondOrder::Double => Some(2),
            BondOrder::Triple => Some(3),
            BondOrder::Aromatic => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bond {
    pub order: BondOrder,
    pub is_aromatic: bool,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            is_aromatic: false,
        }
    }
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

impl crate::traits::HasAromaticity for Bond {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

impl crate::traits::SetAromaticity for Bond {
    fn set_aromatic(&mut self, aromatic: bool) {
        self.is_aromatic = aromatic;
    }
}
