/// Default atom type for a molecular graph node.
///
/// `Atom` stores the properties you would read off a structural formula,
/// plus the aromaticity flag that perception writes. Computed properties
/// like hybridization are provided by wrapper types in the [`wrappers`](crate::wrappers) module.
///
/// # Examples
///
/// ```
/// use aromacrab::Atom;
///
/// let carbon = Atom {
///     atomic_num: 6,
///     formal_charge: 0,
///     hydrogen_count: 3,
///     is_aromatic: false,
/// };
/// assert_eq!(carbon.atomic_num, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). Identifies the element.
    pub atomic_num: u8,
    /// Formal charge in elementary charge units (e.g. −1 for a carboxylate oxygen).
    pub formal_charge: i8,
    /// Number of virtual (suppressed) hydrogens on this atom.
    pub hydrogen_count: u8,
    /// Whether this atom is in an aromatic ring.
    ///
    /// Written by [`Aromaticity::apply`](crate::Aromaticity::apply) and by
    /// the SMILES reader for lowercase atoms. Never read by the donation
    /// models.
    pub is_aromatic: bool,
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

impl crate::traits::SetAromaticity for Atom {
    fn set_aromatic(&mut self, aromatic: bool) {
        self.is_aromatic = aromatic;
    }
}

/// A bare atom carries no hybridization; wrap it in
/// [`WithHybridization`](crate::WithHybridization) to supply one.
impl crate::traits::HasHybridization for Atom {
    fn hybridization(&self) -> Option<crate::wrappers::Hybridization> {
        None
    }
}
