/// Elements the perception code knows how to reason about.
///
/// The table covers the SMILES organic subset plus the heavier pnictogens
/// and chalcogens that routinely appear in heteroaromatic rings. Anything
/// outside it is rejected by the SMILES reader; an atom built by hand with
/// another atomic number is scored as undefined by every donation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Element {
    H = 1,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    Ge = 32,
    As = 33,
    Se = 34,
    Br = 35,
    Sb = 51,
    Te = 52,
    I = 53,
}

const ALL: [Element; 17] = [
    Element::H,
    Element::B,
    Element::C,
    Element::N,
    Element::O,
    Element::F,
    Element::Si,
    Element::P,
    Element::S,
    Element::Cl,
    Element::Ge,
    Element::As,
    Element::Se,
    Element::Br,
    Element::Sb,
    Element::Te,
    Element::I,
];

impl Element {
    pub fn from_atomic_num(n: u8) -> Option<Element> {
        ALL.iter().copied().find(|e| e.atomic_num() == n)
    }

    pub fn from_symbol(s: &str) -> Option<Element> {
        ALL.iter().copied().find(|e| e.symbol() == s)
    }

    pub fn atomic_num(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Element::H => "H",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Ge => "Ge",
            Element::As => "As",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::Sb => "Sb",
            Element::Te => "Te",
            Element::I => "I",
        }
    }

    /// Valence-shell electron count of the neutral atom.
    pub fn outer_electrons(self) -> u8 {
        match self {
            Element::H => 1,
            Element::B => 3,
            Element::C | Element::Si | Element::Ge => 4,
            Element::N | Element::P | Element::As | Element::Sb => 5,
            Element::O | Element::S | Element::Se | Element::Te => 6,
            Element::F | Element::Cl | Element::Br | Element::I => 7,
        }
    }

    /// Valences of the uncharged atom, lowest first, as used for implicit
    /// hydrogen assignment.
    pub fn default_valences(self) -> &'static [u8] {
        match self {
            Element::H => &[1],
            Element::B => &[3],
            Element::C | Element::Si | Element::Ge => &[4],
            Element::N | Element::As | Element::Sb => &[3, 5],
            Element::P => &[3, 5],
            Element::O => &[2],
            Element::S | Element::Se | Element::Te => &[2, 4, 6],
            Element::F | Element::Cl | Element::Br => &[1],
            Element::I => &[1, 3, 5, 7],
        }
    }

    /// Atoms that pull a pi bond towards themselves when it leaves a ring,
    /// as in the carbonyl of a quinone.
    pub fn is_electronegative(self) -> bool {
        matches!(
            self,
            Element::N | Element::O | Element::S | Element::Se | Element::Te
        )
    }

    pub fn is_organic_subset(self) -> bool {
        matches!(
            self,
            Element::B
                | Element::C
                | Element::N
                | Element::O
                | Element::F
                | Element::P
                | Element::S
                | Element::Cl
                | Element::Br
                | Element::I
        )
    }
}
