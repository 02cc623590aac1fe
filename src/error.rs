use thiserror::Error;

/// Faults raised by a ring source or while resolving its rings against the
/// molecule.
///
/// Chemistry a donation model cannot score is never an error; it makes the
/// ring non-aromatic instead. These variants mean a collaborator broke its
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AromaticityError {
    /// A ring referenced an atom index the molecule does not have.
    #[error("ring references atom {atom}, which is not in the molecule")]
    UnknownAtom { atom: usize },
    /// Two consecutive ring atoms are not bonded.
    #[error("ring closes over atoms {a} and {b}, which are not bonded")]
    MissingBond { a: usize, b: usize },
    /// A ring that visits the same atom twice.
    #[error("ring visits atom {atom} more than once")]
    RepeatedAtom { atom: usize },
    /// A ring with fewer than three atoms.
    #[error("ring of {len} atoms is too short to be a cycle")]
    RingTooShort { len: usize },
    /// Exhaustive cycle enumeration passed its ceiling.
    #[error("more than {limit} candidate cycles")]
    TooManyCycles { limit: usize },
}

/// Unrecognised names when building an engine from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown electron donation model '{0}'")]
    UnknownModel(String),
    #[error("unknown cycle finder '{0}'")]
    UnknownCycles(String),
}
