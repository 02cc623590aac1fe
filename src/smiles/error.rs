use thiserror::Error;

use crate::kekulize::KekulizeError;

/// Errors produced when reading a SMILES string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesError {
    #[error("empty SMILES string")]
    EmptyInput,
    #[error("unexpected end of SMILES")]
    UnexpectedEnd,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },
    #[error("invalid element '{text}' at position {pos}")]
    InvalidElement { pos: usize, text: String },
    #[error("unclosed bracket atom starting at position {pos}")]
    UnclosedBracket { pos: usize },
    #[error("invalid charge in bracket atom at position {pos}")]
    InvalidCharge { pos: usize },
    #[error("unmatched parenthesis at position {pos}")]
    UnmatchedParen { pos: usize },
    #[error("bond at position {pos} has no atom on one side")]
    DanglingBond { pos: usize },
    #[error("unclosed ring {digit}")]
    UnclosedRing { digit: u8 },
    /// A ring closure onto the opening atom itself or onto an atom it is
    /// already bonded to.
    #[error("invalid ring bond {digit} at position {pos}")]
    InvalidRingBond { digit: u8, pos: usize },
    #[error("conflicting bond types on ring closure {digit}")]
    RingBondConflict { digit: u8 },
    #[error(transparent)]
    Kekulize(#[from] KekulizeError),
}
