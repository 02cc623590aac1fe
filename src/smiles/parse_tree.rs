use crate::smiles::error::SmilesError;
use crate::smiles::tokenizer::{AtomToken, BondToken, Token};

/// A bond as written: chain and branch bonds appear when their second atom
/// is read, ring bonds when their digit closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEdge {
    pub a: usize,
    pub b: usize,
    pub bond: Option<BondToken>,
}

#[derive(Debug, Clone)]
pub struct ParseTree {
    pub atoms: Vec<AtomToken>,
    pub edges: Vec<ParseEdge>,
}

struct OpenRing {
    atom: usize,
    bond: Option<BondToken>,
}

pub fn build_parse_tree(tokens: &[Token]) -> Result<ParseTree, SmilesError> {
    let mut atoms: Vec<AtomToken> = Vec::new();
    let mut edges: Vec<ParseEdge> = Vec::new();
    let mut branches: Vec<(usize, usize)> = Vec::new();
    let mut current: Option<usize> = None;
    let mut pending: Option<(BondToken, usize)> = None;
    let mut rings: Vec<Option<OpenRing>> = (0..100).map(|_| None).collect();

    for token in tokens {
        match token {
            Token::Atom(atom) => {
                let idx = atoms.len();
                atoms.push(atom.clone());
                match current {
                    Some(prev) => edges.push(ParseEdge {
                        a: prev,
                        b: idx,
                        bond: pending.take().map(|(b, _)| b),
                    }),
                    None => {
                        if let Some((_, pos)) = pending {
                            return Err(SmilesError::DanglingBond { pos });
                        }
                    }
                }
                current = Some(idx);
            }
            Token::Bond(bond, pos) => {
                if current.is_none() || pending.is_some() {
                    return Err(SmilesError::DanglingBond { pos: *pos });
                }
                pending = Some((*bond, *pos));
            }
            Token::RingClosure { digit, pos } => {
                let cur = current.ok_or(SmilesError::InvalidRingBond {
                    digit: *digit,
                    pos: *pos,
                })?;
                let bond = pending.take().map(|(b, _)| b);
                let slot = &mut rings[usize::from(*digit)];
                match slot.take() {
                    None => *slot = Some(OpenRing { atom: cur, bond }),
                    Some(open) => {
                        let already_bonded = edges.iter().any(|e| {
                            (e.a == open.atom && e.b == cur) || (e.a == cur && e.b == open.atom)
                        });
                        if open.atom == cur || already_bonded {
                            return Err(SmilesError::InvalidRingBond {
                                digit: *digit,
                                pos: *pos,
                            });
                        }
                        let bond = match (open.bond, bond) {
                            (Some(x), Some(y)) if x != y => {
                                return Err(SmilesError::RingBondConflict { digit: *digit })
                            }
                            (x, y) => x.or(y),
                        };
                        edges.push(ParseEdge {
                            a: open.atom,
                            b: cur,
                            bond,
                        });
                    }
                }
            }
            Token::OpenParen(pos) => {
                let cur = current.ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                branches.push((cur, *pos));
            }
            Token::CloseParen(pos) => {
                if let Some((_, bond_pos)) = pending {
                    return Err(SmilesError::DanglingBond { pos: bond_pos });
                }
                let (atom, _) = branches
                    .pop()
                    .ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                current = Some(atom);
            }
            Token::Dot => {
                if let Some((_, pos)) = pending {
                    return Err(SmilesError::DanglingBond { pos });
                }
                current = None;
            }
        }
    }

    if let Some((_, pos)) = pending {
        return Err(SmilesError::DanglingBond { pos });
    }
    if let Some(&(_, pos)) = branches.last() {
        return Err(SmilesError::UnmatchedParen { pos });
    }
    if let Some(digit) = rings.iter().position(Option::is_some) {
        return Err(SmilesError::UnclosedRing { digit: digit as u8 });
    }

    Ok(ParseTree { atoms, edges })
}
