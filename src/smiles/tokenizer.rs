use crate::element::Element;
use crate::smiles::error::SmilesError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(AtomToken),
    Bond(BondToken, usize),
    RingClosure { digit: u8, pos: usize },
    OpenParen(usize),
    CloseParen(usize),
    Dot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomToken {
    pub element: Element,
    pub is_aromatic: bool,
    /// Explicit count from a bracket atom; `None` for organic-subset atoms,
    /// whose hydrogens are implied by valence.
    pub hcount: Option<u8>,
    pub charge: i8,
    pub pos: usize,
}

/// Directional bonds (`/`, `\`) read as plain single bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Single,
    Double,
    Triple,
    Aromatic,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, SmilesError> {
    let mut scanner = Scanner {
        chars: input.chars().collect(),
        pos: 0,
    };
    let mut tokens = Vec::new();

    while let Some(ch) = scanner.peek() {
        let pos = scanner.pos;
        let token = match ch {
            '[' => Token::Atom(scanner.bracket_atom()?),
            '(' => {
                scanner.bump();
                Token::OpenParen(pos)
            }
            ')' => {
                scanner.bump();
                Token::CloseParen(pos)
            }
            '.' => {
                scanner.bump();
                Token::Dot
            }
            '-' | '/' | '\\' => {
                scanner.bump();
                Token::Bond(BondToken::Single, pos)
            }
            '=' => {
                scanner.bump();
                Token::Bond(BondToken::Double, pos)
            }
            '#' => {
                scanner.bump();
                Token::Bond(BondToken::Triple, pos)
            }
            ':' => {
                scanner.bump();
                Token::Bond(BondToken::Aromatic, pos)
            }
            '%' => {
                scanner.bump();
                let tens = scanner.digit();
                let ones = scanner.digit();
                match (tens, ones) {
                    (Some(t), Some(o)) => Token::RingClosure {
                        digit: t * 10 + o,
                        pos,
                    },
                    _ => return Err(SmilesError::UnexpectedChar { pos, ch: '%' }),
                }
            }
            '0'..='9' => {
                let digit = scanner.digit().unwrap_or_default();
                Token::RingClosure { digit, pos }
            }
            _ => Token::Atom(scanner.organic_atom()?),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn digit(&mut self) -> Option<u8> {
        let d = self.peek()?.to_digit(10)?;
        self.pos += 1;
        Some(d as u8)
    }

    fn number(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(d) = self.digit() {
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d.into()));
        }
        value
    }

    /// Organic-subset atom outside brackets: `B C N O P S F Cl Br I` and the
    /// aromatic `b c n o p s`.
    fn organic_atom(&mut self) -> Result<AtomToken, SmilesError> {
        let pos = self.pos;
        let ch = self.peek().ok_or(SmilesError::UnexpectedEnd)?;
        let (element, is_aromatic, width) = match (ch, self.peek_at(1)) {
            ('C', Some('l')) => (Element::Cl, false, 2),
            ('B', Some('r')) => (Element::Br, false, 2),
            ('B', _) => (Element::B, false, 1),
            ('C', _) => (Element::C, false, 1),
            ('N', _) => (Element::N, false, 1),
            ('O', _) => (Element::O, false, 1),
            ('P', _) => (Element::P, false, 1),
            ('S', _) => (Element::S, false, 1),
            ('F', _) => (Element::F, false, 1),
            ('I', _) => (Element::I, false, 1),
            ('b', _) => (Element::B, true, 1),
            ('c', _) => (Element::C, true, 1),
            ('n', _) => (Element::N, true, 1),
            ('o', _) => (Element::O, true, 1),
            ('p', _) => (Element::P, true, 1),
            ('s', _) => (Element::S, true, 1),
            _ => return Err(SmilesError::UnexpectedChar { pos, ch }),
        };
        self.pos += width;
        Ok(AtomToken {
            element,
            is_aromatic,
            hcount: None,
            charge: 0,
            pos,
        })
    }

    /// `[` isotope? element chirality? hcount? charge? class? `]`. Isotope,
    /// chirality and atom class are read and discarded.
    fn bracket_atom(&mut self) -> Result<AtomToken, SmilesError> {
        let start = self.pos;
        self.bump();
        self.number();
        let (element, is_aromatic) = self.bracket_element()?;
        while self.eat('@') {}
        let hcount = if self.eat('H') {
            self.digit().unwrap_or(1)
        } else {
            0
        };
        let charge = self.charge(start)?;
        if self.eat(':') && self.number().is_none() {
            return Err(SmilesError::UnclosedBracket { pos: start });
        }
        if !self.eat(']') {
            return Err(SmilesError::UnclosedBracket { pos: start });
        }
        Ok(AtomToken {
            element,
            is_aromatic,
            hcount: Some(hcount),
            charge,
            pos: start,
        })
    }

    fn bracket_element(&mut self) -> Result<(Element, bool), SmilesError> {
        let pos = self.pos;
        let first = self.peek().ok_or(SmilesError::UnexpectedEnd)?;
        let second = self.peek_at(1).filter(|c| c.is_ascii_lowercase());

        if first.is_ascii_lowercase() {
            let aromatic = match (first, second) {
                ('s', Some('e')) => Some((Element::Se, 2)),
                ('t', Some('e')) => Some((Element::Te, 2)),
                ('a', Some('s')) => Some((Element::As, 2)),
                ('b', _) => Some((Element::B, 1)),
                ('c', _) => Some((Element::C, 1)),
                ('n', _) => Some((Element::N, 1)),
                ('o', _) => Some((Element::O, 1)),
                ('p', _) => Some((Element::P, 1)),
                ('s', _) => Some((Element::S, 1)),
                _ => None,
            };
            return match aromatic {
                Some((element, width)) => {
                    self.pos += width;
                    Ok((element, true))
                }
                None => Err(SmilesError::InvalidElement {
                    pos,
                    text: first.to_string(),
                }),
            };
        }

        // Nothing after a bracket element starts lowercase, so a trailing
        // lowercase letter always belongs to the symbol.
        let symbol: String = std::iter::once(first).chain(second).collect();
        match Element::from_symbol(&symbol) {
            Some(element) => {
                self.pos += symbol.len();
                Ok((element, false))
            }
            None => Err(SmilesError::InvalidElement { pos, text: symbol }),
        }
    }

    /// `+`, `++`, `+2`, `-`, `--`, `-2`, or nothing.
    fn charge(&mut self, bracket: usize) -> Result<i8, SmilesError> {
        let sign: i8 = match self.peek() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return Ok(0),
        };
        let symbol = if sign > 0 { '+' } else { '-' };
        self.bump();
        let magnitude = match self.number() {
            Some(n) => n,
            None => {
                let mut count = 1;
                while self.eat(symbol) {
                    count += 1;
                }
                count
            }
        };
        i8::try_from(magnitude)
            .ok()
            .filter(|&m| m <= 15)
            .map(|m| sign * m)
            .ok_or(SmilesError::InvalidCharge { pos: bracket })
    }
}
