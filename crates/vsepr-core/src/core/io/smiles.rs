use crate::core::elements::is_element_symbol;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::{Bond, BondOrder};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmilesError {
    #[error("SMILES string is empty")]
    Empty,
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("Unexpected end of input inside {context}")]
    UnexpectedEnd { context: &'static str },
    #[error("Unknown element '{symbol}' at position {position}")]
    UnknownElement { symbol: String, position: usize },
    #[error("Branch opened at position {position} is never closed")]
    UnclosedBranch { position: usize },
    #[error("Unmatched ')' at position {position}")]
    UnmatchedBranch { position: usize },
    #[error("Ring closure {label} is never closed")]
    UnclosedRing { label: u16 },
    #[error("Invalid ring closure {label} at position {position}: {reason}")]
    InvalidRingBond {
        label: u16,
        position: usize,
        reason: &'static str,
    },
    #[error("Bond symbol at position {position} is not followed by an atom")]
    DanglingBond { position: usize },
    #[error("Number at position {position} is out of range for {context}")]
    NumberOutOfRange {
        context: &'static str,
        position: usize,
    },
}

/// Largest charge magnitude accepted on a bracket atom.
pub const MAX_ABS_CHARGE: u32 = 15;
/// Largest hydrogen count accepted on a bracket atom.
pub const MAX_BRACKET_HYDROGENS: u32 = 9;

/// Parses a SMILES string into a [`Molecule`].
///
/// Supports the organic subset (including aromatic lowercase atoms), bracket
/// atoms with isotope, hydrogen count and charge, branches, explicit bond
/// symbols, ring closures (`1`..`9` and `%nn`) and dot-separated fragments.
/// Chirality and cis/trans markers are accepted and ignored.
///
/// Organic-subset atoms receive implicit hydrogens from their default
/// valences; bracket atoms carry exactly the hydrogens written.
///
/// # Errors
///
/// Returns a [`SmilesError`] describing the first malformed construct.
pub fn parse_smiles(smiles: &str) -> Result<Molecule, SmilesError> {
    parse_smiles_named(smiles, "")
}

pub fn parse_smiles_named(smiles: &str, name: &str) -> Result<Molecule, SmilesError> {
    let trimmed = smiles.trim();
    if trimmed.is_empty() {
        return Err(SmilesError::Empty);
    }
    let mut parser = Parser::new(trimmed);
    parser.parse()?;

    let bracketed = parser.bracketed;
    let mut molecule = Molecule::new(name, parser.atoms, parser.bonds);
    for (index, is_bracket) in bracketed.into_iter().enumerate() {
        if !is_bracket {
            let count = implicit_hydrogens(&molecule, index);
            molecule.set_implicit_hydrogens(index, count);
        }
    }
    Ok(molecule)
}

fn default_valences(symbol: &str) -> &'static [u32] {
    match symbol {
        "B" => &[3],
        "C" => &[4],
        "N" => &[3, 5],
        "O" => &[2],
        "P" => &[3, 5],
        "S" => &[2, 4, 6],
        "F" | "Cl" | "Br" | "I" => &[1],
        _ => &[],
    }
}

fn implicit_hydrogens(molecule: &Molecule, index: usize) -> u32 {
    let Some(atom) = molecule.atom(index) else {
        return 0;
    };
    let load = molecule.kekule_valence_load(index);
    let valences = default_valences(&atom.symbol);
    let candidates = if atom.aromatic {
        &valences[..valences.len().min(1)]
    } else {
        valences
    };
    candidates
        .iter()
        .find(|&&v| v >= load)
        .map(|v| v - load)
        .unwrap_or(0)
}

struct Parser<'a> {
    source: &'a str,
    input: &'a [u8],
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    bracketed: Vec<bool>,
    /// label -> (atom index, bond order written at the opening, position)
    ring_openings: BTreeMap<u16, (usize, Option<BondOrder>, usize)>,
    /// (atom index, position of '(')
    branches: Vec<(usize, usize)>,
    prev_atom: Option<usize>,
    /// (order, position of the bond symbol)
    pending_bond: Option<(BondOrder, usize)>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            source: input,
            input: input.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            bracketed: Vec::new(),
            ring_openings: BTreeMap::new(),
            branches: Vec::new(),
            prev_atom: None,
            pending_bond: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn unexpected(&self, position: usize) -> SmilesError {
        SmilesError::UnexpectedCharacter {
            character: self
                .source
                .get(position..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or('\0'),
            position,
        }
    }

    fn parse(&mut self) -> Result<(), SmilesError> {
        while let Some(ch) = self.peek() {
            let start = self.pos;
            match ch {
                b'(' => {
                    let prev = self.prev_atom.ok_or_else(|| self.unexpected(start))?;
                    if self.pending_bond.is_some() {
                        return Err(self.unexpected(start));
                    }
                    self.branches.push((prev, start));
                    self.pos += 1;
                }
                b')' => {
                    if let Some((_, position)) = self.pending_bond {
                        return Err(SmilesError::DanglingBond { position });
                    }
                    let (atom, _) = self
                        .branches
                        .pop()
                        .ok_or(SmilesError::UnmatchedBranch { position: start })?;
                    self.prev_atom = Some(atom);
                    self.pos += 1;
                }
                b'-' | b'=' | b'#' | b':' | b'/' | b'\\' => {
                    if self.pending_bond.is_some() || self.prev_atom.is_none() {
                        return Err(self.unexpected(start));
                    }
                    let order = match ch {
                        b'=' => BondOrder::Double,
                        b'#' => BondOrder::Triple,
                        b':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending_bond = Some((order, start));
                    self.pos += 1;
                }
                b'.' => {
                    if let Some((_, position)) = self.pending_bond {
                        return Err(SmilesError::DanglingBond { position });
                    }
                    if self.prev_atom.is_none() {
                        return Err(self.unexpected(start));
                    }
                    self.prev_atom = None;
                    self.pos += 1;
                }
                b'%' => {
                    self.pos += 1;
                    let (Some(d1), Some(d2)) = (self.peek(), self.peek_at(1)) else {
                        return Err(SmilesError::UnexpectedEnd {
                            context: "ring closure",
                        });
                    };
                    if !d1.is_ascii_digit() || !d2.is_ascii_digit() {
                        return Err(self.unexpected(self.pos));
                    }
                    self.pos += 2;
                    let label = u16::from(d1 - b'0') * 10 + u16::from(d2 - b'0');
                    self.ring_closure(label, start)?;
                }
                b'0'..=b'9' => {
                    self.pos += 1;
                    self.ring_closure(u16::from(ch - b'0'), start)?;
                }
                b'[' => {
                    let atom = self.bracket_atom()?;
                    self.add_atom(atom, true);
                }
                _ if ch.is_ascii_alphabetic() => {
                    let atom = self.organic_atom()?;
                    self.add_atom(atom, false);
                }
                _ => return Err(self.unexpected(start)),
            }
        }

        if let Some((_, position)) = self.pending_bond {
            return Err(SmilesError::DanglingBond { position });
        }
        if let Some(&(_, position)) = self.branches.last() {
            return Err(SmilesError::UnclosedBranch { position });
        }
        if let Some((&label, _)) = self.ring_openings.iter().next() {
            return Err(SmilesError::UnclosedRing { label });
        }
        Ok(())
    }

    fn add_atom(&mut self, atom: Atom, bracketed: bool) {
        let index = self.atoms.len();
        let aromatic = atom.aromatic;
        self.atoms.push(atom);
        self.bracketed.push(bracketed);

        if let Some(prev) = self.prev_atom {
            let order = match self.pending_bond.take() {
                Some((order, _)) => order,
                None if aromatic && self.atoms[prev].aromatic => BondOrder::Aromatic,
                None => BondOrder::Single,
            };
            self.bonds.push(Bond::new(prev, index, order));
        }
        self.pending_bond = None;
        self.prev_atom = Some(index);
    }

    fn ring_closure(&mut self, label: u16, position: usize) -> Result<(), SmilesError> {
        let current = self.prev_atom.ok_or_else(|| self.unexpected(position))?;
        let written = self.pending_bond.take().map(|(order, _)| order);

        let Some((partner, opened_with, _)) = self.ring_openings.remove(&label) else {
            self.ring_openings.insert(label, (current, written, position));
            return Ok(());
        };

        if partner == current {
            return Err(SmilesError::InvalidRingBond {
                label,
                position,
                reason: "atom cannot bond to itself",
            });
        }
        if self.bonds.iter().any(|b| b.contains(partner) && b.contains(current)) {
            return Err(SmilesError::InvalidRingBond {
                label,
                position,
                reason: "atoms are already bonded",
            });
        }
        let order = match (opened_with, written) {
            (Some(a), Some(b)) if a != b => {
                return Err(SmilesError::InvalidRingBond {
                    label,
                    position,
                    reason: "conflicting bond orders",
                });
            }
            (Some(order), _) | (None, Some(order)) => order,
            (None, None) if self.atoms[partner].aromatic && self.atoms[current].aromatic => {
                BondOrder::Aromatic
            }
            (None, None) => BondOrder::Single,
        };
        self.bonds.push(Bond::new(partner, current, order));
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom, SmilesError> {
        let start = self.pos;
        let ch = self.input[start];
        let (symbol, aromatic, len) = match ch {
            b'C' if self.peek_at(1) == Some(b'l') => ("Cl", false, 2),
            b'B' if self.peek_at(1) == Some(b'r') => ("Br", false, 2),
            b'B' => ("B", false, 1),
            b'C' => ("C", false, 1),
            b'N' => ("N", false, 1),
            b'O' => ("O", false, 1),
            b'P' => ("P", false, 1),
            b'S' => ("S", false, 1),
            b'F' => ("F", false, 1),
            b'I' => ("I", false, 1),
            b'b' => ("B", true, 1),
            b'c' => ("C", true, 1),
            b'n' => ("N", true, 1),
            b'o' => ("O", true, 1),
            b'p' => ("P", true, 1),
            b's' => ("S", true, 1),
            _ => {
                let end = (start + 2).min(self.input.len());
                let symbol = String::from_utf8_lossy(&self.input[start..end])
                    .trim_end_matches(|c: char| !c.is_ascii_alphabetic())
                    .to_string();
                return Err(SmilesError::UnknownElement {
                    symbol,
                    position: start,
                });
            }
        };
        self.pos += len;
        let mut atom = Atom::new(symbol);
        atom.aromatic = aromatic;
        Ok(atom)
    }

    fn bracket_atom(&mut self) -> Result<Atom, SmilesError> {
        self.pos += 1;

        let isotope_start = self.pos;
        let isotope = match self.read_number("isotope")? {
            Some(n) => Some(u16::try_from(n).map_err(|_| SmilesError::NumberOutOfRange {
                context: "isotope",
                position: isotope_start,
            })?),
            None => None,
        };

        let symbol_start = self.pos;
        let first = self.peek().ok_or(SmilesError::UnexpectedEnd {
            context: "bracket atom",
        })?;
        if !first.is_ascii_alphabetic() {
            return Err(self.unexpected(symbol_start));
        }

        let (symbol, aromatic) = if first.is_ascii_lowercase() {
            self.aromatic_bracket_symbol()?
        } else {
            let single = (first as char).to_string();
            let two = self
                .peek_at(1)
                .filter(u8::is_ascii_lowercase)
                .map(|second| format!("{}{}", first as char, second as char));
            match two {
                Some(two) if is_element_symbol(&two) => {
                    self.pos += 2;
                    (two, false)
                }
                _ if is_element_symbol(&single) => {
                    self.pos += 1;
                    (single, false)
                }
                _ => {
                    return Err(SmilesError::UnknownElement {
                        symbol: single,
                        position: symbol_start,
                    });
                }
            }
        };

        while self.peek() == Some(b'@') {
            self.pos += 1;
        }

        let mut hydrogens = 0;
        if self.peek() == Some(b'H') {
            self.pos += 1;
            let count_start = self.pos;
            hydrogens = self.read_number("hydrogen count")?.unwrap_or(1);
            if hydrogens > MAX_BRACKET_HYDROGENS {
                return Err(SmilesError::NumberOutOfRange {
                    context: "hydrogen count",
                    position: count_start,
                });
            }
        }

        let mut charge: i32 = 0;
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            let charge_start = self.pos;
            self.pos += 1;
            let magnitude = match self.read_number("charge")? {
                Some(magnitude) => magnitude,
                None => {
                    let mut repeated = 1;
                    while self.peek() == Some(sign) {
                        self.pos += 1;
                        repeated += 1;
                    }
                    repeated
                }
            };
            if magnitude > MAX_ABS_CHARGE {
                return Err(SmilesError::NumberOutOfRange {
                    context: "charge",
                    position: charge_start,
                });
            }
            // Bounded above, so the cast is exact.
            let magnitude = magnitude as i32;
            charge = if sign == b'+' { magnitude } else { -magnitude };
        }

        if self.peek() == Some(b':') {
            self.pos += 1;
            if self.read_number("atom class")?.is_none() {
                return Err(self.unexpected(self.pos));
            }
        }

        match self.peek() {
            Some(b']') => self.pos += 1,
            Some(_) => return Err(self.unexpected(self.pos)),
            None => {
                return Err(SmilesError::UnexpectedEnd {
                    context: "bracket atom",
                });
            }
        }
        let mut atom = Atom::new(&symbol)
            .with_charge(charge)
            .with_hydrogens(hydrogens);
        atom.aromatic = aromatic;
        atom.isotope = isotope;
        Ok(atom)
    }

    fn aromatic_bracket_symbol(&mut self) -> Result<(String, bool), SmilesError> {
        let start = self.pos;
        for two in ["se", "as", "te"] {
            if self.input[start..].starts_with(two.as_bytes()) {
                self.pos += 2;
                return Ok((capitalize(two), true));
            }
        }
        let ch = self.input[start];
        match ch {
            b'b' | b'c' | b'n' | b'o' | b'p' | b's' => {
                self.pos += 1;
                Ok(((ch.to_ascii_uppercase() as char).to_string(), true))
            }
            _ => Err(SmilesError::UnknownElement {
                symbol: (ch as char).to_string(),
                position: start,
            }),
        }
    }

    /// Reads a run of ASCII digits, if any.
    fn read_number(&mut self, context: &'static str) -> Result<Option<u32>, SmilesError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Ok(None);
        }
        self.source[start..self.pos]
            .parse()
            .map(Some)
            .map_err(|_| SmilesError::NumberOutOfRange {
                context,
                position: start,
            })
    }
}

fn capitalize(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrogens(mol: &Molecule) -> Vec<u32> {
        mol.atoms().iter().map(|a| a.implicit_hydrogens).collect()
    }

    #[test]
    fn parses_simple_chain_with_implicit_hydrogens() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(hydrogens(&mol), vec![3, 2, 1]);
        assert_eq!(mol.formula(), "C2H6O");
    }

    #[test]
    fn parses_single_heavy_atoms() {
        assert_eq!(hydrogens(&parse_smiles("O").unwrap()), vec![2]);
        assert_eq!(hydrogens(&parse_smiles("N").unwrap()), vec![3]);
        assert_eq!(hydrogens(&parse_smiles("C").unwrap()), vec![4]);
        assert_eq!(hydrogens(&parse_smiles("Cl").unwrap()), vec![1]);
    }

    #[test]
    fn parses_multiple_bonds() {
        let co2 = parse_smiles("O=C=O").unwrap();
        assert_eq!(hydrogens(&co2), vec![0, 0, 0]);
        assert!(co2.bonds().iter().all(|b| b.order == BondOrder::Double));

        let hcn = parse_smiles("C#N").unwrap();
        assert_eq!(hydrogens(&hcn), vec![1, 0]);
        assert_eq!(hcn.bonds()[0].order, BondOrder::Triple);
    }

    #[test]
    fn parses_branches() {
        let mol = parse_smiles("CC(C)(C)O").unwrap();
        assert_eq!(mol.atom_count(), 5);
        assert_eq!(mol.degree(1), 4);
        assert_eq!(mol.atom(1).unwrap().implicit_hydrogens, 0);
    }

    #[test]
    fn parses_aromatic_ring() {
        let benzene = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(benzene.bond_count(), 6);
        assert!(benzene.bonds().iter().all(|b| b.order == BondOrder::Aromatic));
        assert_eq!(hydrogens(&benzene), vec![1; 6]);
        assert_eq!(benzene.formula(), "C6H6");

        let pyridine = parse_smiles("c1ccncc1").unwrap();
        assert_eq!(pyridine.atom(3).unwrap().implicit_hydrogens, 0);
    }

    #[test]
    fn fused_aromatic_carbons_carry_no_hydrogen() {
        let naphthalene = parse_smiles("c1ccc2ccccc2c1").unwrap();
        assert_eq!(naphthalene.formula(), "C10H8");
    }

    #[test]
    fn parses_bracket_atoms_with_charge_and_hydrogens() {
        let ammonium = parse_smiles("[NH4+]").unwrap();
        let n = ammonium.atom(0).unwrap();
        assert_eq!(n.symbol, "N");
        assert_eq!(n.formal_charge, 1);
        assert_eq!(n.implicit_hydrogens, 4);

        let hydroxide = parse_smiles("[OH-]").unwrap();
        assert_eq!(hydroxide.atom(0).unwrap().formal_charge, -1);
        assert_eq!(hydroxide.atom(0).unwrap().implicit_hydrogens, 1);

        let iron = parse_smiles("[Fe+++]").unwrap();
        assert_eq!(iron.atom(0).unwrap().formal_charge, 3);
        let iron = parse_smiles("[Fe+2]").unwrap();
        assert_eq!(iron.atom(0).unwrap().formal_charge, 2);

        let deuterated = parse_smiles("[13CH4]").unwrap();
        assert_eq!(deuterated.atom(0).unwrap().isotope, Some(13));
    }

    #[test]
    fn bracket_atoms_without_hydrogen_count_have_none() {
        let mol = parse_smiles("F[Xe](F)(F)F").unwrap();
        assert_eq!(mol.atom(1).unwrap().symbol, "Xe");
        assert_eq!(mol.atom(1).unwrap().implicit_hydrogens, 0);
        assert_eq!(mol.degree(1), 4);
    }

    #[test]
    fn parses_aromatic_bracket_atoms_and_chirality() {
        let pyrrole = parse_smiles("c1cc[nH]c1").unwrap();
        assert_eq!(pyrrole.atom(3).unwrap().symbol, "N");
        assert!(pyrrole.atom(3).unwrap().aromatic);
        assert_eq!(pyrrole.atom(3).unwrap().implicit_hydrogens, 1);

        let chiral = parse_smiles("N[C@@H](C)C(=O)O").unwrap();
        assert_eq!(chiral.atom(1).unwrap().implicit_hydrogens, 1);
    }

    #[test]
    fn parses_fragments_and_percent_rings() {
        let salt = parse_smiles("[Na+].[Cl-]").unwrap();
        assert_eq!(salt.atom_count(), 2);
        assert_eq!(salt.bond_count(), 0);

        let ring = parse_smiles("C%10CCCCC%10").unwrap();
        assert_eq!(ring.bond_count(), 6);
    }

    #[test]
    fn hypervalent_sulfur_uses_higher_valence() {
        let dmso = parse_smiles("CS(=O)C").unwrap();
        assert_eq!(dmso.atom(1).unwrap().implicit_hydrogens, 0);
        let sf6 = parse_smiles("FS(F)(F)(F)(F)F").unwrap();
        assert_eq!(sf6.atom(1).unwrap().implicit_hydrogens, 0);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_smiles(""), Err(SmilesError::Empty));
        assert_eq!(parse_smiles("   "), Err(SmilesError::Empty));
        assert!(matches!(
            parse_smiles("C(C"),
            Err(SmilesError::UnclosedBranch { position: 1 })
        ));
        assert!(matches!(
            parse_smiles("CC)"),
            Err(SmilesError::UnmatchedBranch { position: 2 })
        ));
        assert!(matches!(
            parse_smiles("C1CC"),
            Err(SmilesError::UnclosedRing { label: 1 })
        ));
        assert!(matches!(
            parse_smiles("C="),
            Err(SmilesError::DanglingBond { position: 1 })
        ));
        assert!(matches!(
            parse_smiles("CXC"),
            Err(SmilesError::UnknownElement { position: 1, .. })
        ));
        assert!(matches!(
            parse_smiles("[Xx]"),
            Err(SmilesError::UnknownElement { .. })
        ));
        assert!(matches!(
            parse_smiles("[NH4+"),
            Err(SmilesError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_smiles("C11"),
            Err(SmilesError::InvalidRingBond { .. })
        ));
        assert!(matches!(
            parse_smiles("C?"),
            Err(SmilesError::UnexpectedCharacter { character: '?', .. })
        ));
    }

    #[test]
    fn out_of_range_bracket_numbers_are_errors() {
        assert_eq!(
            parse_smiles("[C-2147483648]"),
            Err(SmilesError::NumberOutOfRange {
                context: "charge",
                position: 2
            })
        );
        assert_eq!(
            parse_smiles("[C+4294967295]"),
            Err(SmilesError::NumberOutOfRange {
                context: "charge",
                position: 2
            })
        );
        assert_eq!(
            parse_smiles("[C+99999999999]"),
            Err(SmilesError::NumberOutOfRange {
                context: "charge",
                position: 3
            })
        );
        assert_eq!(
            parse_smiles("[70000C]"),
            Err(SmilesError::NumberOutOfRange {
                context: "isotope",
                position: 1
            })
        );
        assert_eq!(
            parse_smiles("C[CH4294967295]"),
            Err(SmilesError::NumberOutOfRange {
                context: "hydrogen count",
                position: 4
            })
        );
        assert!(matches!(
            parse_smiles("[C++++++++++++++++]"),
            Err(SmilesError::NumberOutOfRange {
                context: "charge",
                ..
            })
        ));
    }

    #[test]
    fn charges_within_range_are_kept() {
        let mol = parse_smiles("[Fe+15]").unwrap();
        assert_eq!(mol.atom(0).unwrap().formal_charge, 15);
        let mol = parse_smiles("[O--]").unwrap();
        assert_eq!(mol.atom(0).unwrap().formal_charge, -2);
        let mol = parse_smiles("[13CH4]").unwrap();
        assert_eq!(mol.atom(0).unwrap().isotope, Some(13));
        assert_eq!(mol.atom(0).unwrap().implicit_hydrogens, 4);
    }

    #[test]
    fn unexpected_non_ascii_character_is_reported_whole() {
        assert_eq!(
            parse_smiles("Cé"),
            Err(SmilesError::UnexpectedCharacter {
                character: 'é',
                position: 1
            })
        );
    }

    #[test]
    fn named_parse_keeps_the_name() {
        let mol = parse_smiles_named("O", "water").unwrap();
        assert_eq!(mol.name, "water");
    }
}
