use super::atom::Atom;
use super::topology::{Bond, BondOrder};
use crate::core::steric::{AtomDescriptor, InvalidStericKind, StericError};
use std::collections::BTreeMap;

/// A molecular graph: atoms, bonds, and a per-atom adjacency list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// `adjacency[atom] = [(neighbor, bond index)]`
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    /// Creates a molecule, building the adjacency list from the bonds.
    ///
    /// # Panics
    ///
    /// Panics if a bond refers to an atom index outside `atoms`.
    pub fn new(name: &str, atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (index, bond) in bonds.iter().enumerate() {
            adjacency[bond.atom1].push((bond.atom2, index));
            adjacency[bond.atom2].push((bond.atom1, index));
        }
        Self {
            name: name.to_string(),
            atoms,
            bonds,
            adjacency,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub(crate) fn set_implicit_hydrogens(&mut self, index: usize, count: u32) {
        self.atoms[index].implicit_hydrogens = count;
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[index].iter().map(|&(n, _)| n)
    }

    pub fn bonds_of(&self, index: usize) -> impl Iterator<Item = &Bond> + '_ {
        self.adjacency[index].iter().map(|&(_, b)| &self.bonds[b])
    }

    /// Number of explicit graph neighbors.
    pub fn degree(&self, index: usize) -> usize {
        self.adjacency[index].len()
    }

    /// Sigma bonds: one per explicit neighbor plus one per implicit hydrogen.
    ///
    /// `None` if the count does not fit in a `u32`.
    pub fn sigma_bond_count(&self, index: usize) -> Option<u32> {
        u32::try_from(self.degree(index))
            .ok()?
            .checked_add(self.atoms[index].implicit_hydrogens)
    }

    /// Sum of bond orders, counting each implicit hydrogen as a single bond.
    pub fn bond_order_sum(&self, index: usize) -> f64 {
        let explicit: f64 = self.bonds_of(index).map(|b| b.order.as_f64()).sum();
        explicit + f64::from(self.atoms[index].implicit_hydrogens)
    }

    /// Valence load used for implicit-hydrogen assignment.
    ///
    /// Aromatic bonds count as single bonds plus one shared pi contribution for
    /// the atom, so a benzene carbon carries a load of 3 and a fused ring carbon 4.
    pub(crate) fn kekule_valence_load(&self, index: usize) -> u32 {
        let mut load = 0u32;
        let mut has_aromatic = false;
        for bond in self.bonds_of(index) {
            load += match bond.order {
                BondOrder::Single => 1,
                BondOrder::Double => 2,
                BondOrder::Triple => 3,
                BondOrder::Aromatic => {
                    has_aromatic = true;
                    1
                }
            };
        }
        if has_aromatic || self.atoms[index].aromatic {
            load += 1;
        }
        load
    }

    /// Builds the steric descriptor of one atom.
    ///
    /// # Errors
    ///
    /// Returns [`StericError::UnsupportedElement`] if the element has no
    /// valence-electron entry, and [`StericError::InvalidStericInput`] if the
    /// sigma bonds cannot be counted.
    pub fn descriptor(&self, index: usize) -> Result<AtomDescriptor, StericError> {
        let atom = &self.atoms[index];
        let sigma_bonds = self.sigma_bond_count(index).ok_or(
            StericError::InvalidStericInput(InvalidStericKind::SigmaBondOverflow),
        )?;
        AtomDescriptor::new(
            &atom.symbol,
            sigma_bonds,
            self.bond_order_sum(index),
            atom.formal_charge,
        )
    }

    pub fn total_hydrogen_count(&self) -> u64 {
        self.atoms
            .iter()
            .map(|a| u64::from(a.is_hydrogen()) + u64::from(a.implicit_hydrogens))
            .sum()
    }

    pub fn net_charge(&self) -> i32 {
        self.atoms.iter().map(|a| a.formal_charge).sum()
    }

    /// Molecular formula in Hill order (C first, then H, then alphabetical).
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for atom in &self.atoms {
            if atom.is_hydrogen() {
                continue;
            }
            *counts.entry(atom.symbol.as_str()).or_default() += 1;
        }
        let hydrogens = self.total_hydrogen_count();

        let mut formula = String::new();
        let mut push = |symbol: &str, count: u64| {
            if count == 0 {
                return;
            }
            formula.push_str(symbol);
            if count > 1 {
                formula.push_str(&count.to_string());
            }
        };

        if let Some(carbon) = counts.remove("C") {
            push("C", carbon);
            push("H", hydrogens);
        } else {
            counts.insert("H", hydrogens);
        }
        for (symbol, count) in counts {
            push(symbol, count);
        }
        formula
    }
}
