//! The assembled reaction network
//!
//! A `NetworkModel` is produced once by the assembler and only read
//! afterwards. It serializes to a tree of plain records (`species`,
//! `reactions`) that reconstructs the model exactly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A species and its initial concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub id: String,
    pub initial_concentration: f64,
}

/// A species taking part in a reaction, with its stoichiometric coefficient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoichEntry {
    pub species: String,
    pub stoichiometry: u32,
}

/// One directed elementary step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// `R1`, `R2`, ... in emission order
    pub id: String,
    pub reactants: Vec<StoichEntry>,
    pub products: Vec<StoichEntry>,
    /// Display form of the mass-action rate, e.g. `k3 * [A]**2 * [B]`
    pub rate_law: String,
    /// Single entry `{ "kN": value }`
    pub parameters: BTreeMap<String, f64>,
}

impl Reaction {
    /// Name and value of the rate constant
    pub fn rate_parameter(&self) -> Option<(&str, f64)> {
        self.parameters
            .iter()
            .next()
            .map(|(name, value)| (name.as_str(), *value))
    }

    pub fn rate_constant(&self) -> f64 {
        self.rate_parameter().map_or(0.0, |(_, k)| k)
    }

    /// Net stoichiometric change of `species` per occurrence of this reaction
    pub fn net_change(&self, species: &str) -> i64 {
        let produced: i64 = self
            .products
            .iter()
            .filter(|p| p.species == species)
            .map(|p| i64::from(p.stoichiometry))
            .sum();
        let consumed: i64 = self
            .reactants
            .iter()
            .filter(|r| r.species == species)
            .map(|r| i64::from(r.stoichiometry))
            .sum();
        produced - consumed
    }

    /// Whether the species appears on either side
    pub fn involves(&self, species: &str) -> bool {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .any(|entry| entry.species == species)
    }
}

/// Species table (sorted by id) and reaction table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkModel {
    pub species: Vec<SpeciesEntry>,
    pub reactions: Vec<Reaction>,
}

impl NetworkModel {
    pub fn species_ids(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.id.as_str()).collect()
    }

    /// Position of a species in the species table
    pub fn species_index(&self, id: &str) -> Option<usize> {
        self.species.iter().position(|entry| entry.id == id)
    }

    pub fn initial_concentrations(&self) -> Vec<f64> {
        self.species
            .iter()
            .map(|s| s.initial_concentration)
            .collect()
    }
}
