use crate::model::{NetworkModel, StoichEntry};
use crate::runtime::SimulationError;

/// A reaction with species resolved to indices in the species table
#[derive(Debug, Clone)]
pub struct CompiledReaction {
    pub rate_constant: f64,
    pub reactants: Vec<(usize, u32)>, // (species index, stoichiometry)
    pub products: Vec<(usize, u32)>,
}

impl CompiledReaction {
    /// Mass-action rate: k times each reactant concentration raised to its stoichiometry
    pub fn rate(&self, concentrations: &[f64]) -> f64 {
        self.reactants
            .iter()
            .fold(self.rate_constant, |rate, &(idx, n)| {
                rate * power(concentrations[idx], n)
            })
    }
}

/// `c^n` for any stoichiometry; coefficients past `i32::MAX` fall back to `powf`
fn power(c: f64, n: u32) -> f64 {
    match i32::try_from(n) {
        Ok(exponent) => c.powi(exponent),
        Err(_) => c.powf(f64::from(n)),
    }
}

/// The ODE system dC/dt = f(C) of a reaction network
#[derive(Debug, Clone)]
pub struct KineticSystem {
    pub species: Vec<String>,
    pub reactions: Vec<CompiledReaction>,
}

impl KineticSystem {
    /// Resolve species names of a model to indices.
    ///
    /// Fails on the first species that a reaction references but the species
    /// table lacks; assembled models never trigger it.
    pub fn from_model(model: &NetworkModel) -> Result<Self, SimulationError> {
        let resolve = |entries: &[StoichEntry]| {
            entries
                .iter()
                .map(|entry| {
                    model
                        .species_index(&entry.species)
                        .map(|idx| (idx, entry.stoichiometry))
                        .ok_or_else(|| SimulationError::UnknownSpecies {
                            species: entry.species.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        };

        let reactions = model
            .reactions
            .iter()
            .map(|reaction| {
                Ok(CompiledReaction {
                    rate_constant: reaction.rate_constant(),
                    reactants: resolve(&reaction.reactants)?,
                    products: resolve(&reaction.products)?,
                })
            })
            .collect::<Result<Vec<_>, SimulationError>>()?;

        Ok(Self {
            species: model.species.iter().map(|s| s.id.clone()).collect(),
            reactions,
        })
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Accumulate every reaction's contribution to dC/dt into `out`.
    ///
    /// Rates are evaluated on the frozen `concentrations` slice, so the order
    /// in which reactions are visited does not change the result.
    pub fn derivatives_into(&self, concentrations: &[f64], out: &mut [f64]) {
        out.iter_mut().for_each(|d| *d = 0.0);

        for reaction in &self.reactions {
            let rate = reaction.rate(concentrations);
            for &(idx, n) in &reaction.reactants {
                out[idx] -= rate * f64::from(n);
            }
            for &(idx, n) in &reaction.products {
                out[idx] += rate * f64::from(n);
            }
        }
    }

    pub fn derivatives(&self, concentrations: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.species_count()];
        self.derivatives_into(concentrations, &mut out);
        out
    }
}
