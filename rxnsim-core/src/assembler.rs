use crate::ast::ReactionClause;
use crate::model::{NetworkModel, Reaction, SpeciesEntry};
use crate::parser::{parse_concentrations, parse_reaction_clause, split_reaction_clauses, ParseError};
use crate::rate_law::build_reaction;
use log::{debug, info};
use std::collections::BTreeSet;

/// Build a network model from a reaction string and a concentration string.
///
/// Returns the model together with one human-readable line per reaction.
/// Reaction ids follow clause order; a reversible clause yields its forward
/// step first. Species are sorted by id and default to zero concentration.
pub fn assemble_network(
    reactions: &str,
    concentrations: &str,
) -> Result<(NetworkModel, Vec<String>), ParseError> {
    let initial = parse_concentrations(concentrations)?;
    let mut species: BTreeSet<String> = initial.keys().cloned().collect();

    let mut reaction_table = Vec::new();
    let mut listing = Vec::new();
    let mut next_id = 1;

    for clause_text in split_reaction_clauses(reactions) {
        let clause = parse_reaction_clause(clause_text)?;
        species.extend(
            clause
                .lhs
                .iter()
                .chain(clause.rhs.iter())
                .map(|term| term.species.clone()),
        );

        let emitted = emit_clause(&clause, next_id);
        next_id += emitted.len();
        for (reaction, line) in emitted {
            debug!("{}", line);
            reaction_table.push(reaction);
            listing.push(line);
        }
    }

    let species_table: Vec<SpeciesEntry> = species
        .into_iter()
        .map(|id| {
            let initial_concentration = initial.get(&id).copied().unwrap_or(0.0);
            SpeciesEntry {
                id,
                initial_concentration,
            }
        })
        .collect();

    info!(
        "assembled network: {} species, {} reactions",
        species_table.len(),
        reaction_table.len()
    );

    Ok((
        NetworkModel {
            species: species_table,
            reactions: reaction_table,
        },
        listing,
    ))
}

/// Build the directed reactions of one clause, numbering them from `first_id`
fn emit_clause(clause: &ReactionClause, first_id: usize) -> Vec<(Reaction, String)> {
    clause
        .directed_steps()
        .into_iter()
        .enumerate()
        .map(|(offset, (reactants, products, k))| {
            build_reaction(first_id + offset, reactants, products, k)
        })
        .collect()
}
