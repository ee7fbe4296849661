//! Static checks on an assembled network
//!
//! Everything reported here is a warning: the model is valid and will
//! simulate, but part of it probably does not do what the author meant.

use crate::assembler::assemble_network;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::NetworkModel;
use crate::runtime::SimulationParams;
use crate::task::parse_task;

/// Check a task file without simulating it.
///
/// Anything that would stop a run is reported as an error; a syntax error
/// carries the span of its line. A task that would run gets the warnings of
/// [`analyze_network`] instead.
pub fn check_task_source(source: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let task = match parse_task(source) {
        Ok(task) => task,
        Err(e) => {
            diagnostics.push(Diagnostic::error(e.to_string(), e.span()));
            return diagnostics;
        }
    };

    if let Err(e) = SimulationParams::new(task.simulate.dt, task.simulate.t_max).validate() {
        diagnostics.push(Diagnostic::error(e.to_string(), None));
    }

    match assemble_network(&task.reactions, &task.concentrations) {
        Ok((model, _)) => {
            for warning in analyze_network(&model).iter() {
                diagnostics.push(warning.clone());
            }
        }
        Err(e) => diagnostics.push(Diagnostic::error(e.to_string(), None)),
    }

    diagnostics
}

/// Analyze a network model and return diagnostics
pub fn analyze_network(model: &NetworkModel) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    if model.reactions.is_empty() {
        diagnostics.push(Diagnostic::warning(
            "network has no reactions; all concentrations stay constant",
            None,
        ));
    }

    // Check 1: zero rate constants
    for reaction in &model.reactions {
        if let Some((name, value)) = reaction.rate_parameter() {
            if value == 0.0 {
                diagnostics.push(Diagnostic::warning(
                    format!("reaction {} has zero rate constant '{}'", reaction.id, name),
                    None,
                ));
            }
        }
    }

    for species in &model.species {
        let id = species.id.as_str();

        // Check 2: species that no reaction touches
        if !model.reactions.is_empty() && !model.reactions.iter().any(|r| r.involves(id)) {
            diagnostics.push(Diagnostic::warning(
                format!("species '{}' takes part in no reaction", id),
                None,
            ));
            continue;
        }

        // Check 3: species that start at zero and can never appear
        let produced = model
            .reactions
            .iter()
            .any(|r| r.products.iter().any(|p| p.species == id) && r.rate_constant() > 0.0);
        if species.initial_concentration == 0.0 && !produced && !model.reactions.is_empty() {
            diagnostics.push(Diagnostic::warning(
                format!("species '{}' starts at zero and is never produced", id),
                None,
            ));
        }
    }

    diagnostics
}
