//! Output for display and plotting front ends
//!
//! Nothing in here affects the model or the trajectory; these functions only
//! render them.

use crate::model::NetworkModel;
use crate::runtime::Trajectory;
use prettytable::{Cell, Row, Table};
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pretty JSON with top-level `species` and `reactions` arrays
pub fn network_to_json(model: &NetworkModel) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Inverse of [`network_to_json`]
pub fn network_from_json(json: &str) -> Result<NetworkModel, ReportError> {
    Ok(serde_json::from_str(json)?)
}

/// Species and their initial concentrations
pub fn species_table(model: &NetworkModel, conc_unit: &str) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Species"),
        Cell::new(&format!("Initial concentration ({})", conc_unit)),
    ]));
    for species in &model.species {
        table.add_row(Row::new(vec![
            Cell::new(&species.id),
            Cell::new(&species.initial_concentration.to_string()),
        ]));
    }
    table
}

/// One row per line of the reaction listing
pub fn reaction_table(listing: &[String]) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Reactions")]));
    for line in listing {
        table.add_row(Row::new(vec![Cell::new(line)]));
    }
    table
}

/// Concentration of every species at the last time point
pub fn final_state_table(trajectory: &Trajectory, time_unit: &str, conc_unit: &str) -> Table {
    let mut table = Table::new();
    let t_end = trajectory.time.last().copied().unwrap_or(0.0);
    table.add_row(Row::new(vec![
        Cell::new("Species"),
        Cell::new(&format!("Concentration at t = {} {} ({})", t_end, time_unit, conc_unit)),
    ]));
    let final_state = trajectory.final_state().unwrap_or_default();
    for (id, value) in trajectory.species.iter().zip(final_state) {
        table.add_row(Row::new(vec![
            Cell::new(id),
            Cell::new(&format!("{:.6}", value)),
        ]));
    }
    table
}

/// Write `time,<species...>` followed by one row per time point
pub fn write_trajectory_csv<W: Write>(trajectory: &Trajectory, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["time".to_string()];
    header.extend(trajectory.species.iter().cloned());
    csv_writer.write_record(&header)?;

    for (i, t) in trajectory.time.iter().enumerate() {
        let mut record = Vec::with_capacity(trajectory.species.len() + 1);
        record.push(t.to_string());
        record.extend(trajectory.concentrations.iter().map(|series| series[i].to_string()));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
