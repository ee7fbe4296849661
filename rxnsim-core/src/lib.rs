pub mod analyzer;
pub mod assembler;
pub mod ast;
pub mod diagnostics;
pub mod engine;
pub mod integrator;
pub mod model;
pub mod parser;
pub mod rate_law;
pub mod report;
pub mod runtime;
pub mod task;

pub use analyzer::{analyze_network, check_task_source};
pub use assembler::assemble_network;
pub use ast::{ArrowKind, RateSpec, ReactionClause, SpeciesTerm, Task, UnitsDecl};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics, SourceLocation, Span};
pub use engine::KineticSystem;
pub use model::{NetworkModel, Reaction, SpeciesEntry, StoichEntry};
pub use parser::{parse_concentrations, parse_reaction_clause, parse_species_token, ParseError};
pub use rate_law::build_reaction;
pub use runtime::{
    build_simulation_context, build_simulation_context_from_source, current_concentrations,
    run_task, run_task_source, simulate, step_simulation, RunResult, SimulationContext,
    SimulationError, SimulationParams, SpeciesState, Trajectory,
};
pub use task::{parse_task, TaskError};
