use crate::analyzer::analyze_network;
use crate::assembler::assemble_network;
use crate::ast::{Task, UnitsDecl};
use crate::diagnostics::Diagnostics;
use crate::engine::KineticSystem;
use crate::integrator::step;
use crate::model::NetworkModel;
use crate::task::parse_task;
use log::{debug, info};
use thiserror::Error;

/// Error raised before or while setting up a simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("time step must be positive and finite, got {dt}")]
    InvalidStep { dt: f64 },

    #[error("horizon must be finite and greater than the time step (t_max = {t_max}, dt = {dt})")]
    InvalidHorizon { t_max: f64, dt: f64 },

    #[error("too many steps: t_max / dt = {t_max} / {dt} does not fit a step counter")]
    TooManySteps { t_max: f64, dt: f64 },

    #[error("species '{species}' is referenced by a reaction but missing from the species table")]
    UnknownSpecies { species: String },
}

/// Trajectory points reserved up front; longer runs grow as they go
const RESERVED_POINTS: usize = 1 << 16;

/// Step size and horizon, in the model's time unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub dt: f64,
    pub t_max: f64,
}

impl SimulationParams {
    pub fn new(dt: f64, t_max: f64) -> Self {
        Self { dt, t_max }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimulationError::InvalidStep { dt: self.dt });
        }
        if !(self.t_max.is_finite() && self.t_max > self.dt) {
            return Err(SimulationError::InvalidHorizon {
                t_max: self.t_max,
                dt: self.dt,
            });
        }
        if (self.t_max / self.dt).floor() >= usize::MAX as f64 {
            return Err(SimulationError::TooManySteps {
                t_max: self.t_max,
                dt: self.dt,
            });
        }
        Ok(())
    }

    /// Number of time points: floor(t_max / dt)
    pub fn n_steps(&self) -> usize {
        (self.t_max / self.dt).floor() as usize
    }

    /// Time of point `i` on the grid of `n_steps` evenly spaced points over [0, t_max]
    pub fn time_at(&self, i: usize) -> f64 {
        let n = self.n_steps();
        if n < 2 {
            return 0.0;
        }
        self.t_max * (i as f64 / (n - 1) as f64)
    }

    pub fn time_grid(&self) -> Vec<f64> {
        (0..self.n_steps()).map(|i| self.time_at(i)).collect()
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            dt: 0.01,
            t_max: 100.0,
        }
    }
}

/// Concentrations over time, one series per species in species-table order
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub species: Vec<String>,
    /// `concentrations[s][i]` is species `s` at `time[i]`
    pub concentrations: Vec<Vec<f64>>,
}

impl Trajectory {
    fn with_capacity(species: Vec<String>, points: usize) -> Self {
        let concentrations = species.iter().map(|_| Vec::with_capacity(points)).collect();
        Self {
            time: Vec::with_capacity(points),
            species,
            concentrations,
        }
    }

    fn push(&mut self, t: f64, state: &[f64]) {
        self.time.push(t);
        for (series, &c) in self.concentrations.iter_mut().zip(state) {
            series.push(c);
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn series(&self, species: &str) -> Option<&[f64]> {
        self.species
            .iter()
            .position(|s| s == species)
            .map(|idx| self.concentrations[idx].as_slice())
    }

    /// Concentrations of every species at point `i`
    pub fn state_at(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.len() {
            return None;
        }
        Some(self.concentrations.iter().map(|series| series[i]).collect())
    }

    pub fn final_state(&self) -> Option<Vec<f64>> {
        self.len().checked_sub(1).and_then(|last| self.state_at(last))
    }
}

/// A simulation that can be advanced one step at a time
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub system: KineticSystem,
    pub params: SimulationParams,
    pub state: Vec<f64>,
    derivatives: Vec<f64>,
    pub current_step: usize,
    pub max_steps: usize,
    pub trajectory: Trajectory,
}

/// Name and current concentration of a species
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesState {
    pub id: String,
    pub concentration: f64,
}

/// Validate parameters and set up a simulation of `model` at t = 0.
/// The model is only read.
pub fn build_simulation_context(
    model: &NetworkModel,
    params: SimulationParams,
) -> Result<SimulationContext, SimulationError> {
    params.validate()?;
    let system = KineticSystem::from_model(model)?;
    let state = model.initial_concentrations();
    let points = params.n_steps();

    let mut trajectory =
        Trajectory::with_capacity(system.species.clone(), points.min(RESERVED_POINTS));
    trajectory.push(params.time_at(0), &state);

    debug!(
        "simulation context: {} species, {} reactions, {} points",
        system.species_count(),
        system.reactions.len(),
        points
    );

    Ok(SimulationContext {
        derivatives: vec![0.0; state.len()],
        system,
        params,
        state,
        current_step: 0,
        max_steps: points.saturating_sub(1),
        trajectory,
    })
}

/// Advance one step and record it. Returns true once the horizon is reached.
pub fn step_simulation(ctx: &mut SimulationContext) -> bool {
    if ctx.current_step >= ctx.max_steps {
        return true;
    }

    step(
        &ctx.system,
        &mut ctx.state,
        &mut ctx.derivatives,
        ctx.params.dt,
    );
    ctx.current_step += 1;
    ctx.trajectory
        .push(ctx.params.time_at(ctx.current_step), &ctx.state);

    ctx.current_step >= ctx.max_steps
}

pub fn current_concentrations(ctx: &SimulationContext) -> Vec<SpeciesState> {
    ctx.system
        .species
        .iter()
        .zip(&ctx.state)
        .map(|(id, &concentration)| SpeciesState {
            id: id.clone(),
            concentration,
        })
        .collect()
}

/// Integrate `model` from t = 0 to `params.t_max`
pub fn simulate(model: &NetworkModel, params: SimulationParams) -> Result<Trajectory, SimulationError> {
    let mut ctx = build_simulation_context(model, params)?;
    while !step_simulation(&mut ctx) {}
    info!(
        "simulated {} species over {} points (dt = {}, t_max = {})",
        ctx.trajectory.species.len(),
        ctx.trajectory.len(),
        params.dt,
        params.t_max
    );
    Ok(ctx.trajectory)
}

/// Everything produced by running a task
#[derive(Debug, Clone)]
pub struct RunResult {
    pub model: NetworkModel,
    pub listing: Vec<String>,
    pub trajectory: Trajectory,
    pub units: UnitsDecl,
    pub diagnostics: Diagnostics,
}

/// Main entry point: parse a task file's source, assemble and simulate it
pub fn run_task_source(source: &str) -> Result<RunResult, Box<dyn std::error::Error>> {
    let task = parse_task(source)?;
    run_task(&task)
}

pub fn run_task(task: &Task) -> Result<RunResult, Box<dyn std::error::Error>> {
    let params = SimulationParams::new(task.simulate.dt, task.simulate.t_max);
    params.validate()?;

    let (model, listing) = assemble_network(&task.reactions, &task.concentrations)?;
    let diagnostics = analyze_network(&model);
    let trajectory = simulate(&model, params)?;

    Ok(RunResult {
        model,
        listing,
        trajectory,
        units: task.units.clone(),
        diagnostics,
    })
}

/// Parse a task file's source and prepare a stepwise simulation of it.
///
/// Returns the context plus the reaction listing and analyzer diagnostics,
/// for front ends that animate the run.
pub fn build_simulation_context_from_source(
    source: &str,
) -> Result<(SimulationContext, Vec<String>, Diagnostics), Box<dyn std::error::Error>> {
    let task = parse_task(source)?;
    let params = SimulationParams::new(task.simulate.dt, task.simulate.t_max);
    let (model, listing) = assemble_network(&task.reactions, &task.concentrations)?;
    let diagnostics = analyze_network(&model);
    let ctx = build_simulation_context(&model, params)?;
    Ok((ctx, listing, diagnostics))
}
