mod viewer;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use rxnsim_core::diagnostics::{format_parse_error, format_runtime_error, format_task_error};
use rxnsim_core::report::{
    final_state_table, network_to_json, reaction_table, species_table, write_trajectory_csv,
};
use rxnsim_core::{
    analyze_network, assemble_network, check_task_source, parse_task, run_task, simulate,
    Diagnostics, ParseError, SimulationError, SimulationParams, SourceLocation, TaskError,
    Trajectory, UnitsDecl,
};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rxnsim")]
#[command(about = "Mass-action kinetics from compact reaction notation", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a task file
    Run {
        /// Path to the task file
        file: PathBuf,
        /// Override the time step
        #[arg(long)]
        dt: Option<f64>,
        /// Override the horizon
        #[arg(long)]
        t_max: Option<f64>,
        /// Print the network model as JSON
        #[arg(long)]
        json: bool,
        /// Write the trajectory to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Simulate reactions given on the command line
    Simulate {
        /// Reaction clauses, e.g. "A <-> B : 0.1//0.1"
        #[arg(short, long)]
        reactions: String,
        /// Initial concentrations, e.g. "A: 100, B: 20"
        #[arg(short, long, default_value = "")]
        concentrations: String,
        #[arg(long, default_value_t = 0.01)]
        dt: f64,
        #[arg(long, default_value_t = 100.0)]
        t_max: f64,
        /// Print the network model as JSON
        #[arg(long)]
        json: bool,
        /// Write the trajectory to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Parse a task file and report problems without simulating
    Check {
        /// Path to the task file
        file: PathBuf,
    },
    /// Open a live-reloading plot of a task file
    View {
        /// Path to the task file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let outcome = match cli.command {
        Commands::Run {
            file,
            dt,
            t_max,
            json,
            csv,
        } => run_file(&file, dt, t_max, json, csv.as_deref()),
        Commands::Simulate {
            reactions,
            concentrations,
            dt,
            t_max,
            json,
            csv,
        } => simulate_inline(&reactions, &concentrations, dt, t_max, json, csv.as_deref()),
        Commands::Check { file } => check_file(&file),
        Commands::View { file } => viewer::run_viewer(file),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    // A logger may already be installed when embedded; keep going without ours
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn run_file(
    file: &Path,
    dt: Option<f64>,
    t_max: Option<f64>,
    json: bool,
    csv: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let mut task = parse_task(&source).map_err(|e| format_task_error(&e, &source))?;
    if let Some(dt) = dt {
        task.simulate.dt = dt;
    }
    if let Some(t_max) = t_max {
        task.simulate.t_max = t_max;
    }

    let result = run_task(&task).map_err(describe)?;
    print_diagnostics(&result.diagnostics);
    print_run(
        &result.model,
        &result.listing,
        &result.trajectory,
        &result.units,
        json,
    )?;
    if let Some(path) = csv {
        export_csv(&result.trajectory, path)?;
    }
    Ok(())
}

fn simulate_inline(
    reactions: &str,
    concentrations: &str,
    dt: f64,
    t_max: f64,
    json: bool,
    csv: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = SimulationParams::new(dt, t_max);
    params.validate()?;
    let (model, listing) =
        assemble_network(reactions, concentrations).map_err(|e| format_parse_error(&e))?;
    print_diagnostics(&analyze_network(&model));
    let trajectory = simulate(&model, params)?;

    print_run(&model, &listing, &trajectory, &UnitsDecl::default(), json)?;
    if let Some(path) = csv {
        export_csv(&trajectory, path)?;
    }
    Ok(())
}

fn check_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let diagnostics = check_task_source(&source);

    for diagnostic in diagnostics.iter() {
        match diagnostic.span {
            Some(span) => {
                let location = SourceLocation::from_offset(&source, span.start);
                eprintln!("{} (line {})", diagnostic, location.line);
            }
            None => eprintln!("{}", diagnostic),
        }
    }

    let errors = diagnostics.errors().count();
    if errors > 0 {
        return Err(format!("{}: {} error(s)", file.display(), errors).into());
    }
    println!(
        "{}: ok, {} warning(s)",
        file.display(),
        diagnostics.warnings().count()
    );
    Ok(())
}

fn print_run(
    model: &rxnsim_core::NetworkModel,
    listing: &[String],
    trajectory: &Trajectory,
    units: &UnitsDecl,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("=== JSON Representation ===");
        println!("{}", network_to_json(model)?);
        println!();
    }

    println!("=== Initial Concentrations ===");
    species_table(model, &units.concentration).printstd();

    println!("\n=== List of All Reactions ===");
    reaction_table(listing).printstd();

    println!("\n=== Final Concentrations ===");
    final_state_table(trajectory, &units.time, &units.concentration).printstd();
    Ok(())
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        eprintln!("{}", diagnostic);
    }
}

fn export_csv(trajectory: &Trajectory, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    write_trajectory_csv(trajectory, file)?;
    log::info!("trajectory written to {}", path.display());
    Ok(())
}

/// Prefix errors by the stage that raised them
fn describe(error: Box<dyn std::error::Error>) -> Box<dyn std::error::Error> {
    if let Some(parse_error) = error.downcast_ref::<ParseError>() {
        return format_parse_error(parse_error).into();
    }
    if let Some(task_error) = error.downcast_ref::<TaskError>() {
        return format!("Task error: {}", task_error).into();
    }
    if error.downcast_ref::<SimulationError>().is_some() {
        return format_runtime_error(error.as_ref()).into();
    }
    error
}
