mod document;

use clap::{Parser, Subcommand};
use log::debug;
use std::path::{Path, PathBuf};

use document::FormDocument;
use lpform_model::{build_problem, FormState, Session};
use lpform_solver::{create_solver, to_lp_string, Sense, SolverConfig, SolverKind};

#[derive(Parser)]
#[command(name = "lpform")]
#[command(about = "Build and solve small linear programs from form documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a blank form document
    Template {
        /// Number of decision variables
        #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
        variables: i64,
        /// Number of constraint rows
        #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
        constraints: i64,
        /// Minimize instead of maximize
        #[arg(long)]
        minimize: bool,
    },
    /// Check a form document for errors
    Check {
        /// The form document
        file: PathBuf,
    },
    /// Solve a form document and print the report
    Solve {
        /// The form document
        file: PathBuf,
        /// Solver backend (overrides LPFORM_SOLVER)
        #[arg(short, long)]
        solver: Option<String>,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print the problem in CPLEX LP format
    Export {
        /// The form document
        file: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Template {
            variables,
            constraints,
            minimize,
        } => {
            let mut form = FormState::new();
            if let Err(e) = form
                .set_variable_count(variables)
                .and_then(|_| form.set_constraint_count(constraints))
            {
                fail(e);
            }
            if minimize {
                form.set_sense(Sense::Minimize);
            }
            match serde_json::to_string_pretty(&FormDocument::from_form(&form)) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(e),
            }
        }
        Commands::Check { file } => {
            let form = load_form(&file);
            match build_problem(&form) {
                Ok(problem) => {
                    println!("✓ {} is valid", file.display());
                    println!("  {}", problem.objective.sense);
                    println!("  {} variables", problem.num_variables());
                    println!("  {} constraints", problem.num_constraints());
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Solve { file, solver, format } => {
            let mut config = match SolverConfig::from_env() {
                Ok(c) => c,
                Err(e) => fail(e),
            };
            if let Some(name) = solver {
                match name.parse::<SolverKind>() {
                    Ok(kind) => config = config.with_kind(kind),
                    Err(e) => fail(e),
                }
            }
            let solver = create_solver(&config);
            debug!("solving {} with {}", file.display(), solver.name());

            let mut session = Session::new(load_form(&file));
            let report = match session.solve(solver.as_ref()) {
                Ok(report) => report,
                Err(e) => fail(e),
            };

            if format == "json" {
                match serde_json::to_string_pretty(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(e),
                }
            } else {
                print!("{}", report);
            }
        }
        Commands::Export { file } => {
            let form = load_form(&file);
            match build_problem(&form) {
                Ok(problem) => print!("{}", to_lp_string(&problem)),
                Err(e) => fail(e),
            }
        }
    }
}

fn load_form(path: &Path) -> FormState {
    let loaded = FormDocument::load(path).and_then(|document| Ok(document.to_form()?));
    match loaded {
        Ok(form) => form,
        Err(e) => fail(e),
    }
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(1);
}
