//! transport-solver CLI
//!
//! Solve transportation problems from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Solve a model from a JSON file
//! transport-solver solve --input model.json
//!
//! # Output as JSON
//! transport-solver solve --input model.json --format json
//!
//! # Only the least-cost starting plan
//! transport-solver solve --input model.json --initial-only
//!
//! # Generate a random model for testing
//! transport-solver generate --supply 4 --demand 6
//! ```

use rust_decimal::Decimal;
use std::fs;
use std::process;
use transport_solver::core::model::TransportModel;
use transport_solver::optimization::solver::{Solver, SolverConfig};
use transport_solver::simulation::random_model::{generate_random_model, ModelConfig};

fn print_usage() {
    eprintln!(
        r#"transport-solver — least-cost transportation plans (MODI / stepping-stone)

USAGE:
    transport-solver <COMMAND> [OPTIONS]

COMMANDS:
    solve       Solve a transportation model to optimality
    generate    Generate a random model (for testing)
    help        Show this message

OPTIONS (solve):
    --input <FILE>          Path to JSON model file
    --format <FORMAT>       Output format: text (default) or json
    --initial-only          Stop after the least-cost starting plan
    --max-iterations <N>    Pivot limit (default: 10000)

OPTIONS (generate):
    --supply <N>            Number of supply nodes (default: 5)
    --demand <N>            Number of demand nodes (default: 5)
    --max-cost <N>          Largest unit cost (default: 20)
    --unbalanced            Do not equalize total supply and demand
    --output <FILE>         Write to file instead of stdout

EXAMPLES:
    transport-solver solve --input model.json
    transport-solver solve --input model.json --format json
    transport-solver generate --supply 4 --demand 6 --output model.json

RUST_LOG=debug prints every pivot."#
    );
}

/// JSON schema written by `generate`; `solve` reads it back.
#[derive(serde::Serialize)]
struct ModelFile<'a> {
    supply: &'a [Decimal],
    demand: &'a [Decimal],
    cost: &'a [Vec<Decimal>],
}

fn load_model(path: &str) -> TransportModel {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing model: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "supply": [20, 30, 25],
  "demand": [10, 25, 40],
  "cost": [[8, 6, 10], [9, 12, 13], [14, 9, 16]]
}}"#
        );
        process::exit(1);
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    })
}

fn next_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires {}", flag, what);
        process::exit(1);
    })
}

fn next_number(args: &[String], i: usize, flag: &str) -> usize {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("{} requires a number", flag);
            process::exit(1);
        })
}

fn cmd_solve(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut initial_only = false;
    let mut config = SolverConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(next_value(args, i, "--input", "a file path"));
            }
            "--format" => {
                i += 1;
                format = next_value(args, i, "--format", "'text' or 'json'");
            }
            "--initial-only" => initial_only = true,
            "--max-iterations" => {
                i += 1;
                config.max_iterations = next_number(args, i, "--max-iterations");
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let model = load_model(&path);
    let solver = Solver::new(config);

    if initial_only {
        let plan = solver.initial_plan(model).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
        if format == "json" {
            println!("{}", to_json(&plan));
        } else {
            println!("=== Initial Plan (least cost) ===");
            println!("{}", plan);
        }
        return;
    }

    let solution = solver.solve(model).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    if format == "json" {
        println!("{}", to_json(&solution));
    } else {
        println!("{}", solution);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = ModelConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--supply" => {
                i += 1;
                config.supply_nodes = next_number(args, i, "--supply");
            }
            "--demand" => {
                i += 1;
                config.demand_nodes = next_number(args, i, "--demand");
            }
            "--max-cost" => {
                i += 1;
                config.max_cost = next_number(args, i, "--max-cost") as i64;
            }
            "--unbalanced" => config.balanced = false,
            "--output" => {
                i += 1;
                output_path = Some(next_value(args, i, "--output", "a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let model = generate_random_model(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let json = to_json(&ModelFile {
        supply: model.supply(),
        demand: model.demand(),
        cost: model.costs(),
    });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {}×{} model → {}",
            model.supply_nodes(),
            model.demand_nodes(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "solve" => cmd_solve(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
