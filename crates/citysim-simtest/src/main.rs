//! City Sim Headless Sandbox
//!
//! Loads content, steps turns, and exports state without the editor.
//! Runs entirely in-process — no rendering, no UI.
//!
//! Usage:
//!   cargo run -p citysim-simtest -- run --turns 10 --scenario data/scenarios/sandbox.json
//!   cargo run -p citysim-simtest -- check --verbose

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use citysim_logic::state::GameState;
use citysim_logic::turn::run_turns;
use citysim_simtest::checks::run_checks;
use citysim_simtest::content_loader::load_content;
use citysim_simtest::scenario::{export_state, load_scenario};

#[derive(Parser)]
#[command(name = "citysim-simtest")]
#[command(about = "Headless sandbox for the city sim turn resolver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Content directory containing roles/core.json and buildings/core.json
    #[arg(long, global = true, default_value = "data/content")]
    content: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Step the simulation and print resources
    Run {
        /// Number of turns to resolve
        #[arg(short, long, default_value_t = 1)]
        turns: u32,

        /// Scenario JSON (a saved game state); defaults to one sandbox city
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Write the final state as JSON
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Validate content and resolver behavior
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let content = load_content(&cli.content)?;

    match cli.command {
        Commands::Run {
            turns,
            scenario,
            export,
        } => {
            let catalog = content.catalog();
            let mut state = load_scenario(scenario.as_deref())?;

            let reports = run_turns(&mut state, &catalog.roles, &catalog.buildings, turns);
            if cli.verbose {
                for report in &reports {
                    println!("turn {:>4}: {:?}", report.turn, report.delta);
                }
            }

            print_state(&state);

            if let Some(path) = export {
                export_state(&state, &path)?;
            }
        }
        Commands::Check => {
            println!("=== City Sim Harness ===\n");
            let results = run_checks(&content, cli.verbose);

            // ── Summary ──
            println!();
            let passed = results.iter().filter(|r| r.passed).count();
            let failed = results.len() - passed;

            for r in &results {
                let icon = if r.passed { "✓" } else { "✗" };
                if !r.passed || cli.verbose {
                    println!("  {} {}: {}", icon, r.name, r.detail);
                }
            }

            println!(
                "\n=== RESULT: {}/{} passed, {} failed ===",
                passed,
                results.len(),
                failed
            );

            if failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_state(state: &GameState) {
    println!("Resources");
    for (kind, amount) in state.resources.iter() {
        println!("  {}: {}", kind, amount);
    }
    for city in &state.cities {
        println!(
            "City {} ({}): population {}, {} role assignments, {} buildings",
            city.label,
            city.id,
            city.population,
            city.role_assignments.len(),
            city.buildings.len()
        );
    }
    println!("Turn: {}  EraTurn: {}", state.turn, state.era_turn);
}
