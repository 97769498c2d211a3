//! HEXREIGN CLI - headless simulation driver
//!
//! Commands:
//! - run: AI vs AI simulation to game over or a turn limit
//! - map: terrain distribution for a seed
//! - scenario: write the default scenario as JSON

mod worldgen;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hexreign_core::{AiController, GameState, Phase, Resource, Scenario, Terrain};
use std::path::PathBuf;
use tracing::{debug, info};
use worldgen::Worldgen;

#[derive(Parser)]
#[command(name = "hexreign")]
#[command(about = "HEXREIGN hex strategy simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an AI vs AI simulation
    Run {
        /// Scenario JSON; defaults to the built-in Red vs Blue setup
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Override the scenario's terrain seed
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "60")]
        max_turns: u32,
        /// Emit the final report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the terrain distribution for a seed
    Map {
        #[arg(long, default_value = "42")]
        seed: u64,
        #[arg(long, default_value = "25")]
        width: i32,
        #[arg(long, default_value = "16")]
        height: i32,
    },
    /// Write the default scenario as JSON
    Scenario {
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            scenario,
            seed,
            max_turns,
            json,
        } => run(scenario, seed, max_turns, json),
        Commands::Map {
            seed,
            width,
            height,
        } => {
            map(seed, width, height);
            Ok(())
        }
        Commands::Scenario { output } => {
            let scenario = Scenario::default();
            scenario
                .save(&output)
                .with_context(|| format!("writing scenario {}", output.display()))?;
            println!("Wrote {} to {}", scenario.name, output.display());
            Ok(())
        }
    }
}

fn run(path: Option<PathBuf>, seed: Option<u64>, max_turns: u32, json: bool) -> anyhow::Result<()> {
    let mut scenario = match path {
        Some(path) => Scenario::load(&path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::default(),
    };
    if let Some(seed) = seed {
        scenario.seed = seed;
    }

    let generator = Worldgen::new(scenario.seed);
    let mut state = scenario.build(|hex| generator.terrain_at(hex))?;
    anyhow::ensure!(!state.nations().is_empty(), "scenario has no nations");
    info!(
        scenario = %scenario.name,
        seed = scenario.seed,
        nations = state.nations().len(),
        "simulation start"
    );

    let mut controllers: Vec<AiController> = state
        .nations()
        .iter()
        .enumerate()
        .map(|(i, nation)| AiController::with_seed(nation.id, scenario.seed.wrapping_add(i as u64)))
        .collect();

    let mut all_settled = false;
    while state.turn() <= max_turns {
        let active = state.current_nation_id();
        controllers[active.index()].take_turn(state.world_mut());

        // Instantiate whatever the nation's cities finished this turn
        let completions = state.next_turn();
        for completion in completions {
            let Some(city) = state.world().city(completion.city) else {
                continue;
            };
            let pos = city.position();
            let owner = city.owner;
            if state.world_mut().spawn_unit(completion.kind, pos, owner).is_some() {
                debug!(kind = ?completion.kind, city = ?completion.city, "production complete");
            }
        }

        let nation = state.world().nation(active);
        debug!(
            turn = state.turn(),
            nation = %nation.name,
            cities = nation.cities().len(),
            units = nation.units().len(),
            "turn processed"
        );

        // The engine never self-halts; stop once everyone has settled and
        // the field has thinned to at most one nation with cities
        all_settled = all_settled || state.nations().iter().all(|n| !n.cities().is_empty());
        if all_settled && state.is_game_over() {
            info!(turn = state.turn(), "game over");
            break;
        }
    }

    state.set_phase(Phase::Ended);
    if json {
        println!("{}", serde_json::to_string_pretty(&report_json(&state))?);
    } else {
        report(&state);
    }
    Ok(())
}

fn report(state: &GameState) {
    println!("Finished at turn {}", state.turn());
    for nation in state.nations() {
        println!(
            "  {:<8} cities={} units={} territory={} gold={} food={}",
            nation.name,
            nation.cities().len(),
            nation.units().len(),
            territory_of(state, nation.id),
            nation.resources().amount(Resource::Gold),
            nation.resources().amount(Resource::Food),
        );
    }
}

fn report_json(state: &GameState) -> serde_json::Value {
    serde_json::json!({
        "turn": state.turn(),
        "game_over": state.is_game_over(),
        "nations": state.nations().iter().map(|nation| {
            serde_json::json!({
                "name": nation.name,
                "cities": nation.cities().len(),
                "units": nation.units().len(),
                "territory": territory_of(state, nation.id),
                "gold": nation.resources().amount(Resource::Gold),
                "food": nation.resources().amount(Resource::Food),
                "production": nation.resources().amount(Resource::Production),
            })
        }).collect::<Vec<_>>(),
    })
}

fn territory_of(state: &GameState, nation: hexreign_core::NationId) -> usize {
    state
        .world()
        .tiles()
        .filter(|(_, tile)| tile.is_owned_by(nation))
        .count()
}

fn map(seed: u64, width: i32, height: i32) {
    let generator = Worldgen::new(seed);
    let total = (width * height) as f64;

    println!("Terrain distribution for seed {} ({}x{})", seed, width, height);
    for terrain in Terrain::ALL {
        let count = (0..height)
            .flat_map(|r| (0..width).map(move |q| hexreign_core::Hex::new(q, r)))
            .filter(|&hex| generator.terrain_at(hex) == terrain)
            .count();
        println!(
            "  {:<10} {:>4} ({:>5.1}%)",
            format!("{:?}", terrain),
            count,
            count as f64 / total * 100.0
        );
    }
}
