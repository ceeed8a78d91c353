use anyhow::Result;
use clap::{Parser, Subcommand};
use combat_core::{
    calculate_siege_with, resolve_battle_with, resolve_naval_battle_with, simulate_battles,
    simulate_naval_battles, Army, Leader, NavalForce, TroopComposition,
};
use combat_sim::{load_config, load_scenario};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve land battles, sieges and naval battles", long_about = None)]
struct Cli {
    /// Combat rules as JSON; missing fields keep the stock values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a land battle described in a scenario file
    Battle {
        /// Scenario JSON with `attacker`, `defender` and optional `terrain`
        scenario: PathBuf,

        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Run this many trials and print win odds instead of one result
        #[arg(long)]
        trials: Option<u64>,
    },

    /// Siege progress and attrition after a number of days
    Siege {
        /// Fort level (0 = unfortified)
        #[arg(long)]
        fort: u32,

        /// Artillery pieces in the siege train
        #[arg(long, default_value_t = 0)]
        artillery: u32,

        /// Days under siege
        #[arg(long)]
        days: u32,

        /// Besieging troops
        #[arg(long)]
        troops: u32,

        /// Siege pips of the besieging leader
        #[arg(long, default_value_t = 0)]
        siege_skill: u8,
    },

    /// Resolve a naval battle between two fleets
    Naval {
        /// Attacking fleet strength
        #[arg(long)]
        attacker: u32,

        /// Defending fleet strength
        #[arg(long)]
        defender: u32,

        #[arg(long, default_value_t = 0)]
        attacker_skill: u8,

        #[arg(long, default_value_t = 0)]
        defender_skill: u8,

        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Run this many trials and print win odds instead of one result
        #[arg(long)]
        trials: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = std::str::FromStr::from_str(&cli.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Battle {
            scenario,
            seed,
            trials,
        } => {
            let scenario = load_scenario(&scenario)?;
            let terrain = scenario.terrain();
            match trials {
                Some(trials) => {
                    let odds = simulate_battles(
                        &config,
                        &scenario.attacker,
                        &scenario.defender,
                        terrain,
                        trials,
                        seed,
                    );
                    print_json(&odds)?;
                }
                None => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let result = resolve_battle_with(
                        &config,
                        &scenario.attacker,
                        &scenario.defender,
                        terrain,
                        &mut rng,
                    );
                    print_json(&result)?;
                }
            }
        }
        Commands::Siege {
            fort,
            artillery,
            days,
            troops,
            siege_skill,
        } => {
            // `troops` is the whole besieging force, siege guns included
            let mut besieger =
                Army::new(0, "SIM", "Besiegers", TroopComposition::new(troops, 0, 0));
            if siege_skill > 0 {
                besieger.leader = Some(Leader::new(0, 0, 0, siege_skill));
            }
            let result = calculate_siege_with(&config, &besieger, fort, artillery, days);
            print_json(&result)?;
        }
        Commands::Naval {
            attacker,
            defender,
            attacker_skill,
            defender_skill,
            seed,
            trials,
        } => {
            let attacker = NavalForce::new(attacker).with_admiral(attacker_skill);
            let defender = NavalForce::new(defender).with_admiral(defender_skill);
            match trials {
                Some(trials) => {
                    let odds = simulate_naval_battles(&config, attacker, defender, trials, seed);
                    print_json(&odds)?;
                }
                None => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let result = resolve_naval_battle_with(&config, attacker, defender, &mut rng);
                    print_json(&result)?;
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
