//! Monte Carlo battle odds.
//!
//! Trials run in parallel on the rayon pool. Trial `i` draws from its own
//! `StdRng` seeded with `seed + i`, and tallies are integer sums, so the
//! odds for a given seed do not depend on thread scheduling.

use crate::config::CombatConfig;
use crate::state::{Army, Side};
use crate::systems::land_combat::resolve_battle_with;
use crate::systems::naval_combat::{resolve_naval_battle_with, NavalForce};
use combat_data::Terrain;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregated outcome of many independent trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOdds {
    pub trials: u64,
    pub attacker_wins: u64,
    pub defender_wins: u64,
    pub draws: u64,
    pub attacker_win_rate: f64,
    pub defender_win_rate: f64,
    pub draw_rate: f64,
    /// Mean men (or ships) lost per trial
    pub mean_attacker_losses: f64,
    pub mean_defender_losses: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    attacker_wins: u64,
    defender_wins: u64,
    draws: u64,
    attacker_losses: u64,
    defender_losses: u64,
}

impl Tally {
    fn outcome(winner: Option<Side>, attacker_losses: u64, defender_losses: u64) -> Self {
        let mut tally = Tally {
            attacker_losses,
            defender_losses,
            ..Default::default()
        };
        match winner {
            Some(Side::Attacker) => tally.attacker_wins = 1,
            Some(Side::Defender) => tally.defender_wins = 1,
            None => tally.draws = 1,
        }
        tally
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            attacker_wins: self.attacker_wins + other.attacker_wins,
            defender_wins: self.defender_wins + other.defender_wins,
            draws: self.draws + other.draws,
            attacker_losses: self.attacker_losses.saturating_add(other.attacker_losses),
            defender_losses: self.defender_losses.saturating_add(other.defender_losses),
        }
    }

    fn into_odds(self, trials: u64) -> BattleOdds {
        let rate = |n: u64| {
            if trials == 0 {
                0.0
            } else {
                n as f64 / trials as f64
            }
        };
        BattleOdds {
            trials,
            attacker_wins: self.attacker_wins,
            defender_wins: self.defender_wins,
            draws: self.draws,
            attacker_win_rate: rate(self.attacker_wins),
            defender_win_rate: rate(self.defender_wins),
            draw_rate: rate(self.draws),
            mean_attacker_losses: rate(self.attacker_losses),
            mean_defender_losses: rate(self.defender_losses),
        }
    }
}

fn trial_rng(seed: u64, trial: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(trial))
}

/// Estimate land battle odds over `trials` independent resolutions.
pub fn simulate_battles(
    config: &CombatConfig,
    attacker: &Army,
    defender: &Army,
    terrain: Terrain,
    trials: u64,
    seed: u64,
) -> BattleOdds {
    let _span = tracing::info_span!("simulate_battles", trials).entered();

    let tally = (0..trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = trial_rng(seed, trial);
            let result = resolve_battle_with(config, attacker, defender, terrain, &mut rng);
            Tally::outcome(
                result.winner.side(),
                result.attacker_losses.total(),
                result.defender_losses.total(),
            )
        })
        .reduce(Tally::default, Tally::merge);

    let odds = tally.into_odds(trials);
    log::info!(
        "Simulated {} battles on {}: attacker {:.1}%, defender {:.1}%, draw {:.1}%",
        trials,
        terrain,
        odds.attacker_win_rate * 100.0,
        odds.defender_win_rate * 100.0,
        odds.draw_rate * 100.0
    );
    odds
}

/// Estimate naval battle odds over `trials` independent resolutions.
///
/// Naval battles always have a winner, so `draws` is zero.
pub fn simulate_naval_battles(
    config: &CombatConfig,
    attacker: NavalForce,
    defender: NavalForce,
    trials: u64,
    seed: u64,
) -> BattleOdds {
    let _span = tracing::info_span!("simulate_naval_battles", trials).entered();

    let tally = (0..trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = trial_rng(seed, trial);
            let result = resolve_naval_battle_with(config, attacker, defender, &mut rng);
            Tally::outcome(
                Some(result.winner),
                result.attacker_losses as u64,
                result.defender_losses as u64,
            )
        })
        .reduce(Tally::default, Tally::merge);

    let odds = tally.into_odds(trials);
    log::info!(
        "Simulated {} naval battles: attacker {:.1}%, defender {:.1}%",
        trials,
        odds.attacker_win_rate * 100.0,
        odds.defender_win_rate * 100.0
    );
    odds
}
