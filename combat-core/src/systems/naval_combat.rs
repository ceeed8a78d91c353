//! Naval combat system - strength-ratio fleet engagements.
//!
//! Naval battles are a single weighted draw rather than phased combat:
//! - Effective strength = base strength * (1 + 5% per admiral pip)
//! - The attacker wins with probability `att / (att + def)`
//! - Each side loses 20% of the *opponent's* effective strength, scaled by
//!   its own random factor in [0.5, 1.0]
//!
//! Losses are drawn independently of the winner, so the winner can lose more
//! ships than the loser.

use crate::config::{CombatConfig, NavalConfig};
use crate::rng::CombatRng;
use crate::state::Side;
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ============================================================================
// Types
// ============================================================================

/// One side of a naval engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavalForce {
    pub strength: u32,
    #[serde(default)]
    pub admiral_skill: u8,
}

impl NavalForce {
    pub fn new(strength: u32) -> Self {
        Self {
            strength,
            admiral_skill: 0,
        }
    }

    pub fn with_admiral(mut self, skill: u8) -> Self {
        self.admiral_skill = skill;
        self
    }

    pub fn effective_strength(&self, rules: &NavalConfig) -> f64 {
        self.strength as f64 * (1.0 + self.admiral_skill as f64 * rules.admiral_pip_bonus)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavalBattleResult {
    pub winner: Side,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    /// Probability the attacker had of winning the draw
    pub attacker_win_chance: f64,
}

impl NavalBattleResult {
    pub fn losses(&self, side: Side) -> u32 {
        match side {
            Side::Attacker => self.attacker_losses,
            Side::Defender => self.defender_losses,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Resolve a naval battle with the stock rules.
pub fn resolve_naval_battle<R: CombatRng + ?Sized>(
    attacker: NavalForce,
    defender: NavalForce,
    rng: &mut R,
) -> NavalBattleResult {
    resolve_naval_battle_with(&CombatConfig::default(), attacker, defender, rng)
}

/// Resolve a naval battle.
///
/// Draws three samples in order: the winner, the attacker's loss factor,
/// the defender's loss factor. If neither side has any strength the defender
/// holds the sea zone, nobody loses anything and nothing is drawn.
#[instrument(skip_all, name = "naval_battle")]
pub fn resolve_naval_battle_with<R: CombatRng + ?Sized>(
    config: &CombatConfig,
    attacker: NavalForce,
    defender: NavalForce,
    rng: &mut R,
) -> NavalBattleResult {
    let rules = &config.naval;
    let att_eff = attacker.effective_strength(rules);
    let def_eff = defender.effective_strength(rules);
    let total = att_eff + def_eff;

    if total <= 0.0 {
        log::debug!("Naval battle between two empty fleets, defender holds");
        return NavalBattleResult {
            winner: Side::Defender,
            attacker_losses: 0,
            defender_losses: 0,
            attacker_win_chance: 0.0,
        };
    }

    let attacker_win_chance = att_eff / total;
    let winner = if rng.chance(attacker_win_chance) {
        Side::Attacker
    } else {
        Side::Defender
    };

    let (low, high) = rules.loss_factor;
    let attacker_losses = losses_from(config, def_eff, rng.uniform(low, high), attacker.strength);
    let defender_losses = losses_from(config, att_eff, rng.uniform(low, high), defender.strength);

    log::info!(
        "Naval battle: {:.1} vs {:.1} effective strength -> {} wins (p={:.2}), losses {} / {}",
        att_eff,
        def_eff,
        winner,
        attacker_win_chance,
        attacker_losses,
        defender_losses
    );

    NavalBattleResult {
        winner,
        attacker_losses,
        defender_losses,
        attacker_win_chance,
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Losses caused by an opponent of effective strength `opponent_effective`.
fn losses_from(config: &CombatConfig, opponent_effective: f64, factor: f64, own_strength: u32) -> u32 {
    let losses = (opponent_effective * config.naval.loss_rate * factor).max(0.0) as u32;
    if config.clamp_losses {
        losses.min(own_strength)
    } else {
        losses
    }
}
