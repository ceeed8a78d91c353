//! Land battle resolution.
//!
//! A battle is a fixed sequence of four phases (fire, shock, fire, shock).
//! In each phase both sides compute damage from their remaining troops and
//! apply it to the other side at the same time:
//!
//! ```text
//! damage = raw(troops, phase)
//!        * (1 + terrain modifier for the side's role)
//!        * (1 + leader pip * 0.1)
//!        * experience bonus
//!        * random multiplier in [0.8, 1.2]
//!        * own morale / 100
//! ```
//!
//! 10% of the opponent's damage becomes the side's casualties (truncated)
//! and the same amount is taken off its morale. The battle stops as soon as
//! either side's morale reaches zero.

use crate::config::CombatConfig;
use crate::rng::CombatRng;
use crate::state::{Army, Side, TroopComposition};
use crate::systems::casualties::{distribute_casualties_weighted, inflicted_effect};
use combat_data::defines::land as defines;
use combat_data::defines::morale::{MAX_MORALE, ROUT_MORALE};
use combat_data::{Terrain, TerrainModifiers, TroopType};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatPhase {
    Fire,
    Shock,
}

impl std::fmt::Display for CombatPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatPhase::Fire => f.write_str("fire"),
            CombatPhase::Shock => f.write_str("shock"),
        }
    }
}

/// Order in which phases are fought.
pub const PHASE_SEQUENCE: [CombatPhase; defines::MAX_PHASES] = [
    CombatPhase::Fire,
    CombatPhase::Shock,
    CombatPhase::Fire,
    CombatPhase::Shock,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleWinner {
    Attacker,
    Defender,
    Draw,
}

impl BattleWinner {
    pub fn side(self) -> Option<Side> {
        match self {
            BattleWinner::Attacker => Some(Side::Attacker),
            BattleWinner::Defender => Some(Side::Defender),
            BattleWinner::Draw => None,
        }
    }
}

/// Audit record of one executed phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlePhase {
    pub kind: CombatPhase,
    /// Damage dealt by the attacker this phase
    pub attacker_damage: f64,
    /// Damage dealt by the defender this phase
    pub defender_damage: f64,
    /// Casualties the attacker suffered this phase
    pub attacker_casualties: TroopComposition,
    /// Casualties the defender suffered this phase
    pub defender_casualties: TroopComposition,
    /// Attacker morale after the phase
    pub attacker_morale: f64,
    /// Defender morale after the phase
    pub defender_morale: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: BattleWinner,
    pub attacker_losses: TroopComposition,
    pub defender_losses: TroopComposition,
    pub attacker_morale: f64,
    pub defender_morale: f64,
    pub phases: Vec<BattlePhase>,
    pub phase_count: usize,
    pub terrain: Terrain,
}

impl BattleResult {
    pub fn losses(&self, side: Side) -> TroopComposition {
        match side {
            Side::Attacker => self.attacker_losses,
            Side::Defender => self.defender_losses,
        }
    }

    pub fn morale(&self, side: Side) -> f64 {
        match side {
            Side::Attacker => self.attacker_morale,
            Side::Defender => self.defender_morale,
        }
    }

    /// True if `side` ended the battle with no morale left.
    pub fn routed(&self, side: Side) -> bool {
        self.morale(side) <= ROUT_MORALE
    }
}

// ============================================================================
// Damage
// ============================================================================

/// Raw damage of a force in one phase, before any modifier.
///
/// Fire: artillery at double attack, infantry at half, cavalry not at all.
/// Shock: infantry at full attack, cavalry at full attack scaled by
/// `1 + cavalry_penalty`, artillery at 30%.
pub fn phase_damage(troops: &TroopComposition, phase: CombatPhase, cavalry_penalty: f64) -> f64 {
    let attack = |t: TroopType| troops.get(t) as f64 * t.stats().attack;
    match phase {
        CombatPhase::Fire => {
            attack(TroopType::Artillery) * defines::FIRE_ARTILLERY_FACTOR
                + attack(TroopType::Infantry) * defines::FIRE_INFANTRY_FACTOR
        }
        CombatPhase::Shock => {
            attack(TroopType::Infantry)
                + attack(TroopType::Cavalry) * (1.0 + cavalry_penalty)
                + attack(TroopType::Artillery) * defines::SHOCK_ARTILLERY_FACTOR
        }
    }
}

/// Damage multiplier from experience: `1 + cap * xp / (xp + half_point)`.
///
/// Exactly 1.0 at zero experience; approaches `1 + cap` as experience grows.
pub fn experience_multiplier(config: &CombatConfig, experience: f64) -> f64 {
    let xp = experience.max(0.0);
    1.0 + config.experience_bonus_cap * xp / (xp + config.experience_half_point)
}

// ============================================================================
// Public API
// ============================================================================

/// Resolve a land battle with the stock rules.
pub fn resolve_battle<R: CombatRng + ?Sized>(
    attacker: &Army,
    defender: &Army,
    terrain: Terrain,
    rng: &mut R,
) -> BattleResult {
    resolve_battle_with(&CombatConfig::default(), attacker, defender, terrain, rng)
}

/// Running state of one side during a battle.
struct Combatant<'a> {
    army: &'a Army,
    side: Side,
    losses: TroopComposition,
    morale: f64,
}

impl<'a> Combatant<'a> {
    fn new(army: &'a Army, side: Side) -> Self {
        Self {
            army,
            side,
            losses: TroopComposition::ZERO,
            morale: army.clamped_morale(),
        }
    }

    fn remaining(&self) -> TroopComposition {
        self.army.troops.saturating_sub(&self.losses)
    }

    fn leader_pips(&self, phase: CombatPhase) -> u8 {
        self.army
            .leader
            .map(|l| match phase {
                CombatPhase::Fire => l.fire,
                CombatPhase::Shock => l.shock,
            })
            .unwrap_or(0)
    }

    fn terrain_modifier(&self, mods: &TerrainModifiers) -> f64 {
        match self.side {
            Side::Attacker => mods.attack,
            Side::Defender => mods.defense,
        }
    }

    /// Damage this side deals in `phase`. Draws exactly one random sample.
    fn damage<R: CombatRng + ?Sized>(
        &self,
        config: &CombatConfig,
        phase: CombatPhase,
        mods: &TerrainModifiers,
        rng: &mut R,
    ) -> f64 {
        let (low, high) = config.random_multiplier;
        let roll = rng.uniform(low, high);

        let mut damage = phase_damage(&self.remaining(), phase, mods.cavalry_penalty);
        damage *= 1.0 + self.terrain_modifier(mods);
        damage *= 1.0 + self.leader_pips(phase) as f64 * config.leader_pip_bonus;
        damage *= experience_multiplier(config, self.army.experience);
        damage *= roll;
        damage *= self.morale / MAX_MORALE;
        damage.max(0.0)
    }

    /// Take the opponent's damage: casualties and morale loss.
    fn suffer(&mut self, config: &CombatConfig, opponent_damage: f64) -> TroopComposition {
        let effect = inflicted_effect(opponent_damage, config.inflicted_effect_rate);
        let casualties = distribute_casualties_weighted(
            effect.casualties,
            &self.remaining(),
            &config.casualty_weights,
        );
        self.losses += casualties;
        self.morale = (self.morale - effect.morale_loss).clamp(0.0, MAX_MORALE);
        casualties
    }

    fn routed(&self) -> bool {
        self.morale <= ROUT_MORALE
    }
}

/// Resolve a land battle.
///
/// Neither army is modified; the caller subtracts the returned losses (see
/// [`Army::apply_battle`]). Losses never exceed the troops present.
#[instrument(skip_all, name = "land_battle")]
pub fn resolve_battle_with<R: CombatRng + ?Sized>(
    config: &CombatConfig,
    attacker: &Army,
    defender: &Army,
    terrain: Terrain,
    rng: &mut R,
) -> BattleResult {
    let mods = terrain.modifiers();
    let mut att = Combatant::new(attacker, Side::Attacker);
    let mut def = Combatant::new(defender, Side::Defender);
    let mut phases = Vec::with_capacity(PHASE_SEQUENCE.len());

    for phase in PHASE_SEQUENCE {
        // Both sides strike with their strength at the start of the phase.
        let attacker_damage = att.damage(config, phase, &mods, rng);
        let defender_damage = def.damage(config, phase, &mods, rng);

        let defender_casualties = def.suffer(config, attacker_damage);
        let attacker_casualties = att.suffer(config, defender_damage);

        let description = describe_phase(
            phase,
            attacker_damage,
            defender_damage,
            &attacker_casualties,
            &defender_casualties,
            att.routed(),
            def.routed(),
        );
        log::debug!("[BATTLE] {} vs {}: {}", attacker.name, defender.name, description);

        phases.push(BattlePhase {
            kind: phase,
            attacker_damage,
            defender_damage,
            attacker_casualties,
            defender_casualties,
            attacker_morale: att.morale,
            defender_morale: def.morale,
            description,
        });

        if att.routed() || def.routed() {
            break;
        }
    }

    let winner = determine_winner(att.morale, def.morale);
    log::info!(
        "Battle on {}: {} ({}) vs {} ({}) -> {:?} after {} phase(s), losses {} / {}",
        terrain,
        attacker.name,
        attacker.owner,
        defender.name,
        defender.owner,
        winner,
        phases.len(),
        att.losses,
        def.losses
    );

    BattleResult {
        winner,
        attacker_losses: att.losses,
        defender_losses: def.losses,
        attacker_morale: att.morale,
        defender_morale: def.morale,
        phase_count: phases.len(),
        phases,
        terrain,
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// A lone rout decides the battle; otherwise higher morale wins.
pub fn determine_winner(attacker_morale: f64, defender_morale: f64) -> BattleWinner {
    let attacker_routed = attacker_morale <= ROUT_MORALE;
    let defender_routed = defender_morale <= ROUT_MORALE;
    match (attacker_routed, defender_routed) {
        (false, true) => BattleWinner::Attacker,
        (true, false) => BattleWinner::Defender,
        _ => {
            if attacker_morale > defender_morale {
                BattleWinner::Attacker
            } else if defender_morale > attacker_morale {
                BattleWinner::Defender
            } else {
                BattleWinner::Draw
            }
        }
    }
}

fn describe_phase(
    phase: CombatPhase,
    attacker_damage: f64,
    defender_damage: f64,
    attacker_casualties: &TroopComposition,
    defender_casualties: &TroopComposition,
    attacker_routed: bool,
    defender_routed: bool,
) -> String {
    let mut text = format!(
        "{} phase: attacker deals {:.1} damage, defender deals {:.1}; attacker loses {} men, defender loses {} men",
        phase,
        attacker_damage,
        defender_damage,
        attacker_casualties.total(),
        defender_casualties.total()
    );
    match (attacker_routed, defender_routed) {
        (true, true) => text.push_str("; both sides rout"),
        (true, false) => text.push_str("; attacker routs"),
        (false, true) => text.push_str("; defender routs"),
        (false, false) => {}
    }
    text
}

#[cfg(test)]
#[path = "land_combat_tests.rs"]
mod tests;
