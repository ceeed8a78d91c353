//! Combat resolution systems.

pub mod casualties;
pub mod land_combat;
pub mod naval_combat;
pub mod siege;
pub mod war_score;

pub use casualties::{distribute_casualties, distribute_casualties_weighted, inflicted_effect};
pub use land_combat::{
    determine_winner, resolve_battle, resolve_battle_with, BattlePhase, BattleResult,
    BattleWinner, CombatPhase,
};
pub use naval_combat::{
    resolve_naval_battle, resolve_naval_battle_with, NavalBattleResult, NavalForce,
};
pub use siege::{calculate_siege, calculate_siege_with, SiegeResult};
pub use war_score::{BattleLogEntry, Decisiveness, WarLedger, WarScore};
