//! # Combat Core
//!
//! Deterministic-under-seed combat resolution: land battles, sieges and
//! naval battles.
//!
//! Every resolver is a pure function of its inputs and a random source.
//! Armies are borrowed, never mutated; callers apply the returned losses.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │    Army     │────▶│  resolve_battle  │────▶│ BattleResult │
//! │  (borrowed) │     │  calculate_siege │     │ SiegeResult  │
//! └─────────────┘     │  resolve_naval_  │     │ NavalBattle- │
//!                     │     battle       │     │    Result    │
//! ┌─────────────┐     └────────▲─────────┘     └──────┬───────┘
//! │  CombatRng  │──────────────┘                      │
//! │ (injected)  │                              ┌──────▼───────┐
//! └─────────────┘                              │  WarLedger   │
//!                                              │ Army::apply_ │
//!                                              └──────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Army`] | Troops, morale, experience and leader of one side |
//! | [`resolve_battle`] | Four-phase land battle: `(armies, terrain, rng) -> BattleResult` |
//! | [`calculate_siege`] | Closed-form siege progress and attrition after N days |
//! | [`resolve_naval_battle`] | Strength-ratio fleet engagement |
//! | [`CombatRng`] | Random source seam, implemented for every `rand::RngCore` |
//! | [`CombatConfig`] | All tunables, defaulting to the stock rules |
//! | [`WarLedger`] | Battle log and war score fed by battle results |
//! | [`simulate_battles`] | Parallel Monte Carlo odds |

pub mod config;
pub mod error;
pub mod rng;
pub mod simulate;
pub mod state;
pub mod systems;
pub mod testing;

pub use combat_data::{Terrain, TroopType};
pub use config::{CasualtyWeights, CombatConfig, NavalConfig, SiegeConfig};
pub use error::ConfigError;
pub use rng::CombatRng;
pub use simulate::{simulate_battles, simulate_naval_battles, BattleOdds};
pub use state::{Army, Date, Leader, Side, TroopComposition};
pub use systems::{
    calculate_siege, calculate_siege_with, resolve_battle, resolve_battle_with,
    resolve_naval_battle, resolve_naval_battle_with, BattleLogEntry, BattlePhase, BattleResult,
    BattleWinner, CombatPhase, Decisiveness, NavalBattleResult, NavalForce, SiegeResult,
    WarLedger, WarScore,
};
