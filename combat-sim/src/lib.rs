//! Scenario and configuration loading for the `combat-sim` driver.

pub mod scenario;

pub use scenario::{load_config, load_scenario, BattleScenario};
