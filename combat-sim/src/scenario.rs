use anyhow::{Context, Result};
use combat_core::{Army, CombatConfig, Terrain};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A land battle described in a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleScenario {
    pub attacker: Army,
    pub defender: Army,
    /// Terrain key, plains when absent
    #[serde(default)]
    pub terrain: Option<String>,
}

impl BattleScenario {
    /// The scenario's terrain. Unknown keys fall back to plains with a warning.
    pub fn terrain(&self) -> Terrain {
        let Some(key) = &self.terrain else {
            return Terrain::default();
        };
        let terrain = Terrain::from_key(key);
        if terrain.key() != key.trim().to_ascii_lowercase() {
            log::warn!("Unknown terrain '{}', fighting on {}", key, terrain);
        }
        terrain
    }
}

pub fn load_scenario(path: &Path) -> Result<BattleScenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    let scenario: BattleScenario = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scenario {}", path.display()))?;
    Ok(scenario)
}

/// Load combat rules from `path`, or the stock rules when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CombatConfig> {
    let Some(path) = path else {
        return Ok(CombatConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = CombatConfig::from_json_str(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    log::info!("Loaded combat config from {}", path.display());
    Ok(config)
}
