//! Terrain kinds and their combat modifiers.
//!
//! Modifiers are additive to a base multiplier of 1.0: a defense modifier of
//! `0.3` means the defender deals `1.3x` damage.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    #[default]
    Plains,
    Forest,
    Mountains,
    Marsh,
    Desert,
    Crossing,
}

/// Combat modifiers of a terrain kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainModifiers {
    /// Applied to the attacking side's damage
    pub attack: f64,
    /// Applied to the defending side's damage
    pub defense: f64,
    /// Applied to cavalry in the shock phase, for both sides
    pub cavalry_penalty: f64,
}

impl TerrainModifiers {
    const fn new(attack: f64, defense: f64, cavalry_penalty: f64) -> Self {
        Self {
            attack,
            defense,
            cavalry_penalty,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown terrain '{0}' (expected one of: plains, forest, mountains, marsh, desert, crossing)")]
pub struct TerrainParseError(pub String);

impl Terrain {
    pub const ALL: [Terrain; 6] = [
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Mountains,
        Terrain::Marsh,
        Terrain::Desert,
        Terrain::Crossing,
    ];

    pub const fn modifiers(self) -> TerrainModifiers {
        match self {
            Terrain::Plains => TerrainModifiers::new(0.0, 0.0, 0.0),
            Terrain::Forest => TerrainModifiers::new(-0.2, 0.3, -0.5),
            Terrain::Mountains => TerrainModifiers::new(-0.3, 0.5, -0.75),
            Terrain::Marsh => TerrainModifiers::new(-0.25, 0.2, -0.6),
            Terrain::Desert => TerrainModifiers::new(-0.1, 0.0, 0.0),
            Terrain::Crossing => TerrainModifiers::new(-0.4, 0.25, -0.3),
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Terrain::Plains => "plains",
            Terrain::Forest => "forest",
            Terrain::Mountains => "mountains",
            Terrain::Marsh => "marsh",
            Terrain::Desert => "desert",
            Terrain::Crossing => "crossing",
        }
    }

    /// Look up a terrain by key, falling back to plains for anything unknown.
    ///
    /// This is the lookup the battle resolver relies on: a bad key never
    /// fails a battle.
    pub fn from_key(key: &str) -> Terrain {
        key.parse().unwrap_or_default()
    }
}

impl FromStr for Terrain {
    type Err = TerrainParseError;

    /// Strict parse, for input boundaries that want to reject typos.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Terrain::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or_else(|| TerrainParseError(s.to_string()))
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
