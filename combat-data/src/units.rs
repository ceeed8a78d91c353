//! Per-troop-type combat coefficients.

use crate::defines::casualties;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TroopType {
    Infantry,
    Cavalry,
    Artillery,
}

impl TroopType {
    /// All troop types in canonical order (infantry, cavalry, artillery).
    pub const ALL: [TroopType; 3] = [TroopType::Infantry, TroopType::Cavalry, TroopType::Artillery];

    /// Base coefficients for this troop type.
    pub const fn stats(self) -> UnitStats {
        match self {
            TroopType::Infantry => INFANTRY,
            TroopType::Cavalry => CAVALRY,
            TroopType::Artillery => ARTILLERY,
        }
    }

    /// Relative weight of this troop type when a side's casualties are split.
    pub const fn casualty_weight(self) -> f64 {
        match self {
            TroopType::Infantry => casualties::INFANTRY_WEIGHT,
            TroopType::Cavalry => casualties::CAVALRY_WEIGHT,
            TroopType::Artillery => casualties::ARTILLERY_WEIGHT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TroopType::Infantry => "infantry",
            TroopType::Cavalry => "cavalry",
            TroopType::Artillery => "artillery",
        }
    }
}

impl std::fmt::Display for TroopType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Combat coefficients of one troop type.
///
/// Only `attack` feeds the damage formulas. `defense` and `morale_weight`
/// are exposed for callers that rate armies (e.g. an AI weighing odds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack: f64,
    pub defense: f64,
    pub morale_weight: f64,
}

const INFANTRY: UnitStats = UnitStats {
    attack: 1.0,
    defense: 1.0,
    morale_weight: 1.0,
};

const CAVALRY: UnitStats = UnitStats {
    attack: 2.0,
    defense: 0.5,
    morale_weight: 1.5,
};

const ARTILLERY: UnitStats = UnitStats {
    attack: 3.0,
    defense: 0.3,
    morale_weight: 0.5,
};
