use crate::error::ConfigError;
use combat_data::defines::{casualties, land, naval, siege};
use serde::{Deserialize, Serialize};

/// Every tunable of the combat engine.
///
/// `Default` reproduces the stock rules from `combat_data::defines`. Fields
/// missing from a config file keep their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Land battles: per-phase random damage multiplier range.
    pub random_multiplier: (f64, f64),
    /// Land battles: damage bonus per leader pip in the matching phase.
    pub leader_pip_bonus: f64,
    /// Land battles: fraction of opponent damage taken as casualties and morale loss.
    pub inflicted_effect_rate: f64,
    /// Land battles: largest damage bonus experience can give.
    pub experience_bonus_cap: f64,
    /// Land battles: experience at which half of the cap is reached.
    pub experience_half_point: f64,
    /// Relative weights used to split casualties across troop types.
    pub casualty_weights: CasualtyWeights,

    pub siege: SiegeConfig,
    pub naval: NavalConfig,

    /// Clamp losses to the troops actually present.
    ///
    /// Without it, extreme damage can report more casualties than a side has.
    pub clamp_losses: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasualtyWeights {
    pub infantry: f64,
    pub cavalry: f64,
    pub artillery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiegeConfig {
    pub base_daily_progress: f64,
    pub artillery_progress: f64,
    pub leader_siege_progress: f64,
    pub fort_attenuation: f64,
    pub resistance_per_fort_level: f64,
    pub base_daily_attrition: f64,
    pub attrition_per_fort_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavalConfig {
    pub admiral_pip_bonus: f64,
    pub loss_rate: f64,
    pub loss_factor: (f64, f64),
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            random_multiplier: (land::RANDOM_MULTIPLIER_MIN, land::RANDOM_MULTIPLIER_MAX),
            leader_pip_bonus: land::LEADER_PIP_BONUS,
            inflicted_effect_rate: land::INFLICTED_EFFECT_RATE,
            experience_bonus_cap: land::EXPERIENCE_BONUS_CAP,
            experience_half_point: land::EXPERIENCE_HALF_POINT,
            casualty_weights: CasualtyWeights::default(),
            siege: SiegeConfig::default(),
            naval: NavalConfig::default(),
            clamp_losses: true,
        }
    }
}

impl Default for CasualtyWeights {
    fn default() -> Self {
        Self {
            infantry: casualties::INFANTRY_WEIGHT,
            cavalry: casualties::CAVALRY_WEIGHT,
            artillery: casualties::ARTILLERY_WEIGHT,
        }
    }
}

impl Default for SiegeConfig {
    fn default() -> Self {
        Self {
            base_daily_progress: siege::BASE_DAILY_PROGRESS,
            artillery_progress: siege::ARTILLERY_PROGRESS,
            leader_siege_progress: siege::LEADER_SIEGE_PROGRESS,
            fort_attenuation: siege::FORT_ATTENUATION,
            resistance_per_fort_level: siege::RESISTANCE_PER_FORT_LEVEL,
            base_daily_attrition: siege::BASE_DAILY_ATTRITION,
            attrition_per_fort_level: siege::ATTRITION_PER_FORT_LEVEL,
        }
    }
}

impl Default for NavalConfig {
    fn default() -> Self {
        Self {
            admiral_pip_bonus: naval::ADMIRAL_PIP_BONUS,
            loss_rate: naval::LOSS_RATE,
            loss_factor: (naval::LOSS_FACTOR_MIN, naval::LOSS_FACTOR_MAX),
        }
    }
}

impl CombatConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the formulas meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("random_multiplier", self.random_multiplier)?;
        check_non_negative("random_multiplier.0", self.random_multiplier.0)?;
        check_non_negative("leader_pip_bonus", self.leader_pip_bonus)?;
        check_non_negative("inflicted_effect_rate", self.inflicted_effect_rate)?;
        check_non_negative("experience_bonus_cap", self.experience_bonus_cap)?;
        check_positive("experience_half_point", self.experience_half_point)?;
        check_non_negative("casualty_weights.infantry", self.casualty_weights.infantry)?;
        check_non_negative("casualty_weights.cavalry", self.casualty_weights.cavalry)?;
        check_non_negative("casualty_weights.artillery", self.casualty_weights.artillery)?;

        let s = &self.siege;
        check_positive("siege.base_daily_progress", s.base_daily_progress)?;
        check_non_negative("siege.artillery_progress", s.artillery_progress)?;
        check_non_negative("siege.leader_siege_progress", s.leader_siege_progress)?;
        check_non_negative("siege.fort_attenuation", s.fort_attenuation)?;
        check_non_negative("siege.resistance_per_fort_level", s.resistance_per_fort_level)?;
        check_non_negative("siege.base_daily_attrition", s.base_daily_attrition)?;
        check_non_negative("siege.attrition_per_fort_level", s.attrition_per_fort_level)?;

        let n = &self.naval;
        check_non_negative("naval.admiral_pip_bonus", n.admiral_pip_bonus)?;
        check_non_negative("naval.loss_rate", n.loss_rate)?;
        check_range("naval.loss_factor", n.loss_factor)?;
        check_non_negative("naval.loss_factor.0", n.loss_factor.0)?;

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{} is not finite", value),
        })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{} must not be negative", value),
        });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{} must be positive", value),
        });
    }
    Ok(())
}

fn check_range(field: &'static str, (low, high): (f64, f64)) -> Result<(), ConfigError> {
    check_finite(field, low)?;
    check_finite(field, high)?;
    if low > high {
        return Err(ConfigError::InvalidRange { field, low, high });
    }
    Ok(())
}
