//! Game mechanic constants (defines).
//!
//! These are the default values of every combat tunable. `combat-core`
//! copies them into its `CombatConfig`, which is what the resolvers read.

/// Land battle constants
pub mod land {
    /// Phases of a land battle, in order. A battle stops early on rout.
    pub const MAX_PHASES: usize = 4;

    /// Fire phase: artillery fires at double its attack coefficient
    pub const FIRE_ARTILLERY_FACTOR: f64 = 2.0;

    /// Fire phase: infantry fires at half its attack coefficient
    pub const FIRE_INFANTRY_FACTOR: f64 = 0.5;

    /// Shock phase: artillery contributes 30% of its attack coefficient
    pub const SHOCK_ARTILLERY_FACTOR: f64 = 0.3;

    /// Damage bonus per leader pip in the matching phase (+10%)
    pub const LEADER_PIP_BONUS: f64 = 0.1;

    /// Lower bound of the per-phase random damage multiplier
    pub const RANDOM_MULTIPLIER_MIN: f64 = 0.8;

    /// Upper bound of the per-phase random damage multiplier
    pub const RANDOM_MULTIPLIER_MAX: f64 = 1.2;

    /// Fraction of the opponent's phase damage taken as casualties and morale loss
    pub const INFLICTED_EFFECT_RATE: f64 = 0.1;

    /// Highest damage bonus experience can ever give (+25%)
    pub const EXPERIENCE_BONUS_CAP: f64 = 0.25;

    /// Experience at which half of the cap is reached
    pub const EXPERIENCE_HALF_POINT: f64 = 50.0;
}

/// Casualty distribution weights (relative to each troop type's share)
pub mod casualties {
    pub const INFANTRY_WEIGHT: f64 = 1.2;
    pub const CAVALRY_WEIGHT: f64 = 1.0;
    pub const ARTILLERY_WEIGHT: f64 = 0.5;
}

/// Morale constants
pub mod morale {
    /// Full morale
    pub const MAX_MORALE: f64 = 100.0;

    /// A side at or below this value has routed
    pub const ROUT_MORALE: f64 = 0.0;
}

/// Siege constants
pub mod siege {
    /// Progress gained per day with no artillery and no leader
    pub const BASE_DAILY_PROGRESS: f64 = 1.0;

    /// Extra daily progress per artillery piece
    pub const ARTILLERY_PROGRESS: f64 = 0.5;

    /// Extra daily progress per leader siege pip
    pub const LEADER_SIEGE_PROGRESS: f64 = 0.3;

    /// Daily progress is divided by `1 + fort_level * FORT_ATTENUATION`
    pub const FORT_ATTENUATION: f64 = 0.5;

    /// Progress required to breach, per fort level
    pub const RESISTANCE_PER_FORT_LEVEL: f64 = 10.0;

    /// Daily attrition as a fraction of the besieging force (1%)
    pub const BASE_DAILY_ATTRITION: f64 = 0.01;

    /// Attrition grows by this fraction per fort level
    pub const ATTRITION_PER_FORT_LEVEL: f64 = 0.1;
}

/// Naval combat constants
pub mod naval {
    /// Effective strength bonus per admiral pip (+5%)
    pub const ADMIRAL_PIP_BONUS: f64 = 0.05;

    /// Fraction of the opponent's effective strength taken as losses
    pub const LOSS_RATE: f64 = 0.2;

    /// Lower bound of the random loss factor
    pub const LOSS_FACTOR_MIN: f64 = 0.5;

    /// Upper bound of the random loss factor
    pub const LOSS_FACTOR_MAX: f64 = 1.0;
}

/// War score from battles
pub mod war_score {
    /// War score is bounded to +/- this value
    pub const MAX_WAR_SCORE: i32 = 100;

    /// Morale margin at or above which a battle is decisive
    pub const DECISIVE_MARGIN: f64 = 50.0;

    /// Morale margin at or above which a battle is moderate
    pub const MODERATE_MARGIN: f64 = 20.0;

    pub const DECISIVE_SCORE: i32 = 3;
    pub const MODERATE_SCORE: i32 = 2;
    pub const MINOR_SCORE: i32 = 1;
}
