use crate::systems::casualties::distribute_casualties;
use crate::systems::land_combat::BattleResult;
use combat_data::defines::morale::MAX_MORALE;
use combat_data::TroopType;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 12 * DAYS_PER_MONTH;

/// Date of a logged battle.
///
/// Dates live on a flat calendar of twelve 30-day months, so every date maps
/// to exactly one day number and the gap between two battles is a plain
/// subtraction. Out-of-range components (month 13, day 31) are only carried
/// until [`Date::normalized`] folds them into the following month or year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Month in 1-12 and day in 1-30.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month) && (1..=DAYS_PER_MONTH as u8).contains(&self.day)
    }

    /// Days since 1.1 of year 0.
    pub fn day_number(&self) -> i64 {
        self.year as i64 * DAYS_PER_YEAR
            + (self.month as i64 - 1) * DAYS_PER_MONTH
            + (self.day as i64 - 1)
    }

    pub fn from_day_number(days: i64) -> Self {
        let year = days.div_euclid(DAYS_PER_YEAR);
        let in_year = days.rem_euclid(DAYS_PER_YEAR);
        Self {
            year: year.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            month: (in_year / DAYS_PER_MONTH + 1) as u8,
            day: (in_year % DAYS_PER_MONTH + 1) as u8,
        }
    }

    /// The same day with month and day brought back into range.
    pub fn normalized(&self) -> Self {
        Self::from_day_number(self.day_number())
    }

    pub fn add_days(&self, days: u32) -> Self {
        Self::from_day_number(self.day_number() + days as i64)
    }

    /// Signed number of days from `self` to `later`.
    pub fn days_until(&self, later: Date) -> i64 {
        later.day_number() - self.day_number()
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::new(1444, 11, 11)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.year, self.month, self.day)
    }
}

pub type Tag = String;
pub type ProvinceId = u32;
pub type ArmyId = u32;
pub type BattleId = u32;

/// One side of an engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Attacker => f.write_str("attacker"),
            Side::Defender => f.write_str("defender"),
        }
    }
}

/// Head counts per troop type.
///
/// Used both for a live force and as a losses accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TroopComposition {
    pub infantry: u32,
    pub cavalry: u32,
    pub artillery: u32,
}

impl TroopComposition {
    pub const ZERO: TroopComposition = TroopComposition::new(0, 0, 0);

    pub const fn new(infantry: u32, cavalry: u32, artillery: u32) -> Self {
        Self {
            infantry,
            cavalry,
            artillery,
        }
    }

    pub fn get(&self, troop: TroopType) -> u32 {
        match troop {
            TroopType::Infantry => self.infantry,
            TroopType::Cavalry => self.cavalry,
            TroopType::Artillery => self.artillery,
        }
    }

    pub fn get_mut(&mut self, troop: TroopType) -> &mut u32 {
        match troop {
            TroopType::Infantry => &mut self.infantry,
            TroopType::Cavalry => &mut self.cavalry,
            TroopType::Artillery => &mut self.artillery,
        }
    }

    /// Total men across all troop types (u64 so large forces cannot overflow).
    pub fn total(&self) -> u64 {
        self.infantry as u64 + self.cavalry as u64 + self.artillery as u64
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Per-type subtraction floored at zero.
    pub fn saturating_sub(&self, other: &TroopComposition) -> TroopComposition {
        TroopComposition {
            infantry: self.infantry.saturating_sub(other.infantry),
            cavalry: self.cavalry.saturating_sub(other.cavalry),
            artillery: self.artillery.saturating_sub(other.artillery),
        }
    }
}

impl Add for TroopComposition {
    type Output = TroopComposition;

    fn add(self, rhs: TroopComposition) -> TroopComposition {
        TroopComposition {
            infantry: self.infantry.saturating_add(rhs.infantry),
            cavalry: self.cavalry.saturating_add(rhs.cavalry),
            artillery: self.artillery.saturating_add(rhs.artillery),
        }
    }
}

impl AddAssign for TroopComposition {
    fn add_assign(&mut self, rhs: TroopComposition) {
        *self = *self + rhs;
    }
}

impl std::fmt::Display for TroopComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} inf / {} cav / {} art",
            self.infantry, self.cavalry, self.artillery
        )
    }
}

/// A commander's skill pips, conventionally 0-6 each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Leader {
    pub fire: u8,
    pub shock: u8,
    pub maneuver: u8,
    pub siege: u8,
}

impl Leader {
    pub fn new(fire: u8, shock: u8, maneuver: u8, siege: u8) -> Self {
        Self {
            fire,
            shock,
            maneuver,
            siege,
        }
    }
}

/// Snapshot of an army handed to the resolvers.
///
/// The resolvers only borrow armies. Troop counts are unsigned by type;
/// morale is expected in `[0, 100]` and is clamped on entry to a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Army {
    pub id: ArmyId,
    pub owner: Tag,
    pub name: String,
    pub troops: TroopComposition,
    pub morale: f64,
    /// Grows without bound; its damage bonus has diminishing returns.
    #[serde(default)]
    pub experience: f64,
    #[serde(default)]
    pub leader: Option<Leader>,
    #[serde(default)]
    pub location: ProvinceId,
    /// Informational only, no resolver reads it.
    #[serde(default)]
    pub supply: f64,
}

impl Army {
    pub fn new(id: ArmyId, owner: &str, name: &str, troops: TroopComposition) -> Self {
        Self {
            id,
            owner: owner.to_string(),
            name: name.to_string(),
            troops,
            morale: MAX_MORALE,
            experience: 0.0,
            leader: None,
            location: 0,
            supply: 0.0,
        }
    }

    /// Morale clamped to `[0, 100]`.
    pub fn clamped_morale(&self) -> f64 {
        self.morale.clamp(0.0, MAX_MORALE)
    }

    /// Subtract this army's losses from a battle and adopt its post-battle morale.
    pub fn apply_battle(&mut self, result: &BattleResult, side: Side) {
        let (losses, morale) = match side {
            Side::Attacker => (result.attacker_losses, result.attacker_morale),
            Side::Defender => (result.defender_losses, result.defender_morale),
        };
        self.troops = self.troops.saturating_sub(&losses);
        self.morale = morale.clamp(0.0, MAX_MORALE);
        log::debug!(
            "Army {} ({}) applied battle losses {}, {} remaining, morale {:.1}",
            self.id,
            self.owner,
            losses,
            self.troops,
            self.morale
        );
    }

    /// Remove a scalar casualty count (e.g. siege attrition), split across
    /// troop types the same way battle casualties are.
    ///
    /// Returns the per-type losses actually removed.
    pub fn apply_siege_attrition(&mut self, casualties: u32) -> TroopComposition {
        let losses = distribute_casualties(casualties, &self.troops);
        self.troops = self.troops.saturating_sub(&losses);
        losses
    }
}
