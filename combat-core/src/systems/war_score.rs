//! War ledger: battle log entries and battle-driven war score.
//!
//! Each won battle moves the war score towards the winner by 3, 2 or 1
//! points depending on how decisive it was. The score is kept in
//! `[-100, 100]`, positive in the attacker's favour.

use crate::state::{BattleId, Date, ProvinceId, Side, TroopComposition};
use crate::systems::land_combat::{BattleResult, BattleWinner};
use combat_data::defines::war_score as defines;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decisiveness {
    Minor,
    Moderate,
    Decisive,
}

impl Decisiveness {
    /// Classify a battle by the morale margin between the two sides.
    ///
    /// A battle that ends with the loser routed is never merely minor.
    pub fn classify(result: &BattleResult) -> Decisiveness {
        let margin = (result.attacker_morale - result.defender_morale).abs();
        let by_margin = if margin >= defines::DECISIVE_MARGIN {
            Decisiveness::Decisive
        } else if margin >= defines::MODERATE_MARGIN {
            Decisiveness::Moderate
        } else {
            Decisiveness::Minor
        };

        let loser_routed = result
            .winner
            .side()
            .is_some_and(|winner| result.routed(winner.opponent()));
        if loser_routed {
            by_margin.max(Decisiveness::Moderate)
        } else {
            by_margin
        }
    }

    /// War score awarded to the winner.
    pub fn war_score(self) -> i32 {
        match self {
            Decisiveness::Minor => defines::MINOR_SCORE,
            Decisiveness::Moderate => defines::MODERATE_SCORE,
            Decisiveness::Decisive => defines::DECISIVE_SCORE,
        }
    }
}

/// Record of one fought battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleLogEntry {
    pub id: BattleId,
    pub location: ProvinceId,
    pub date: Date,
    pub attacker_casualties: TroopComposition,
    pub defender_casualties: TroopComposition,
    pub winner: BattleWinner,
    pub decisiveness: Decisiveness,
}

impl BattleLogEntry {
    pub fn from_result(
        id: BattleId,
        location: ProvinceId,
        date: Date,
        result: &BattleResult,
    ) -> Self {
        Self {
            id,
            location,
            date,
            attacker_casualties: result.attacker_losses,
            defender_casualties: result.defender_losses,
            winner: result.winner,
            decisiveness: Decisiveness::classify(result),
        }
    }

    /// Signed war score change from the attacker's point of view.
    pub fn war_score_delta(&self) -> i32 {
        match self.winner.side() {
            Some(Side::Attacker) => self.decisiveness.war_score(),
            Some(Side::Defender) => -self.decisiveness.war_score(),
            None => 0,
        }
    }
}

/// Aggregate war score, positive in the attacker's favour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WarScore(i32);

impl WarScore {
    pub fn new(score: i32) -> Self {
        WarScore(score.clamp(-defines::MAX_WAR_SCORE, defines::MAX_WAR_SCORE))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Fold a battle into the score. Draws change nothing.
    pub fn record_battle(&mut self, entry: &BattleLogEntry) {
        *self = WarScore::new(self.0 + entry.war_score_delta());
    }
}

/// Battle log and running score of one war.
///
/// `battles` is kept in date order. Battles on the same day stay in the
/// order they were recorded. Ids are handed out in recording order, so a
/// battle recorded late for an earlier date gets a higher id than its
/// neighbours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarLedger {
    pub battles: Vec<BattleLogEntry>,
    pub score: WarScore,
    next_battle_id: BattleId,
}

impl WarLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a resolved battle and fold it into the war score.
    ///
    /// A date with an out-of-range month or day is normalized before it is
    /// logged.
    pub fn record(
        &mut self,
        location: ProvinceId,
        date: Date,
        result: &BattleResult,
    ) -> &BattleLogEntry {
        let date = if date.is_valid() {
            date
        } else {
            let normalized = date.normalized();
            log::warn!(
                "[WAR_SCORE] Battle date {} is out of range, logging it on {}",
                date,
                normalized
            );
            normalized
        };

        let entry = BattleLogEntry::from_result(self.next_battle_id, location, date, result);
        self.next_battle_id += 1;
        self.score.record_battle(&entry);

        log::info!(
            "[WAR_SCORE] Battle {} at province {} on {}: {:?} ({:?}), war score now {}",
            entry.id,
            entry.location,
            entry.date,
            entry.winner,
            entry.decisiveness,
            self.score.value()
        );

        let index = self.battles.partition_point(|logged| logged.date <= entry.date);
        self.battles.insert(index, entry);
        &self.battles[index]
    }

    /// Battles fought from `from` to `to`, both inclusive.
    pub fn battles_between(&self, from: Date, to: Date) -> &[BattleLogEntry] {
        let start = self.battles.partition_point(|logged| logged.date < from);
        let end = self.battles.partition_point(|logged| logged.date <= to);
        &self.battles[start..end.max(start)]
    }

    /// Days from the first logged battle to the last.
    pub fn span_days(&self) -> i64 {
        match (self.battles.first(), self.battles.last()) {
            (Some(first), Some(last)) => first.date.days_until(last.date),
            _ => 0,
        }
    }
}
