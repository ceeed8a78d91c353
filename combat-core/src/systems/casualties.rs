//! Shared casualty math for land battles and sieges.

use crate::config::CasualtyWeights;
use crate::state::TroopComposition;
use combat_data::TroopType;

/// Casualties and morale loss inflicted on one side by the opponent's damage.
///
/// Both values come from the same quantity (`rate * opponent_damage`): the
/// head count is that quantity truncated, the morale loss is it unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflictedEffect {
    pub casualties: u32,
    pub morale_loss: f64,
}

/// Effect of `opponent_damage` on the receiving side.
pub fn inflicted_effect(opponent_damage: f64, rate: f64) -> InflictedEffect {
    let effect = (opponent_damage * rate).max(0.0);
    InflictedEffect {
        // `as` saturates, so absurd damage cannot wrap around.
        casualties: effect as u32,
        morale_loss: effect,
    }
}

/// Split `casualties` across the troop types of `force` with the stock weights.
pub fn distribute_casualties(casualties: u32, force: &TroopComposition) -> TroopComposition {
    distribute_casualties_weighted(casualties, force, &CasualtyWeights::default())
}

/// Split `casualties` across the troop types of `force`.
///
/// Each type's share is its head count times its weight, normalized over the
/// whole force. Shares are floored and capped at the men present; the men left
/// over go one at a time to the types with the largest fractional share
/// (ties: infantry, cavalry, artillery). The result never exceeds `force` in
/// any type and always sums to `min(casualties, force.total())`.
pub fn distribute_casualties_weighted(
    casualties: u32,
    force: &TroopComposition,
    weights: &CasualtyWeights,
) -> TroopComposition {
    let total_men = force.total();
    if casualties == 0 || total_men == 0 {
        return TroopComposition::ZERO;
    }
    let to_place = (casualties as u64).min(total_men);

    let weight_of = |t: TroopType| match t {
        TroopType::Infantry => weights.infantry,
        TroopType::Cavalry => weights.cavalry,
        TroopType::Artillery => weights.artillery,
    };
    let weighted = TroopType::ALL.map(|t| force.get(t) as f64 * weight_of(t));
    let weight_sum: f64 = weighted.iter().sum();

    // All-zero weights degrade to a plain head-count split.
    let shares = if weight_sum > 0.0 {
        weighted.map(|w| to_place as f64 * w / weight_sum)
    } else {
        TroopType::ALL.map(|t| to_place as f64 * force.get(t) as f64 / total_men as f64)
    };

    let mut losses = TroopComposition::ZERO;
    let mut placed: u64 = 0;
    for (i, t) in TroopType::ALL.into_iter().enumerate() {
        let share = (shares[i].floor() as u64).min(force.get(t) as u64);
        *losses.get_mut(t) = share as u32;
        placed += share;
    }

    let mut order = [0usize, 1, 2];
    // Stable sort keeps infantry, cavalry, artillery order on ties.
    order.sort_by(|&a, &b| {
        let fa = shares[a] - shares[a].floor();
        let fb = shares[b] - shares[b].floor();
        fb.partial_cmp(&fa).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut remaining = to_place - placed;
    while remaining > 0 {
        let mut progressed = false;
        for &i in &order {
            if remaining == 0 {
                break;
            }
            let t = TroopType::ALL[i];
            if losses.get(t) < force.get(t) {
                *losses.get_mut(t) += 1;
                remaining -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    losses
}
