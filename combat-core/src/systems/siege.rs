//! Siege system - attrition-based breach progress.
//!
//! A siege accumulates progress every day:
//! - Base rate 1/day, +0.5 per artillery piece, +0.3 per leader siege pip
//! - The rate is divided by `1 + fort_level * 0.5`
//! - The walls are breached once progress reaches `fort_level * 10`
//! - The besiegers lose `1% * (1 + fort_level * 0.1)` of their force per day,
//!   breached or not
//!
//! An unfortified province (level 0) has no resistance and falls at once.

use crate::config::{CombatConfig, SiegeConfig};
use crate::state::Army;
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiegeResult {
    /// Progress towards a breach, 0-100
    pub progress_percent: f64,
    pub breached: bool,
    /// Attrition losses of the besiegers (not split by troop type)
    pub casualties: u32,
    /// Days still needed to breach; 0 once breached
    pub days_remaining: u32,
    /// Total progress required to breach
    pub fort_resistance: f64,
    pub progress_per_day: f64,
}

// ============================================================================
// Public API
// ============================================================================

/// Calculate siege state after `days` with the stock rules.
pub fn calculate_siege(
    besieger: &Army,
    fort_level: u32,
    artillery_count: u32,
    days: u32,
) -> SiegeResult {
    calculate_siege_with(
        &CombatConfig::default(),
        besieger,
        fort_level,
        artillery_count,
        days,
    )
}

/// Calculate siege state after `days` of siege.
///
/// `artillery_count` is passed separately from the besieging army so callers
/// can count siege guns their own way. The leader's siege pips come from
/// `besieger.leader`.
#[instrument(skip_all, name = "siege")]
pub fn calculate_siege_with(
    config: &CombatConfig,
    besieger: &Army,
    fort_level: u32,
    artillery_count: u32,
    days: u32,
) -> SiegeResult {
    let rules = &config.siege;
    let siege_pips = besieger.leader.map(|l| l.siege).unwrap_or(0);

    let progress_per_day = daily_progress(rules, fort_level, artillery_count, siege_pips);
    let fort_resistance = fort_level as f64 * rules.resistance_per_fort_level;
    let progress = progress_per_day * days as f64;
    let breached = progress >= fort_resistance;

    let progress_percent = if fort_resistance > 0.0 {
        (progress / fort_resistance * 100.0).min(100.0)
    } else {
        100.0
    };

    let days_remaining = if breached {
        0
    } else {
        breach_day(progress_per_day, fort_resistance).saturating_sub(days)
    };

    let casualties = attrition(config, besieger, fort_level, days);

    log::debug!(
        "[SIEGE] {} vs fort {}: day {}, progress {:.1}/{:.1} ({:.1}%), attrition {}",
        besieger.name,
        fort_level,
        days,
        progress,
        fort_resistance,
        progress_percent,
        casualties
    );
    if breached {
        log::info!(
            "Siege: {} breached fort level {} after {} days",
            besieger.name,
            fort_level,
            days
        );
    }

    SiegeResult {
        progress_percent,
        breached,
        casualties,
        days_remaining,
        fort_resistance,
        progress_per_day,
    }
}

// ============================================================================
// Progress and Attrition
// ============================================================================

/// Progress per day, attenuated by the fort.
fn daily_progress(
    rules: &SiegeConfig,
    fort_level: u32,
    artillery_count: u32,
    siege_pips: u8,
) -> f64 {
    let raw = rules.base_daily_progress
        + artillery_count as f64 * rules.artillery_progress
        + siege_pips as f64 * rules.leader_siege_progress;
    raw / (1.0 + fort_level as f64 * rules.fort_attenuation)
}

/// First day on which cumulative progress reaches `resistance`.
///
/// This is `ceil(resistance / rate)`, nudged so that float error in the
/// division can never report a day on which the walls still stand.
fn breach_day(progress_per_day: f64, resistance: f64) -> u32 {
    if progress_per_day <= 0.0 || !progress_per_day.is_finite() {
        return u32::MAX;
    }
    let mut day = (resistance / progress_per_day).ceil().max(0.0);
    if day >= u32::MAX as f64 {
        return u32::MAX;
    }
    while day > 0.0 && progress_per_day * (day - 1.0) >= resistance {
        day -= 1.0;
    }
    while progress_per_day * day < resistance {
        day += 1.0;
    }
    day as u32
}

/// Besieger attrition over `days`, truncated.
fn attrition(config: &CombatConfig, besieger: &Army, fort_level: u32, days: u32) -> u32 {
    let rules = &config.siege;
    let troops = besieger.troops.total();
    let daily_rate = rules.base_daily_attrition
        * (1.0 + fort_level as f64 * rules.attrition_per_fort_level);
    let losses = troops as f64 * daily_rate * days as f64;

    let losses = if config.clamp_losses {
        losses.min(troops as f64)
    } else {
        losses
    };
    // `as` saturates at u32::MAX
    losses as u32
}
