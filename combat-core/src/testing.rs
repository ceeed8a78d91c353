//! Builders and deterministic random sources for tests and tools.

use crate::rng::CombatRng;
use crate::state::{Army, ArmyId, Leader, ProvinceId, TroopComposition};
use std::collections::VecDeque;

pub struct ArmyBuilder {
    army: Army,
}

impl ArmyBuilder {
    pub fn new(id: ArmyId, owner: &str) -> Self {
        Self {
            army: Army::new(
                id,
                owner,
                &format!("{} Army {}", owner, id),
                TroopComposition::ZERO,
            ),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.army.name = name.to_string();
        self
    }

    pub fn troops(mut self, infantry: u32, cavalry: u32, artillery: u32) -> Self {
        self.army.troops = TroopComposition::new(infantry, cavalry, artillery);
        self
    }

    pub fn morale(mut self, morale: f64) -> Self {
        self.army.morale = morale;
        self
    }

    pub fn experience(mut self, experience: f64) -> Self {
        self.army.experience = experience;
        self
    }

    pub fn leader(mut self, fire: u8, shock: u8, maneuver: u8, siege: u8) -> Self {
        self.army.leader = Some(Leader::new(fire, shock, maneuver, siege));
        self
    }

    pub fn location(mut self, location: ProvinceId) -> Self {
        self.army.location = location;
        self
    }

    pub fn build(self) -> Army {
        self.army
    }
}

/// Returns the same unit sample forever.
///
/// `PinnedRng::neutral()` yields 0.5, which pins the land-battle damage
/// multiplier to exactly 1.0.
#[derive(Debug, Clone, Copy)]
pub struct PinnedRng(pub f64);

impl PinnedRng {
    pub fn neutral() -> Self {
        PinnedRng(0.5)
    }
}

impl CombatRng for PinnedRng {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of unit samples in order.
///
/// Panics when exhausted, so a test notices an unexpected extra draw.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    samples: VecDeque<f64>,
    drawn: usize,
}

impl ScriptedRng {
    pub fn new(samples: &[f64]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            drawn: 0,
        }
    }

    /// Number of samples consumed so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl CombatRng for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        self.drawn += 1;
        match self.samples.pop_front() {
            Some(u) => u,
            None => panic!("ScriptedRng exhausted after {} draws", self.drawn - 1),
        }
    }
}

impl Default for ArmyBuilder {
    fn default() -> Self {
        Self::new(1, "ATT")
    }
}
