//! Unit tests for land_combat.rs battle resolution.
use super::*;
use crate::testing::{ArmyBuilder, PinnedRng, ScriptedRng};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f64 = 1e-9;

fn golden_attacker() -> Army {
    ArmyBuilder::new(1, "SWE").troops(1000, 200, 50).build()
}

fn golden_defender() -> Army {
    ArmyBuilder::new(2, "DEN").troops(800, 100, 20).build()
}

#[test]
fn test_fire_phase_weighting() {
    // 50 artillery * 3 * 2 + 1000 infantry * 0.5; cavalry does nothing
    let troops = TroopComposition::new(1000, 200, 50);
    assert_eq!(phase_damage(&troops, CombatPhase::Fire, 0.0), 800.0);
    assert_eq!(
        phase_damage(&TroopComposition::new(0, 500, 0), CombatPhase::Fire, 0.0),
        0.0
    );
}

#[test]
fn test_shock_phase_weighting() {
    // 100 infantry + 10 cavalry * 2 + 10 artillery * 3 * 0.3
    let troops = TroopComposition::new(100, 10, 10);
    assert!((phase_damage(&troops, CombatPhase::Shock, 0.0) - 129.0).abs() < EPS);
}

#[test]
fn test_cavalry_penalty_only_affects_shock_cavalry() {
    let cav = TroopComposition::new(0, 100, 0);
    assert_eq!(phase_damage(&cav, CombatPhase::Shock, 0.0), 200.0);
    assert_eq!(phase_damage(&cav, CombatPhase::Shock, -0.5), 100.0);

    let inf = TroopComposition::new(100, 0, 0);
    assert_eq!(phase_damage(&inf, CombatPhase::Shock, -0.5), 100.0);
}

#[test]
fn test_golden_scenario_first_phase() {
    let result = resolve_battle(
        &golden_attacker(),
        &golden_defender(),
        Terrain::Plains,
        &mut PinnedRng::neutral(),
    );

    let fire = &result.phases[0];
    assert_eq!(fire.kind, CombatPhase::Fire);
    assert_eq!(fire.attacker_damage, 800.0);
    assert_eq!(fire.defender_damage, 520.0);
    assert_eq!(fire.attacker_casualties, TroopComposition::new(44, 7, 1));
    assert_eq!(fire.defender_casualties, TroopComposition::new(72, 7, 1));
    assert!((fire.attacker_morale - 48.0).abs() < EPS);
    assert!((fire.defender_morale - 20.0).abs() < EPS);
    assert!(fire.description.starts_with("fire phase"));
}

#[test]
fn test_golden_scenario_outcome() {
    let result = resolve_battle(
        &golden_attacker(),
        &golden_defender(),
        Terrain::Plains,
        &mut PinnedRng::neutral(),
    );

    // Phase 2 (shock) fought with remaining 956/193/49 vs 728/93/19 at 48% and 20% morale
    let shock = &result.phases[1];
    assert_eq!(shock.kind, CombatPhase::Shock);
    assert!((shock.attacker_damage - 665.328).abs() < 1e-6);
    assert!((shock.defender_damage - 186.22).abs() < 1e-6);
    assert_eq!(shock.attacker_casualties, TroopComposition::new(15, 3, 0));
    assert_eq!(shock.defender_casualties, TroopComposition::new(59, 6, 1));

    assert_eq!(result.phase_count, 2);
    assert_eq!(result.phases.len(), 2);
    assert_eq!(result.winner, BattleWinner::Attacker);
    assert_eq!(result.defender_morale, 0.0);
    assert!((result.attacker_morale - 29.378).abs() < 1e-6);
    assert_eq!(result.attacker_losses, TroopComposition::new(59, 10, 1));
    assert_eq!(result.defender_losses, TroopComposition::new(131, 13, 2));
    assert_eq!(result.terrain, Terrain::Plains);
    assert!(result.routed(Side::Defender));
    assert!(!result.routed(Side::Attacker));
    assert!(result.phases[1].description.ends_with("defender routs"));
}

#[test]
fn test_pinned_rng_is_bit_identical() {
    let a = resolve_battle(
        &golden_attacker(),
        &golden_defender(),
        Terrain::Forest,
        &mut PinnedRng::neutral(),
    );
    let b = resolve_battle(
        &golden_attacker(),
        &golden_defender(),
        Terrain::Forest,
        &mut PinnedRng::neutral(),
    );
    assert_eq!(a, b);
    for (pa, pb) in a.phases.iter().zip(&b.phases) {
        assert_eq!(pa.attacker_damage.to_bits(), pb.attacker_damage.to_bits());
        assert_eq!(pa.defender_damage.to_bits(), pb.defender_damage.to_bits());
    }
}

#[test]
fn test_inputs_not_mutated() {
    let attacker = golden_attacker();
    let defender = golden_defender();
    let before = (attacker.clone(), defender.clone());
    let _ = resolve_battle(&attacker, &defender, Terrain::Plains, &mut PinnedRng::neutral());
    assert_eq!((attacker, defender), before);
}

#[test]
fn test_two_draws_per_phase_attacker_first() {
    // Attacker rolls low (0.8x), defender rolls high (~1.2x)
    let attacker = ArmyBuilder::new(1, "A").troops(100, 0, 0).build();
    let defender = ArmyBuilder::new(2, "B").troops(100, 0, 0).build();
    let mut rng = ScriptedRng::new(&[0.0, 0.999_999, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);

    let result = resolve_battle(&attacker, &defender, Terrain::Plains, &mut rng);

    assert_eq!(result.phase_count, 4);
    assert_eq!(rng.drawn(), 8);
    assert!((result.phases[0].attacker_damage - 40.0).abs() < EPS);
    assert!(result.phases[0].defender_damage > 59.99);
}

#[test]
fn test_terrain_roles() {
    // Forest: attacker -20%, defender +30%
    let army = ArmyBuilder::new(1, "A").troops(1000, 0, 0).build();
    let result = resolve_battle(&army, &army, Terrain::Forest, &mut PinnedRng::neutral());
    let fire = &result.phases[0];
    assert!((fire.attacker_damage - 400.0).abs() < EPS);
    assert!((fire.defender_damage - 650.0).abs() < EPS);
}

#[test]
fn test_terrain_cavalry_penalty_in_shock() {
    // Cavalry-only defender in mountains: 100 cav * 2 * (1 - 0.75) * (1 + 0.5)
    let attacker = ArmyBuilder::new(1, "A").troops(10, 0, 0).build();
    let defender = ArmyBuilder::new(2, "B").troops(0, 100, 0).build();
    let result = resolve_battle(&attacker, &defender, Terrain::Mountains, &mut PinnedRng::neutral());

    assert_eq!(result.phases[0].defender_damage, 0.0);
    let shock = &result.phases[1];
    let expected = 100.0 * 2.0 * 0.25 * 1.5 * (result.phases[0].defender_morale / 100.0);
    assert!((shock.defender_damage - expected).abs() < EPS);
}

#[test]
fn test_leader_uses_phase_skill() {
    let plain = ArmyBuilder::new(1, "A").troops(1000, 0, 0).build();
    let led = ArmyBuilder::new(1, "A").troops(1000, 0, 0).leader(3, 0, 6, 6).build();
    let target = ArmyBuilder::new(2, "B").troops(0, 0, 0).build();

    let base = resolve_battle(&plain, &target, Terrain::Plains, &mut PinnedRng::neutral());
    let boosted = resolve_battle(&led, &target, Terrain::Plains, &mut PinnedRng::neutral());

    // +30% in fire, nothing in shock (shock pips are zero)
    assert!((boosted.phases[0].attacker_damage - base.phases[0].attacker_damage * 1.3).abs() < EPS);
    assert!((boosted.phases[1].attacker_damage - base.phases[1].attacker_damage).abs() < EPS);
}

#[test]
fn test_experience_has_diminishing_returns() {
    let config = CombatConfig::default();
    assert_eq!(experience_multiplier(&config, 0.0), 1.0);
    assert!((experience_multiplier(&config, 50.0) - 1.125).abs() < EPS);

    let low = experience_multiplier(&config, 100.0) - experience_multiplier(&config, 50.0);
    let high = experience_multiplier(&config, 1000.0) - experience_multiplier(&config, 950.0);
    assert!(high < low);
    assert!(experience_multiplier(&config, 1e9) < 1.25);
    assert_eq!(experience_multiplier(&config, -10.0), 1.0);
}

#[test]
fn test_own_morale_scales_damage() {
    let fresh = ArmyBuilder::new(1, "A").troops(1000, 0, 0).build();
    let shaken = ArmyBuilder::new(1, "A").troops(1000, 0, 0).morale(50.0).build();
    let target = ArmyBuilder::new(2, "B").troops(0, 0, 0).build();

    let a = resolve_battle(&fresh, &target, Terrain::Plains, &mut PinnedRng::neutral());
    let b = resolve_battle(&shaken, &target, Terrain::Plains, &mut PinnedRng::neutral());
    assert!((b.phases[0].attacker_damage - a.phases[0].attacker_damage * 0.5).abs() < EPS);
}

#[test]
fn test_empty_army_deals_no_damage() {
    let attacker = ArmyBuilder::new(1, "A").troops(0, 0, 0).build();
    let defender = ArmyBuilder::new(2, "B").troops(100, 0, 0).build();
    let result = resolve_battle(&attacker, &defender, Terrain::Plains, &mut PinnedRng::neutral());

    for phase in &result.phases {
        assert_eq!(phase.attacker_damage, 0.0);
        assert_eq!(phase.defender_casualties, TroopComposition::ZERO);
    }
    assert_eq!(result.attacker_losses, TroopComposition::ZERO);
    assert_eq!(result.defender_losses, TroopComposition::ZERO);
    // The empty attacker still loses morale to the defender's damage
    assert!(result.attacker_morale < 100.0);
    assert_eq!(result.winner, BattleWinner::Defender);
}

#[test]
fn test_both_empty_is_a_draw() {
    let a = ArmyBuilder::new(1, "A").build();
    let b = ArmyBuilder::new(2, "B").build();
    let result = resolve_battle(&a, &b, Terrain::Plains, &mut PinnedRng::neutral());
    assert_eq!(result.phase_count, 4);
    assert_eq!(result.winner, BattleWinner::Draw);
}

#[test]
fn test_zero_morale_army_routs_immediately() {
    let broken = ArmyBuilder::new(1, "A").troops(5000, 0, 0).morale(0.0).build();
    let defender = ArmyBuilder::new(2, "B").troops(100, 0, 0).build();
    let result = resolve_battle(&broken, &defender, Terrain::Plains, &mut PinnedRng::neutral());

    assert_eq!(result.phase_count, 1);
    assert_eq!(result.phases[0].attacker_damage, 0.0);
    assert_eq!(result.winner, BattleWinner::Defender);
}

#[test]
fn test_simultaneous_rout_is_a_draw() {
    let a = ArmyBuilder::new(1, "A").troops(10_000, 0, 0).build();
    let b = ArmyBuilder::new(2, "B").troops(10_000, 0, 0).build();
    let result = resolve_battle(&a, &b, Terrain::Plains, &mut PinnedRng::neutral());

    assert_eq!(result.phase_count, 1);
    assert_eq!(result.attacker_morale, 0.0);
    assert_eq!(result.defender_morale, 0.0);
    assert_eq!(result.winner, BattleWinner::Draw);
    assert!(result.phases[0].description.ends_with("both sides rout"));
}

#[test]
fn test_out_of_range_morale_is_clamped() {
    let a = ArmyBuilder::new(1, "A").troops(100, 0, 0).morale(250.0).build();
    let b = ArmyBuilder::new(2, "B").troops(100, 0, 0).morale(-20.0).build();
    let result = resolve_battle(&a, &b, Terrain::Plains, &mut PinnedRng::neutral());
    // Clamped to 100, so fire damage is the unscaled 50
    assert_eq!(result.phases[0].attacker_damage, 50.0);
    assert_eq!(result.phases[0].defender_damage, 0.0);
}

#[test]
fn test_losses_never_exceed_force() {
    let tiny = ArmyBuilder::new(1, "A").troops(3, 1, 1).build();
    let huge = ArmyBuilder::new(2, "B").troops(0, 0, 100_000).build();
    let result = resolve_battle(&tiny, &huge, Terrain::Plains, &mut PinnedRng::neutral());
    assert_eq!(result.attacker_losses, TroopComposition::new(3, 1, 1));
    assert_eq!(result.winner, BattleWinner::Defender);
}

#[test]
fn test_determine_winner_rules() {
    assert_eq!(determine_winner(10.0, 0.0), BattleWinner::Attacker);
    assert_eq!(determine_winner(0.0, 10.0), BattleWinner::Defender);
    assert_eq!(determine_winner(0.0, 0.0), BattleWinner::Draw);
    assert_eq!(determine_winner(40.0, 30.0), BattleWinner::Attacker);
    assert_eq!(determine_winner(30.0, 40.0), BattleWinner::Defender);
    assert_eq!(determine_winner(25.0, 25.0), BattleWinner::Draw);
}

#[test]
fn test_phase_order_is_fixed() {
    let a = ArmyBuilder::new(1, "A").troops(10, 0, 0).build();
    let b = ArmyBuilder::new(2, "B").troops(10, 0, 0).build();
    let result = resolve_battle(&a, &b, Terrain::Plains, &mut PinnedRng::neutral());
    let kinds: Vec<_> = result.phases.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, PHASE_SEQUENCE.to_vec());
}

#[test]
fn test_symmetric_armies_win_equally() {
    let a = ArmyBuilder::new(1, "A").troops(100, 20, 5).build();
    let b = ArmyBuilder::new(2, "B").troops(100, 20, 5).build();
    let mut rng = StdRng::seed_from_u64(0x5EED);

    let trials = 10_000;
    let mut attacker_wins = 0;
    let mut defender_wins = 0;
    for _ in 0..trials {
        match resolve_battle(&a, &b, Terrain::Plains, &mut rng).winner {
            BattleWinner::Attacker => attacker_wins += 1,
            BattleWinner::Defender => defender_wins += 1,
            BattleWinner::Draw => {}
        }
    }

    let attacker_rate = attacker_wins as f64 / trials as f64;
    let defender_rate = defender_wins as f64 / trials as f64;
    assert!(
        (attacker_rate - 0.5).abs() < 0.05,
        "attacker win rate {}",
        attacker_rate
    );
    assert!(
        (defender_rate - 0.5).abs() < 0.05,
        "defender win rate {}",
        defender_rate
    );
}

#[test]
fn test_result_serializes_winner_lowercase() {
    let result = resolve_battle(
        &golden_attacker(),
        &golden_defender(),
        Terrain::Plains,
        &mut PinnedRng::neutral(),
    );
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["winner"], "attacker");
    assert_eq!(json["terrain"], "plains");
    assert_eq!(json["phases"][0]["kind"], "fire");
}

fn composition() -> impl Strategy<Value = TroopComposition> {
    (0u32..20_000, 0u32..5_000, 0u32..2_000).prop_map(|(i, c, a)| TroopComposition::new(i, c, a))
}

fn terrain() -> impl Strategy<Value = Terrain> {
    prop::sample::select(Terrain::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_more_troops_never_less_damage(
        troops in composition(),
        extra in 1u32..5_000,
        which in 0usize..3,
        terrain in terrain(),
    ) {
        let mut bigger = troops;
        *bigger.get_mut(TroopType::ALL[which]) += extra;
        let penalty = terrain.modifiers().cavalry_penalty;
        for phase in [CombatPhase::Fire, CombatPhase::Shock] {
            prop_assert!(phase_damage(&bigger, phase, penalty) >= phase_damage(&troops, phase, penalty));
        }
    }

    #[test]
    fn prop_battle_invariants(
        att in composition(),
        def in composition(),
        att_morale in 0.0..=100.0f64,
        def_morale in 0.0..=100.0f64,
        terrain in terrain(),
        seed in any::<u64>(),
    ) {
        let a = ArmyBuilder::new(1, "A").troops(att.infantry, att.cavalry, att.artillery).morale(att_morale).build();
        let d = ArmyBuilder::new(2, "D").troops(def.infantry, def.cavalry, def.artillery).morale(def_morale).build();
        let mut rng = StdRng::seed_from_u64(seed);
        let result = resolve_battle(&a, &d, terrain, &mut rng);

        prop_assert!((1..=4).contains(&result.phase_count));
        prop_assert_eq!(result.phase_count, result.phases.len());
        prop_assert!((0.0..=100.0).contains(&result.attacker_morale));
        prop_assert!((0.0..=100.0).contains(&result.defender_morale));
        prop_assert!(result.attacker_losses.infantry <= att.infantry);
        prop_assert!(result.attacker_losses.cavalry <= att.cavalry);
        prop_assert!(result.attacker_losses.artillery <= att.artillery);
        prop_assert!(result.defender_losses.infantry <= def.infantry);
        prop_assert!(result.defender_losses.cavalry <= def.cavalry);
        prop_assert!(result.defender_losses.artillery <= def.artillery);

        let mut summed = TroopComposition::ZERO;
        for phase in &result.phases {
            summed += phase.defender_casualties;
        }
        prop_assert_eq!(summed, result.defender_losses);
    }
}
