mod common;

use combat_core::effect::{apply_status, cleanse_status, tick_start_of_turn};
use combat_core::{
    AbilityDef, CombatConfig, CombatEvent, CritSpec, ScriptedRandom, execute_ability,
};
use common::{env, fighter, ids};

#[test]
fn poison_stacks_to_three_and_expires_after_four_ticks() {
    let env = env();
    let config = CombatConfig::default();
    let mut target = fighter("B", "t2", 6.0).with_stat("INT", 4.0).with_hp(40.0);

    for _ in 0..3 {
        apply_status(&mut target, "poison", &env.statuses, Some("A"));
    }
    assert_eq!(target.status("poison").unwrap().stacks, 3);

    // (1 + 4*0.05) * 3 stacks
    let events = tick_start_of_turn(&mut target, &env.statuses, &config);
    assert!(matches!(
        events.as_slice(),
        [CombatEvent::Dot { amount, dtype, .. }] if *amount == 3.6 && dtype == "poison"
    ));

    for _ in 0..3 {
        tick_start_of_turn(&mut target, &env.statuses, &config);
    }
    assert!(!target.has_status("poison"));
    assert!(tick_start_of_turn(&mut target, &env.statuses, &config).is_empty());
}

#[test]
fn refresh_status_does_not_stack() {
    let env = env();
    let mut target = fighter("B", "t2", 6.0);
    apply_status(&mut target, "burning", &env.statuses, None);
    target.status_mut("burning").unwrap().remaining = 1;
    let instance = apply_status(&mut target, "burning", &env.statuses, None).unwrap();
    assert_eq!(instance.stacks, 1);
    assert_eq!(instance.remaining, 3);
}

#[test]
fn unknown_status_is_ignored() {
    let env = env();
    let mut target = fighter("B", "t2", 6.0);
    assert!(apply_status(&mut target, "petrified", &env.statuses, None).is_none());
    assert!(target.statuses.is_empty());
    assert!(!cleanse_status(&mut target, "petrified"));
}

#[test]
fn guard_reduces_next_hit_once() {
    let env = env();
    let config = CombatConfig::default();
    let mut participants = vec![
        fighter("A", "t1", 8.0).with_stat("ATT", 10.0).with_stat("WPN", 4.0),
        fighter("B", "t2", 5.0).with_stat("ATT", 10.0).with_stat("WPN", 4.0),
    ];
    apply_status(&mut participants[0], "guarding", &env.statuses, Some("A"));
    let smash = AbilityDef::new("smash", "Smash")
        .with_formula("ATT + WPN + 6")
        .with_crit(CritSpec::never());
    let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.5]);

    let first =
        execute_ability(&mut participants, "B", &smash, &ids(&["A"]), &env, &config, &mut rng)
            .unwrap();
    assert!(matches!(
        first.events.as_slice(),
        [
            CombatEvent::GuardBlock { reduced, .. },
            CombatEvent::Hit { amount, .. },
        ] if *reduced == 10.0 && *amount == 10.0
    ));
    assert_eq!(participants[0].hp(), 10.0);
    assert!(!participants[0].has_status("guarding"));

    let second =
        execute_ability(&mut participants, "B", &smash, &ids(&["A"]), &env, &config, &mut rng)
            .unwrap();
    assert!(
        !second
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::GuardBlock { .. }))
    );
    assert_eq!(participants[0].hp(), 0.0);
}

#[test]
fn taunt_forces_target() {
    let env = env();
    let mut participants = vec![
        fighter("W", "A", 7.0),
        fighter("T1", "A", 7.0),
        fighter("X", "B", 6.0),
    ];
    apply_status(&mut participants[2], "taunted", &env.statuses, Some("T1"));
    let poke = AbilityDef::new("poke", "Poke")
        .with_formula("ATT")
        .with_crit(CritSpec::never());
    let mut rng = ScriptedRandom::new(vec![0.5]);

    let report = execute_ability(
        &mut participants,
        "X",
        &poke,
        &[],
        &env,
        &CombatConfig::default(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(report.targets, ids(&["T1"]));
}

#[test]
fn taunted_attacker_breaks_the_taunters_guard() {
    let env = env();
    let config = CombatConfig::default();
    let mut participants = vec![
        fighter("W", "t1", 7.0),
        fighter("T1", "t1", 7.0),
        fighter("X", "t2", 6.0).with_stat("ATT", 10.0).with_stat("WPN", 4.0),
    ];
    apply_status(&mut participants[0], "guarding", &env.statuses, Some("W"));
    apply_status(&mut participants[1], "guarding", &env.statuses, Some("T1"));
    apply_status(&mut participants[2], "taunted", &env.statuses, Some("T1"));
    let smash = AbilityDef::new("smash", "Smash")
        .with_formula("ATT + WPN + 6")
        .with_crit(CritSpec::never());
    // miss, then hit / no crit / body part
    let mut rng = ScriptedRandom::new(vec![0.99, 0.0, 0.5, 0.5]);

    let missed =
        execute_ability(&mut participants, "X", &smash, &ids(&["W"]), &env, &config, &mut rng)
            .unwrap();
    assert_eq!(missed.targets, ids(&["T1"]));
    assert!(matches!(missed.events.as_slice(), [CombatEvent::Miss { .. }]));
    assert!(participants[1].has_status("guarding"));

    let landed =
        execute_ability(&mut participants, "X", &smash, &ids(&["W"]), &env, &config, &mut rng)
            .unwrap();
    assert_eq!(landed.targets, ids(&["T1"]));
    assert!(matches!(
        landed.events.as_slice(),
        [
            CombatEvent::GuardBlock { actor_id: Some(actor), target_id, effect_id, reduced },
            CombatEvent::Hit { target_id: hit_target, amount, .. },
        ] if actor == "X"
            && target_id == "T1"
            && effect_id == "guarding"
            && *reduced == 10.0
            && hit_target == "T1"
            && *amount == 10.0
    ));
    assert_eq!(participants[1].hp(), 10.0);
    assert!(!participants[1].has_status("guarding"));
    assert!(participants[0].has_status("guarding"));
    assert_eq!(participants[0].hp(), 20.0);
}

#[test]
fn taunt_from_dead_source_is_ignored() {
    let env = env();
    let mut participants = vec![
        fighter("T1", "A", 7.0).with_hp(0.0),
        fighter("X", "B", 6.0),
        fighter("Z", "A", 6.0),
    ];
    apply_status(&mut participants[1], "taunted", &env.statuses, Some("T1"));
    let mut rng = ScriptedRandom::new(vec![0.5]);
    let report = execute_ability(
        &mut participants,
        "X",
        &AbilityDef::basic_attack(),
        &[],
        &env,
        &CombatConfig::default(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(report.targets, ids(&["Z"]));
}

#[test]
fn burning_respects_fire_resistance() {
    let env = env();
    let mut target = fighter("B", "t2", 6.0).with_resist("fire", 0.5);
    apply_status(&mut target, "burning", &env.statuses, None);
    let events = tick_start_of_turn(&mut target, &env.statuses, &CombatConfig::default());
    assert!(matches!(
        events.as_slice(),
        [CombatEvent::Dot { amount, .. }] if *amount == 1.0
    ));
    assert_eq!(target.hp(), 19.0);
}
