mod common;

use combat_core::env::starter::ai_rules;
use combat_core::{
    AiRule, CombatConfig, CombatEvent, Encounter, TargetSelector, ThreatTable, TurnAction,
    choose_and_execute,
};
use common::{env, fighter, ids};

#[test]
fn highest_threat_selector_targets_b() {
    let env = env();
    let mut participants = vec![
        fighter("A", "t1", 8.0),
        fighter("C", "t2", 6.0),
        fighter("B", "t2", 6.0),
    ];
    let mut threat = ThreatTable::new();
    threat.add_threat("A", "B", 50.0);
    threat.add_threat("A", "C", 0.0);
    let rules = vec![AiRule::new("basic_attack", TargetSelector::HighestThreat)];

    let decision = choose_and_execute(
        &mut participants,
        "A",
        &rules,
        &threat,
        &env,
        &CombatConfig::default(),
        &mut combat_core::Pcg32::new(9),
    )
    .unwrap();
    assert_eq!(decision.report.targets, ids(&["B"]));
}

#[test]
fn hits_make_the_victim_resent_the_attacker() {
    let mut enc = Encounter::new(
        vec![fighter("A", "t1", 8.0), fighter("B", "t2", 6.0)],
        21,
        env(),
        CombatConfig::default(),
    )
    .unwrap();

    let mut landed = 0.0;
    for _ in 0..5 {
        let report = enc.execute_ability("A", "basic_attack", &ids(&["B"])).unwrap();
        for event in &report.events {
            if let CombatEvent::Hit { amount, crit, .. } = event {
                landed += if *crit { amount * 1.25 } else { *amount };
            }
        }
    }
    assert!((enc.threat().threat_of("B", "A") - landed).abs() < 1e-9);
    assert_eq!(enc.threat().threat_of("A", "B"), 0.0);
}

#[test]
fn threat_is_capped() {
    let config = CombatConfig::default().with_threat_cap(5.0);
    let mut table = ThreatTable::new();
    let hit = CombatEvent::Hit {
        actor_id: "A".into(),
        target_id: "B".into(),
        ability_id: None,
        item_id: None,
        amount: 9.8,
        dtype: "slashing".into(),
        crit: false,
        body_part: "chest".into(),
    };
    table.record_events(&[hit], &config);
    assert_eq!(table.threat_of("B", "A"), 5.0);
}

#[test]
fn starter_ai_guards_when_low() {
    let mut enc = Encounter::new(
        vec![fighter("A", "t1", 8.0).with_hp(6.0), fighter("B", "t2", 6.0)],
        4,
        env(),
        CombatConfig::default(),
    )
    .unwrap()
    .with_ai_rules(ai_rules());

    let report = enc.take_turn();
    assert_eq!(
        report.action,
        TurnAction::Rule {
            rule_index: 0,
            ability_id: "guard".into()
        }
    );
    assert!(enc.participant("A").unwrap().has_status("guarding"));
}

#[test]
fn taunted_ai_attacks_the_taunter() {
    let mut enc = Encounter::new(
        vec![
            fighter("A", "t1", 9.0),
            fighter("C", "t2", 7.0),
            fighter("B", "t2", 8.0),
        ],
        8,
        env(),
        CombatConfig::default(),
    )
    .unwrap()
    .with_ai_rules(vec![AiRule::new("basic_attack", TargetSelector::HighestThreat)]);

    // without threat A's rule would pick C, the first enemy
    combat_core::effect::apply_status(
        enc.participant_mut("A").unwrap(),
        "taunted",
        &env().statuses,
        Some("B"),
    );
    let report = enc.take_turn();
    assert_eq!(report.actor_id, "A");
    assert!(report.events.iter().all(|e| e.target_id() == "B"));
}

#[test]
fn actor_with_no_usable_rule_falls_back() {
    let mut enc = Encounter::new(
        vec![fighter("A", "t1", 9.0), fighter("B", "t2", 8.0)],
        8,
        env(),
        CombatConfig::default(),
    )
    .unwrap();
    enc.set_ai_profile(
        "A",
        vec![AiRule::new("fireball", TargetSelector::HighestThreat).when_ready()],
    );
    let report = enc.take_turn();
    assert_eq!(
        report.action,
        TurnAction::Fallback {
            ability_id: "basic_attack".into()
        }
    );
}
