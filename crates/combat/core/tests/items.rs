mod common;

use combat_core::effect::apply_status;
use combat_core::{
    ActionError, CombatConfig, CombatEvent, ItemDef, ItemKind, ScriptedRandom, use_item,
};
use common::{env, fighter, ids};

#[test]
fn potion_heals_user_and_is_consumed() {
    let env = env();
    let potion = env.items.get("healing_potion").unwrap();
    let mut participants = vec![
        fighter("A", "t1", 8.0).with_hp(5.0).with_item("healing_potion", 1),
        fighter("B", "t2", 6.0),
    ];
    let mut rng = ScriptedRandom::new(vec![0.5]);

    let report = use_item(
        &mut participants,
        "A",
        potion,
        &[],
        &env,
        &CombatConfig::default(),
        &mut rng,
    )
    .unwrap();
    assert!(matches!(
        report.events.as_slice(),
        [CombatEvent::Heal { amount, target_id, .. }] if *amount == 15.0 && target_id == "A"
    ));
    assert_eq!(participants[0].hp(), 20.0);
    assert_eq!(participants[0].item_count("healing_potion"), 0);

    let err = use_item(
        &mut participants,
        "A",
        potion,
        &[],
        &env,
        &CombatConfig::default(),
        &mut rng,
    )
    .unwrap_err();
    assert_eq!(err, ActionError::NoItem("healing_potion".into()));
    assert_eq!(rng.consumed(), 0);
}

#[test]
fn draught_cleanses_present_statuses_only() {
    let env = env();
    let mut participants = vec![fighter("A", "t1", 8.0).with_item("cleansing_draught", 2)];
    apply_status(&mut participants[0], "poison", &env.statuses, Some("B"));

    let report = use_item(
        &mut participants,
        "A",
        env.items.get("cleansing_draught").unwrap(),
        &ids(&["A"]),
        &env,
        &CombatConfig::default(),
        &mut ScriptedRandom::new(vec![0.5]),
    )
    .unwrap();
    let cleansed: Vec<&str> = report
        .events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::Cleanse { effect_id, .. } => Some(effect_id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(cleansed, vec!["poison"]);
    assert!(participants[0].statuses.is_empty());
    assert_eq!(participants[0].item_count("cleansing_draught"), 1);
}

#[test]
fn fire_bomb_rolls_like_an_attack() {
    let env = env();
    let mut participants = vec![
        fighter("A", "t1", 8.0)
            .with_stat("INT", 10.0)
            .with_item("fire_bomb", 1),
        fighter("B", "t2", 6.0).with_resist("fire", 0.5),
    ];
    let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.5]);

    let report = use_item(
        &mut participants,
        "A",
        env.items.get("fire_bomb").unwrap(),
        &[],
        &env,
        &CombatConfig::default(),
        &mut rng,
    )
    .unwrap();
    // INT*0.4 + 6 = 10, halved by resistance, never crits
    assert!(matches!(
        report.events.as_slice(),
        [CombatEvent::Hit { amount, crit: false, item_id: Some(item), ability_id: None, dtype, .. }]
            if *amount == 5.0 && item == "fire_bomb" && dtype == "fire"
    ));
    assert_eq!(participants[1].hp(), 15.0);
    assert_eq!(participants[0].item_count("fire_bomb"), 0);
}

#[test]
fn unsupported_item_kind_keeps_inventory() {
    let env = env();
    let relic = ItemDef {
        kind: ItemKind::Unsupported,
        ..ItemDef::consumable("relic", "Relic")
    };
    let mut participants = vec![fighter("A", "t1", 8.0).with_item("relic", 1)];
    let err = use_item(
        &mut participants,
        "A",
        &relic,
        &[],
        &env,
        &CombatConfig::default(),
        &mut ScriptedRandom::new(vec![0.5]),
    )
    .unwrap_err();
    assert_eq!(err.reason(), "unsupported_item_kind");
    assert_eq!(participants[0].item_count("relic"), 1);
}
