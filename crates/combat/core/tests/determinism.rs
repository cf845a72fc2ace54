mod common;

use combat_core::env::starter::ai_rules;
use combat_core::{CombatConfig, Encounter, EncounterError};
use common::{aria, belor, duel, env};

fn starter_duel(seed: u64) -> Encounter {
    Encounter::new(vec![aria(), belor()], seed, env(), CombatConfig::default())
        .unwrap()
        .with_ai_rules(ai_rules())
}

#[test]
fn same_seed_same_fight() {
    let mut first = starter_duel(2025);
    let mut second = starter_duel(2025);
    let a = first.run_until(8);
    let b = second.run_until(8);

    assert_eq!(a, b);
    assert_eq!(first.events(), second.events());
    assert_eq!(first.participants(), second.participants());
    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn initiative_ignores_input_order() {
    let forward = Encounter::new(vec![aria(), belor()], 1, env(), CombatConfig::default()).unwrap();
    let reverse = Encounter::new(vec![belor(), aria()], 1, env(), CombatConfig::default()).unwrap();
    assert_eq!(forward.order_ids(), vec!["A", "B"]);
    assert_eq!(reverse.order_ids(), vec!["A", "B"]);
    assert_eq!(reverse.participants()[0].id, "B");
}

#[test]
fn restore_reproduces_actor_sequence() {
    for n in [0usize, 1, 3, 7] {
        let mut original = duel(123);
        original.next_turn();
        let snap = original.snapshot();

        let mut restored = duel(999);
        restored.restore(&snap).unwrap();
        for _ in 0..n {
            assert_eq!(original.next_turn(), restored.next_turn());
        }
        assert_eq!(original.round(), restored.round());
    }
}

#[test]
fn restore_reproduces_the_rest_of_the_fight() {
    let mut original = starter_duel(2025);
    original.take_turn();
    original.take_turn();
    let snap = original.snapshot();

    let mut restored = starter_duel(999);
    restored.restore(&snap).unwrap();

    let skip = original.events().len();
    original.run_until(6);
    restored.run_until(6);
    assert_eq!(&original.events()[skip..], restored.events());
    assert_eq!(original.participants(), restored.participants());
    assert_eq!(original.threat(), restored.threat());
}

#[test]
fn restore_is_all_or_nothing() {
    let snap = duel(1).snapshot();
    let mut other = Encounter::new(
        vec![aria(), common::fighter("Q", "beta", 6.0)],
        1,
        env(),
        CombatConfig::default(),
    )
    .unwrap();
    let before = other.snapshot();
    assert!(matches!(
        other.restore(&snap),
        Err(EncounterError::UnknownParticipant(id)) if id == "B"
    ));
    assert_eq!(other.snapshot(), before);
}

#[cfg(feature = "serde")]
mod digest {
    use super::*;
    use combat_core::EncounterSnapshot;

    #[test]
    fn digests_track_state() {
        let mut first = starter_duel(77);
        let mut second = starter_duel(77);
        assert_eq!(first.state_digest().unwrap(), second.state_digest().unwrap());

        first.take_turn();
        assert_ne!(first.state_digest().unwrap(), second.state_digest().unwrap());
        second.take_turn();
        assert_eq!(
            hex::encode(first.state_digest().unwrap()),
            hex::encode(second.state_digest().unwrap())
        );
    }

    #[test]
    fn snapshot_bytes_round_trip() {
        let mut enc = starter_duel(5);
        enc.run_round();
        let bytes = enc.snapshot().to_bytes().unwrap();
        let decoded = EncounterSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, enc.snapshot());

        let mut fresh = starter_duel(6);
        fresh.restore(&decoded).unwrap();
        assert_eq!(fresh.state_digest().unwrap(), enc.state_digest().unwrap());
    }

    #[test]
    fn garbage_bytes_are_a_codec_error() {
        assert!(matches!(
            EncounterSnapshot::from_bytes(&[1, 2, 3]),
            Err(EncounterError::Codec(_))
        ));
    }

    #[test]
    fn events_serialize_as_tagged_json() {
        let mut enc = starter_duel(5);
        let report = enc.take_turn();
        for event in &report.events {
            let json = serde_json::to_value(event).unwrap();
            assert_eq!(json["type"], event.kind());
        }
    }
}
