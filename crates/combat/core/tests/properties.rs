use combat_core::combat::damage::apply_resistance;
use combat_core::{
    AbilityDef, BodyPartConfig, CombatConfig, Combatant, CritSpec, FormulaContext, Pcg32,
    RandomSource, ScriptedRandom, evaluate, resolve_attack,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Damage(f64),
    Heal(f64),
    Spend(f64),
    Restore(f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50.0..100.0f64).prop_map(Op::Damage),
        (-50.0..100.0f64).prop_map(Op::Heal),
        (-50.0..100.0f64).prop_map(Op::Spend),
        (-50.0..100.0f64).prop_map(Op::Restore),
    ]
}

fn attacker(att: f64, wpn: f64) -> Combatant {
    Combatant::new("A", "A")
        .with_stat("ATT", att)
        .with_stat("WPN", wpn)
        .with_stat("DEX", 8.0)
}

fn target(resist: f64) -> Combatant {
    Combatant::new("B", "B")
        .with_stat("DEX", 8.0)
        .with_resist("slashing", resist)
        .with_hp(100.0)
}

proptest! {
    #[test]
    fn resources_never_go_negative(
        hp in 0.0..100.0f64,
        mana in 0.0..100.0f64,
        ops in prop::collection::vec(op(), 0..32),
    ) {
        let mut c = Combatant::new("A", "A").with_hp(hp).with_mana(mana);
        for op in ops {
            match op {
                Op::Damage(amount) => { c.take_damage(amount); }
                Op::Heal(amount) => { c.heal(amount); }
                Op::Spend(amount) => c.spend_resource("mana", amount),
                Op::Restore(amount) => { c.restore_mana(amount); }
            }
            prop_assert!(c.hp() >= 0.0);
            prop_assert!(c.mana() >= 0.0);
        }
    }

    #[test]
    fn more_resistance_never_means_more_damage(
        amount in 0.0..500.0f64,
        low in -1.0..2.0f64,
        extra in 0.0..2.0f64,
    ) {
        let config = CombatConfig::default();
        let weak = apply_resistance(amount, low, &config);
        let strong = apply_resistance(amount, low + extra, &config);
        prop_assert!(strong <= weak);
        prop_assert!(strong >= 0.0);
    }

    #[test]
    fn resisted_hits_land_softer(att in 1u32..40, wpn in 0u32..20) {
        let ability = AbilityDef::basic_attack().with_crit(CritSpec::never());
        let body = BodyPartConfig::new();
        let config = CombatConfig::default();
        let bare = resolve_attack(
            &attacker(att as f64, wpn as f64),
            &target(0.0),
            &ability,
            &body,
            &config,
            &mut ScriptedRandom::new(vec![0.0]),
        );
        let resisted = resolve_attack(
            &attacker(att as f64, wpn as f64),
            &target(0.5),
            &ability,
            &body,
            &config,
            &mut ScriptedRandom::new(vec![0.0]),
        );
        prop_assert!(bare.hit && resisted.hit);
        prop_assert!(resisted.amount <= bare.amount);
    }

    #[test]
    fn crits_multiply_by_the_crit_multiplier(att in 1u32..40, wpn in 0u32..20) {
        let body = BodyPartConfig::new();
        let config = CombatConfig::default();
        let plain = AbilityDef::basic_attack().with_crit(CritSpec::never());
        let always = AbilityDef::basic_attack().with_crit(CritSpec::new("1.0", 1.5));

        let normal = resolve_attack(
            &attacker(att as f64, wpn as f64),
            &target(0.0),
            &plain,
            &body,
            &config,
            &mut ScriptedRandom::new(vec![0.0]),
        );
        let crit = resolve_attack(
            &attacker(att as f64, wpn as f64),
            &target(0.0),
            &always,
            &body,
            &config,
            &mut ScriptedRandom::new(vec![0.0]),
        );
        prop_assert!(!normal.crit);
        prop_assert!(crit.crit);
        prop_assert_eq!(crit.amount, normal.amount * 1.5);
    }

    #[test]
    fn formulas_never_panic(source in "[A-Z_0-9+*/(). -]{0,24}") {
        let ctx = FormulaContext::new().with("ATT", 10.0).with("ARM", 0.0);
        let _ = evaluate(&source, &ctx);
    }

    #[test]
    fn well_formed_formulas_evaluate(a in -1000i32..1000, b in -1000i32..1000) {
        let ctx = FormulaContext::new().with("ATT", a as f64).with("ARM", b as f64);
        prop_assert_eq!(evaluate("ATT - ARM", &ctx), Ok(a as f64 - b as f64));
        prop_assert_eq!(evaluate("ATT / (ARM - ARM)", &ctx), Ok(0.0));
    }

    #[test]
    fn generator_stays_in_unit_interval(seed in any::<u64>()) {
        let mut rng = Pcg32::new(seed);
        for _ in 0..64 {
            let value = rng.randf();
            prop_assert!((0.0..1.0).contains(&value));
        }
    }
}
