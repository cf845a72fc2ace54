//! Built-in content pack.
//!
//! The same catalog a content loader would produce for the default pack:
//! humanoid/beast/winged body parts, the core damage-over-time and control
//! statuses, a small ability kit, four items, three hazards and the default
//! AI priority list.

use super::{
    AbilityDef, AiRule, BodyPartConfig, Catalog, CombatEnv, CritSpec, HazardDef, ItemDef, Phase,
    StatusEffectDef, TargetSelector, TargetingSpec,
};

/// The full starter pack.
pub fn starter() -> CombatEnv {
    CombatEnv {
        body_parts: body_parts(),
        statuses: status_effects(),
        abilities: abilities(),
        items: items(),
        hazards: hazards(),
        ai_rules: ai_rules(),
    }
}

pub fn body_parts() -> BodyPartConfig {
    BodyPartConfig::new()
        .with_group(
            "humanoid",
            &[
                ("head", 0.1),
                ("chest", 0.35),
                ("abdomen", 0.1),
                ("arms", 0.2),
                ("legs", 0.25),
            ],
        )
        .with_group(
            "beast",
            &[("head", 0.2), ("flank", 0.4), ("legs", 0.3), ("tail", 0.1)],
        )
        .with_group("winged", &[("head", 0.2), ("body", 0.4), ("wings", 0.4)])
}

pub fn status_effects() -> Catalog<StatusEffectDef> {
    Catalog::new()
        .with(StatusEffectDef::new("poison", 4).stacking(3).with_tick("1 + INT*0.05", "poison"))
        .with(StatusEffectDef::new("burning", 3).with_tick("2", "fire"))
        .with(StatusEffectDef::new("bleeding", 3).stacking(5).with_tick("1", "slashing"))
        .with(StatusEffectDef::new("guarding", 1).with_guard(0.5))
        .with(StatusEffectDef::new("taunted", 2).taunting())
}

pub fn abilities() -> Catalog<AbilityDef> {
    Catalog::new()
        .with(AbilityDef::basic_attack())
        .with(
            AbilityDef::new("fireball", "Fireball")
                .with_formula("INT*1.2 + 4")
                .with_damage_type("fire")
                .with_crit(CritSpec::new("0.05 + INT*0.005", 1.5))
                .with_cost("mana", 5.0)
                .with_cooldown(2)
                .with_on_hit("burning", 0.35),
        )
        .with(
            AbilityDef::new("guard", "Guard")
                .support()
                .with_targeting(TargetingSpec::SelfOnly)
                .with_on_hit("guarding", 1.0),
        )
        .with(
            AbilityDef::new("provoke", "Provoke")
                .with_formula("ATT*0.5")
                .with_cooldown(3)
                .with_on_hit("taunted", 1.0),
        )
        .with(
            AbilityDef::new("arc_sweep", "Arc Sweep")
                .with_formula("ATT + 2")
                .with_targeting(TargetingSpec::AllEnemies)
                .with_cost("mana", 3.0)
                .with_cooldown(1),
        )
        .with(
            AbilityDef::new("poison_dart", "Poison Dart")
                .with_formula("DEX*0.5 + 1")
                .with_damage_type("piercing")
                .with_targeting(TargetingSpec::RandomEnemy)
                .with_on_hit("poison", 0.6),
        )
}

pub fn items() -> Catalog<ItemDef> {
    Catalog::new()
        .with(ItemDef::consumable("healing_potion", "Healing Potion").with_heal(15.0))
        .with(ItemDef::consumable("mana_tonic", "Mana Tonic").with_mana(10.0))
        .with(ItemDef::throwable("fire_bomb", "Fire Bomb").with_formula("INT*0.4 + 6", "fire"))
        .with(
            ItemDef::consumable("cleansing_draught", "Cleansing Draught")
                .cleansing("poison")
                .cleansing("burning")
                .cleansing("bleeding"),
        )
}

pub fn hazards() -> Vec<HazardDef> {
    vec![
        HazardDef::new("lava_zone", Phase::StartOfTurn)
            .at("lava")
            .exempting("flying")
            .dealing("4", Some("fire"))
            .applying("burning", 0.25),
        HazardDef::new("healing_fountain", Phase::EndOfTurn)
            .at("fountain")
            .healing(3.0)
            .restoring_mana(2.0),
        HazardDef::new("miasma", Phase::StartOfTurn)
            .at("swamp")
            .lasting(3)
            .applying("poison", 0.5),
    ]
}

/// Default priority list: guard when hurt, fireball when affordable,
/// provoke when ready, otherwise a basic attack.
pub fn ai_rules() -> Vec<AiRule> {
    vec![
        AiRule::new("guard", TargetSelector::SelfOnly)
            .when_hp_at_most(10.0)
            .without_status("guarding")
            .when_ready(),
        AiRule::new("fireball", TargetSelector::HighestThreat)
            .when_mana_at_least(5.0)
            .when_ready(),
        AiRule::new("provoke", TargetSelector::HighestThreat).when_ready(),
        AiRule::new("basic_attack", TargetSelector::HighestThreat),
    ]
}
