//! Combatant simulation state.

use std::collections::BTreeMap;

use super::{StatValue, StatusInstance};

/// Full mutable state of one encounter participant.
///
/// `hp` and `mana` are private so every mutation goes through a clamping
/// setter: neither can go below zero. The engine tracks no maximum; callers
/// that care about caps enforce them externally.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: String,
    pub name: String,
    /// Combatants on different teams are enemies.
    pub team: String,
    /// Used for hazard eligibility.
    pub location: String,
    pub stats: BTreeMap<String, StatValue>,
    hp: f64,
    mana: f64,
    /// Damage type to fractional resistance; clamped at the point of use.
    pub resist: BTreeMap<String, f64>,
    pub tags: Vec<String>,
    pub statuses: Vec<StatusInstance>,
    /// Ability id to turns remaining until ready.
    pub cooldowns: BTreeMap<String, u32>,
    /// Item id to count.
    pub inventory: BTreeMap<String, u32>,
}

impl Combatant {
    pub const DEFAULT_TEAM: &'static str = "neutral";

    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team: Self::DEFAULT_TEAM.to_string(),
            location: String::new(),
            stats: BTreeMap::new(),
            hp: 0.0,
            mana: 0.0,
            resist: BTreeMap::new(),
            tags: Vec::new(),
            statuses: Vec::new(),
            cooldowns: BTreeMap::new(),
            inventory: BTreeMap::new(),
        }
    }

    // ===== builders =====

    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_stat(mut self, code: impl Into<String>, value: impl Into<StatValue>) -> Self {
        self.stats.insert(code.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_hp(mut self, hp: f64) -> Self {
        self.set_hp(hp);
        self
    }

    #[must_use]
    pub fn with_mana(mut self, mana: f64) -> Self {
        self.set_mana(mana);
        self
    }

    #[must_use]
    pub fn with_resist(mut self, damage_type: impl Into<String>, value: f64) -> Self {
        self.resist.insert(damage_type.into(), value);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_item(mut self, item_id: impl Into<String>, count: u32) -> Self {
        self.inventory.insert(item_id.into(), count);
        self
    }

    // ===== stats =====

    /// Effective value of a stat, `0.0` when absent.
    pub fn stat(&self, code: &str) -> f64 {
        self.stats.get(code).map(StatValue::value).unwrap_or(0.0)
    }

    /// Raw (unclamped) resistance for a damage type, `0.0` when absent.
    pub fn resist_for(&self, damage_type: &str) -> f64 {
        self.resist.get(damage_type).copied().unwrap_or(0.0)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    // ===== resources =====

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn mana(&self) -> f64 {
        self.mana
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Sets hp, clamped at zero.
    pub fn set_hp(&mut self, hp: f64) {
        self.hp = clamp_resource(hp);
    }

    /// Sets mana, clamped at zero.
    pub fn set_mana(&mut self, mana: f64) {
        self.mana = clamp_resource(mana);
    }

    /// Subtracts damage and returns the hp actually lost.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let before = self.hp;
        self.set_hp(self.hp - amount.max(0.0));
        before - self.hp
    }

    /// Adds hp and returns the amount gained.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let before = self.hp;
        self.set_hp(self.hp + amount.max(0.0));
        self.hp - before
    }

    /// Adds mana and returns the amount gained.
    pub fn restore_mana(&mut self, amount: f64) -> f64 {
        let before = self.mana;
        self.set_mana(self.mana + amount.max(0.0));
        self.mana - before
    }

    /// Current value of a named resource pool.
    ///
    /// Only `hp` and `mana` exist; any other name reads as empty so costs in
    /// unknown resources can never be paid.
    pub fn resource(&self, name: &str) -> f64 {
        match name {
            "hp" => self.hp,
            "mana" => self.mana,
            _ => 0.0,
        }
    }

    /// Deducts from a named resource pool, clamped at zero.
    pub fn spend_resource(&mut self, name: &str, amount: f64) {
        match name {
            "hp" => self.set_hp(self.hp - amount),
            "mana" => self.set_mana(self.mana - amount),
            _ => {}
        }
    }

    // ===== statuses =====

    pub fn status(&self, id: &str) -> Option<&StatusInstance> {
        self.statuses.iter().find(|s| s.id == id)
    }

    pub fn status_mut(&mut self, id: &str) -> Option<&mut StatusInstance> {
        self.statuses.iter_mut().find(|s| s.id == id)
    }

    pub fn has_status(&self, id: &str) -> bool {
        self.status(id).is_some()
    }

    /// Removes a status by id, returning it if it was present.
    pub fn remove_status(&mut self, id: &str) -> Option<StatusInstance> {
        let index = self.statuses.iter().position(|s| s.id == id)?;
        Some(self.statuses.remove(index))
    }

    // ===== cooldowns =====

    /// Turns until `ability_id` is ready, `0` when ready.
    pub fn cooldown(&self, ability_id: &str) -> u32 {
        self.cooldowns.get(ability_id).copied().unwrap_or(0)
    }

    pub fn set_cooldown(&mut self, ability_id: impl Into<String>, turns: u32) {
        let ability_id = ability_id.into();
        if turns == 0 {
            self.cooldowns.remove(&ability_id);
        } else {
            self.cooldowns.insert(ability_id, turns);
        }
    }

    /// Decrements every running cooldown by one turn; ready entries are dropped.
    pub fn tick_cooldowns(&mut self) {
        for turns in self.cooldowns.values_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.cooldowns.retain(|_, turns| *turns > 0);
    }

    // ===== inventory =====

    pub fn item_count(&self, item_id: &str) -> u32 {
        self.inventory.get(item_id).copied().unwrap_or(0)
    }

    /// Removes one of `item_id`; false when none are held.
    pub fn consume_item(&mut self, item_id: &str) -> bool {
        match self.inventory.get_mut(item_id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Overwrites every mutable field with `other`'s, keeping identity.
    pub(crate) fn restore_from(&mut self, other: &Combatant) {
        self.location = other.location.clone();
        self.stats = other.stats.clone();
        self.hp = other.hp;
        self.mana = other.mana;
        self.resist = other.resist.clone();
        self.tags = other.tags.clone();
        self.statuses = other.statuses.clone();
        self.cooldowns = other.cooldowns.clone();
        self.inventory = other.inventory.clone();
    }
}

fn clamp_resource(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Combatant {
        Combatant::new("A", "Aria")
            .with_team("alpha")
            .with_stat("DEX", 8.0)
            .with_hp(20.0)
            .with_mana(5.0)
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut c = fighter();
        let lost = c.take_damage(25.0);
        assert_eq!(lost, 20.0);
        assert_eq!(c.hp(), 0.0);
        assert!(!c.is_alive());
    }

    #[test]
    fn negative_amounts_do_not_invert() {
        let mut c = fighter();
        assert_eq!(c.take_damage(-5.0), 0.0);
        assert_eq!(c.heal(-5.0), 0.0);
        assert_eq!(c.hp(), 20.0);
    }

    #[test]
    fn spending_unknown_resource_is_noop() {
        let mut c = fighter();
        c.spend_resource("stamina", 3.0);
        assert_eq!(c.resource("stamina"), 0.0);
        c.spend_resource("mana", 9.0);
        assert_eq!(c.mana(), 0.0);
    }

    #[test]
    fn cooldowns_tick_down_and_clear() {
        let mut c = fighter();
        c.set_cooldown("fireball", 2);
        c.tick_cooldowns();
        assert_eq!(c.cooldown("fireball"), 1);
        c.tick_cooldowns();
        assert_eq!(c.cooldown("fireball"), 0);
        assert!(c.cooldowns.is_empty());
    }

    #[test]
    fn consuming_items() {
        let mut c = fighter().with_item("healing_potion", 1);
        assert!(c.consume_item("healing_potion"));
        assert!(!c.consume_item("healing_potion"));
        assert!(!c.consume_item("fire_bomb"));
    }

    #[test]
    fn missing_stat_reads_zero() {
        assert_eq!(fighter().stat("WPN"), 0.0);
    }
}
