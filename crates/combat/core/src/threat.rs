//! Per-victim threat bookkeeping.
//!
//! `table[victim][attacker]` is how much `victim` wants to hit back at
//! `attacker`. Hits feed the table (the victim accrues threat toward the
//! attacker, never the reverse); the AI's `highest_threat` selector reads it.

use std::collections::BTreeMap;

use crate::config::CombatConfig;
use crate::event::CombatEvent;

/// Threat scores, created lazily per victim.
///
/// Scores are non-negative and bounded by [`ThreatTable::normalize`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ThreatTable {
    scores: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ThreatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates threat of `victim_id` toward `attacker_id`.
    ///
    /// Negative amounts are ignored.
    pub fn add_threat(&mut self, victim_id: &str, attacker_id: &str, amount: f64) {
        if !(amount > 0.0) {
            return;
        }
        *self
            .scores
            .entry(victim_id.to_string())
            .or_default()
            .entry(attacker_id.to_string())
            .or_insert(0.0) += amount;
    }

    /// Current score, `0.0` when never recorded.
    pub fn threat_of(&self, victim_id: &str, attacker_id: &str) -> f64 {
        self.scores
            .get(victim_id)
            .and_then(|row| row.get(attacker_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Scores held by one victim.
    pub fn row(&self, victim_id: &str) -> Option<&BTreeMap<String, f64>> {
        self.scores.get(victim_id)
    }

    /// Candidate with the highest score for `victim_id`.
    ///
    /// Ties go to the earliest candidate, so callers pass candidates in
    /// encounter order. Candidates without a score count as `0.0`.
    pub fn highest_threat_target<'a, I>(&self, victim_id: &str, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, f64)> = None;
        for candidate in candidates {
            let score = self.threat_of(victim_id, candidate);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Caps every score at `cap`.
    pub fn normalize(&mut self, cap: f64) {
        for row in self.scores.values_mut() {
            for score in row.values_mut() {
                if *score > cap {
                    *score = cap;
                }
            }
        }
    }

    /// Multiplies every score by `factor` (clamped to `[0, 1]`).
    pub fn decay_all(&mut self, factor: f64) {
        let factor = factor.clamp(0.0, 1.0);
        for row in self.scores.values_mut() {
            for score in row.values_mut() {
                *score *= factor;
            }
        }
    }

    /// Forgets everything `victim_id` holds against anyone.
    pub fn clear_victim(&mut self, victim_id: &str) {
        self.scores.remove(victim_id);
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Feeds `hit` events into the table, then re-applies the cap.
    ///
    /// Each hit adds its amount to the target's threat toward the attacker,
    /// multiplied by the crit threat multiplier when the hit crit.
    pub fn record_events(&mut self, events: &[CombatEvent], config: &CombatConfig) {
        let mut touched = false;
        for event in events {
            if let CombatEvent::Hit {
                actor_id,
                target_id,
                amount,
                crit,
                ..
            } = event
            {
                let multiplier = if *crit {
                    config.crit_threat_multiplier
                } else {
                    1.0
                };
                self.add_threat(target_id, actor_id, amount * multiplier);
                touched = true;
            }
        }
        if touched {
            self.normalize(config.threat_cap);
        }
    }
}
