//! Attack resolution.
//!
//! Pure functions that turn an attacker, a target and an ability into an
//! [`AttackResult`]. Nothing here mutates combatants; the caller applies the
//! amount (after guard modification) to the target.
//!
//! # Draw sequence
//!
//! A miss consumes exactly one draw. A hit consumes the hit draw, the crit
//! draw and one body-part draw, in that order. Replays depend on this order.
//!
//! # Core Functions
//!
//! - `resolve_attack`: complete attack resolution
//! - `calculate_hit_chance`: DEX difference against the configured clamp
//! - `base_damage` / `crit_chance`: content formulas with soft fallbacks
//! - `apply_resistance`: resistance clamp and one-decimal rounding
//! - `pick_body_part`: tag-group lookup and weighted pick

pub mod body;
pub mod damage;
pub mod hit;
pub mod result;

pub use body::pick_body_part;
pub use damage::{
    apply_resistance, attack_context, base_damage, crit_chance, crit_multiplier, round_tenth,
};
pub use hit::{calculate_hit_chance, check_hit};
pub use result::{AttackResult, resolve_attack};
