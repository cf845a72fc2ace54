//! Mutable simulation state: combatants, their stats and active statuses.
//!
//! The engine never creates or destroys combatants. Callers build them once
//! per encounter; abilities, items, effects and hazards mutate them in place.

pub mod combatant;
pub mod roster;
pub mod stat;
pub mod status;

pub use combatant::Combatant;
pub use stat::StatValue;
pub use status::StatusInstance;
