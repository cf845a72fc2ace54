//! Status effect lifecycle.
//!
//! - [`apply_status`] / [`cleanse_status`]: attach, refresh, stack or remove
//! - [`apply_on_hit`]: probabilistic application after a landed hit
//! - [`tick_start_of_turn`]: periodic damage and duration countdown
//! - [`modify_incoming_damage`]: guard statuses absorbing the next hit
//! - [`taunt_source`]: forced target of a taunted actor

mod guard;
mod status;
mod tick;

pub use guard::{modify_incoming_damage, taunt_source};
pub use status::{apply_on_hit, apply_status, cleanse_status};
pub use tick::{tick_context, tick_start_of_turn};
