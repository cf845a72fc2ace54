//! Ability and item execution.
//!
//! # Execution Flow
//!
//! 1. Compute the possible target set for the targeting spec (no draws)
//! 2. Validate caller-supplied targets, honoring taunt
//! 3. Gate on cooldown and resources (abilities) or inventory (items)
//! 4. Pick a random target when the spec asks for one
//! 5. Deduct costs, set the cooldown
//! 6. Resolve each target in order and collect events
//!
//! Every rejection is an [`ActionError`] returned before step 4, so a
//! failed attempt never consumes randomness and never spends resources.

pub mod ability;
pub mod error;
pub mod item;
pub mod report;
pub mod targeting;

pub use ability::{can_use_ability, execute_ability};
pub use error::ActionError;
pub use item::{can_use_item, use_item};
pub use report::{ActionReport, ActionSource};
pub use targeting::{TargetSelection, select_targets};
