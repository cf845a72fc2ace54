//! Minimal behavior tree nodes for turn-based decision making.
//!
//! Every tick completes immediately: there is no `Running` state and no
//! delta time. A combat AI rule list maps directly onto these nodes, one
//! [`Sequence`] per rule (select targets, check requirements, execute)
//! under a [`Selector`] that stops at the first rule that succeeds.
//!
//! Nodes borrow freely: [`Node`] carries an explicit lifetime, so closures
//! may capture references to content that only lives for one decision.
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success or Failure
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Leaf nodes: [`Condition`], [`Action`]
//! - Builders: [`sequence`], [`selector`], [`condition`], [`action`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod leaf;
pub mod status;

pub use behavior::{Behavior, Node};
pub use builder::{action, condition, selector, sequence};
pub use composite::{Selector, Sequence};
pub use leaf::{Action, Condition};
pub use status::Status;
