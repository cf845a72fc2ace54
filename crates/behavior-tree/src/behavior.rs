//! Core behavior trait.

use crate::Status;

/// A behavior tree node evaluated against a context `C`.
///
/// The context is the node's only window onto the world. Nodes may read it
/// to decide and write it to act or to leave results for later siblings.
pub trait Behavior<C> {
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Boxed node borrowing for `'n`.
pub type Node<'n, C> = Box<dyn Behavior<C> + 'n>;

impl<C> Behavior<C> for Box<dyn Behavior<C> + '_> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
