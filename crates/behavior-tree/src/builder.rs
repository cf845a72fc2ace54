//! Boxed constructors for terse tree building.
//!
//! `selector(vec![sequence(vec![condition(..), action(..)]), ..])` instead
//! of nesting `Box::new(..)` by hand.

use crate::{Action, Condition, Node, Selector, Sequence, Status};

#[inline]
pub fn sequence<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn condition<'n, C: 'n, F>(predicate: F) -> Node<'n, C>
where
    F: Fn(&C) -> bool + 'n,
{
    Box::new(Condition::new(predicate))
}

#[inline]
pub fn action<'n, C: 'n, F>(run: F) -> Node<'n, C>
where
    F: Fn(&mut C) -> Status + 'n,
{
    Box::new(Action::new(run))
}
