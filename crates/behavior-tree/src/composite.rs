//! Composite behavior nodes.
//!
//! [`Sequence`] is a short-circuit AND over its children, [`Selector`] a
//! short-circuit OR. Both evaluate left to right, so child order is
//! priority order.

use crate::{Behavior, Node, Status};

/// Ticks children in order until one fails.
///
/// An empty sequence succeeds.
pub struct Sequence<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Sequence<'n, C> {
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Sequence<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Ticks children in order until one succeeds.
///
/// An empty selector fails: with no options there is nothing to pick.
pub struct Selector<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Selector<'n, C> {
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Selector<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{action, condition};

    /// Stand-in for an actor choosing between abilities.
    struct Turn {
        mana: u32,
        log: Vec<&'static str>,
    }

    fn cast<'n>(name: &'static str, cost: u32) -> Node<'n, Turn> {
        action(move |turn: &mut Turn| {
            if turn.mana < cost {
                return Status::Failure;
            }
            turn.mana -= cost;
            turn.log.push(name);
            Status::Success
        })
    }

    #[test]
    fn selector_takes_first_affordable_option() {
        let rules = Selector::new(vec![cast("fireball", 5), cast("spark", 1), cast("punch", 0)]);
        let mut turn = Turn {
            mana: 3,
            log: Vec::new(),
        };
        assert_eq!(rules.tick(&mut turn), Status::Success);
        assert_eq!(turn.log, vec!["spark"]);
        assert_eq!(turn.mana, 2);
    }

    #[test]
    fn sequence_stops_at_failed_guard() {
        let rule = Sequence::new(vec![
            condition(|turn: &Turn| turn.mana >= 5),
            cast("fireball", 5),
        ]);
        let mut turn = Turn {
            mana: 4,
            log: Vec::new(),
        };
        assert_eq!(rule.tick(&mut turn), Status::Failure);
        assert!(turn.log.is_empty());
    }

    #[test]
    fn sequence_runs_every_child_on_success() {
        let combo = Sequence::new(vec![cast("jab", 1), cast("cross", 1)]);
        let mut turn = Turn {
            mana: 2,
            log: Vec::new(),
        };
        assert_eq!(combo.tick(&mut turn), Status::Success);
        assert_eq!(turn.log, vec!["jab", "cross"]);
    }

    #[test]
    fn empty_composites() {
        let mut turn = Turn {
            mana: 0,
            log: Vec::new(),
        };
        assert!(Selector::<Turn>::new(Vec::new()).tick(&mut turn).is_failure());
        assert!(Sequence::<Turn>::new(Vec::new()).tick(&mut turn).is_success());
    }
}
