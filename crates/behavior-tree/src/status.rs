//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// Conditions report whether they hold; actions report whether they
/// executed (a rejected ability use is a `Failure`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }
}

impl From<bool> for Status {
    fn from(passed: bool) -> Self {
        if passed {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
