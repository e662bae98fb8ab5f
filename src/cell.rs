use std::cell::RefCell;

/// Observable settlement state of a future or promise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Pending,
    Resolved,
    Rejected,
}

impl State {
    /// `None` while pending, otherwise whether the settlement succeeded.
    pub fn as_option(self) -> Option<bool> {
        match self {
            State::Pending => None,
            State::Resolved => Some(true),
            State::Rejected => Some(false),
        }
    }

    pub fn is_settled(self) -> bool {
        self != State::Pending
    }
}

impl<T, E> From<&Result<T, E>> for State {
    fn from(outcome: &Result<T, E>) -> Self {
        match outcome {
            Ok(_) => State::Resolved,
            Err(_) => State::Rejected,
        }
    }
}

/// Holds at most one settlement. Later attempts are ignored.
#[derive(Debug)]
pub(crate) struct SettlementCell<T, E> {
    outcome: RefCell<Option<Result<T, E>>>,
}

impl<T, E> SettlementCell<T, E> {
    pub(crate) fn new() -> Self {
        Self {
            outcome: RefCell::new(None),
        }
    }

    pub(crate) fn settled(outcome: Result<T, E>) -> Self {
        Self {
            outcome: RefCell::new(Some(outcome)),
        }
    }

    /// Returns `false` when the cell was already settled.
    pub(crate) fn settle(&self, outcome: Result<T, E>) -> bool {
        let mut slot = self.outcome.borrow_mut();
        if slot.is_some() {
            log::debug!("ignoring repeated settlement");
            return false;
        }
        *slot = Some(outcome);
        true
    }

    pub(crate) fn state(&self) -> State {
        match &*self.outcome.borrow() {
            None => State::Pending,
            Some(outcome) => State::from(outcome),
        }
    }
}

impl<T: Clone, E: Clone> SettlementCell<T, E> {
    pub(crate) fn outcome(&self) -> Option<Result<T, E>> {
        self.outcome.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{SettlementCell, State};

    #[test]
    fn test_settles_once() {
        let cell = SettlementCell::<i32, &str>::new();
        assert_eq!(cell.state(), State::Pending);
        assert!(cell.settle(Ok(1)));
        assert!(!cell.settle(Err("late")));
        assert!(!cell.settle(Ok(2)));
        assert_eq!(cell.state(), State::Resolved);
        assert_eq!(cell.outcome(), Some(Ok(1)));
    }

    #[test]
    fn test_state_as_option() {
        assert_eq!(State::Pending.as_option(), None);
        assert_eq!(State::Resolved.as_option(), Some(true));
        assert_eq!(State::Rejected.as_option(), Some(false));
        assert!(!State::Pending.is_settled());
        let cell = SettlementCell::<(), i32>::settled(Err(-1));
        assert_eq!(cell.state(), State::Rejected);
    }
}
