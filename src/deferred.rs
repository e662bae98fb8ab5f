use crate::cell::{SettlementCell, State};
use crate::error::Error;
use crate::future::{Core, Future, Promise, Then};
use crate::handlers::Handlers;
use crate::hook;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// A pending future with live `resolve`/`reject`.
///
/// Observers registered before settlement are buffered as chain links and
/// replayed in registration order. Afterwards `then` goes straight to an
/// already settled future.
pub(crate) struct Deferred<T, E> {
    cell: SettlementCell<T, E>,
    inner: RefCell<Option<Future<T, E>>>,
    actions: RefCell<Vec<Future<T, E>>>,
}

impl<T: Clone + 'static, E: Clone + 'static> Deferred<T, E> {
    pub(crate) fn future() -> Future<T, E> {
        Future::from_core(Rc::new(Deferred {
            cell: SettlementCell::new(),
            inner: RefCell::new(None),
            actions: RefCell::new(Vec::new()),
        }))
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Core<T, E> for Deferred<T, E> {
    fn then(&self, handlers: Handlers<T, E>) -> Promise<T, E> {
        let settled = self.inner.borrow().clone();
        match settled {
            Some(inner) => inner.then(handlers),
            None => {
                let action = Future::thenable(handlers);
                let promise = action.promise();
                self.actions.borrow_mut().push(action);
                promise
            }
        }
    }

    fn settle(&self, outcome: Result<T, E>) {
        if !self.cell.settle(outcome.clone()) {
            return;
        }
        *self.inner.borrow_mut() = Some(Future::settled(outcome.clone()));
        let actions = std::mem::take(&mut *self.actions.borrow_mut());
        log::trace!(
            "broadcasting {:?} to {} observers",
            State::from(&outcome),
            actions.len()
        );
        for action in actions {
            let outcome = outcome.clone();
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| action.settle(outcome))) {
                hook::report_action_error(Error::from_panic(payload));
            }
        }
    }

    fn state(&self) -> State {
        self.cell.state()
    }
}
