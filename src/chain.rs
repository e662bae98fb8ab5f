//! A chain link: the future behind every `then`.
//!
//! The link holds one handler pair. When the link settles, the matching
//! handler runs and the derived outcome goes to whatever observes the link.
use crate::cell::{SettlementCell, State};
use crate::future::{Core, Future, Promise, Then};
use crate::handlers::Handlers;
use std::cell::RefCell;
use std::rc::Rc;

pub(crate) struct Link<T, E> {
    handlers: RefCell<Option<Handlers<T, E>>>,
    derived: SettlementCell<T, E>,
    // Deferred tail while pending, settled future afterwards.
    inner: RefCell<Option<Future<T, E>>>,
}

impl<T: Clone + 'static, E: Clone + 'static> Link<T, E> {
    pub(crate) fn future(handlers: Handlers<T, E>) -> Future<T, E> {
        Future::from_core(Rc::new(Link {
            handlers: RefCell::new(Some(handlers)),
            derived: SettlementCell::new(),
            inner: RefCell::new(None),
        }))
    }

    fn inner(&self) -> Future<T, E> {
        self.inner
            .borrow_mut()
            .get_or_insert_with(Future::deferred)
            .clone()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Core<T, E> for Link<T, E> {
    fn then(&self, handlers: Handlers<T, E>) -> Promise<T, E> {
        self.inner().then(handlers)
    }

    fn settle(&self, outcome: Result<T, E>) {
        let Some(handlers) = self.handlers.borrow_mut().take() else {
            log::debug!("ignoring repeated settlement of a chain link");
            return;
        };
        let derived = handlers.apply(outcome);
        self.derived.settle(derived.clone());
        let tail = self
            .inner
            .replace(Some(Future::settled(derived.clone())))
            .unwrap_or_else(Future::absent);
        log::trace!("chain link settled as {:?}", State::from(&derived));
        tail.settle(derived);
    }

    fn state(&self) -> State {
        self.derived.state()
    }
}
