use crate::cell::{SettlementCell, State};
use crate::future::{Core, Future, Promise, Then};
use crate::handlers::Handlers;
use std::rc::Rc;

/// A future settled at construction. `then` drives a fresh chain link with
/// the fixed outcome before returning.
pub(crate) struct Fixed<T, E> {
    cell: SettlementCell<T, E>,
}

impl<T: Clone + 'static, E: Clone + 'static> Fixed<T, E> {
    pub(crate) fn future(outcome: Result<T, E>) -> Future<T, E> {
        Future::from_core(Rc::new(Fixed {
            cell: SettlementCell::settled(outcome),
        }))
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Core<T, E> for Fixed<T, E> {
    fn then(&self, handlers: Handlers<T, E>) -> Promise<T, E> {
        let link = Future::thenable(handlers);
        if let Some(outcome) = self.cell.outcome() {
            link.settle(outcome);
        }
        link.promise()
    }

    fn settle(&self, _outcome: Result<T, E>) {
        log::debug!("ignoring settlement of an already settled future");
    }

    fn state(&self) -> State {
        self.cell.state()
    }
}

/// A future with success and failure roles swapped.
///
/// `resolve` rejects the wrapped future and `reject` resolves it; observing
/// is delegated unchanged.
///
/// # Examples
///
/// ```
/// use fate::{inverted, deferred, Then, State};
///
/// let future = deferred::<i32, String>();
/// let flipped = inverted(future.clone());
/// flipped.resolve("no".into());
/// assert_eq!(future.state(), State::Rejected);
/// ```
#[derive(Debug, Clone)]
pub struct Inverted<T, E> {
    target: Future<T, E>,
}

impl<T: Clone + 'static, E: Clone + 'static> Inverted<T, E> {
    pub fn new(target: Future<T, E>) -> Self {
        Self { target }
    }

    /// Inverts a fresh deferred future.
    pub fn deferred() -> Self {
        Self::new(Future::deferred())
    }

    pub fn resolve(&self, err: E) {
        self.target.reject(err);
    }

    pub fn reject(&self, value: T) {
        self.target.resolve(value);
    }

    pub fn promise(&self) -> Promise<T, E> {
        self.target.promise()
    }

    pub fn into_inner(self) -> Future<T, E> {
        self.target
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Then<T, E> for Inverted<T, E> {
    fn then(&self, handlers: Handlers<T, E>) -> Promise<T, E> {
        self.target.then(handlers)
    }

    fn state(&self) -> State {
        self.target.state()
    }
}

/// Anything that can be normalized into a promise: a plain value or
/// something that already has the promise capability.
#[derive(Debug, Clone)]
pub enum Candidate<T, E> {
    Value(T),
    Promise(Promise<T, E>),
}

impl<T: Clone + 'static, E: Clone + 'static> Candidate<T, E> {
    pub fn is_promise(&self) -> bool {
        matches!(self, Candidate::Promise(_))
    }

    /// The candidate as a promise; plain values become resolved ones.
    pub fn into_promise(self) -> Promise<T, E> {
        match self {
            Candidate::Value(value) => Future::resolved(value).promise(),
            Candidate::Promise(promise) => promise,
        }
    }
}

/// Conversion into a [`Candidate`], implemented by everything `wrap` and the
/// combinators accept.
pub trait IntoCandidate {
    type Value: Clone + 'static;
    type Error: Clone + 'static;

    fn into_candidate(self) -> Candidate<Self::Value, Self::Error>;
}

impl<T: Clone + 'static, E: Clone + 'static> IntoCandidate for Candidate<T, E> {
    type Value = T;
    type Error = E;

    fn into_candidate(self) -> Candidate<T, E> {
        self
    }
}

impl<T: Clone + 'static, E: Clone + 'static> IntoCandidate for Promise<T, E> {
    type Value = T;
    type Error = E;

    fn into_candidate(self) -> Candidate<T, E> {
        Candidate::Promise(self)
    }
}

impl<T: Clone + 'static, E: Clone + 'static> IntoCandidate for Future<T, E> {
    type Value = T;
    type Error = E;

    fn into_candidate(self) -> Candidate<T, E> {
        Candidate::Promise(self.promise())
    }
}

impl<T: Clone + 'static, E: Clone + 'static> IntoCandidate for Inverted<T, E> {
    type Value = T;
    type Error = E;

    fn into_candidate(self) -> Candidate<T, E> {
        Candidate::Promise(self.promise())
    }
}

/// Normalizes `item` into a promise. Promises pass through untouched, plain
/// values become resolved promises.
pub fn wrap<I: IntoCandidate>(item: I) -> Promise<I::Value, I::Error> {
    item.into_candidate().into_promise()
}

/// [`wrap`] and attach `handlers` in one step. Empty handlers return the
/// wrapped promise itself.
pub fn when<I: IntoCandidate>(
    item: I,
    handlers: Handlers<I::Value, I::Error>,
) -> Promise<I::Value, I::Error> {
    let promise = wrap(item);
    if handlers.is_empty() {
        return promise;
    }
    promise.then(handlers)
}

impl<T: Clone + 'static, E: Clone + 'static> From<Promise<T, E>> for Candidate<T, E> {
    fn from(promise: Promise<T, E>) -> Self {
        Candidate::Promise(promise)
    }
}

impl<T: Clone + 'static, E: Clone + 'static> From<Future<T, E>> for Candidate<T, E> {
    fn from(future: Future<T, E>) -> Self {
        Candidate::Promise(future.promise())
    }
}

impl<T: Clone + 'static, E: Clone + 'static> From<Inverted<T, E>> for Candidate<T, E> {
    fn from(inverted: Inverted<T, E>) -> Self {
        Candidate::Promise(inverted.promise())
    }
}
