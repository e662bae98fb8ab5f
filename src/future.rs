//! The settlement authority ([`Future`]) and its read-only view ([`Promise`]).
//!
//! Both are handles onto the same shared core, so cloning either is cheap and
//! all clones observe the same settlement.
use crate::cell::State;
use crate::handlers::{Handlers, Outcome};
use crate::settled::Settled;
use crate::{chain, deferred, immediate};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Behaviour shared by every flavour of future.
pub(crate) trait Core<T, E> {
    fn then(&self, handlers: Handlers<T, E>) -> Promise<T, E>;
    fn settle(&self, outcome: Result<T, E>);
    fn state(&self) -> State;
}

/// The promise capability: anything that can be observed with `then`.
pub trait Then<T, E> {
    /// Registers a handler pair and returns the promise of its derived
    /// outcome. On an already settled value the handler runs before this
    /// returns.
    fn then(&self, handlers: Handlers<T, E>) -> Promise<T, E>;

    fn state(&self) -> State;

    /// Success-only `then`.
    fn done<S>(&self, success: S) -> Promise<T, E>
    where
        S: FnOnce(&T) -> Outcome<T, E> + 'static,
    {
        self.then(Handlers::new().on_success(success))
    }

    /// Failure-only `then`.
    fn fail<F>(&self, failure: F) -> Promise<T, E>
    where
        F: FnOnce(&E) -> Outcome<T, E> + 'static,
    {
        self.then(Handlers::new().on_failure(failure))
    }

    /// Registers `handler` for both sides; exactly one of them will run it.
    fn always<A>(&self, handler: A) -> Promise<T, E>
    where
        A: FnOnce(Result<&T, &E>) -> Outcome<T, E> + 'static,
        T: 'static,
        E: 'static,
    {
        let slot = Rc::new(Cell::new(Some(handler)));
        let other = slot.clone();
        self.then(Handlers::both(
            move |value| match slot.take() {
                Some(handler) => handler(Ok(value)),
                None => Ok(None),
            },
            move |err| match other.take() {
                Some(handler) => handler(Err(err)),
                None => Ok(None),
            },
        ))
    }
}

/// Settlement authority: owns `resolve` and `reject`.
///
/// Only the first settlement has any effect.
///
/// # Examples
///
/// ```
/// use fate::{deferred, Then, State};
///
/// let future = deferred::<i32, String>();
/// let doubled = future.done(|v| Ok(Some(v * 2)));
/// future.resolve(21);
/// future.reject("too late".into());
/// assert_eq!(future.state(), State::Resolved);
/// assert_eq!(doubled.state(), State::Resolved);
/// ```
pub struct Future<T, E> {
    core: Rc<dyn Core<T, E>>,
}

/// Observation side of a [`Future`]. Never settles anything itself.
pub struct Promise<T, E> {
    core: Rc<dyn Core<T, E>>,
}

impl<T: Clone + 'static, E: Clone + 'static> Future<T, E> {
    pub(crate) fn from_core(core: Rc<dyn Core<T, E>>) -> Self {
        Self { core }
    }

    /// A pending future that buffers observers until it settles.
    pub fn deferred() -> Self {
        deferred::Deferred::future()
    }

    /// A future pre-bound with `handlers`. Settling it runs the matching
    /// handler and forwards the derived outcome to its own observers.
    pub fn thenable(handlers: Handlers<T, E>) -> Self {
        if handlers.is_empty() {
            return Self::deferred();
        }
        chain::Link::future(handlers)
    }

    pub fn resolved(value: T) -> Self {
        Self::settled(Ok(value))
    }

    pub fn rejected(err: E) -> Self {
        Self::settled(Err(err))
    }

    /// An already settled future holding `outcome`.
    pub fn settled(outcome: Result<T, E>) -> Self {
        immediate::Fixed::future(outcome)
    }

    /// The terminal sink: settling it does nothing and its observers are
    /// never called.
    pub fn absent() -> Self {
        Self::from_core(Rc::new(Absent))
    }

    pub fn resolve(&self, value: T) {
        self.core.settle(Ok(value));
    }

    pub fn reject(&self, err: E) {
        self.core.settle(Err(err));
    }

    pub fn settle(&self, outcome: Result<T, E>) {
        self.core.settle(outcome);
    }

    pub fn promise(&self) -> Promise<T, E> {
        Promise {
            core: self.core.clone(),
        }
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Then<T, E> for Future<T, E> {
    fn then(&self, handlers: Handlers<T, E>) -> Promise<T, E> {
        self.core.then(handlers)
    }

    fn state(&self) -> State {
        self.core.state()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Promise<T, E> {
    /// A [`std::future::Future`] completing with this promise's settlement.
    ///
    /// # Examples
    ///
    /// ```
    /// use fate::deferred;
    /// use futures::executor::block_on;
    ///
    /// let future = deferred::<&str, ()>();
    /// let waiter = future.promise().settled();
    /// future.resolve("🍓");
    /// assert_eq!(block_on(waiter), Ok("🍓"));
    /// ```
    pub fn settled(&self) -> Settled<T, E> {
        Settled::attach(self)
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Then<T, E> for Promise<T, E> {
    fn then(&self, handlers: Handlers<T, E>) -> Promise<T, E> {
        self.core.then(handlers)
    }

    fn state(&self) -> State {
        self.core.state()
    }
}

impl<T, E> Clone for Future<T, E> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Future<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Future")
            .field("state", &self.core.state())
            .finish()
    }
}

impl<T, E> fmt::Debug for Promise<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("state", &self.core.state())
            .finish()
    }
}

struct Absent;

impl<T: Clone + 'static, E: Clone + 'static> Core<T, E> for Absent {
    fn then(&self, _handlers: Handlers<T, E>) -> Promise<T, E> {
        Future::absent().promise()
    }

    fn settle(&self, _outcome: Result<T, E>) {}

    fn state(&self) -> State {
        State::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::{Future, Then};
    use crate::cell::State;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_absent_ignores_everything() {
        let absent = Future::<i32, i32>::absent();
        let called = Rc::new(Cell::new(false));
        let flag = called.clone();
        let promise = absent.always(move |_| {
            flag.set(true);
            Ok(None)
        });
        absent.resolve(1);
        absent.reject(2);
        assert!(!called.get());
        assert_eq!(absent.state(), State::Pending);
        assert_eq!(promise.state(), State::Pending);
    }

    #[test]
    fn test_always_runs_once_per_side() {
        let seen = Rc::new(Cell::new(0));
        let log = seen.clone();
        Future::<i32, i32>::rejected(-1).always(move |outcome| {
            assert_eq!(outcome, Err(&-1));
            log.set(log.get() + 1);
            Ok(None)
        });
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_clones_share_settlement() {
        let future = Future::<i32, ()>::deferred();
        let other = future.clone();
        let promise = future.promise();
        other.resolve(3);
        assert_eq!(future.state(), State::Resolved);
        assert_eq!(promise.state(), State::Resolved);
    }
}
