//! # fate: futures, promises and deferreds
//!
//! A [`Future`] starts pending and is later settled exactly once, either
//! resolved with a `T` or rejected with an `E`. Any number of observers can
//! register [`Handlers`] through [`Then::then`], before or after settlement;
//! each one runs exactly once and its derived outcome becomes the settlement
//! of the [`Promise`] returned by `then`.
//!
//! Nothing here spawns, schedules or blocks. Handlers run synchronously,
//! either when the future settles or, for an already settled future, inside
//! `then` itself. Values are single-threaded (`Rc` based).
//!
//! ## Example
//!
//! ```
//! use fate::{deferred, Handlers, Then, State};
//!
//! let future = deferred::<i32, String>();
//! let checked = future
//!     .done(|v| Ok(Some(v + 1)))
//!     .then(Handlers::both(
//!         |v: &i32| if *v > 10 { Err("too big".into()) } else { Ok(None) },
//!         |e: &String| Err(format!("upstream: {e}")),
//!     ));
//!
//! future.resolve(41);
//! assert_eq!(checked.state(), State::Rejected);
//! ```
//!
//! ## Composition
//!
//! [`all`], [`every`], [`first`] and [`any`] fold many candidates into one
//! `Promise<Tally, Tally>`.
mod cell;
mod chain;
mod compose;
mod deferred;
mod error;
mod future;
mod handlers;
mod hook;
mod immediate;
mod settled;

pub use cell::State;
pub use compose::{all, any, every, first, Tally};
pub use error::Error;
pub use future::{Future, Promise, Then};
pub use handlers::{Handlers, Outcome};
pub use hook::{report_action_error, set_action_error_hook, take_action_error_hook};
pub use immediate::{wrap, when, Candidate, IntoCandidate, Inverted};
pub use settled::Settled;

/// A future already resolved with `value`.
pub fn resolved<T: Clone + 'static, E: Clone + 'static>(value: T) -> Future<T, E> {
    Future::resolved(value)
}

/// A future already rejected with `err`.
pub fn rejected<T: Clone + 'static, E: Clone + 'static>(err: E) -> Future<T, E> {
    Future::rejected(err)
}

/// A pending future with live `resolve` and `reject`.
pub fn deferred<T: Clone + 'static, E: Clone + 'static>() -> Future<T, E> {
    Future::deferred()
}

/// A future pre-bound with one handler pair. See [`Future::thenable`].
///
/// ```
/// use fate::{thenable, Handlers, Then, State};
///
/// let future = thenable(Handlers::<i32, i32>::new().on_failure(|e| Ok(Some(-e))));
/// future.reject(-1942);
/// assert_eq!(future.state(), State::Resolved);
/// ```
pub fn thenable<T: Clone + 'static, E: Clone + 'static>(handlers: Handlers<T, E>) -> Future<T, E> {
    Future::thenable(handlers)
}

/// Swaps the roles of `resolve` and `reject` on `future`.
pub fn inverted<T: Clone + 'static, E: Clone + 'static>(future: Future<T, E>) -> Inverted<T, E> {
    Inverted::new(future)
}
