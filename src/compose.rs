//! Aggregating many candidates into one promise.
//!
//! Every combinator numbers its inputs, attaches a success/failure report to
//! each, and folds the reports into one outcome. The input is consumed
//! eagerly, so the total is known before the first report arrives.
use crate::cell::State;
use crate::future::{Future, Promise, Then};
use crate::handlers::Handlers;
use crate::immediate::{Candidate, IntoCandidate};
use std::cell::Cell;
use std::rc::Rc;

/// Payload of an aggregate settlement.
///
/// `index` is the 0-based position of the input that decided the outcome
/// early, or the number of reports received when the aggregate waited for
/// all of them. `count` is the number of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub index: usize,
    pub count: usize,
}

impl Tally {
    pub fn new(index: usize, count: usize) -> Self {
        Self { index, count }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    /// Fail on the first failure, succeed once everything succeeded.
    All,
    /// Wait for every report, then succeed only if all succeeded.
    Every,
    /// Settle with whichever report arrives first.
    First,
    /// Succeed on the first success, fail once everything failed.
    Any,
}

struct Aggregate {
    policy: Policy,
    count: usize,
    reported: Cell<usize>,
    all_succeeded: Cell<bool>,
    future: Future<Tally, Tally>,
}

impl Aggregate {
    fn report(&self, succeeded: bool, index: usize) {
        if self.future.state().is_settled() {
            return;
        }
        let reported = self.reported.get() + 1;
        self.reported.set(reported);
        self.all_succeeded.set(self.all_succeeded.get() && succeeded);
        let exhausted = reported >= self.count;
        let early = Tally::new(index, self.count);
        let total = Tally::new(reported, self.count);
        log::trace!(
            "{:?} report {}/{} from #{} ({})",
            self.policy,
            reported,
            self.count,
            index,
            succeeded
        );

        match self.policy {
            Policy::All => {
                if !succeeded {
                    self.future.reject(early);
                } else if exhausted {
                    self.future.resolve(total);
                }
            }
            Policy::Every => {
                if exhausted {
                    if self.all_succeeded.get() {
                        self.future.resolve(total);
                    } else {
                        self.future.reject(total);
                    }
                }
            }
            Policy::First => {
                if succeeded {
                    self.future.resolve(early);
                } else {
                    self.future.reject(early);
                }
            }
            Policy::Any => {
                if succeeded {
                    self.future.resolve(early);
                } else if exhausted {
                    self.future.reject(total);
                }
            }
        }
    }

    fn vacuous(&self) {
        let none = Tally::new(0, 0);
        match self.policy {
            Policy::Any => self.future.reject(none),
            Policy::All | Policy::Every | Policy::First => self.future.resolve(none),
        }
    }
}

fn compose<I>(policy: Policy, items: I) -> Promise<Tally, Tally>
where
    I: IntoIterator,
    I::Item: IntoCandidate,
{
    let items: Vec<_> = items
        .into_iter()
        .map(IntoCandidate::into_candidate)
        .collect();
    let aggregate = Rc::new(Aggregate {
        policy,
        count: items.len(),
        reported: Cell::new(0),
        all_succeeded: Cell::new(true),
        future: Future::deferred(),
    });
    let promise = aggregate.future.promise();
    if items.is_empty() {
        aggregate.vacuous();
        return promise;
    }

    for (index, item) in items.into_iter().enumerate() {
        if aggregate.future.state() != State::Pending {
            break;
        }
        match item {
            Candidate::Value(_) => aggregate.report(true, index),
            Candidate::Promise(promise) => {
                let on_success = aggregate.clone();
                let on_failure = aggregate.clone();
                promise.then(Handlers::both(
                    move |_| {
                        on_success.report(true, index);
                        Ok(None)
                    },
                    move |_| {
                        on_failure.report(false, index);
                        Ok(None)
                    },
                ));
            }
        }
    }
    promise
}

/// Resolves once every input succeeded; rejects at the first failure.
///
/// # Examples
///
/// ```
/// use fate::{all, resolved, rejected, Tally, Then, State};
///
/// let ok = all(vec![resolved::<i32, &str>(1), resolved(2)]);
/// assert_eq!(ok.state(), State::Resolved);
///
/// let failed = all(vec![resolved::<i32, &str>(1), rejected("x")]);
/// failed.fail(|tally| {
///     assert_eq!(*tally, Tally::new(1, 2));
///     Ok(None)
/// });
/// ```
pub fn all<I>(items: I) -> Promise<Tally, Tally>
where
    I: IntoIterator,
    I::Item: IntoCandidate,
{
    compose(Policy::All, items)
}

/// Waits for every input, then resolves only if all of them succeeded.
pub fn every<I>(items: I) -> Promise<Tally, Tally>
where
    I: IntoIterator,
    I::Item: IntoCandidate,
{
    compose(Policy::Every, items)
}

/// Settles like whichever input settles first, in completion order.
pub fn first<I>(items: I) -> Promise<Tally, Tally>
where
    I: IntoIterator,
    I::Item: IntoCandidate,
{
    compose(Policy::First, items)
}

/// Resolves at the first success; rejects only after every input failed.
pub fn any<I>(items: I) -> Promise<Tally, Tally>
where
    I: IntoIterator,
    I::Item: IntoCandidate,
{
    compose(Policy::Any, items)
}
