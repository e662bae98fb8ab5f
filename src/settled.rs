//! Awaiting a promise from async code.
//!
//! A [`Settled`] observes the promise through a regular `then` and parks the
//! waker of whoever polls it until the settlement arrives. It never drives any
//! work itself; something else still has to resolve or reject the chain.
use crate::future::{Promise, Then};
use crate::handlers::Handlers;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug)]
struct Inner<T, E> {
    value: Option<Result<T, E>>,
    waker: Option<Waker>,
}

/// Future returned by [`Promise::settled`].
#[derive(Debug)]
pub struct Settled<T, E> {
    promise: Rc<RefCell<Inner<T, E>>>,
}

impl<T: Clone + 'static, E: Clone + 'static> Settled<T, E> {
    pub(crate) fn attach(promise: &Promise<T, E>) -> Self {
        let inner = Rc::new(RefCell::new(Inner {
            value: None,
            waker: None,
        }));
        let on_success = inner.clone();
        let on_failure = inner.clone();
        promise.then(Handlers::<T, E>::both(
            move |value| {
                Self::fill(&on_success, Ok(value.clone()));
                Ok(None)
            },
            move |err| {
                Self::fill(&on_failure, Err(err.clone()));
                Ok(None)
            },
        ));
        Settled { promise: inner }
    }

    fn fill(inner: &RefCell<Inner<T, E>>, value: Result<T, E>) {
        let waker = {
            let mut inner = inner.borrow_mut();
            inner.value = Some(value);
            inner.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake()
        }
    }
}

impl<T, E> Future for Settled<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut promise = self.promise.borrow_mut();
        match promise.value.take() {
            Some(value) => Poll::Ready(value),
            None => {
                promise.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{deferred, rejected};
    use futures::executor::block_on;
    use futures::future::{join, ready};
    use futures::FutureExt;

    #[test]
    fn test_settled_before_await() {
        let promise = rejected::<i32, String>("🍓".into()).promise();
        assert_eq!(block_on(promise.settled()), Err("🍓".to_string()));
    }

    #[test]
    fn test_settled_while_waiting() {
        let future = deferred::<i32, ()>();
        let waiter = future.promise().settled();
        let driver = ready(()).map(|_| future.resolve(42));
        let (value, _) = block_on(join(waiter, driver));
        assert_eq!(value, Ok(42));
    }

    #[test]
    fn test_pending_until_settled() {
        let future = deferred::<i32, ()>();
        let mut waiter = future.promise().settled();
        assert!((&mut waiter).now_or_never().is_none());
        future.resolve(1);
        assert_eq!(block_on(waiter), Ok(1));
    }
}
