//! Reporting errors that have no observer to carry them.
//!
//! When an observer panics while a deferred broadcasts its settlement, the
//! panic is turned into an [`Error`] and handed to the action-error hook of
//! the current thread. Without a hook the error is logged.
use crate::error::Error;
use std::cell::RefCell;
use std::rc::Rc;

type Hook = Rc<dyn Fn(&Error)>;

thread_local! {
    static HOOK: RefCell<Option<Hook>> = const { RefCell::new(None) };
}

/// Installs `hook` for this thread, replacing any previous one.
///
/// # Examples
///
/// ```
/// use fate::{deferred, set_action_error_hook, take_action_error_hook, Then};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let reported = Rc::new(Cell::new(0));
/// let count = reported.clone();
/// set_action_error_hook(move |_| count.set(count.get() + 1));
///
/// let future = deferred::<(), ()>();
/// future.done(|_| panic!("misbehaving observer"));
/// future.resolve(());
///
/// take_action_error_hook();
/// assert_eq!(reported.get(), 1);
/// ```
pub fn set_action_error_hook<F>(hook: F)
where
    F: Fn(&Error) + 'static,
{
    HOOK.with(|slot| *slot.borrow_mut() = Some(Rc::new(hook)));
}

/// Removes the hook of this thread, restoring the logging default.
pub fn take_action_error_hook() -> Option<Rc<dyn Fn(&Error)>> {
    HOOK.with(|slot| slot.borrow_mut().take())
}

/// Hands `err` to this thread's hook, or logs it when none is installed.
pub fn report_action_error(err: Error) {
    let hook = HOOK.with(|slot| slot.borrow().clone());
    match hook {
        Some(hook) => hook(&err),
        None => log::error!("{err}"),
    }
}
