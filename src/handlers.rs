use std::fmt;

/// What a handler hands to the next link of the chain.
///
/// `Ok(Some(v))` resolves downstream with `v`, `Ok(None)` forwards the
/// original settlement unchanged and `Err(e)` rejects downstream with `e`.
pub type Outcome<T, E> = Result<Option<T>, E>;

type SuccessFn<T, E> = Box<dyn FnOnce(&T) -> Outcome<T, E>>;
type FailureFn<T, E> = Box<dyn FnOnce(&E) -> Outcome<T, E>>;

/// The success and failure callables given to a single `then`.
pub struct Handlers<T, E> {
    success: Option<SuccessFn<T, E>>,
    failure: Option<FailureFn<T, E>>,
}

impl<T, E> Handlers<T, E> {
    pub fn new() -> Self {
        Self {
            success: None,
            failure: None,
        }
    }

    pub fn both<S, F>(success: S, failure: F) -> Self
    where
        S: FnOnce(&T) -> Outcome<T, E> + 'static,
        F: FnOnce(&E) -> Outcome<T, E> + 'static,
    {
        Self::new().on_success(success).on_failure(failure)
    }

    pub fn on_success<S>(mut self, success: S) -> Self
    where
        S: FnOnce(&T) -> Outcome<T, E> + 'static,
    {
        self.success = Some(Box::new(success));
        self
    }

    pub fn on_failure<F>(mut self, failure: F) -> Self
    where
        F: FnOnce(&E) -> Outcome<T, E> + 'static,
    {
        self.failure = Some(Box::new(failure));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.failure.is_none()
    }

    /// Applies the handler matching `outcome` and returns what the
    /// downstream link settles with.
    ///
    /// A missing handler, or one returning `Ok(None)`, keeps both payload and
    /// polarity. Any returned value becomes a success, even from the failure
    /// side.
    pub(crate) fn apply(self, outcome: Result<T, E>) -> Result<T, E> {
        match outcome {
            Ok(value) => match self.success {
                None => Ok(value),
                Some(success) => match success(&value) {
                    Ok(None) => Ok(value),
                    Ok(Some(derived)) => Ok(derived),
                    Err(err) => Err(err),
                },
            },
            Err(err) => match self.failure {
                None => Err(err),
                Some(failure) => match failure(&err) {
                    Ok(None) => Err(err),
                    Ok(Some(recovered)) => Ok(recovered),
                    Err(raised) => Err(raised),
                },
            },
        }
    }
}

impl<T, E> Default for Handlers<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for Handlers<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("success", &self.success.is_some())
            .field("failure", &self.failure.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Handlers;

    #[test]
    fn test_missing_handler_passes_through() {
        let handlers = Handlers::<i32, String>::new().on_failure(|_| panic!("not called"));
        assert_eq!(handlers.apply(Ok(1)), Ok(1));
        let handlers = Handlers::<i32, String>::new().on_success(|_| panic!("not called"));
        assert_eq!(handlers.apply(Err("x".into())), Err("x".to_string()));
    }

    #[test]
    fn test_returned_value_resolves() {
        let handlers = Handlers::<i32, String>::new().on_success(|v| Ok(Some(v * 10)));
        assert_eq!(handlers.apply(Ok(4)), Ok(40));
        let handlers = Handlers::<i32, String>::new().on_failure(|_| Ok(Some(0)));
        assert_eq!(handlers.apply(Err("x".into())), Ok(0));
    }

    #[test]
    fn test_returning_nothing_keeps_polarity() {
        let handlers = Handlers::<i32, String>::both(|_| Ok(None), |_| Ok(None));
        assert_eq!(handlers.apply(Err("x".into())), Err("x".to_string()));
        let handlers = Handlers::<i32, String>::both(|_| Ok(None), |_| Ok(None));
        assert_eq!(handlers.apply(Ok(7)), Ok(7));
    }

    #[test]
    fn test_raised_error_rejects() {
        let handlers = Handlers::<i32, String>::new().on_success(|_| Err("bad".into()));
        assert_eq!(handlers.apply(Ok(1)), Err("bad".to_string()));
        let handlers = Handlers::<i32, String>::new().on_failure(|e| Err(format!("{e}!")));
        assert_eq!(handlers.apply(Err("x".into())), Err("x!".to_string()));
    }

    #[test]
    fn test_is_empty() {
        assert!(Handlers::<(), ()>::new().is_empty());
        assert!(!Handlers::<(), ()>::new().on_failure(|_| Ok(None)).is_empty());
    }
}
