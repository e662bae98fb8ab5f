use std::any::Any;

/// Errors raised by the settlement machinery itself.
///
/// Failures carried by a rejected promise are typed payloads and never use
/// this enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An observer panicked while a deferred was broadcasting its settlement.
    #[error("observer panicked while receiving a settlement: {0}")]
    ActionPanicked(String),
}

impl Error {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_owned(),
                Err(_) => "non-string panic payload".to_owned(),
            },
        };
        Error::ActionPanicked(message)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_panic_payloads() {
        assert_eq!(
            Error::from_panic(Box::new("boom")),
            Error::ActionPanicked("boom".into())
        );
        assert_eq!(
            Error::from_panic(Box::new(String::from("bang"))),
            Error::ActionPanicked("bang".into())
        );
        assert_eq!(
            Error::from_panic(Box::new(42u8)),
            Error::ActionPanicked("non-string panic payload".into())
        );
    }
}
