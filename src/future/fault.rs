//! Faults captured at the fork boundary.
//!
//! A [`Future`](super::Future) has two failure sources: values a fork
//! function deliberately passes to its reject continuation, and panics raised
//! while the fork function (or a combinator's user function) runs. The
//! second kind is caught and turned into a [`Fault`], which reaches the
//! caller's reject continuation through `E: From<Fault>`.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// A failure that did not come from a deliberate rejection.
///
/// # Examples
///
/// ```rust
/// use forkable::future::{Fault, Future};
///
/// let future: Future<Fault, i32> = Future::new(|_reject, _resolve| panic!("disk on fire"));
/// let outcome = future.fork_blocking();
/// assert_eq!(outcome, Err(Fault::Panicked { message: "disk on fire".to_string() }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The fork function or a user function panicked synchronously.
    Panicked {
        /// The panic payload rendered as text.
        message: String,
    },
    /// The fork function dropped both continuations without calling either.
    Abandoned,
}

impl Fault {
    /// Builds a fault from a panic payload.
    ///
    /// `&str` and `String` payloads keep their text; anything else becomes
    /// `"Unknown panic"`.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(string) = payload.downcast_ref::<&str>() {
            (*string).to_string()
        } else if let Some(string) = payload.downcast_ref::<String>() {
            string.clone()
        } else {
            "Unknown panic".to_string()
        };
        Self::Panicked { message }
    }

    /// The fault reported when no continuation ever fires.
    #[must_use]
    pub const fn abandoned() -> Self {
        Self::Abandoned
    }

    /// Returns the panic message, or a fixed description for [`Fault::Abandoned`].
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Panicked { message } => message,
            Self::Abandoned => "no continuation was called",
        }
    }

    /// Returns `true` if this fault was raised by a panic.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked { .. })
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panicked { message } => write!(formatter, "fork function panicked: {message}"),
            Self::Abandoned => write!(
                formatter,
                "fork function dropped both continuations without settling"
            ),
        }
    }
}

impl std::error::Error for Fault {}

impl From<Fault> for String {
    fn from(fault: Fault) -> Self {
        fault.to_string()
    }
}

/// Runs `thunk`, turning a panic into a [`Fault`].
pub(crate) fn guard<T>(thunk: impl FnOnce() -> T) -> Result<T, Fault> {
    catch_unwind(AssertUnwindSafe(thunk)).map_err(|payload| Fault::from_panic(&*payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn from_panic_reads_str_payload() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(
            Fault::from_panic(&*payload),
            Fault::Panicked {
                message: "static message".to_string()
            }
        );
    }

    #[rstest]
    fn from_panic_reads_string_payload() {
        let payload: Box<dyn Any + Send> = Box::new(format!("code {}", 7));
        assert_eq!(Fault::from_panic(&*payload).message(), "code 7");
    }

    #[rstest]
    fn from_panic_falls_back_for_other_payloads() {
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(Fault::from_panic(&*payload).message(), "Unknown panic");
    }

    #[rstest]
    fn display_includes_message() {
        let fault = Fault::Panicked {
            message: "boom".to_string(),
        };
        assert_eq!(fault.to_string(), "fork function panicked: boom");
        assert_eq!(String::from(fault), "fork function panicked: boom");
    }

    #[rstest]
    fn abandoned_is_not_a_panic() {
        let fault = Fault::abandoned();
        assert!(!fault.is_panic());
        assert_eq!(
            fault.to_string(),
            "fork function dropped both continuations without settling"
        );
    }

    #[rstest]
    fn guard_passes_values_through() {
        assert_eq!(guard(|| 1 + 1), Ok(2));
    }

    #[rstest]
    fn guard_captures_panics() {
        let result: Result<i32, Fault> = guard(|| panic!("inside guard"));
        assert_eq!(result.map_err(|fault| fault.message().to_string()), Err("inside guard".to_string()));
    }

    #[rstest]
    fn fault_is_std_error() {
        use std::error::Error;

        let fault = Fault::abandoned();
        let as_error: &dyn Error = &fault;
        assert!(as_error.source().is_none());
    }
}
