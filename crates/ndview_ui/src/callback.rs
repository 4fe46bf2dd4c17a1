//! Callback abstraction for control change handlers
//!
//! Controls never mutate application state themselves. A change is turned into
//! an application message by the registered callback, and the application's
//! controller decides what to do with it.
//!
//! # Examples
//!
//! ```ignore
//! use ndview_ui::Callback;
//!
//! enum Message {
//!     IndexChanged(usize),
//! }
//!
//! let on_change = Callback::new(Message::IndexChanged);
//! let message = on_change.call(3);
//! ```

use std::fmt;

/// Wrapper around an optional boxed `Fn(T) -> M`.
///
/// # Type Parameters
///
/// - `T`: The value produced by the control (slider index, selected text, ...)
/// - `M`: The message type returned by the callback
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `None` when no handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Message {
        Changed(usize),
    }

    #[test]
    fn test_call_with_handler() {
        let callback = Callback::new(Message::Changed);
        assert!(callback.is_some());
        assert_eq!(callback.call(4), Some(Message::Changed(4)));
    }

    #[test]
    fn test_call_without_handler() {
        let callback: Callback<usize, Message> = Callback::default();
        assert!(callback.is_none());
        assert_eq!(callback.call(4), None);
    }
}
