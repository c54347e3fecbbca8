//! Shared change callbacks.
//!
//! Callbacks compare by identity (`Arc::ptr_eq`) so argument structs holding
//! them can still derive `PartialEq` without comparing closures.

use std::sync::Arc;

/// Stable, comparable callback handle for `Fn(T)`.
pub struct CallbackWith<T> {
    handler: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T> CallbackWith<T> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// A callback that ignores its argument.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) {
        (self.handler)(value)
    }
}

impl<T, F> From<F> for CallbackWith<T>
where
    F: Fn(T) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T> Clone for CallbackWith<T> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T> PartialEq for CallbackWith<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T> Eq for CallbackWith<T> {}

impl<T> Default for CallbackWith<T> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T> std::fmt::Debug for CallbackWith<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackWith").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn compares_by_identity() {
        let a = CallbackWith::<u32>::new(|_| {});
        let b = CallbackWith::<u32>::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn call_forwards_the_value() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        let callback = CallbackWith::new(move |v: usize| {
            sink.fetch_add(v, Ordering::SeqCst);
        });
        callback.call(3);
        callback.clone().call(4);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }
}
