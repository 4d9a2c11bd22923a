//! Errors surfaced by the store.
//!
//! Every variant indicates a programming error at the call site, not a
//! transient condition: the store never retries and never recovers silently.
//! A failed dispatch leaves state exactly as it was before the call.

use thiserror::Error;

/// Errors that can occur while dispatching.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// `dispatch` was called while another dispatch on the same store was
    /// still running, from inside a reducer or a listener. Reducers must stay
    /// pure and listeners must observe one consistent transition at a time,
    /// so re-entry is rejected instead of nested. Use a [`Dispatcher`] to
    /// queue a follow-up action for after the current dispatch completes.
    ///
    /// [`Dispatcher`]: crate::Dispatcher
    #[error("dispatch re-entered while a dispatch was already in progress")]
    ReentrantDispatch,

    /// A thunk travelled the whole middleware chain without being executed.
    /// Thunks are not reducible; install [`ThunkMiddleware`] ahead of the
    /// reducer to run them.
    ///
    /// [`ThunkMiddleware`]: crate::ThunkMiddleware
    #[error("a thunk reached the reducer; no thunk middleware is installed")]
    UnhandledThunk,
}
