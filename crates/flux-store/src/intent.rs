//! Intents: what a store accepts for dispatch.
//!
//! An intent is either a plain action, which flows through the middleware
//! chain into the reducer, or a thunk: a one-shot callable that middleware
//! executes instead of reducing. Thunks are how deferred work enters the
//! system: the callable receives a [`Dispatcher`] it may move onto another
//! thread, and anything dispatched through it later becomes a separate,
//! ordinary dispatch.

use std::fmt;

use crate::dispatcher::Dispatcher;

/// A one-shot deferred unit of work.
///
/// The callable receives a [`Dispatcher`] clone and a snapshot of the state
/// at execution time. It runs synchronously inside the middleware chain, but
/// any dispatch it performs (immediately or from a spawned thread) is queued
/// and processed as its own later dispatch, never nested inside the one
/// that carried the thunk.
pub struct Thunk<S, A>(Box<dyn FnOnce(Dispatcher<S, A>, &S) + Send>);

impl<S, A> Thunk<S, A> {
    /// Wrap a callable as a thunk.
    pub fn new(f: impl FnOnce(Dispatcher<S, A>, &S) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Execute the thunk, consuming it.
    pub fn run(self, dispatcher: Dispatcher<S, A>, state: &S) {
        (self.0)(dispatcher, state)
    }
}

impl<S, A> fmt::Debug for Thunk<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

/// What [`Store::dispatch`] accepts.
///
/// Plain actions convert implicitly, so `store.dispatch(MyAction::Tick)`
/// works without naming this type. Thunks are built with [`Intent::thunk`].
///
/// [`Store::dispatch`]: crate::Store::dispatch
#[derive(Debug)]
pub enum Intent<S, A> {
    /// A data action destined for the reducer.
    Action(A),
    /// A deferred unit of work destined for [`ThunkMiddleware`].
    ///
    /// [`ThunkMiddleware`]: crate::ThunkMiddleware
    Thunk(Thunk<S, A>),
}

impl<S, A> Intent<S, A> {
    /// Wrap a callable as a dispatchable thunk.
    ///
    /// ```rust,ignore
    /// store.dispatch(Intent::thunk(move |dispatcher, _state| {
    ///     std::thread::spawn(move || {
    ///         // ... wait for something ...
    ///         dispatcher.dispatch(Action::Loaded(data));
    ///     });
    /// }))?;
    /// ```
    pub fn thunk(f: impl FnOnce(Dispatcher<S, A>, &S) + Send + 'static) -> Self {
        Intent::Thunk(Thunk::new(f))
    }
}

impl<S, A> From<A> for Intent<S, A> {
    fn from(action: A) -> Self {
        Intent::Action(action)
    }
}
