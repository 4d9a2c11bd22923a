//! Middleware: interceptors between `dispatch` and the reducer.
//!
//! Middleware runs in the order it was added to the builder, before the
//! reducer sees anything. Each middleware receives the intent by value and
//! decides its fate: pass it along (possibly transformed) or consume it so
//! that neither the remaining chain nor the reducer runs.
//!
//! Side effects belong here, not in reducers. A middleware gets a read-only
//! state snapshot and a [`Dispatcher`] for queueing follow-up actions that
//! re-enter the full chain as later, independent dispatches.

use crate::dispatcher::Dispatcher;
use crate::intent::Intent;

pub mod logging;
pub mod thunk;

pub use logging::LoggingMiddleware;
pub use thunk::ThunkMiddleware;

/// What becomes of an intent after a middleware has seen it.
#[derive(Debug)]
pub enum Flow<S, A> {
    /// Hand the intent (possibly transformed) to the next middleware, or to
    /// the reducer if this was the last one.
    Continue(Intent<S, A>),
    /// Stop here: the intent was handled (or dropped). The reducer does not
    /// run and listeners are not notified for this dispatch.
    Consumed,
}

/// Read-only view a middleware gets of the store.
///
/// The state snapshot is taken once, when the dispatch enters the chain;
/// every middleware in the same dispatch observes the same snapshot.
pub struct MiddlewareContext<'a, S, A> {
    state: &'a S,
    dispatcher: &'a Dispatcher<S, A>,
}

impl<'a, S, A> MiddlewareContext<'a, S, A> {
    pub(crate) fn new(state: &'a S, dispatcher: &'a Dispatcher<S, A>) -> Self {
        Self { state, dispatcher }
    }

    /// State as of the start of the current dispatch.
    pub fn state(&self) -> &S {
        self.state
    }

    /// Dispatcher for queueing follow-up intents.
    pub fn dispatcher(&self) -> &Dispatcher<S, A> {
        self.dispatcher
    }
}

/// Middleware trait - intercepts intents before they reach the reducer.
pub trait Middleware<S, A> {
    /// Handle one intent.
    ///
    /// - `intent`: the intent travelling the chain, owned
    /// - `ctx`: state snapshot plus a dispatcher for follow-up dispatches
    ///
    /// Return [`Flow::Continue`] to keep the chain going or
    /// [`Flow::Consumed`] to stop it.
    fn handle(&mut self, intent: Intent<S, A>, ctx: &MiddlewareContext<'_, S, A>) -> Flow<S, A>;
}
