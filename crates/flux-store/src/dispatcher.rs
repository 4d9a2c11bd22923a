//! Dispatcher for queued action dispatch.
//!
//! When a thunk, a middleware, or a background thread needs to dispatch
//! actions, it uses a `Dispatcher`. Dispatching here never runs the reducer
//! directly: the intent is queued, and the store drains the queue after the
//! in-flight dispatch completes (or when [`Store::pump`] is called). Each
//! queued intent then becomes its own independent dispatch.
//!
//! This enables patterns like:
//! - a thunk hands its dispatcher to a timer thread, which dispatches once
//!   the delay elapses
//! - a middleware reacts to one action by queueing a follow-up action that
//!   re-enters the full chain
//!
//! [`Store::pump`]: crate::Store::pump

use std::sync::mpsc::Sender;

use crate::intent::Intent;

/// Cloneable, `Send` handle for queueing intents into a store.
///
/// Queued intents re-enter the middleware chain from the beginning, so every
/// middleware observes them exactly as if the caller had dispatched directly.
pub struct Dispatcher<S, A> {
    intent_tx: Sender<Intent<S, A>>,
}

impl<S, A> Dispatcher<S, A> {
    pub(crate) fn new(intent_tx: Sender<Intent<S, A>>) -> Self {
        Self { intent_tx }
    }

    /// Queue an intent for a later, independent dispatch.
    ///
    /// If the owning store has been dropped the intent is discarded with an
    /// error log; a detached background thread has nobody left to notify.
    pub fn dispatch(&self, intent: impl Into<Intent<S, A>>) {
        if let Err(e) = self.intent_tx.send(intent.into()) {
            log::error!("Dispatcher: failed to queue intent: {}", e);
        }
    }
}

impl<S, A> Clone for Dispatcher<S, A> {
    fn clone(&self) -> Self {
        Self {
            intent_tx: self.intent_tx.clone(),
        }
    }
}
