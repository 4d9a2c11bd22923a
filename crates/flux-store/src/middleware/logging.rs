//! Action logging middleware.

use std::fmt;

use crate::intent::Intent;
use crate::middleware::{Flow, Middleware, MiddlewareContext};

/// LoggingMiddleware - logs all intents passing through.
///
/// Actions are logged at debug level with their `Debug` representation;
/// thunks are opaque and logged as such. Everything passes through
/// unchanged, so this is usually installed first in the chain to see intents
/// before any other middleware transforms or consumes them.
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A: fmt::Debug> Middleware<S, A> for LoggingMiddleware {
    fn handle(&mut self, intent: Intent<S, A>, _ctx: &MiddlewareContext<'_, S, A>) -> Flow<S, A> {
        match &intent {
            Intent::Action(action) => log::debug!("Action: {:?}", action),
            Intent::Thunk(_) => log::debug!("Thunk dispatched"),
        }

        Flow::Continue(intent)
    }
}
