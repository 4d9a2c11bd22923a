//! Thunk execution middleware.

use crate::intent::Intent;
use crate::middleware::{Flow, Middleware, MiddlewareContext};

/// ThunkMiddleware - executes deferred callables instead of reducing them.
///
/// When the travelling intent is a [`Thunk`], the callable runs immediately
/// with a [`Dispatcher`] clone and the dispatch-start state snapshot, and the
/// intent is consumed: the reducer never sees it and the outer `dispatch`
/// returns with state unchanged. Whatever the thunk dispatches, now or from
/// a thread it spawned, is queued for a later, independent dispatch.
///
/// Plain actions pass through untouched.
///
/// [`Thunk`]: crate::Thunk
/// [`Dispatcher`]: crate::Dispatcher
pub struct ThunkMiddleware;

impl ThunkMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThunkMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for ThunkMiddleware {
    fn handle(&mut self, intent: Intent<S, A>, ctx: &MiddlewareContext<'_, S, A>) -> Flow<S, A> {
        match intent {
            Intent::Thunk(thunk) => {
                thunk.run(ctx.dispatcher().clone(), ctx.state());
                Flow::Consumed
            }
            other => Flow::Continue(other),
        }
    }
}
