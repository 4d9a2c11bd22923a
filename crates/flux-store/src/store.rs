//! Store - holds current state and runs the dispatch loop.
//!
//! One dispatch is one atomic transition: middleware chain, reducer, listener
//! notification, in that order, all synchronous. The store is single-threaded
//! by construction (`Rc` handles, no locking); background work communicates
//! with it exclusively through a [`Dispatcher`] queue that the owning thread
//! drains.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::dispatcher::Dispatcher;
use crate::error::StoreError;
use crate::intent::Intent;
use crate::middleware::{Flow, Middleware, MiddlewareContext};

type BoxReducer<S, A> = Box<dyn Fn(S, &A) -> S>;
type SharedListener<S> = Rc<RefCell<dyn FnMut(&S)>>;

struct ListenerEntry<S> {
    id: u64,
    callback: SharedListener<S>,
}

struct Shared<S, A> {
    state: RefCell<S>,
    reducer: BoxReducer<S, A>,
    listeners: RefCell<Vec<ListenerEntry<S>>>,
    next_listener_id: Cell<u64>,
    middleware: RefCell<Vec<Box<dyn Middleware<S, A>>>>,
    /// Set for the duration of one dispatch; re-entry checks this.
    dispatching: Cell<bool>,
    intent_tx: Sender<Intent<S, A>>,
    intent_rx: Receiver<Intent<S, A>>,
}

/// Clears the dispatch flag even when a reducer or listener panics, so the
/// store stays usable after the panic is caught by the caller.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Store - holds application state and manages the unidirectional loop.
///
/// Cloning a `Store` clones a handle to the same container; state, listeners
/// and middleware are shared. Handles are single-threaded (`!Send`); hand a
/// [`Dispatcher`] to other threads instead.
pub struct Store<S, A> {
    shared: Rc<Shared<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

/// Builder for a [`Store`]: initial state and an ordered middleware chain.
///
/// The chain is fixed once [`build`](StoreBuilder::build) runs; middleware
/// cannot be added to a live store.
pub struct StoreBuilder<S, A> {
    reducer: BoxReducer<S, A>,
    state: Option<S>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
}

impl<S, A> StoreBuilder<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    /// Set the initial state. Without this, [`build`](StoreBuilder::build)
    /// falls back to `S::default()`.
    pub fn with_state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    /// Append a middleware to the chain. Middleware runs in the order added.
    pub fn middleware(mut self, middleware: impl Middleware<S, A> + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Construct the store. When no initial state was supplied, the state
    /// starts from `S::default()`, composing each slice's declared default.
    pub fn build(mut self) -> Store<S, A>
    where
        S: Default,
    {
        let state = self.state.take().unwrap_or_default();
        self.finish(state)
    }

    fn finish(self, state: S) -> Store<S, A> {
        let (intent_tx, intent_rx) = channel();
        Store {
            shared: Rc::new(Shared {
                state: RefCell::new(state),
                reducer: self.reducer,
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                middleware: RefCell::new(self.middleware),
                dispatching: Cell::new(false),
                intent_tx,
                intent_rx,
            }),
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    /// Create a store with no middleware, starting from `S::default()`.
    pub fn new(reducer: impl Fn(S, &A) -> S + 'static) -> Self
    where
        S: Default,
    {
        Self::builder(reducer).build()
    }

    /// Create a store with no middleware and an explicit initial state.
    pub fn with_state(reducer: impl Fn(S, &A) -> S + 'static, state: S) -> Self {
        Self::builder(reducer).finish(state)
    }

    /// Start building a store around `reducer`.
    pub fn builder(reducer: impl Fn(S, &A) -> S + 'static) -> StoreBuilder<S, A> {
        StoreBuilder {
            reducer: Box::new(reducer),
            state: None,
            middleware: Vec::new(),
        }
    }

    /// Borrow the current state.
    ///
    /// The borrow must be released before the next `dispatch`; holding it
    /// across one panics.
    pub fn state(&self) -> Ref<'_, S> {
        self.shared.state.borrow()
    }

    /// Clone the current state out of the store.
    pub fn snapshot(&self) -> S {
        self.shared.state.borrow().clone()
    }

    /// A queueing handle for deferred dispatch, safe to move to other
    /// threads (when `A: Send`).
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        Dispatcher::new(self.shared.intent_tx.clone())
    }

    /// Register a listener, called with the new state after every completed
    /// dispatch, in registration order.
    ///
    /// Subscribing while a dispatch is notifying takes effect from the next
    /// dispatch. The returned [`Subscription`] removes the listener.
    pub fn subscribe(&self, listener: impl FnMut(&S) + 'static) -> Subscription<S, A> {
        let id = self.shared.next_listener_id.get();
        self.shared.next_listener_id.set(id + 1);
        self.shared.listeners.borrow_mut().push(ListenerEntry {
            id,
            callback: Rc::new(RefCell::new(listener)),
        });
        Subscription {
            shared: Rc::downgrade(&self.shared),
            id,
        }
    }

    /// Dispatch one intent: middleware chain, then reducer, then listeners.
    ///
    /// Returns `Ok(Some(action))` with the action that reached the reducer,
    /// or `Ok(None)` when middleware consumed the intent (thunks, dropped
    /// actions). Before returning, any intents queued during the dispatch
    /// (by middleware, thunks, or already-finished background work) are
    /// processed as their own dispatches, in queue order.
    ///
    /// Calling this from inside a reducer or listener fails with
    /// [`StoreError::ReentrantDispatch`] and changes nothing.
    pub fn dispatch(&self, intent: impl Into<Intent<S, A>>) -> Result<Option<A>, StoreError> {
        let out = self.dispatch_one(intent.into())?;
        self.pump()?;
        Ok(out)
    }

    /// Process every intent currently queued via [`Dispatcher`] handles,
    /// each as an independent dispatch. Returns how many were processed.
    ///
    /// Call this after deferred work (timers, worker threads) has had a
    /// chance to dispatch; the queue is only ever drained on the store's own
    /// thread.
    pub fn pump(&self) -> Result<usize, StoreError> {
        let mut processed = 0;
        while let Ok(intent) = self.shared.intent_rx.try_recv() {
            self.dispatch_one(intent)?;
            processed += 1;
        }
        Ok(processed)
    }

    fn dispatch_one(&self, intent: Intent<S, A>) -> Result<Option<A>, StoreError> {
        if self.shared.dispatching.get() {
            return Err(StoreError::ReentrantDispatch);
        }
        self.shared.dispatching.set(true);
        let _guard = DispatchGuard(&self.shared.dispatching);

        let mut current = intent;
        {
            let snapshot = self.shared.state.borrow().clone();
            let dispatcher = self.dispatcher();
            let ctx = MiddlewareContext::new(&snapshot, &dispatcher);
            let mut chain = self.shared.middleware.borrow_mut();
            for middleware in chain.iter_mut() {
                match middleware.handle(current, &ctx) {
                    Flow::Continue(next) => current = next,
                    Flow::Consumed => return Ok(None),
                }
            }
        }

        let action = match current {
            Intent::Action(action) => action,
            Intent::Thunk(_) => return Err(StoreError::UnhandledThunk),
        };

        // State is replaced wholesale; the old value survives a panicking
        // reducer because the reducer works on a clone.
        let next = {
            let previous = self.shared.state.borrow().clone();
            (self.shared.reducer)(previous, &action)
        };
        *self.shared.state.borrow_mut() = next;

        self.notify();
        Ok(Some(action))
    }

    fn notify(&self) {
        // Snapshot the listener list at notification start: listeners added
        // during notification wait for the next dispatch, listeners removed
        // during notification are skipped if not yet invoked.
        let snapshot: Vec<(u64, SharedListener<S>)> = self
            .shared
            .listeners
            .borrow()
            .iter()
            .map(|entry| (entry.id, Rc::clone(&entry.callback)))
            .collect();

        for (id, callback) in snapshot {
            let still_registered = self
                .shared
                .listeners
                .borrow()
                .iter()
                .any(|entry| entry.id == id);
            if !still_registered {
                continue;
            }
            let state = self.shared.state.borrow();
            (callback.borrow_mut())(&*state);
        }
    }
}

/// Capability to remove a registered listener.
///
/// Holds only a weak handle, so an outstanding subscription does not keep
/// the store alive.
pub struct Subscription<S, A> {
    shared: Weak<Shared<S, A>>,
    id: u64,
}

impl<S, A> Subscription<S, A> {
    /// Remove the listener. The listener fires zero additional times, even
    /// for a dispatch currently mid-notification.
    pub fn unsubscribe(self) {
        if let Some(shared) = self.shared.upgrade() {
            shared
                .listeners
                .borrow_mut()
                .retain(|entry| entry.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{Flow, Middleware, MiddlewareContext};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum CounterAction {
        Add(i64),
        Set(i64),
        Noop,
    }

    fn counter(state: i64, action: &CounterAction) -> i64 {
        match action {
            CounterAction::Add(n) => state + n,
            CounterAction::Set(n) => *n,
            CounterAction::Noop => state,
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Profile {
        name: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum ProfileAction {
        SetName(String),
    }

    fn profile_reducer(mut state: Profile, action: &ProfileAction) -> Profile {
        match action {
            ProfileAction::SetName(name) => {
                state.name = Some(name.clone());
            }
        }
        state
    }

    #[test]
    fn initial_state_is_returned_before_any_dispatch() {
        let store = Store::with_state(counter, 41);
        assert_eq!(*store.state(), 41);
    }

    #[test]
    fn missing_initial_state_falls_back_to_default() {
        let store = Store::new(counter);
        assert_eq!(*store.state(), 0);
    }

    #[test]
    fn dispatch_reduces_and_returns_the_action() {
        let store = Store::new(counter);
        let out = store.dispatch(CounterAction::Add(2)).unwrap();
        assert_eq!(out, Some(CounterAction::Add(2)));
        assert_eq!(*store.state(), 2);
    }

    #[test]
    fn set_name_scenario() {
        let store = Store::new(profile_reducer);
        store
            .dispatch(ProfileAction::SetName("Ada".to_string()))
            .unwrap();
        assert_eq!(
            *store.state(),
            Profile {
                name: Some("Ada".to_string())
            }
        );
    }

    #[test]
    fn duplicate_dispatch_is_deterministic() {
        let store_a = Store::new(counter);
        store_a.dispatch(CounterAction::Add(3)).unwrap();
        store_a.dispatch(CounterAction::Add(3)).unwrap();

        let store_b = Store::new(counter);
        store_b.dispatch(CounterAction::Add(3)).unwrap();
        store_b.dispatch(CounterAction::Add(3)).unwrap();

        assert_eq!(*store_a.state(), *store_b.state());
        assert_eq!(*store_a.state(), 6);
    }

    #[test]
    fn noop_action_leaves_state_untouched() {
        let store = Store::with_state(counter, 9);
        store.dispatch(CounterAction::Noop).unwrap();
        assert_eq!(*store.state(), 9);
    }

    #[test]
    fn listeners_fire_once_per_dispatch_in_subscription_order() {
        let store = Store::new(counter);
        let calls = Rc::new(RefCell::new(Vec::new()));

        let calls_a = Rc::clone(&calls);
        let _sub_a = store.subscribe(move |state| calls_a.borrow_mut().push(("a", *state)));
        let calls_b = Rc::clone(&calls);
        let _sub_b = store.subscribe(move |state| calls_b.borrow_mut().push(("b", *state)));

        store.dispatch(CounterAction::Add(1)).unwrap();
        store.dispatch(CounterAction::Add(1)).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]
        );
    }

    #[test]
    fn unsubscribed_listener_fires_zero_additional_times() {
        let store = Store::new(counter);
        let calls = Rc::new(RefCell::new(0_u32));

        let calls_inner = Rc::clone(&calls);
        let sub = store.subscribe(move |_state| *calls_inner.borrow_mut() += 1);

        store.dispatch(CounterAction::Add(1)).unwrap();
        sub.unsubscribe();
        store.dispatch(CounterAction::Add(1)).unwrap();

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn unsubscribing_mid_notification_skips_the_removed_listener() {
        let store = Store::new(counter);
        let calls = Rc::new(RefCell::new(Vec::new()));

        // First listener removes the second during its own invocation.
        let second_sub: Rc<RefCell<Option<Subscription<i64, CounterAction>>>> =
            Rc::new(RefCell::new(None));

        let calls_a = Rc::clone(&calls);
        let second_for_a = Rc::clone(&second_sub);
        let _sub_a = store.subscribe(move |_state| {
            calls_a.borrow_mut().push("a");
            if let Some(sub) = second_for_a.borrow_mut().take() {
                sub.unsubscribe();
            }
        });

        let calls_b = Rc::clone(&calls);
        let sub_b = store.subscribe(move |_state| calls_b.borrow_mut().push("b"));
        *second_sub.borrow_mut() = Some(sub_b);

        store.dispatch(CounterAction::Add(1)).unwrap();
        store.dispatch(CounterAction::Add(1)).unwrap();

        // "b" never fires: it was removed before its turn in the first
        // dispatch and was gone entirely for the second.
        assert_eq!(*calls.borrow(), vec!["a", "a"]);
    }

    #[test]
    fn subscribing_mid_notification_waits_for_the_next_dispatch() {
        let store = Store::new(counter);
        let calls = Rc::new(RefCell::new(Vec::new()));

        let store_inner = store.clone();
        let calls_a = Rc::clone(&calls);
        let subscribed = Rc::new(Cell::new(false));
        let subscribed_inner = Rc::clone(&subscribed);
        let _sub_a = store.subscribe(move |_state| {
            calls_a.borrow_mut().push("a");
            if !subscribed_inner.get() {
                subscribed_inner.set(true);
                let calls_late = Rc::clone(&calls_a);
                // Leak the subscription; this test never unsubscribes.
                std::mem::forget(
                    store_inner.subscribe(move |_state| calls_late.borrow_mut().push("late")),
                );
            }
        });

        store.dispatch(CounterAction::Add(1)).unwrap();
        assert_eq!(*calls.borrow(), vec!["a"]);

        store.dispatch(CounterAction::Add(1)).unwrap();
        assert_eq!(*calls.borrow(), vec!["a", "a", "late"]);
    }

    #[test]
    fn dispatch_from_a_reducer_is_rejected_and_state_unchanged() {
        let slot: Rc<RefCell<Option<Store<i64, CounterAction>>>> = Rc::new(RefCell::new(None));
        let seen: Rc<RefCell<Option<Result<Option<CounterAction>, StoreError>>>> =
            Rc::new(RefCell::new(None));

        let slot_inner = Rc::clone(&slot);
        let seen_inner = Rc::clone(&seen);
        let reducer = move |state: i64, action: &CounterAction| -> i64 {
            if let Some(store) = slot_inner.borrow().as_ref() {
                *seen_inner.borrow_mut() = Some(store.dispatch(CounterAction::Add(100)));
            }
            counter(state, action)
        };

        let store = Store::with_state(reducer, 0);
        *slot.borrow_mut() = Some(store.clone());

        store.dispatch(CounterAction::Add(1)).unwrap();

        assert_eq!(
            *seen.borrow(),
            Some(Err(StoreError::ReentrantDispatch))
        );
        // Only the outer action landed; the re-entrant one changed nothing.
        assert_eq!(*store.state(), 1);
    }

    #[test]
    fn dispatch_from_a_listener_is_rejected() {
        let store = Store::new(counter);
        let seen: Rc<RefCell<Option<Result<Option<CounterAction>, StoreError>>>> =
            Rc::new(RefCell::new(None));

        let store_inner = store.clone();
        let seen_inner = Rc::clone(&seen);
        let _sub = store.subscribe(move |_state| {
            *seen_inner.borrow_mut() = Some(store_inner.dispatch(CounterAction::Add(100)));
        });

        store.dispatch(CounterAction::Add(1)).unwrap();

        assert_eq!(
            *seen.borrow(),
            Some(Err(StoreError::ReentrantDispatch))
        );
        assert_eq!(*store.state(), 1);
    }

    struct DoubleAdds;

    impl Middleware<i64, CounterAction> for DoubleAdds {
        fn handle(
            &mut self,
            intent: Intent<i64, CounterAction>,
            _ctx: &MiddlewareContext<'_, i64, CounterAction>,
        ) -> Flow<i64, CounterAction> {
            match intent {
                Intent::Action(CounterAction::Add(n)) => {
                    Flow::Continue(Intent::Action(CounterAction::Add(n * 2)))
                }
                other => Flow::Continue(other),
            }
        }
    }

    #[test]
    fn middleware_can_transform_actions() {
        let store = Store::builder(counter)
            .with_state(0)
            .middleware(DoubleAdds)
            .build();

        let out = store.dispatch(CounterAction::Add(3)).unwrap();
        assert_eq!(out, Some(CounterAction::Add(6)));
        assert_eq!(*store.state(), 6);
    }

    struct DropEverything;

    impl Middleware<i64, CounterAction> for DropEverything {
        fn handle(
            &mut self,
            _intent: Intent<i64, CounterAction>,
            _ctx: &MiddlewareContext<'_, i64, CounterAction>,
        ) -> Flow<i64, CounterAction> {
            Flow::Consumed
        }
    }

    #[test]
    fn consumed_intents_skip_reducer_and_listeners() {
        let store = Store::builder(counter)
            .with_state(5)
            .middleware(DropEverything)
            .build();

        let calls = Rc::new(RefCell::new(0_u32));
        let calls_inner = Rc::clone(&calls);
        let _sub = store.subscribe(move |_state| *calls_inner.borrow_mut() += 1);

        let out = store.dispatch(CounterAction::Add(1)).unwrap();
        assert_eq!(out, None);
        assert_eq!(*store.state(), 5);
        assert_eq!(*calls.borrow(), 0);
    }

    struct FollowUpOnSet;

    impl Middleware<i64, CounterAction> for FollowUpOnSet {
        fn handle(
            &mut self,
            intent: Intent<i64, CounterAction>,
            ctx: &MiddlewareContext<'_, i64, CounterAction>,
        ) -> Flow<i64, CounterAction> {
            if let Intent::Action(CounterAction::Set(_)) = &intent {
                ctx.dispatcher().dispatch(CounterAction::Add(1));
            }
            Flow::Continue(intent)
        }
    }

    #[test]
    fn middleware_follow_ups_run_as_separate_dispatches_in_queue_order() {
        let store = Store::builder(counter)
            .with_state(0)
            .middleware(FollowUpOnSet)
            .build();

        let transitions = Rc::new(RefCell::new(Vec::new()));
        let transitions_inner = Rc::clone(&transitions);
        let _sub = store.subscribe(move |state| transitions_inner.borrow_mut().push(*state));

        store.dispatch(CounterAction::Set(10)).unwrap();

        // Two transitions: the Set itself, then the queued follow-up Add.
        assert_eq!(*transitions.borrow(), vec![10, 11]);
        assert_eq!(*store.state(), 11);
    }

    #[test]
    fn pump_with_an_empty_queue_does_nothing() {
        let store = Store::with_state(counter, 1);
        assert_eq!(store.pump().unwrap(), 0);
        assert_eq!(*store.state(), 1);
    }

    #[test]
    fn queued_intents_are_processed_in_fifo_order() {
        let store = Store::new(counter);
        let dispatcher = store.dispatcher();

        dispatcher.dispatch(CounterAction::Set(7));
        dispatcher.dispatch(CounterAction::Add(2));

        assert_eq!(store.pump().unwrap(), 2);
        assert_eq!(*store.state(), 9);
    }

    #[test]
    fn snapshot_clones_the_current_state() {
        let store = Store::with_state(counter, 4);
        let before = store.snapshot();
        store.dispatch(CounterAction::Add(1)).unwrap();
        assert_eq!(before, 4);
        assert_eq!(store.snapshot(), 5);
    }
}
