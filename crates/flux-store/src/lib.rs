//! # flux-store
//!
//! A minimal unidirectional state container: a [`Store`] owns the current
//! state, a pure reducer computes the next state from the current state and a
//! dispatched action, and registered listeners are notified after every
//! transition.
//!
//! ## Design Principles
//!
//! The store is deliberately small and single-threaded. All state transitions
//! flow through [`Store::dispatch`], which makes every change observable at
//! one choke point:
//!
//! - Reducers are pure functions `Fn(S, &A) -> S`; they never perform IO.
//! - Listeners observe transitions; they never mutate state directly.
//! - Middleware intercepts intents before the reducer runs and is the only
//!   place side effects belong.
//!
//! ## Action-Based Architecture
//!
//! Actions are caller-defined enums. The compiler checks match exhaustiveness
//! in reducers; a catch-all arm keeps a reducer a no-op for actions owned by
//! other slices. Composite states are wired up with [`combine_reducers!`],
//! which gives each sub-reducer exclusive ownership of one named field.
//!
//! ## Deferred Dispatch
//!
//! An [`Intent`] is either a plain action or a [`Thunk`]: a one-shot callable
//! that receives a [`Dispatcher`] and a state snapshot instead of being
//! reduced. Thunks are executed by [`ThunkMiddleware`] and may hand their
//! dispatcher to another thread; whatever that thread dispatches later is
//! queued and becomes an ordinary, independent dispatch once the owning thread
//! calls [`Store::pump`].
//!
//! ## Usage
//!
//! ```rust
//! use flux_store::Store;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum CounterAction {
//!     Increment,
//!     Add(i64),
//! }
//!
//! fn counter(state: i64, action: &CounterAction) -> i64 {
//!     match action {
//!         CounterAction::Increment => state + 1,
//!         CounterAction::Add(n) => state + n,
//!     }
//! }
//!
//! let store = Store::with_state(counter, 0);
//! let sub = store.subscribe(|state| println!("counter is now {state}"));
//!
//! store.dispatch(CounterAction::Increment).unwrap();
//! store.dispatch(CounterAction::Add(41)).unwrap();
//! assert_eq!(*store.state(), 42);
//!
//! sub.unsubscribe();
//! ```

pub mod dispatcher;
pub mod error;
pub mod intent;
pub mod middleware;
pub mod reducer;
pub mod store;

// Re-export commonly used types
pub use dispatcher::Dispatcher;
pub use error::StoreError;
pub use intent::{Intent, Thunk};
pub use middleware::{Flow, LoggingMiddleware, Middleware, MiddlewareContext, ThunkMiddleware};
pub use store::{Store, StoreBuilder, Subscription};
