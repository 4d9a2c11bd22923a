//! Reducer combination.
//!
//! A reducer is any pure `Fn(S, &A) -> S`. For composite states, each field
//! is owned by exactly one sub-reducer: the sub-reducer sees only its own
//! slice plus the full action, and the results are reassembled into the
//! composite. [`combine_reducers!`] generates that threading so the root
//! reducer stays a one-liner.

/// Build a root reducer from named slice reducers.
///
/// Expands to a closure `Fn(State, &Action) -> State` that runs every listed
/// field through its reducer, in the order written, and returns the updated
/// composite. A slice reducer can neither read nor write any field other
/// than its own.
///
/// The composite's starting value comes from its `Default` impl, which in
/// turn composes each slice's declared default.
///
/// ```rust
/// use flux_store::{combine_reducers, Store};
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct AppState {
///     count: i64,
///     log: Vec<String>,
/// }
///
/// #[derive(Debug, Clone)]
/// enum Action {
///     Increment,
///     Note(String),
/// }
///
/// fn count_reducer(state: i64, action: &Action) -> i64 {
///     match action {
///         Action::Increment => state + 1,
///         _ => state,
///     }
/// }
///
/// fn log_reducer(mut state: Vec<String>, action: &Action) -> Vec<String> {
///     match action {
///         Action::Note(text) => {
///             state.push(text.clone());
///             state
///         }
///         _ => state,
///     }
/// }
///
/// let store = Store::new(combine_reducers!(AppState, Action => {
///     count: count_reducer,
///     log: log_reducer,
/// }));
///
/// store.dispatch(Action::Increment).unwrap();
/// assert_eq!(store.state().count, 1);
/// assert_eq!(store.state().log.len(), 0);
/// ```
#[macro_export]
macro_rules! combine_reducers {
    ($state:ty, $action:ty => { $($field:ident : $reducer:expr),+ $(,)? }) => {
        move |mut state: $state, action: &$action| -> $state {
            $(
                state.$field = ($reducer)(state.$field, action);
            )+
            state
        }
    };
}
