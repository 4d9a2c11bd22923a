//! Slice reducers and the combined root reducer.

use flux_store::combine_reducers;

use crate::actions::Action;
use crate::state::AppState;

pub mod book_reducer;
pub mod user_reducer;

/// Root reducer: each slice of [`AppState`] runs through its own reducer.
pub fn app_reducer(state: AppState, action: &Action) -> AppState {
    combine_reducers!(AppState, Action => {
        user: user_reducer::reduce,
        books: book_reducer::reduce,
    })(state, action)
}
