use crate::actions::{Action, UserAction};
use crate::state::UserState;

/// Reducer for the user slice.
pub fn reduce(mut state: UserState, action: &Action) -> UserState {
    match action {
        Action::User(UserAction::SetName(name)) => {
            state.name = Some(name.clone());
        }
        _ => {
            // Actions for other slices - no state change
        }
    }

    state
}
