use crate::actions::{Action, BookAction};
use crate::domain::Book;

/// Reducer for the books slice.
pub fn reduce(mut state: Vec<Book>, action: &Action) -> Vec<Book> {
    match action {
        Action::Book(BookAction::Add(book)) => {
            state.push(book.clone());
        }
        _ => {
            // Actions for other slices - no state change
        }
    }

    state
}
