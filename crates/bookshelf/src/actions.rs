//! Actions and action creators.
//!
//! Actions are grouped by the state slice they target; the root [`Action`]
//! enum wraps the groups so one store carries both domains. The free
//! functions below are the action creators: pure constructors that keep call
//! sites out of the business of spelling enum variants.

use std::thread;
use std::time::Duration;

use flux_store::Intent;

use crate::domain::Book;
use crate::state::AppState;

/// Actions for the user slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Set the current user's display name.
    SetName(String),
}

/// Actions for the books slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookAction {
    /// Put a book on the shelf.
    Add(Book),
}

/// Root action enum - tagged by state slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    User(UserAction),
    Book(BookAction),
}

/// Action creator: set the user's name.
pub fn set_name(name: impl Into<String>) -> Action {
    Action::User(UserAction::SetName(name.into()))
}

/// Action creator: add a book by title.
pub fn add_book(title: impl Into<String>) -> Action {
    Action::Book(BookAction::Add(Book::new(title)))
}

/// Action creator: add a book with its author.
pub fn add_book_by(title: impl Into<String>, author: impl Into<String>) -> Action {
    Action::Book(BookAction::Add(Book::by(title, author)))
}

/// Deferred action creator: add a book once `delay` has elapsed.
///
/// The returned thunk spawns a timer thread and hands it the dispatcher; the
/// actual `Add` lands on the next [`Store::pump`] after the delay. The
/// dispatch that carries this thunk returns immediately with state unchanged.
///
/// [`Store::pump`]: flux_store::Store::pump
pub fn add_book_later(title: impl Into<String>, delay: Duration) -> Intent<AppState, Action> {
    let title = title.into();
    Intent::thunk(move |dispatcher, _state| {
        thread::spawn(move || {
            thread::sleep(delay);
            log::debug!("deferred add of {:?} firing", title);
            dispatcher.dispatch(add_book(title));
        });
    })
}
