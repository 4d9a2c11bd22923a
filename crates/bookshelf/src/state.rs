use crate::domain::Book;

/// User slice: who is browsing the shelf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub name: Option<String>,
}

/// Root application state. Each field is owned by exactly one reducer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub user: UserState,
    pub books: Vec<Book>,
}
