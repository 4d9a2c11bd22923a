use std::fmt;

/// A book on the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: Option<String>,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
        }
    }

    pub fn by(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: Some(author.into()),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.author {
            Some(author) => write!(f, "{} ({})", self.title, author),
            None => write!(f, "{}", self.title),
        }
    }
}
