//! Book model and its populated form

use serde::{Deserialize, Serialize};

use super::{Author, Genre, RecordId};

/// Book as stored: references are kept as identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub author: RecordId,
    pub summary: Option<String>,
    pub isbn: String,
    pub genre: Vec<RecordId>,
}

/// Fields written on create and update
#[derive(Debug, Clone, PartialEq)]
pub struct BookData {
    pub title: String,
    pub author: RecordId,
    pub summary: Option<String>,
    pub isbn: String,
    pub genre: Vec<RecordId>,
}

impl Book {
    pub fn from_data(id: RecordId, data: BookData) -> Self {
        Self {
            id,
            title: data.title,
            author: data.author,
            summary: data.summary,
            isbn: data.isbn,
            genre: data.genre,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book with its references resolved.
///
/// `author` is `None` and `genres` is shorter than `book.genre` when the
/// referenced records no longer exist.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedBook {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}
