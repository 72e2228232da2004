//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod dates;
pub mod genre;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use author::{Author, AuthorData};
pub use book::{Book, BookData, PopulatedBook};
pub use book_instance::{BookInstance, BookInstanceData, BookInstanceStatus, PopulatedBookInstance};
pub use genre::{Genre, GenreData};

/// System-generated identifier shared by every collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Identifier for a record that is about to be inserted
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier coming from a path segment or a form field.
    ///
    /// Malformed identifiers are a store failure rather than a missing record:
    /// no lookup could ever have matched them.
    pub fn parse(value: &str) -> AppResult<Self> {
        value.parse().map_err(|_| {
            AppError::Store(format!("Cast to identifier failed for value \"{}\"", value))
        })
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}
