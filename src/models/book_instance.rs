//! Book instance (physical copy) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{dates::format_date, Book, RecordId};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown book copy status {:?}", self.0)
    }
}

impl FromStr for BookInstanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookInstanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Copy as stored: the book is kept as an identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: RecordId,
    pub book: RecordId,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: DateTime<Utc>,
}

/// Fields written on create and update
#[derive(Debug, Clone, PartialEq)]
pub struct BookInstanceData {
    pub book: RecordId,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstance {
    pub fn from_data(id: RecordId, data: BookInstanceData) -> Self {
        Self {
            id,
            book: data.book,
            imprint: data.imprint,
            status: data.status,
            due_back: data.due_back,
        }
    }

    /// `YYYY-MM-DD` of the due-back date in UTC
    pub fn due_back_formatted(&self) -> String {
        format_date(self.due_back.date_naive())
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}

/// Copy with its book resolved; `book` is `None` for a dangling reference
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedBookInstance {
    pub instance: BookInstance,
    pub book: Option<Book>,
}
