//! Form normalization and field checklists.
//!
//! Submissions arrive as url-encoded pairs.  [`FormData`] normalizes them so
//! that every field can be read either as a single sanitized value or as a
//! uniform sequence, whatever the number of submitted values.  Each resource
//! then declares its checklist as a `validator` derive on a sanitized form
//! struct; every failing rule contributes one [`FieldError`] and no field
//! stops the others from being checked.

use indexmap::IndexMap;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    error::AppResult,
    models::{
        dates::{parse_iso8601, parse_iso8601_date},
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookInstanceStatus,
        Genre, GenreData, RecordId,
    },
};

/// Submitted form fields, keyed by name in submission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData(IndexMap<String, Vec<String>>);

impl FormData {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: IndexMap<String, Vec<String>> = IndexMap::new();
        for (name, value) in pairs {
            fields.entry(name.into()).or_default().push(value.into());
        }
        Self(fields)
    }

    /// First submitted value of `name`, untouched
    pub fn value(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|values| values.first()).map(String::as_str)
    }

    /// All submitted values of `name`: none, one or many
    pub fn values(&self, name: &str) -> Vec<String> {
        self.0.get(name).cloned().unwrap_or_default()
    }

    /// Trimmed value of `name`; absent fields read as empty
    pub fn trimmed(&self, name: &str) -> String {
        self.value(name).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// Trimmed value of `name`, with empty values read as absent
    pub fn optional(&self, name: &str) -> Option<String> {
        Some(self.trimmed(name)).filter(|v| !v.is_empty())
    }
}

/// One failed rule of a checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Flattens `validator` output into field errors, following `fields` order
fn collect_errors(result: Result<(), ValidationErrors>, fields: &[&str]) -> Vec<FieldError> {
    let Err(errors) = result else {
        return Vec::new();
    };
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err.message.clone().unwrap_or_else(|| err.code.clone());
                FieldError::new(field, message)
            })
        })
        .collect()
}

fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    // Emptiness is reported by the length rule.
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

fn iso8601(value: &str) -> Result<(), ValidationError> {
    match parse_iso8601(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601")),
    }
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BookInstanceStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}

/// Raises a malformed reference as the store would on write
fn reference(value: &str) -> AppResult<RecordId> {
    RecordId::parse(value)
}

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct AuthorForm {
    #[validate(
        length(min = 1, max = 100, message = "First name must be specified (100 characters at most)."),
        custom(function = "alphanumeric", message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 100, message = "Family name must be specified (100 characters at most)."),
        custom(function = "alphanumeric", message = "Family name has non-alphanumeric characters.")
    )]
    pub family_name: String,
    #[validate(custom(function = "iso8601", message = "Invalid date of birth"))]
    pub date_of_birth: Option<String>,
    #[validate(custom(function = "iso8601", message = "Invalid date of death"))]
    pub date_of_death: Option<String>,
}

impl AuthorForm {
    const FIELDS: [&'static str; 4] = ["first_name", "family_name", "date_of_birth", "date_of_death"];

    pub fn from_form(form: &FormData) -> Self {
        Self {
            first_name: form.trimmed("first_name"),
            family_name: form.trimmed("family_name"),
            date_of_birth: form.optional("date_of_birth"),
            date_of_death: form.optional("date_of_death"),
        }
    }

    pub fn from_author(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: Some(author.birthday_str()).filter(|s| !s.is_empty()),
            date_of_death: Some(author.deathday_str()).filter(|s| !s.is_empty()),
        }
    }

    pub fn check(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), &Self::FIELDS)
    }

    /// Builds the record payload; only meaningful once `check` passed
    pub fn to_data(&self) -> AuthorData {
        AuthorData {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.date_of_birth.as_deref().and_then(parse_iso8601_date),
            date_of_death: self.date_of_death.as_deref().and_then(parse_iso8601_date),
        }
    }
}

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct GenreForm {
    #[validate(length(min = 1, message = "Genre name required"))]
    pub name: String,
}

impl GenreForm {
    const FIELDS: [&'static str; 1] = ["name"];

    pub fn from_form(form: &FormData) -> Self {
        Self { name: form.trimmed("name") }
    }

    pub fn from_genre(genre: &Genre) -> Self {
        Self { name: genre.name.clone() }
    }

    pub fn check(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), &Self::FIELDS)
    }

    pub fn to_data(&self) -> GenreData {
        GenreData { name: self.name.clone() }
    }
}

// ---------------------------------------------------------------------------
// Book
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    pub summary: Option<String>,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    /// Genre references exactly as submitted
    pub genre: Vec<String>,
}

impl BookForm {
    const FIELDS: [&'static str; 3] = ["title", "author", "isbn"];

    pub fn from_form(form: &FormData) -> Self {
        Self {
            title: form.trimmed("title"),
            author: form.trimmed("author"),
            summary: form.optional("summary"),
            isbn: form.trimmed("isbn"),
            genre: form.values("genre"),
        }
    }

    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.iter().map(RecordId::to_string).collect(),
        }
    }

    pub fn check(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), &Self::FIELDS)
    }

    /// Whether `genre` is among the submitted genre references
    pub fn has_genre(&self, genre: &Genre) -> bool {
        let id = genre.id.to_string();
        self.genre.iter().any(|g| *g == id)
    }

    pub fn to_data(&self) -> AppResult<BookData> {
        Ok(BookData {
            title: self.title.clone(),
            author: reference(&self.author)?,
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre: self.genre.iter().map(|g| reference(g)).collect::<AppResult<_>>()?,
        })
    }
}

// ---------------------------------------------------------------------------
// BookInstance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct BookInstanceForm {
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified."))]
    pub imprint: String,
    #[validate(custom(function = "known_status", message = "Status must be one of Available, Maintenance, Loaned, Reserved."))]
    pub status: Option<String>,
    #[validate(custom(function = "iso8601", message = "Invalid date"))]
    pub due_back: Option<String>,
}

impl BookInstanceForm {
    const FIELDS: [&'static str; 4] = ["book", "imprint", "status", "due_back"];

    pub fn from_form(form: &FormData) -> Self {
        Self {
            book: form.trimmed("book"),
            imprint: form.trimmed("imprint"),
            status: form.optional("status"),
            due_back: form.optional("due_back"),
        }
    }

    pub fn from_instance(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.to_string(),
            imprint: instance.imprint.clone(),
            status: Some(instance.status.to_string()),
            due_back: Some(instance.due_back_formatted()),
        }
    }

    pub fn check(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), &Self::FIELDS)
    }

    /// Status to pre-select in the form
    pub fn selected_status(&self) -> BookInstanceStatus {
        self.status.as_deref().and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    /// Builds the record payload; a missing due-back date defaults to `now`
    pub fn to_data(&self, now: chrono::DateTime<chrono::Utc>) -> AppResult<BookInstanceData> {
        Ok(BookInstanceData {
            book: reference(&self.book)?,
            imprint: self.imprint.clone(),
            status: self.selected_status(),
            due_back: self.due_back.as_deref().and_then(parse_iso8601).unwrap_or(now),
        })
    }
}
