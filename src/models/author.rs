//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{dates::format_date, RecordId};

/// Full author model from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: RecordId,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Fields written on create and update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn from_data(id: RecordId, data: AuthorData) -> Self {
        Self {
            id,
            first_name: data.first_name,
            family_name: data.family_name,
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        }
    }

    /// Display name, "first, family"; empty unless both parts are present
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.first_name, self.family_name)
    }

    pub fn birthday_str(&self) -> String {
        self.date_of_birth.map(format_date).unwrap_or_default()
    }

    pub fn deathday_str(&self) -> String {
        self.date_of_death.map(format_date).unwrap_or_default()
    }

    pub fn lifespan(&self) -> String {
        let mut lifespan = String::new();
        if let Some(born) = self.date_of_birth {
            lifespan.push_str(&format_date(born));
            lifespan.push_str(" ~ ");
        }
        if let Some(died) = self.date_of_death {
            lifespan.push_str(&format_date(died));
        }
        lifespan
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}
