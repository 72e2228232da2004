//! Genre model

use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenreData {
    pub name: String,
}

impl Genre {
    pub fn from_data(id: RecordId, data: GenreData) -> Self {
        Self { id, name: data.name }
    }

    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}
