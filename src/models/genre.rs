//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::form::{self, field_errors, Rejected};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Validated genre fields
#[derive(Debug, Clone, PartialEq)]
pub struct GenreInput {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "Genre name must contain at least 3 characters"))]
    pub name: String,
}

impl GenreForm {
    pub fn from_genre(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }

    pub fn check(mut self) -> Result<GenreInput, Rejected<GenreForm>> {
        form::trim(&mut self.name);
        let mut errors = field_errors(self.validate(), &["name"]);
        form::max_chars(
            &mut errors,
            "name",
            &self.name,
            100,
            "Genre name must not exceed 100 characters",
        );
        self.name = form::escape(&self.name);

        if !errors.is_empty() {
            return Err(Rejected { form: self, errors });
        }
        Ok(GenreInput { name: self.name })
    }
}
