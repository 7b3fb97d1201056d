//! Author model and related types

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::form::{self, alphanumeric, field_errors, FieldError, Rejected};

const MAX_NAME: usize = 100;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Family, First"; empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Birth and death years, e.g. "1892 - 1973"
    pub fn lifespan(&self) -> String {
        let year = |d: Option<NaiveDate>| d.map(|d| d.year().to_string());
        match (year(self.date_of_birth), year(self.date_of_death)) {
            (Some(b), Some(d)) => format!("{} - {}", b, d),
            (Some(b), None) => format!("{} - ", b),
            (None, Some(d)) => format!(" - {}", d),
            (None, None) => String::new(),
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

/// Validated author fields, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author create/update form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(function = "alphanumeric", message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(function = "alphanumeric", message = "Family name has non-alphanumeric characters.")
    )]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

impl AuthorForm {
    const FIELDS: &'static [&'static str] = &["first_name", "family_name"];

    /// Prefill an update form from a stored record
    pub fn from_author(author: &Author) -> Self {
        let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: date(author.date_of_birth),
            date_of_death: date(author.date_of_death),
        }
    }

    /// Trim, validate, escape and parse dates
    pub fn check(mut self) -> Result<AuthorInput, Rejected<AuthorForm>> {
        form::trim(&mut self.first_name);
        form::trim(&mut self.family_name);
        form::trim(&mut self.date_of_birth);
        form::trim(&mut self.date_of_death);

        let mut errors = field_errors(self.validate(), Self::FIELDS);
        form::max_chars(
            &mut errors,
            "first_name",
            &self.first_name,
            MAX_NAME,
            "First name must not exceed 100 characters.",
        );
        form::max_chars(
            &mut errors,
            "family_name",
            &self.family_name,
            MAX_NAME,
            "Family name must not exceed 100 characters.",
        );
        form::order_errors(&mut errors, Self::FIELDS);

        self.first_name = form::escape(&self.first_name);
        self.family_name = form::escape(&self.family_name);

        let mut date = |value: &str, param: &str, msg: &str| {
            if value.is_empty() {
                return None;
            }
            let parsed = form::parse_iso_date(value);
            if parsed.is_none() {
                errors.push(FieldError::new(param, msg));
            }
            parsed
        };
        let date_of_birth = date(&self.date_of_birth, "date_of_birth", "Invalid date of birth");
        let date_of_death = date(&self.date_of_death, "date_of_death", "Invalid date of death");

        if !errors.is_empty() {
            return Err(Rejected { form: self, errors });
        }

        Ok(AuthorInput {
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth,
            date_of_death,
        })
    }
}
