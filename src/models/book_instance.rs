//! Book instance (physical copy) model and related types

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{
    book::Book,
    form::{self, field_errors, FieldError, Rejected},
};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

#[derive(Debug, Error)]
#[error("unknown book instance status: {0}")]
pub struct UnknownStatus(pub String);

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
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

impl FromStr for BookInstanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookInstanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for BookInstanceStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    #[sqlx(try_from = "String")]
    pub status: BookInstanceStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    /// Due date for display, e.g. "Mar 1st, 2024"
    pub fn due_back_formatted(&self) -> String {
        let day = self.due_back.format("%-d").to_string();
        let suffix = match day.as_str() {
            "1" | "21" | "31" => "st",
            "2" | "22" => "nd",
            "3" | "23" => "rd",
            _ => "th",
        };
        format!("{} {}{}, {}", self.due_back.format("%b"), day, suffix, self.due_back.format("%Y"))
    }
}

/// Book instance with its book resolved; `None` when the reference dangles
#[derive(Debug, Clone)]
pub struct BookInstanceWithBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// Validated book instance fields
#[derive(Debug, Clone, PartialEq)]
pub struct BookInstanceInput {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstanceInput {
    /// A copy with default status and due date
    pub fn new(book_id: Uuid, imprint: impl Into<String>) -> Self {
        Self {
            book_id,
            imprint: imprint.into(),
            status: BookInstanceStatus::default(),
            due_back: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

impl BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint"];

    /// Form holding already sanitized values, for re-rendering
    pub fn from_input(input: &BookInstanceInput) -> Self {
        Self {
            book: input.book_id.to_string(),
            imprint: input.imprint.clone(),
            status: input.status.to_string(),
            due_back: input.due_back.to_rfc3339(),
        }
    }

    pub fn selected_book(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.book).ok()
    }

    pub fn check(mut self) -> Result<BookInstanceInput, Rejected<BookInstanceForm>> {
        form::trim(&mut self.book);
        form::trim(&mut self.imprint);
        form::trim(&mut self.status);
        form::trim(&mut self.due_back);

        let mut errors = field_errors(self.validate(), Self::FIELDS);

        self.book = form::escape(&self.book);
        self.imprint = form::escape(&self.imprint);
        self.status = form::escape(&self.status);

        let book_id = match form::parse_id(&self.book) {
            Ok(id) => id,
            Err(_) => {
                errors.push(FieldError::new("book", "Book must be specified"));
                None
            }
        };

        let status = if self.status.is_empty() {
            BookInstanceStatus::default()
        } else {
            self.status.parse().unwrap_or_else(|_| {
                errors.push(FieldError::new("status", "Invalid status"));
                BookInstanceStatus::default()
            })
        };

        let due_back = if self.due_back.is_empty() {
            Utc::now()
        } else {
            form::parse_iso_datetime(&self.due_back).unwrap_or_else(|| {
                errors.push(FieldError::new("due_back", "Invalid date"));
                Utc::now()
            })
        };

        match (errors.is_empty(), book_id) {
            (true, Some(book_id)) => Ok(BookInstanceInput {
                book_id,
                imprint: self.imprint,
                status,
                due_back,
            }),
            _ => Err(Rejected { form: self, errors }),
        }
    }
}
