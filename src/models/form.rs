//! Form boundary: multi-value normalization, sanitation and field errors

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// A form field that may be submitted once, many times or not at all.
///
/// Always holds a list once deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormList(pub Vec<String>);

impl FormList {
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for FormList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl<'de> Deserialize<'de> for FormList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FormListVisitor;

        impl<'de> Visitor<'de> for FormListVisitor {
            type Value = FormList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or a list of strings")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FormList, E> {
                Ok(FormList(vec![v.to_string()]))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<FormList, E> {
                Ok(FormList(vec![v]))
            }

            fn visit_none<E: de::Error>(self) -> Result<FormList, E> {
                Ok(FormList::default())
            }

            fn visit_unit<E: de::Error>(self) -> Result<FormList, E> {
                Ok(FormList::default())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<FormList, D::Error> {
                d.deserialize_any(self)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FormList, A::Error> {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element::<String>()? {
                    values.push(value);
                }
                Ok(FormList(values))
            }
        }

        deserializer.deserialize_any(FormListVisitor)
    }
}

/// One violated field rule, as shown next to the form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(param: &str, msg: &str) -> Self {
        Self {
            param: param.to_string(),
            msg: msg.to_string(),
        }
    }
}

/// A form that failed validation, kept with its sanitized values for re-rendering
#[derive(Debug, Clone)]
pub struct Rejected<F> {
    pub form: F,
    pub errors: Vec<FieldError>,
}

/// Flatten `validator` output into field errors, ordered like the form fields.
pub fn field_errors(result: Result<(), ValidationErrors>, order: &[&str]) -> Vec<FieldError> {
    let Err(errors) = result else {
        return Vec::new();
    };

    let mut collected = Vec::new();
    for (field, errs) in errors.field_errors() {
        let field: &str = field.as_ref();
        for err in errs.iter() {
            let msg = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            collected.push(FieldError::new(field, &msg));
        }
    }
    order_errors(&mut collected, order);
    collected
}

/// Stable sort by form field position; unknown fields go last
pub fn order_errors(errors: &mut [FieldError], order: &[&str]) {
    errors.sort_by_key(|e| {
        order
            .iter()
            .position(|f| *f == e.param)
            .unwrap_or(order.len())
    });
}

/// Upper bound on a text field, counted in characters
pub fn max_chars(errors: &mut Vec<FieldError>, param: &str, value: &str, max: usize, msg: &str) {
    if value.chars().count() > max {
        errors.push(FieldError::new(param, msg));
    }
}

/// Neutralize markup in user-supplied text before storage
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim in place
pub fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Parse a submitted reference id. Empty input is `Ok(None)`.
pub fn parse_id(value: &str) -> Result<Option<Uuid>, uuid::Error> {
    if value.is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(value).map(Some)
}

/// ISO-8601 calendar date (`2024-03-01`), or a full timestamp whose date part is kept
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    parse_iso_datetime(value).map(|dt| dt.date_naive())
}

/// ISO-8601 timestamp; bare dates are taken as midnight UTC
pub fn parse_iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `validator` rule: letters and digits only. Empty values are left to the length rule.
pub fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(char::is_alphanumeric) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}
