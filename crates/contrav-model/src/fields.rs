// SPDX-License-Identifier: Apache-2.0

//! Shared field primitives: the error bag, message builders in the wire
//! format the back-office client already expects, and typed extractors over
//! raw JSON bodies.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Field-name → messages bag returned on validation failure.
///
/// BTreeMap keeps the serialized `errors` object in stable field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }
}

/// Human label for a field name: underscores read as spaces.
#[must_use]
pub fn label(field: &str) -> String {
    field.replace('_', " ")
}

#[must_use]
pub fn msg_required(field: &str) -> String {
    format!("The {} field is required.", label(field))
}

#[must_use]
pub fn msg_string(field: &str) -> String {
    format!("The {} must be a string.", label(field))
}

#[must_use]
pub fn msg_min(field: &str, min: usize) -> String {
    format!("The {} must be at least {min} characters.", label(field))
}

#[must_use]
pub fn msg_max(field: &str, max: usize) -> String {
    format!(
        "The {} must not be greater than {max} characters.",
        label(field)
    )
}

#[must_use]
pub fn msg_numeric(field: &str) -> String {
    format!("The {} must be a number.", label(field))
}

#[must_use]
pub fn msg_integer(field: &str) -> String {
    format!("The {} must be an integer.", label(field))
}

#[must_use]
pub fn msg_date(field: &str) -> String {
    format!("The {} is not a valid date.", label(field))
}

#[must_use]
pub fn msg_taken(field: &str) -> String {
    format!("The {} has already been taken.", label(field))
}

#[must_use]
pub fn msg_exists(field: &str) -> String {
    format!("The selected {} is invalid.", label(field))
}

/// Whitespace-trim normalization applied to every stored string field.
#[must_use]
pub fn normalize_str(raw: &str) -> String {
    raw.trim().to_string()
}

/// CIN normalization: trim, then uppercase. Uniqueness is checked over this
/// form.
#[must_use]
pub fn normalize_cin(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[must_use]
pub fn is_uppercase_alnum(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[must_use]
pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Required string field. Missing, null, or blank records a `required`
/// error, non-string records a type error; either way `None` comes back.
pub fn require_string(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, msg_required(field));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.add(field, msg_required(field));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.add(field, msg_string(field));
            None
        }
    }
}

/// Optional string field for partial updates: absent is fine, present must be
/// a non-blank string.
pub fn optional_string(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.add(field, msg_required(field));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.add(field, msg_string(field));
            None
        }
    }
}

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn integer_from(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Required numeric field; numeric strings are accepted the way the client
/// sends coordinates.
pub fn require_number(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<f64> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, msg_required(field));
            None
        }
        Some(v) => match number_from(v) {
            Some(n) => Some(n),
            None => {
                errors.add(field, msg_numeric(field));
                None
            }
        },
    }
}

pub fn optional_number(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<f64> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(v) => match number_from(v) {
            Some(n) => Some(n),
            None => {
                errors.add(field, msg_numeric(field));
                None
            }
        },
    }
}

pub fn require_integer(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, msg_required(field));
            None
        }
        Some(v) => match integer_from(v) {
            Some(n) => Some(n),
            None => {
                errors.add(field, msg_integer(field));
                None
            }
        },
    }
}

pub fn optional_integer(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(v) => match integer_from(v) {
            Some(n) => Some(n),
            None => {
                errors.add(field, msg_integer(field));
                None
            }
        },
    }
}

/// Length bounds over the raw (untrimmed) value, matching the validate-then
/// -normalize write path.
pub fn check_len(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
    min_msg: Option<&str>,
    errors: &mut FieldErrors,
) {
    let len = value.chars().count();
    if len < min {
        errors.add(
            field,
            min_msg.map_or_else(|| msg_min(field, min), str::to_string),
        );
    } else if len > max {
        errors.add(field, msg_max(field, max));
    }
}

/// Calendar date in `YYYY-MM-DD` form, not after today (UTC).
pub fn check_date_not_future(
    value: &str,
    field: &str,
    future_msg: &str,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        errors.add(field, msg_date(field));
        return None;
    };
    if date > Utc::now().date_naive() {
        errors.add(field, future_msg.to_string());
        return None;
    }
    Some(date)
}
