// SPDX-License-Identifier: Apache-2.0

use crate::EntityKind;
use contrav_model::FieldErrors;
use serde_json::{json, Value};

/// Error taxonomy at the request boundary. The code drives the HTTP status;
/// the body shape depends on the case (see [`ApiError::to_body`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub error: Option<String>,
    pub message: Option<String>,
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    #[must_use]
    pub fn validation_failed(errors: FieldErrors) -> Self {
        Self {
            code: ApiErrorCode::ValidationFailed,
            error: None,
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
        }
    }

    #[must_use]
    pub fn not_found(entity: EntityKind) -> Self {
        Self {
            code: ApiErrorCode::NotFound,
            error: Some(format!("{} not found", entity.display_name())),
            message: None,
            errors: None,
        }
    }

    /// Delete refused because `dependent` still references the target.
    /// `referencing_id` is the dependent row reported to the client.
    #[must_use]
    pub fn referenced_by(entity: EntityKind, dependent: EntityKind, referencing_id: i64) -> Self {
        Self {
            code: ApiErrorCode::Conflict,
            error: Some(format!("Cannot delete {}", entity.lower_name())),
            message: Some(format!(
                "{} is referenced in {}: {referencing_id}",
                entity.display_name(),
                dependent.lower_name(),
            )),
            errors: None,
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::Internal,
            error: Some("Internal server error".to_string()),
            message: Some(message.into()),
            errors: None,
        }
    }

    /// JSON body in the shape the client matches on:
    /// validation → `{"message", "errors"}`, not-found → `{"error"}`,
    /// conflict → `{"error", "message"}`.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body = json!({});
        if let Some(error) = &self.error {
            body["error"] = json!(error);
        }
        if let Some(message) = &self.message {
            body["message"] = json!(message);
        }
        if let Some(errors) = &self.errors {
            body["errors"] = json!(errors);
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_has_message_and_errors() {
        let mut fields = FieldErrors::new();
        fields.add("degre", "The degree must be between 1 and 5.".to_string());
        let err = ApiError::validation_failed(fields);
        let body = err.to_body();
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["degre"][0], "The degree must be between 1 and 5.");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn not_found_body_is_error_only() {
        let body = ApiError::not_found(EntityKind::Agent).to_body();
        assert_eq!(body["error"], "Agent not found");
        assert!(body.get("message").is_none());
    }

    #[test]
    fn conflict_body_cites_the_referencing_row() {
        let body =
            ApiError::referenced_by(EntityKind::Commune, EntityKind::Infraction, 3).to_body();
        assert_eq!(body["error"], "Cannot delete commune");
        assert_eq!(body["message"], "Commune is referenced in infraction: 3");
    }

    #[test]
    fn categorie_conflict_uses_category_wording() {
        let body =
            ApiError::referenced_by(EntityKind::Categorie, EntityKind::Infraction, 7).to_body();
        assert_eq!(body["error"], "Cannot delete category");
        assert_eq!(body["message"], "Category is referenced in infraction: 7");
    }
}
