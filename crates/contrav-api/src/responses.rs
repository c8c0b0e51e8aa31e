// SPDX-License-Identifier: Apache-2.0

use crate::EntityKind;
use serde::Serialize;

/// Success envelope: `{"message", "data"}`, with `data` omitted for deletes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessEnvelope<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> SuccessEnvelope<T> {
    #[must_use]
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    #[must_use]
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

#[must_use]
pub fn created_message(entity: EntityKind) -> String {
    format!("{} created successfully", entity.display_name())
}

#[must_use]
pub fn updated_message(entity: EntityKind) -> String {
    format!("{} updated successfully", entity.display_name())
}

#[must_use]
pub fn deleted_message(entity: EntityKind) -> String {
    format!("{} deleted successfully", entity.display_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delete_envelope_has_no_data_key() {
        let env = SuccessEnvelope::<()>::message_only(deleted_message(EntityKind::Decision));
        let v = serde_json::to_value(&env).expect("serialize");
        assert_eq!(v["message"], "Decision deleted successfully");
        assert!(v.get("data").is_none());
    }

    #[test]
    fn data_envelope_round_trips() {
        let env = SuccessEnvelope::with_data(created_message(EntityKind::Categorie), json!({"id": 1}));
        let v = serde_json::to_value(&env).expect("serialize");
        assert_eq!(v["message"], "Category created successfully");
        assert_eq!(v["data"]["id"], 1);
    }
}
