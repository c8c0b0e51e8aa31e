// SPDX-License-Identifier: Apache-2.0

//! Decisions: the adjudication recorded against an infraction. Leaf entity,
//! nothing references it.

use crate::fields::{
    check_date_not_future, check_len, optional_integer, optional_string, require_integer,
    require_string, FieldErrors,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DECISIONPRISE_MIN_LEN: usize = 5;
pub const DECISIONPRISE_MAX_LEN: usize = 200;

pub const MSG_DATE_FUTURE: &str = "The decision date cannot be in the future.";
pub const MSG_DECISIONPRISE_MIN: &str = "The decision must be at least 5 characters.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Decision {
    pub id: i64,
    pub date: String,
    pub decisionprise: String,
    pub infraction_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionDraft {
    pub date: Option<String>,
    pub decisionprise: Option<String>,
    pub infraction_id: Option<i64>,
}

impl DecisionDraft {
    #[must_use]
    pub fn finish(self) -> Option<NewDecision> {
        Some(NewDecision {
            date: self.date?,
            decisionprise: self.decisionprise?,
            infraction_id: self.infraction_id?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDecision {
    pub date: String,
    pub decisionprise: String,
    pub infraction_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionPatch {
    pub date: Option<String>,
    pub decisionprise: Option<String>,
    pub infraction_id: Option<i64>,
}

impl DecisionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.decisionprise.is_none() && self.infraction_id.is_none()
    }
}

#[must_use]
pub fn validate_new_decision(body: &Value) -> (DecisionDraft, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut draft = DecisionDraft::default();

    if let Some(date) = require_string(body, "date", &mut errors) {
        if check_date_not_future(&date, "date", MSG_DATE_FUTURE, &mut errors).is_some() {
            draft.date = Some(date);
        }
    }
    if let Some(text) = require_string(body, "decisionprise", &mut errors) {
        check_len(
            &text,
            "decisionprise",
            DECISIONPRISE_MIN_LEN,
            DECISIONPRISE_MAX_LEN,
            Some(MSG_DECISIONPRISE_MIN),
            &mut errors,
        );
        if !errors.contains("decisionprise") {
            draft.decisionprise = Some(text);
        }
    }
    draft.infraction_id = require_integer(body, "infraction_id", &mut errors);

    (draft, errors)
}

pub fn validate_decision_patch(body: &Value) -> Result<DecisionPatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = DecisionPatch::default();

    if let Some(date) = optional_string(body, "date", &mut errors) {
        if check_date_not_future(&date, "date", MSG_DATE_FUTURE, &mut errors).is_some() {
            patch.date = Some(date);
        }
    }
    if let Some(text) = optional_string(body, "decisionprise", &mut errors) {
        check_len(
            &text,
            "decisionprise",
            DECISIONPRISE_MIN_LEN,
            DECISIONPRISE_MAX_LEN,
            Some(MSG_DECISIONPRISE_MIN),
            &mut errors,
        );
        patch.decisionprise = Some(text);
    }
    patch.infraction_id = optional_integer(body, "infraction_id", &mut errors);

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}
