// SPDX-License-Identifier: Apache-2.0

//! Agents: the officials who record infractions. `tel` and `cin` are unique
//! across agents; uniqueness probes run against the store, everything else is
//! checked here.

use crate::fields::{
    check_len, is_digits, is_uppercase_alnum, optional_string, require_string, FieldErrors,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const AGENT_NOM_MIN_LEN: usize = 2;
pub const AGENT_NOM_MAX_LEN: usize = 50;
pub const AGENT_TEL_LEN: usize = 10;
pub const AGENT_CIN_MAX_LEN: usize = 12;

pub const MSG_TEL_FORMAT: &str = "The tel must be exactly 10 digits.";
pub const MSG_CIN_FORMAT: &str = "The CIN must contain only uppercase letters and numbers.";
pub const MSG_CIN_MAX: &str = "The CIN must be at most 12 characters.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Agent {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub tel: String,
    pub cin: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Shape-checked create payload; fields stay `Option` so the handler can run
/// uniqueness probes on whatever parsed before deciding the request's fate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentDraft {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub tel: Option<String>,
    pub cin: Option<String>,
}

impl AgentDraft {
    /// Complete iff validation recorded no errors.
    #[must_use]
    pub fn finish(self) -> Option<NewAgent> {
        Some(NewAgent {
            nom: self.nom?,
            prenom: self.prenom?,
            tel: self.tel?,
            cin: self.cin?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub nom: String,
    pub prenom: String,
    pub tel: String,
    pub cin: String,
}

/// Allow-listed partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentPatch {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub tel: Option<String>,
    pub cin: Option<String>,
}

impl AgentPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nom.is_none() && self.prenom.is_none() && self.tel.is_none() && self.cin.is_none()
    }
}

fn check_tel(tel: &str, errors: &mut FieldErrors) {
    if tel.chars().count() != AGENT_TEL_LEN || !is_digits(tel) {
        errors.add("tel", MSG_TEL_FORMAT.to_string());
    }
}

fn check_cin(cin: &str, errors: &mut FieldErrors) {
    if cin.chars().count() > AGENT_CIN_MAX_LEN {
        errors.add("cin", MSG_CIN_MAX.to_string());
    }
    if !is_uppercase_alnum(cin) {
        errors.add("cin", MSG_CIN_FORMAT.to_string());
    }
}

#[must_use]
pub fn validate_new_agent(body: &Value) -> (AgentDraft, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut draft = AgentDraft::default();

    if let Some(nom) = require_string(body, "nom", &mut errors) {
        check_len(
            &nom,
            "nom",
            AGENT_NOM_MIN_LEN,
            AGENT_NOM_MAX_LEN,
            None,
            &mut errors,
        );
        if !errors.contains("nom") {
            draft.nom = Some(nom);
        }
    }
    if let Some(prenom) = require_string(body, "prenom", &mut errors) {
        check_len(
            &prenom,
            "prenom",
            AGENT_NOM_MIN_LEN,
            AGENT_NOM_MAX_LEN,
            None,
            &mut errors,
        );
        if !errors.contains("prenom") {
            draft.prenom = Some(prenom);
        }
    }
    if let Some(tel) = require_string(body, "tel", &mut errors) {
        check_tel(&tel, &mut errors);
        if !errors.contains("tel") {
            draft.tel = Some(tel);
        }
    }
    if let Some(cin) = require_string(body, "cin", &mut errors) {
        check_cin(&cin, &mut errors);
        if !errors.contains("cin") {
            draft.cin = Some(cin);
        }
    }

    (draft, errors)
}

pub fn validate_agent_patch(body: &Value) -> Result<AgentPatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = AgentPatch::default();

    if let Some(nom) = optional_string(body, "nom", &mut errors) {
        check_len(
            &nom,
            "nom",
            AGENT_NOM_MIN_LEN,
            AGENT_NOM_MAX_LEN,
            None,
            &mut errors,
        );
        patch.nom = Some(nom);
    }
    if let Some(prenom) = optional_string(body, "prenom", &mut errors) {
        check_len(
            &prenom,
            "prenom",
            AGENT_NOM_MIN_LEN,
            AGENT_NOM_MAX_LEN,
            None,
            &mut errors,
        );
        patch.prenom = Some(prenom);
    }
    if let Some(tel) = optional_string(body, "tel", &mut errors) {
        check_tel(&tel, &mut errors);
        patch.tel = Some(tel);
    }
    if let Some(cin) = optional_string(body, "cin", &mut errors) {
        check_cin(&cin, &mut errors);
        patch.cin = Some(cin);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({"nom": "Smith", "prenom": "John", "tel": "1234567890", "cin": "AB123456"})
    }

    #[test]
    fn valid_agent_passes_and_completes() {
        let (draft, errors) = validate_new_agent(&valid_body());
        assert!(errors.is_empty());
        let new = draft.finish().expect("complete draft");
        assert_eq!(new.cin, "AB123456");
        assert_eq!(new.tel, "1234567890");
    }

    #[test]
    fn empty_body_reports_every_required_field() {
        let (draft, errors) = validate_new_agent(&json!({}));
        for field in ["nom", "prenom", "tel", "cin"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(draft.finish().is_none());
    }

    #[test]
    fn nom_length_bounds() {
        let mut body = valid_body();
        body["nom"] = json!("A");
        let (_, errors) = validate_new_agent(&body);
        assert_eq!(
            errors.messages("nom"),
            ["The nom must be at least 2 characters."]
        );

        body["nom"] = json!("A".repeat(51));
        let (_, errors) = validate_new_agent(&body);
        assert_eq!(
            errors.messages("nom"),
            ["The nom must not be greater than 50 characters."]
        );

        body["nom"] = json!("Ab");
        body["prenom"] = json!("C".repeat(50));
        let (_, errors) = validate_new_agent(&body);
        assert!(errors.is_empty());
    }

    #[test]
    fn tel_must_be_exactly_ten_digits() {
        let mut body = valid_body();
        body["tel"] = json!("123456789");
        let (_, errors) = validate_new_agent(&body);
        assert_eq!(errors.messages("tel"), [MSG_TEL_FORMAT]);

        body["tel"] = json!("123456789a");
        let (_, errors) = validate_new_agent(&body);
        assert_eq!(errors.messages("tel"), [MSG_TEL_FORMAT]);
    }

    #[test]
    fn cin_alphabet_and_length() {
        let mut body = valid_body();
        body["cin"] = json!("ab123456");
        let (_, errors) = validate_new_agent(&body);
        assert_eq!(errors.messages("cin"), [MSG_CIN_FORMAT]);

        body["cin"] = json!("A".repeat(13));
        let (_, errors) = validate_new_agent(&body);
        assert_eq!(errors.messages("cin"), [MSG_CIN_MAX]);

        body["cin"] = json!("A".repeat(12));
        let (_, errors) = validate_new_agent(&body);
        assert!(errors.is_empty());
    }

    #[test]
    fn patch_applies_rules_only_when_present() {
        let patch = validate_agent_patch(&json!({})).expect("empty patch valid");
        assert!(patch.is_empty());

        let patch = validate_agent_patch(&json!({"nom": "Durand"})).expect("partial patch");
        assert_eq!(patch.nom.as_deref(), Some("Durand"));
        assert!(patch.tel.is_none());

        let errors = validate_agent_patch(&json!({"tel": "12"})).expect_err("bad tel");
        assert_eq!(errors.messages("tel"), [MSG_TEL_FORMAT]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut body = valid_body();
        body["role"] = json!("admin");
        let (_, errors) = validate_new_agent(&body);
        assert!(errors.is_empty());
    }
}
