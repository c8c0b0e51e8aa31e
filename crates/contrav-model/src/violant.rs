// SPDX-License-Identifier: Apache-2.0

//! Violants: the persons cited. Same CIN contract as agents, minus the phone.

use crate::fields::{check_len, is_uppercase_alnum, optional_string, require_string, FieldErrors};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const VIOLANT_NOM_MIN_LEN: usize = 2;
pub const VIOLANT_NOM_MAX_LEN: usize = 50;
pub const VIOLANT_CIN_MAX_LEN: usize = 12;

pub const MSG_NOM_MIN: &str = "The last name must be at least 2 characters.";
pub const MSG_PRENOM_MIN: &str = "The first name must be at least 2 characters.";
pub const MSG_CIN_FORMAT: &str = "The CIN must contain only uppercase letters and numbers.";
pub const MSG_CIN_MAX: &str = "The CIN must be at most 12 characters.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Violant {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub cin: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViolantDraft {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub cin: Option<String>,
}

impl ViolantDraft {
    #[must_use]
    pub fn finish(self) -> Option<NewViolant> {
        Some(NewViolant {
            nom: self.nom?,
            prenom: self.prenom?,
            cin: self.cin?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewViolant {
    pub nom: String,
    pub prenom: String,
    pub cin: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViolantPatch {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub cin: Option<String>,
}

impl ViolantPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nom.is_none() && self.prenom.is_none() && self.cin.is_none()
    }
}

fn check_cin(cin: &str, errors: &mut FieldErrors) {
    if cin.chars().count() > VIOLANT_CIN_MAX_LEN {
        errors.add("cin", MSG_CIN_MAX.to_string());
    }
    if !is_uppercase_alnum(cin) {
        errors.add("cin", MSG_CIN_FORMAT.to_string());
    }
}

#[must_use]
pub fn validate_new_violant(body: &Value) -> (ViolantDraft, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut draft = ViolantDraft::default();

    if let Some(nom) = require_string(body, "nom", &mut errors) {
        check_len(
            &nom,
            "nom",
            VIOLANT_NOM_MIN_LEN,
            VIOLANT_NOM_MAX_LEN,
            Some(MSG_NOM_MIN),
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
            VIOLANT_NOM_MIN_LEN,
            VIOLANT_NOM_MAX_LEN,
            Some(MSG_PRENOM_MIN),
            &mut errors,
        );
        if !errors.contains("prenom") {
            draft.prenom = Some(prenom);
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

pub fn validate_violant_patch(body: &Value) -> Result<ViolantPatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = ViolantPatch::default();

    if let Some(nom) = optional_string(body, "nom", &mut errors) {
        check_len(
            &nom,
            "nom",
            VIOLANT_NOM_MIN_LEN,
            VIOLANT_NOM_MAX_LEN,
            Some(MSG_NOM_MIN),
            &mut errors,
        );
        patch.nom = Some(nom);
    }
    if let Some(prenom) = optional_string(body, "prenom", &mut errors) {
        check_len(
            &prenom,
            "prenom",
            VIOLANT_NOM_MIN_LEN,
            VIOLANT_NOM_MAX_LEN,
            Some(MSG_PRENOM_MIN),
            &mut errors,
        );
        patch.prenom = Some(prenom);
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
