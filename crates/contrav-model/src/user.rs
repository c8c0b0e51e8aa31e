// SPDX-License-Identifier: Apache-2.0

//! Back-office users. Independent of the infraction graph and deliberately
//! credential-free; `Tel` keeps its capitalized wire name.

use crate::fields::{check_len, optional_string, require_string, FieldErrors};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const USER_NOM_MAX_LEN: usize = 255;
pub const USER_TEL_MAX_LEN: usize = 50;
pub const USER_ROLE_MAX_LEN: usize = 255;
pub const USER_LOGIN_MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    #[serde(rename = "Tel")]
    pub tel: String,
    pub role: String,
    pub login: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub tel: Option<String>,
    pub role: Option<String>,
    pub login: Option<String>,
}

impl UserDraft {
    #[must_use]
    pub fn finish(self) -> Option<NewUser> {
        Some(NewUser {
            nom: self.nom?,
            prenom: self.prenom?,
            tel: self.tel?,
            role: self.role?,
            login: self.login?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub nom: String,
    pub prenom: String,
    pub tel: String,
    pub role: String,
    pub login: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub tel: Option<String>,
    pub role: Option<String>,
    pub login: Option<String>,
}

impl UserPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nom.is_none()
            && self.prenom.is_none()
            && self.tel.is_none()
            && self.role.is_none()
            && self.login.is_none()
    }
}

#[must_use]
pub fn validate_new_user(body: &Value) -> (UserDraft, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut draft = UserDraft::default();

    if let Some(nom) = require_string(body, "nom", &mut errors) {
        check_len(&nom, "nom", 0, USER_NOM_MAX_LEN, None, &mut errors);
        if !errors.contains("nom") {
            draft.nom = Some(nom);
        }
    }
    if let Some(prenom) = require_string(body, "prenom", &mut errors) {
        check_len(&prenom, "prenom", 0, USER_NOM_MAX_LEN, None, &mut errors);
        if !errors.contains("prenom") {
            draft.prenom = Some(prenom);
        }
    }
    if let Some(tel) = require_string(body, "Tel", &mut errors) {
        check_len(&tel, "Tel", 0, USER_TEL_MAX_LEN, None, &mut errors);
        if !errors.contains("Tel") {
            draft.tel = Some(tel);
        }
    }
    if let Some(role) = require_string(body, "role", &mut errors) {
        check_len(&role, "role", 0, USER_ROLE_MAX_LEN, None, &mut errors);
        if !errors.contains("role") {
            draft.role = Some(role);
        }
    }
    if let Some(login) = require_string(body, "login", &mut errors) {
        check_len(&login, "login", 0, USER_LOGIN_MAX_LEN, None, &mut errors);
        if !errors.contains("login") {
            draft.login = Some(login);
        }
    }

    (draft, errors)
}

pub fn validate_user_patch(body: &Value) -> Result<UserPatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = UserPatch::default();

    if let Some(nom) = optional_string(body, "nom", &mut errors) {
        check_len(&nom, "nom", 0, USER_NOM_MAX_LEN, None, &mut errors);
        patch.nom = Some(nom);
    }
    if let Some(prenom) = optional_string(body, "prenom", &mut errors) {
        check_len(&prenom, "prenom", 0, USER_NOM_MAX_LEN, None, &mut errors);
        patch.prenom = Some(prenom);
    }
    if let Some(tel) = optional_string(body, "Tel", &mut errors) {
        check_len(&tel, "Tel", 0, USER_TEL_MAX_LEN, None, &mut errors);
        patch.tel = Some(tel);
    }
    if let Some(role) = optional_string(body, "role", &mut errors) {
        check_len(&role, "role", 0, USER_ROLE_MAX_LEN, None, &mut errors);
        patch.role = Some(role);
    }
    if let Some(login) = optional_string(body, "login", &mut errors) {
        check_len(&login, "login", 0, USER_LOGIN_MAX_LEN, None, &mut errors);
        patch.login = Some(login);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}
