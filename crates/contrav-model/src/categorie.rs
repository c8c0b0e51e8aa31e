// SPDX-License-Identifier: Apache-2.0

//! Categories: severity classification, degree 1 (benign) through 5 (grave).

use crate::fields::{
    check_len, optional_integer, optional_string, require_integer, require_string, FieldErrors,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CATEGORIE_NOM_MIN_LEN: usize = 2;
pub const CATEGORIE_NOM_MAX_LEN: usize = 50;
pub const DEGRE_MIN: i64 = 1;
pub const DEGRE_MAX: i64 = 5;

pub const MSG_NOM_MIN: &str = "The category name must be at least 2 characters.";
pub const MSG_DEGRE_RANGE: &str = "The degree must be between 1 and 5.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Categorie {
    pub id: i64,
    pub nom: String,
    pub degre: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorieDraft {
    pub nom: Option<String>,
    pub degre: Option<i64>,
}

impl CategorieDraft {
    #[must_use]
    pub fn finish(self) -> Option<NewCategorie> {
        Some(NewCategorie {
            nom: self.nom?,
            degre: self.degre?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategorie {
    pub nom: String,
    pub degre: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoriePatch {
    pub nom: Option<String>,
    pub degre: Option<i64>,
}

impl CategoriePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nom.is_none() && self.degre.is_none()
    }
}

fn check_degre(value: i64, errors: &mut FieldErrors) {
    if !(DEGRE_MIN..=DEGRE_MAX).contains(&value) {
        errors.add("degre", MSG_DEGRE_RANGE.to_string());
    }
}

#[must_use]
pub fn validate_new_categorie(body: &Value) -> (CategorieDraft, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut draft = CategorieDraft::default();

    if let Some(nom) = require_string(body, "nom", &mut errors) {
        check_len(
            &nom,
            "nom",
            CATEGORIE_NOM_MIN_LEN,
            CATEGORIE_NOM_MAX_LEN,
            Some(MSG_NOM_MIN),
            &mut errors,
        );
        if !errors.contains("nom") {
            draft.nom = Some(nom);
        }
    }
    if let Some(degre) = require_integer(body, "degre", &mut errors) {
        check_degre(degre, &mut errors);
        if !errors.contains("degre") {
            draft.degre = Some(degre);
        }
    }

    (draft, errors)
}

pub fn validate_categorie_patch(body: &Value) -> Result<CategoriePatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = CategoriePatch::default();

    if let Some(nom) = optional_string(body, "nom", &mut errors) {
        check_len(
            &nom,
            "nom",
            CATEGORIE_NOM_MIN_LEN,
            CATEGORIE_NOM_MAX_LEN,
            Some(MSG_NOM_MIN),
            &mut errors,
        );
        patch.nom = Some(nom);
    }
    if let Some(degre) = optional_integer(body, "degre", &mut errors) {
        check_degre(degre, &mut errors);
        patch.degre = Some(degre);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}
