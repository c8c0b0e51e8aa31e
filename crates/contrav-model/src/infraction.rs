// SPDX-License-Identifier: Apache-2.0

//! Infractions: the recorded violation event. Carries the four foreign keys;
//! their existence is probed against the store by the handler and reported as
//! field errors, never as 404s.

use crate::commune::{check_latitude, check_longitude};
use crate::fields::{
    check_date_not_future, check_len, optional_integer, optional_number, optional_string,
    require_integer, require_number, require_string, FieldErrors,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const INFRACTION_NOM_MIN_LEN: usize = 2;
pub const INFRACTION_NOM_MAX_LEN: usize = 100;
pub const ADRESSE_MIN_LEN: usize = 5;
pub const ADRESSE_MAX_LEN: usize = 255;

pub const MSG_NOM_MIN: &str = "The infraction name must be at least 2 characters.";
pub const MSG_NOM_MAX: &str = "The infraction name cannot exceed 100 characters.";
pub const MSG_DATE_FUTURE: &str = "The infraction date cannot be in the future.";
pub const MSG_ADRESSE_MIN: &str = "The address must be at least 5 characters.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Infraction {
    pub id: i64,
    pub nom: String,
    pub date: String,
    pub adresse: String,
    pub commune_id: i64,
    pub violant_id: i64,
    pub agent_id: i64,
    pub categorie_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfractionDraft {
    pub nom: Option<String>,
    pub date: Option<String>,
    pub adresse: Option<String>,
    pub commune_id: Option<i64>,
    pub violant_id: Option<i64>,
    pub agent_id: Option<i64>,
    pub categorie_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl InfractionDraft {
    #[must_use]
    pub fn finish(self) -> Option<NewInfraction> {
        Some(NewInfraction {
            nom: self.nom?,
            date: self.date?,
            adresse: self.adresse?,
            commune_id: self.commune_id?,
            violant_id: self.violant_id?,
            agent_id: self.agent_id?,
            categorie_id: self.categorie_id?,
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInfraction {
    pub nom: String,
    pub date: String,
    pub adresse: String,
    pub commune_id: i64,
    pub violant_id: i64,
    pub agent_id: i64,
    pub categorie_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfractionPatch {
    pub nom: Option<String>,
    pub date: Option<String>,
    pub adresse: Option<String>,
    pub commune_id: Option<i64>,
    pub violant_id: Option<i64>,
    pub agent_id: Option<i64>,
    pub categorie_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl InfractionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nom.is_none()
            && self.date.is_none()
            && self.adresse.is_none()
            && self.commune_id.is_none()
            && self.violant_id.is_none()
            && self.agent_id.is_none()
            && self.categorie_id.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }
}

fn check_nom(nom: &str, errors: &mut FieldErrors) {
    let len = nom.chars().count();
    if len < INFRACTION_NOM_MIN_LEN {
        errors.add("nom", MSG_NOM_MIN.to_string());
    } else if len > INFRACTION_NOM_MAX_LEN {
        errors.add("nom", MSG_NOM_MAX.to_string());
    }
}

#[must_use]
pub fn validate_new_infraction(body: &Value) -> (InfractionDraft, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut draft = InfractionDraft::default();

    if let Some(nom) = require_string(body, "nom", &mut errors) {
        check_nom(&nom, &mut errors);
        if !errors.contains("nom") {
            draft.nom = Some(nom);
        }
    }
    if let Some(date) = require_string(body, "date", &mut errors) {
        if check_date_not_future(&date, "date", MSG_DATE_FUTURE, &mut errors).is_some() {
            draft.date = Some(date);
        }
    }
    if let Some(adresse) = require_string(body, "adresse", &mut errors) {
        check_len(
            &adresse,
            "adresse",
            ADRESSE_MIN_LEN,
            ADRESSE_MAX_LEN,
            Some(MSG_ADRESSE_MIN),
            &mut errors,
        );
        if !errors.contains("adresse") {
            draft.adresse = Some(adresse);
        }
    }
    draft.commune_id = require_integer(body, "commune_id", &mut errors);
    draft.violant_id = require_integer(body, "violant_id", &mut errors);
    draft.agent_id = require_integer(body, "agent_id", &mut errors);
    draft.categorie_id = require_integer(body, "categorie_id", &mut errors);
    if let Some(v) = require_number(body, "latitude", &mut errors) {
        check_latitude(v, &mut errors);
        if !errors.contains("latitude") {
            draft.latitude = Some(v);
        }
    }
    if let Some(v) = require_number(body, "longitude", &mut errors) {
        check_longitude(v, &mut errors);
        if !errors.contains("longitude") {
            draft.longitude = Some(v);
        }
    }

    (draft, errors)
}

/// Shape-only patch validation; the handler still has to probe any `*_id`
/// present against its target table.
pub fn validate_infraction_patch(body: &Value) -> Result<InfractionPatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = InfractionPatch::default();

    if let Some(nom) = optional_string(body, "nom", &mut errors) {
        check_nom(&nom, &mut errors);
        patch.nom = Some(nom);
    }
    if let Some(date) = optional_string(body, "date", &mut errors) {
        if check_date_not_future(&date, "date", MSG_DATE_FUTURE, &mut errors).is_some() {
            patch.date = Some(date);
        }
    }
    if let Some(adresse) = optional_string(body, "adresse", &mut errors) {
        check_len(
            &adresse,
            "adresse",
            ADRESSE_MIN_LEN,
            ADRESSE_MAX_LEN,
            Some(MSG_ADRESSE_MIN),
            &mut errors,
        );
        patch.adresse = Some(adresse);
    }
    patch.commune_id = optional_integer(body, "commune_id", &mut errors);
    patch.violant_id = optional_integer(body, "violant_id", &mut errors);
    patch.agent_id = optional_integer(body, "agent_id", &mut errors);
    patch.categorie_id = optional_integer(body, "categorie_id", &mut errors);
    if let Some(v) = optional_number(body, "latitude", &mut errors) {
        check_latitude(v, &mut errors);
        patch.latitude = Some(v);
    }
    if let Some(v) = optional_number(body, "longitude", &mut errors) {
        check_longitude(v, &mut errors);
        patch.longitude = Some(v);
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
    use chrono::Utc;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "nom": "Speeding",
            "date": "2023-12-01",
            "adresse": "123 Main Street",
            "commune_id": 1,
            "violant_id": 1,
            "agent_id": 1,
            "categorie_id": 1,
            "latitude": 45.5017,
            "longitude": -73.5673,
        })
    }

    #[test]
    fn valid_infraction_passes() {
        let (draft, errors) = validate_new_infraction(&valid_body());
        assert!(errors.is_empty());
        let new = draft.finish().expect("complete");
        assert_eq!(new.commune_id, 1);
        assert_eq!(new.date, "2023-12-01");
    }

    #[test]
    fn future_date_is_rejected_today_is_not() {
        let mut body = valid_body();
        let tomorrow = Utc::now().date_naive() + chrono::Days::new(1);
        body["date"] = json!(tomorrow.format("%Y-%m-%d").to_string());
        let (_, errors) = validate_new_infraction(&body);
        assert_eq!(errors.messages("date"), [MSG_DATE_FUTURE]);

        body["date"] = json!(Utc::now().date_naive().format("%Y-%m-%d").to_string());
        let (_, errors) = validate_new_infraction(&body);
        assert!(errors.is_empty());
    }

    #[test]
    fn garbage_date_is_a_format_error() {
        let mut body = valid_body();
        body["date"] = json!("not-a-date");
        let (_, errors) = validate_new_infraction(&body);
        assert_eq!(errors.messages("date"), ["The date is not a valid date."]);
    }

    #[test]
    fn adresse_min_uses_custom_message() {
        let mut body = valid_body();
        body["adresse"] = json!("abc");
        let (_, errors) = validate_new_infraction(&body);
        assert_eq!(errors.messages("adresse"), [MSG_ADRESSE_MIN]);
    }

    #[test]
    fn nom_bounds_use_custom_messages() {
        let mut body = valid_body();
        body["nom"] = json!("A");
        let (_, errors) = validate_new_infraction(&body);
        assert_eq!(errors.messages("nom"), [MSG_NOM_MIN]);

        body["nom"] = json!("A".repeat(101));
        let (_, errors) = validate_new_infraction(&body);
        assert_eq!(errors.messages("nom"), [MSG_NOM_MAX]);
    }

    #[test]
    fn foreign_keys_must_be_integers() {
        let mut body = valid_body();
        body["commune_id"] = json!("abc");
        let (_, errors) = validate_new_infraction(&body);
        assert_eq!(
            errors.messages("commune_id"),
            ["The commune id must be an integer."]
        );
    }

    #[test]
    fn empty_body_reports_all_nine_fields() {
        let (_, errors) = validate_new_infraction(&json!({}));
        for field in [
            "nom",
            "date",
            "adresse",
            "commune_id",
            "violant_id",
            "agent_id",
            "categorie_id",
            "latitude",
            "longitude",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn patch_keeps_absent_fields_untouched() {
        let patch = validate_infraction_patch(&json!({"nom": "Parking"})).expect("partial");
        assert_eq!(patch.nom.as_deref(), Some("Parking"));
        assert!(patch.commune_id.is_none());
        assert!(!patch.is_empty());
    }
}
