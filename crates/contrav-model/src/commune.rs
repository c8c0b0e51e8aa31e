// SPDX-License-Identifier: Apache-2.0

//! Communes: where an infraction happened. `pachalik-circon` keeps its
//! hyphenated wire name; only the Rust field is renamed.

use crate::fields::{
    check_len, optional_number, optional_string, require_number, require_string, FieldErrors,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const COMMUNE_DISTRICT_MIN_LEN: usize = 2;
pub const COMMUNE_DISTRICT_MAX_LEN: usize = 200;
pub const COMMUNE_NOM_MIN_LEN: usize = 2;
pub const COMMUNE_NOM_MAX_LEN: usize = 50;

pub const MSG_PACHALIK_MIN: &str = "The pachalik-circon must be at least 2 characters.";
pub const MSG_CAIDAT_MIN: &str = "The caidat must be at least 2 characters.";
pub const MSG_NOM_MIN: &str = "The commune name must be at least 2 characters.";
pub const MSG_LATITUDE_RANGE: &str = "Latitude must be between -90 and 90 degrees.";
pub const MSG_LONGITUDE_RANGE: &str = "Longitude must be between -180 and 180 degrees.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Commune {
    pub id: i64,
    #[serde(rename = "pachalik-circon")]
    pub pachalik_circon: String,
    pub caidat: String,
    pub nom: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommuneDraft {
    pub pachalik_circon: Option<String>,
    pub caidat: Option<String>,
    pub nom: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CommuneDraft {
    #[must_use]
    pub fn finish(self) -> Option<NewCommune> {
        Some(NewCommune {
            pachalik_circon: self.pachalik_circon?,
            caidat: self.caidat?,
            nom: self.nom?,
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCommune {
    pub pachalik_circon: String,
    pub caidat: String,
    pub nom: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunePatch {
    pub pachalik_circon: Option<String>,
    pub caidat: Option<String>,
    pub nom: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CommunePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pachalik_circon.is_none()
            && self.caidat.is_none()
            && self.nom.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }
}

pub(crate) fn check_latitude(value: f64, errors: &mut FieldErrors) {
    if !(-90.0..=90.0).contains(&value) {
        errors.add("latitude", MSG_LATITUDE_RANGE.to_string());
    }
}

pub(crate) fn check_longitude(value: f64, errors: &mut FieldErrors) {
    if !(-180.0..=180.0).contains(&value) {
        errors.add("longitude", MSG_LONGITUDE_RANGE.to_string());
    }
}

#[must_use]
pub fn validate_new_commune(body: &Value) -> (CommuneDraft, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut draft = CommuneDraft::default();

    if let Some(v) = require_string(body, "pachalik-circon", &mut errors) {
        check_len(
            &v,
            "pachalik-circon",
            COMMUNE_DISTRICT_MIN_LEN,
            COMMUNE_DISTRICT_MAX_LEN,
            Some(MSG_PACHALIK_MIN),
            &mut errors,
        );
        if !errors.contains("pachalik-circon") {
            draft.pachalik_circon = Some(v);
        }
    }
    if let Some(v) = require_string(body, "caidat", &mut errors) {
        check_len(
            &v,
            "caidat",
            COMMUNE_DISTRICT_MIN_LEN,
            COMMUNE_DISTRICT_MAX_LEN,
            Some(MSG_CAIDAT_MIN),
            &mut errors,
        );
        if !errors.contains("caidat") {
            draft.caidat = Some(v);
        }
    }
    if let Some(v) = require_string(body, "nom", &mut errors) {
        check_len(
            &v,
            "nom",
            COMMUNE_NOM_MIN_LEN,
            COMMUNE_NOM_MAX_LEN,
            Some(MSG_NOM_MIN),
            &mut errors,
        );
        if !errors.contains("nom") {
            draft.nom = Some(v);
        }
    }
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

pub fn validate_commune_patch(body: &Value) -> Result<CommunePatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = CommunePatch::default();

    if let Some(v) = optional_string(body, "pachalik-circon", &mut errors) {
        check_len(
            &v,
            "pachalik-circon",
            COMMUNE_DISTRICT_MIN_LEN,
            COMMUNE_DISTRICT_MAX_LEN,
            Some(MSG_PACHALIK_MIN),
            &mut errors,
        );
        patch.pachalik_circon = Some(v);
    }
    if let Some(v) = optional_string(body, "caidat", &mut errors) {
        check_len(
            &v,
            "caidat",
            COMMUNE_DISTRICT_MIN_LEN,
            COMMUNE_DISTRICT_MAX_LEN,
            Some(MSG_CAIDAT_MIN),
            &mut errors,
        );
        patch.caidat = Some(v);
    }
    if let Some(v) = optional_string(body, "nom", &mut errors) {
        check_len(
            &v,
            "nom",
            COMMUNE_NOM_MIN_LEN,
            COMMUNE_NOM_MAX_LEN,
            Some(MSG_NOM_MIN),
            &mut errors,
        );
        patch.nom = Some(v);
    }
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
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "pachalik-circon": "Pachalik de Rabat",
            "caidat": "Caidat Agdal",
            "nom": "Agdal",
            "latitude": 33.9716,
            "longitude": -6.8498,
        })
    }

    #[test]
    fn valid_commune_passes() {
        let (draft, errors) = validate_new_commune(&valid_body());
        assert!(errors.is_empty());
        let new = draft.finish().expect("complete");
        assert_eq!(new.pachalik_circon, "Pachalik de Rabat");
    }

    #[test]
    fn coordinate_bounds_are_inclusive() {
        for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            let mut body = valid_body();
            body["latitude"] = json!(lat);
            body["longitude"] = json!(lon);
            let (_, errors) = validate_new_commune(&body);
            assert!(errors.is_empty(), "({lat},{lon}) should pass");
        }

        let mut body = valid_body();
        body["latitude"] = json!(90.01);
        let (_, errors) = validate_new_commune(&body);
        assert_eq!(errors.messages("latitude"), [MSG_LATITUDE_RANGE]);

        let mut body = valid_body();
        body["longitude"] = json!(-180.5);
        let (_, errors) = validate_new_commune(&body);
        assert_eq!(errors.messages("longitude"), [MSG_LONGITUDE_RANGE]);
    }

    #[test]
    fn coordinates_accept_numeric_strings() {
        let mut body = valid_body();
        body["latitude"] = json!("45.5");
        let (draft, errors) = validate_new_commune(&body);
        assert!(errors.is_empty());
        assert_eq!(draft.latitude, Some(45.5));
    }

    #[test]
    fn hyphenated_field_keeps_its_wire_name() {
        let (_, errors) = validate_new_commune(&json!({}));
        assert_eq!(
            errors.messages("pachalik-circon"),
            ["The pachalik-circon field is required."]
        );
    }

    #[test]
    fn patch_validates_present_fields() {
        let errors = validate_commune_patch(&json!({"latitude": 91})).expect_err("out of range");
        assert_eq!(errors.messages("latitude"), [MSG_LATITUDE_RANGE]);

        let patch = validate_commune_patch(&json!({"nom": "Hassan"})).expect("partial");
        assert_eq!(patch.nom.as_deref(), Some("Hassan"));
        assert!(patch.latitude.is_none());
    }
}
