#![forbid(unsafe_code)]
//! Domain model for the contrav registry: one module per entity carrying the
//! record type, the create/update payloads, and the validation rule tables.
//! Validation is pure; uniqueness and foreign-key existence need the store
//! and are probed by the handlers, which merge those results into the same
//! [`FieldErrors`] bag.

mod agent;
mod categorie;
mod commune;
mod decision;
pub mod fields;
mod infraction;
mod user;
mod violant;

pub use agent::{
    validate_agent_patch, validate_new_agent, Agent, AgentDraft, AgentPatch, NewAgent,
    AGENT_CIN_MAX_LEN, AGENT_NOM_MAX_LEN, AGENT_NOM_MIN_LEN, AGENT_TEL_LEN,
};
pub use categorie::{
    validate_categorie_patch, validate_new_categorie, Categorie, CategorieDraft, CategoriePatch,
    NewCategorie, CATEGORIE_NOM_MAX_LEN, CATEGORIE_NOM_MIN_LEN, DEGRE_MAX, DEGRE_MIN,
};
pub use commune::{
    validate_commune_patch, validate_new_commune, Commune, CommuneDraft, CommunePatch, NewCommune,
    COMMUNE_DISTRICT_MAX_LEN, COMMUNE_DISTRICT_MIN_LEN, COMMUNE_NOM_MAX_LEN, COMMUNE_NOM_MIN_LEN,
};
pub use decision::{
    validate_decision_patch, validate_new_decision, Decision, DecisionDraft, DecisionPatch,
    NewDecision, DECISIONPRISE_MAX_LEN, DECISIONPRISE_MIN_LEN,
};
pub use fields::{normalize_cin, normalize_str, FieldErrors};
pub use infraction::{
    validate_infraction_patch, validate_new_infraction, Infraction, InfractionDraft,
    InfractionPatch, NewInfraction, ADRESSE_MAX_LEN, ADRESSE_MIN_LEN, INFRACTION_NOM_MAX_LEN,
    INFRACTION_NOM_MIN_LEN,
};
pub use user::{
    validate_new_user, validate_user_patch, NewUser, User, UserDraft, UserPatch,
    USER_LOGIN_MAX_LEN, USER_NOM_MAX_LEN, USER_ROLE_MAX_LEN, USER_TEL_MAX_LEN,
};
pub use violant::{
    validate_new_violant, validate_violant_patch, NewViolant, Violant, ViolantDraft, ViolantPatch,
    VIOLANT_CIN_MAX_LEN, VIOLANT_NOM_MAX_LEN, VIOLANT_NOM_MIN_LEN,
};
