use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::{CandidateUpdate, NewCandidate, Sex};

/// Body of the candidate form. The owning session is the one selected in
/// the workspace, never taken from the form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateFormPayload {
    #[serde(rename = "nom")]
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub last_name: String,
    #[serde(rename = "prenom")]
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub first_name: String,
    #[serde(rename = "date_naissance")]
    pub birth_date: NaiveDate,
    #[serde(rename = "lieu_naissance")]
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub birth_place: String,
    #[serde(rename = "sexe", default)]
    pub sex: Sex,
    #[serde(rename = "numero_cnaps", default)]
    pub cnaps_number: String,
    #[serde(rename = "niveau_etudes", default)]
    pub education_level: String,
    #[serde(rename = "situation_professionnelle", default)]
    pub professional_situation: String,
}

impl CandidateFormPayload {
    pub fn into_new_candidate(self, session_id: Uuid) -> NewCandidate {
        NewCandidate {
            session_id,
            last_name: self.last_name,
            first_name: self.first_name,
            birth_date: self.birth_date,
            birth_place: self.birth_place,
            sex: self.sex,
            cnaps_number: self.cnaps_number,
            education_level: self.education_level,
            professional_situation: self.professional_situation,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCandidatePayload {
    pub session_id: Option<Uuid>,
    #[serde(rename = "nom")]
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub last_name: Option<String>,
    #[serde(rename = "prenom")]
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub first_name: Option<String>,
    #[serde(rename = "date_naissance")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "lieu_naissance")]
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub birth_place: Option<String>,
    #[serde(rename = "sexe")]
    pub sex: Option<Sex>,
    #[serde(rename = "numero_cnaps")]
    pub cnaps_number: Option<String>,
    #[serde(rename = "niveau_etudes")]
    pub education_level: Option<String>,
    #[serde(rename = "situation_professionnelle")]
    pub professional_situation: Option<String>,
}

impl From<UpdateCandidatePayload> for CandidateUpdate {
    fn from(payload: UpdateCandidatePayload) -> Self {
        CandidateUpdate {
            session_id: payload.session_id,
            last_name: payload.last_name,
            first_name: payload.first_name,
            birth_date: payload.birth_date,
            birth_place: payload.birth_place,
            sex: payload.sex,
            cnaps_number: payload.cnaps_number,
            education_level: payload.education_level,
            professional_situation: payload.professional_situation,
        }
    }
}
