use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    #[serde(rename = "Masculin")]
    Male,
    #[serde(rename = "Féminin")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Masculin",
            Sex::Female => "Féminin",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Masculin" => Ok(Sex::Male),
            "Féminin" => Ok(Sex::Female),
            other => Err(format!("unknown sex '{}'", other)),
        }
    }
}

/// A person enrolled in a session. Wire names are the store's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub session_id: Uuid,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "date_naissance")]
    pub birth_date: NaiveDate,
    #[serde(rename = "lieu_naissance")]
    pub birth_place: String,
    #[serde(rename = "sexe")]
    pub sex: Sex,
    #[serde(rename = "numero_cnaps")]
    pub cnaps_number: String,
    #[serde(rename = "niveau_etudes")]
    pub education_level: String,
    #[serde(rename = "situation_professionnelle")]
    pub professional_situation: String,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    /// "Prénom Nom", as shown in the payments view and exports.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a partial update the same way the store does.
    pub fn apply(&mut self, update: &CandidateUpdate) {
        if let Some(v) = update.session_id {
            self.session_id = v;
        }
        if let Some(v) = &update.last_name {
            self.last_name = v.clone();
        }
        if let Some(v) = &update.first_name {
            self.first_name = v.clone();
        }
        if let Some(v) = update.birth_date {
            self.birth_date = v;
        }
        if let Some(v) = &update.birth_place {
            self.birth_place = v.clone();
        }
        if let Some(v) = update.sex {
            self.sex = v;
        }
        if let Some(v) = &update.cnaps_number {
            self.cnaps_number = v.clone();
        }
        if let Some(v) = &update.education_level {
            self.education_level = v.clone();
        }
        if let Some(v) = &update.professional_situation {
            self.professional_situation = v.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub session_id: Uuid,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "date_naissance")]
    pub birth_date: NaiveDate,
    #[serde(rename = "lieu_naissance")]
    pub birth_place: String,
    #[serde(rename = "sexe")]
    pub sex: Sex,
    #[serde(rename = "numero_cnaps")]
    pub cnaps_number: String,
    #[serde(rename = "niveau_etudes")]
    pub education_level: String,
    #[serde(rename = "situation_professionnelle")]
    pub professional_situation: String,
}

/// Partial update; absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    #[serde(rename = "nom", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "prenom", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "date_naissance", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "lieu_naissance", skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(rename = "sexe", skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(rename = "numero_cnaps", skip_serializing_if = "Option::is_none")]
    pub cnaps_number: Option<String>,
    #[serde(rename = "niveau_etudes", skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(rename = "situation_professionnelle", skip_serializing_if = "Option::is_none")]
    pub professional_situation: Option<String>,
}

impl CandidateUpdate {
    pub fn is_empty(&self) -> bool {
        *self == CandidateUpdate::default()
    }
}
