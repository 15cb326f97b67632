use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::session::{NewSession, Session};
use crate::utils::format::format_date;

/// Body of the "Créer une nouvelle session" dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub name: String,
    pub date: NaiveDate,
}

impl From<CreateSessionPayload> for NewSession {
    fn from(payload: CreateSessionPayload) -> Self {
        NewSession {
            name: payload.name.trim().to_string(),
            date: payload.date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectSessionPayload {
    /// `None` clears the selection.
    pub session_id: Option<Uuid>,
}

/// One entry of the session picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    /// "G1 (06/01/2026)"
    pub label: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            date: session.date,
            label: format!("{} ({})", session.name, format_date(session.date)),
        }
    }
}
