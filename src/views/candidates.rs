use serde::Serialize;

use crate::dto::session_dto::SessionResponse;
use crate::models::candidate::Candidate;
use crate::models::session::Session;
use crate::pages::candidates::CandidatesPage;
use crate::utils::format::{candidate_count_label, format_date};
use crate::views::PageMeta;

pub const EMPTY_SESSION: &str = "Aucun candidat dans cette session";

#[derive(Debug, Clone, Serialize)]
pub struct CandidateItem {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub full_name: String,
    pub birth_date_label: String,
}

impl From<&Candidate> for CandidateItem {
    fn from(candidate: &Candidate) -> Self {
        Self {
            full_name: candidate.full_name(),
            birth_date_label: format_date(candidate.birth_date),
            candidate: candidate.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidatesView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub sessions: Vec<SessionResponse>,
    pub selected_session: Option<SessionResponse>,
    /// Only present once a session is selected.
    pub count_label: Option<String>,
    pub candidates: Vec<CandidateItem>,
    pub empty_message: Option<&'static str>,
}

impl CandidatesView {
    pub fn build(page: &CandidatesPage, selected: Option<&Session>) -> Self {
        let candidates: Vec<CandidateItem> = match selected {
            Some(_) => page.candidates().iter().map(CandidateItem::from).collect(),
            None => Vec::new(),
        };
        let empty_message = (selected.is_some() && candidates.is_empty()).then_some(EMPTY_SESSION);

        Self {
            meta: PageMeta::from(page.status()),
            sessions: page.sessions().iter().map(SessionResponse::from).collect(),
            selected_session: selected.map(SessionResponse::from),
            count_label: selected.map(|_| candidate_count_label(candidates.len())),
            candidates,
            empty_message,
        }
    }
}
