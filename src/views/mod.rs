//! Serializable snapshots of page state, with amounts, dates and labels
//! already formatted for display.

pub mod candidates;
pub mod dashboard;
pub mod payments;

use serde::Serialize;

use crate::dto::session_dto::SessionResponse;
use crate::pages::load_state::{LoadState, PageStatus};
use crate::pages::workspace::Workspace;

#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub state: LoadState,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<&PageStatus> for PageMeta {
    fn from(status: &PageStatus) -> Self {
        Self {
            state: status.state(),
            loading: status.is_loading(),
            error: status.error().map(str::to_string),
        }
    }
}

/// The shell around the pages: selected session and the picker.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceView {
    pub selected_session: Option<SessionResponse>,
    pub sessions: Vec<SessionResponse>,
}

impl WorkspaceView {
    pub fn build(workspace: &Workspace) -> Self {
        Self {
            selected_session: workspace.selected_session_record().map(SessionResponse::from),
            sessions: workspace.sessions().iter().map(SessionResponse::from).collect(),
        }
    }
}
