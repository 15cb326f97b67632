//! The console shell: one selected session shared by the three pages.
//!
//! A page loads on first use, when the session changes, on an explicit
//! refresh, or after a mutation made elsewhere touched what it shows.

use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::Store;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateUpdate, NewCandidate};
use crate::models::payment::{NewPayment, Payment, PaymentUpdate};
use crate::models::session::{NewSession, Session};
use crate::pages::candidates::CandidatesPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::load_state::LoadState;
use crate::pages::payments::PaymentsPage;

pub struct Workspace {
    store: Arc<dyn Store>,
    selected_session: Option<Uuid>,
    candidates: CandidatesPage,
    payments: PaymentsPage,
    dashboard: DashboardPage,
    payments_stale: bool,
    dashboard_stale: bool,
}

impl Workspace {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            selected_session: None,
            candidates: CandidatesPage::default(),
            payments: PaymentsPage::default(),
            dashboard: DashboardPage::default(),
            payments_stale: true,
            dashboard_stale: true,
        }
    }

    pub fn selected_session(&self) -> Option<Uuid> {
        self.selected_session
    }

    /// Sessions known to the picker.
    pub fn sessions(&self) -> &[Session] {
        self.candidates.sessions()
    }

    /// The selected session's record, if the picker has it.
    pub fn selected_session_record(&self) -> Option<&Session> {
        let id = self.selected_session?;
        self.candidates.sessions().iter().find(|s| s.id == id)
    }

    pub fn candidates_page(&self) -> &CandidatesPage {
        &self.candidates
    }

    pub fn payments_page(&self) -> &PaymentsPage {
        &self.payments
    }

    pub fn dashboard_page(&self) -> &DashboardPage {
        &self.dashboard
    }

    /// Mounts the candidates page on first use and after a failed mount.
    pub async fn load_candidates_page(&mut self, refresh: bool) -> Result<()> {
        let state = self.candidates.status().state();
        if refresh || matches!(state, LoadState::Idle | LoadState::Failed) {
            self.candidates
                .mount(self.store.as_ref(), self.selected_session)
                .await?;
        }
        Ok(())
    }

    pub async fn load_payments_page(&mut self, refresh: bool) -> Result<()> {
        if refresh || self.payments_stale {
            self.payments_stale = false;
            self.payments
                .load(self.store.as_ref(), self.selected_session)
                .await?;
        }
        Ok(())
    }

    pub async fn load_dashboard_page(&mut self, refresh: bool) -> Result<()> {
        if refresh || self.dashboard_stale {
            self.dashboard_stale = false;
            self.dashboard
                .load(self.store.as_ref(), self.selected_session)
                .await?;
        }
        Ok(())
    }

    /// Changes the selected session and reloads every page. All pages are
    /// attempted; the first failure is returned.
    pub async fn select_session(&mut self, session_id: Option<Uuid>) -> Result<()> {
        self.load_candidates_page(false).await?;
        if let Some(id) = session_id {
            if !self.candidates.sessions().iter().any(|s| s.id == id) {
                return Err(Error::NotFound("Session introuvable".into()));
            }
        }
        self.selected_session = session_id;
        tracing::info!(session_id = ?session_id, "Session selected");

        let store = self.store.as_ref();
        let candidates = self.candidates.load_candidates(store, session_id).await;
        let payments = self.payments.load(store, session_id).await;
        let dashboard = self.dashboard.load(store, session_id).await;
        self.payments_stale = false;
        self.dashboard_stale = false;
        candidates.and(payments).and(dashboard)
    }

    /// Creates a session and selects it. Once the insert went through, a
    /// failed page reload only shows on that page's banner.
    pub async fn create_session(&mut self, session: NewSession) -> Result<Session> {
        self.load_candidates_page(false).await?;
        let created = self
            .candidates
            .create_session(self.store.as_ref(), session)
            .await?;
        if let Err(err) = self.select_session(Some(created.id)).await {
            tracing::warn!(session_id = %created.id, error = %err, "Session created but page reload failed");
        }
        Ok(created)
    }

    fn require_session(&self) -> Result<Uuid> {
        self.selected_session
            .ok_or_else(|| Error::BadRequest("Aucune session sélectionnée".into()))
    }

    /// Adds a candidate to the selected session.
    pub async fn add_candidate(
        &mut self,
        build: impl FnOnce(Uuid) -> NewCandidate,
    ) -> Result<Candidate> {
        let session_id = self.require_session()?;
        self.load_candidates_page(false).await?;
        let created = self
            .candidates
            .add_candidate(self.store.as_ref(), build(session_id))
            .await?;
        self.mark_candidates_changed();
        Ok(created)
    }

    pub async fn update_candidate(&mut self, id: Uuid, update: CandidateUpdate) -> Result<Candidate> {
        let updated = self
            .candidates
            .update_candidate(self.store.as_ref(), id, update)
            .await?;
        self.mark_candidates_changed();
        Ok(updated)
    }

    pub async fn delete_candidate(&mut self, id: Uuid) -> Result<()> {
        self.candidates
            .delete_candidate(self.store.as_ref(), id)
            .await?;
        self.mark_candidates_changed();
        Ok(())
    }

    pub async fn select_candidate(&mut self, candidate_id: Uuid) -> Result<Candidate> {
        self.load_payments_page(false).await?;
        self.payments.select_candidate(candidate_id).cloned()
    }

    /// Adds a payment. Without an explicit candidate it goes to the one
    /// open on the payments page.
    pub async fn add_payment(
        &mut self,
        candidate_id: Option<Uuid>,
        build: impl FnOnce(Uuid) -> NewPayment,
    ) -> Result<Payment> {
        self.load_payments_page(false).await?;
        let candidate_id = candidate_id
            .or_else(|| self.payments.selected_candidate().map(|c| c.id))
            .ok_or_else(|| Error::BadRequest("Aucun candidat sélectionné".into()))?;
        let created = self
            .payments
            .add_payment(self.store.as_ref(), build(candidate_id))
            .await?;
        self.dashboard_stale = true;
        Ok(created)
    }

    pub async fn update_payment(&mut self, id: Uuid, update: PaymentUpdate) -> Result<Payment> {
        let updated = self
            .payments
            .update_payment(self.store.as_ref(), id, update)
            .await?;
        self.dashboard_stale = true;
        Ok(updated)
    }

    pub async fn delete_payment(&mut self, id: Uuid) -> Result<()> {
        self.payments
            .delete_payment(self.store.as_ref(), id)
            .await?;
        self.dashboard_stale = true;
        Ok(())
    }

    fn mark_candidates_changed(&mut self) {
        self.payments_stale = true;
        self.dashboard_stale = true;
    }
}
