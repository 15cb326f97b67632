use rust_decimal::Decimal;
use uuid::Uuid;

use crate::database::store::Store;
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::payment::{Payment, PaymentMode};
use crate::models::session::Session;
use crate::pages::load_state::PageStatus;
use crate::pages::payments::DATA_LOAD_FAILED;
use crate::services::aggregation::{
    collection_rate, group_by_candidate, payments_for_candidates, revenue_by_mode,
    session_stats, unpaid_candidates, PaymentGroups, SessionStats,
};

/// Everything the dashboard derives its tiles and exports from.
#[derive(Debug, Clone, Default)]
pub struct DashboardPage {
    sessions: Vec<Session>,
    candidates: Vec<Candidate>,
    payments: Vec<Payment>,
    session_id: Option<Uuid>,
    status: PageStatus,
}

impl DashboardPage {
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    /// Fetches sessions, candidates and payments strictly in that order.
    /// A failure keeps whatever the earlier steps already stored.
    pub async fn load(&mut self, store: &dyn Store, session_id: Option<Uuid>) -> Result<()> {
        self.status.begin();
        self.session_id = session_id;

        let sessions = store
            .list_sessions()
            .await
            .map_err(|e| self.status.fail(DATA_LOAD_FAILED, e))?;
        self.sessions = sessions;

        let candidates = store
            .list_candidates(session_id)
            .await
            .map_err(|e| self.status.fail(DATA_LOAD_FAILED, e))?;
        self.candidates = candidates;

        let payments = store
            .list_payments(None)
            .await
            .map_err(|e| self.status.fail(DATA_LOAD_FAILED, e))?;
        self.payments = payments;

        self.status.finish();
        Ok(())
    }

    pub fn groups(&self) -> PaymentGroups {
        group_by_candidate(&self.payments)
    }

    pub fn stats(&self) -> SessionStats {
        session_stats(&self.candidates, &self.groups())
    }

    pub fn collection_rate(&self) -> u32 {
        collection_rate(&self.stats())
    }

    /// Payments in scope: those of the listed candidates when a session is
    /// selected, every payment otherwise.
    pub fn scoped_payments(&self) -> Vec<Payment> {
        match self.session_id {
            Some(_) => payments_for_candidates(&self.payments, &self.candidates),
            None => self.payments.clone(),
        }
    }

    pub fn revenue_by_mode(&self) -> Vec<(PaymentMode, Decimal)> {
        revenue_by_mode(&self.scoped_payments())
    }

    pub fn unpaid_candidates(&self) -> Vec<Candidate> {
        unpaid_candidates(&self.candidates, &self.groups())
            .into_iter()
            .cloned()
            .collect()
    }
}
