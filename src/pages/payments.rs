use uuid::Uuid;

use crate::database::store::Store;
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::payment::{NewPayment, Payment, PaymentUpdate};
use crate::pages::load_state::PageStatus;
use crate::services::aggregation::{summarize, PaymentGroups, PaymentSummary};

pub const DATA_LOAD_FAILED: &str = "Erreur lors du chargement des données";
pub const PAYMENT_ADD_FAILED: &str = "Erreur lors de l'ajout du paiement";
pub const PAYMENT_UPDATE_FAILED: &str = "Erreur lors de la mise à jour du paiement";
pub const PAYMENT_DELETE_FAILED: &str = "Erreur lors de la suppression du paiement";

/// Candidates of the selected session with their payments, and the
/// candidate whose payments are open.
#[derive(Debug, Clone, Default)]
pub struct PaymentsPage {
    candidates: Vec<Candidate>,
    payments: PaymentGroups,
    selected_candidate: Option<Uuid>,
    status: PageStatus,
}

impl PaymentsPage {
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn payments(&self) -> &PaymentGroups {
        &self.payments
    }

    pub fn payments_of(&self, candidate_id: &Uuid) -> &[Payment] {
        self.payments.get(candidate_id)
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        let id = self.selected_candidate?;
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Loads the session's candidates, then every payment, grouped per
    /// candidate with an empty group for those who paid nothing yet.
    pub async fn load(&mut self, store: &dyn Store, session_id: Option<Uuid>) -> Result<()> {
        let Some(session_id) = session_id else {
            self.candidates.clear();
            self.payments = PaymentGroups::default();
            self.selected_candidate = None;
            return Ok(());
        };

        self.status.begin();
        let candidates = store
            .list_candidates(Some(session_id))
            .await
            .map_err(|e| self.status.fail(DATA_LOAD_FAILED, e))?;
        self.candidates = candidates;

        let payments = store
            .list_payments(None)
            .await
            .map_err(|e| self.status.fail(DATA_LOAD_FAILED, e))?;
        let mut groups = PaymentGroups::seeded(self.candidates.iter().map(|c| c.id));
        for payment in payments {
            groups.push(payment);
        }
        self.payments = groups;

        if self.selected_candidate().is_none() {
            self.selected_candidate = None;
        }
        self.status.finish();
        Ok(())
    }

    pub fn select_candidate(&mut self, candidate_id: Uuid) -> Result<&Candidate> {
        let candidate = self
            .candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .ok_or_else(|| Error::NotFound("Candidat introuvable dans cette session".into()))?;
        self.selected_candidate = Some(candidate.id);
        Ok(candidate)
    }

    /// Paid, pending and total of the open candidate.
    pub fn summary(&self) -> Option<PaymentSummary> {
        self.selected_candidate()
            .map(|c| summarize(self.payments.get(&c.id)))
    }

    pub async fn add_payment(&mut self, store: &dyn Store, payment: NewPayment) -> Result<Payment> {
        let created = store
            .create_payment(payment)
            .await
            .map_err(|e| self.status.report(PAYMENT_ADD_FAILED, e))?;
        self.payments.prepend(created.clone());
        Ok(created)
    }

    pub async fn update_payment(
        &mut self,
        store: &dyn Store,
        id: Uuid,
        update: PaymentUpdate,
    ) -> Result<Payment> {
        let updated = store
            .update_payment(id, update)
            .await
            .map_err(|e| self.status.report(PAYMENT_UPDATE_FAILED, e))?;
        self.payments.replace(updated.clone());
        Ok(updated)
    }

    pub async fn delete_payment(&mut self, store: &dyn Store, id: Uuid) -> Result<()> {
        store
            .delete_payment(id)
            .await
            .map_err(|e| self.status.report(PAYMENT_DELETE_FAILED, e))?;
        self.payments.remove(id);
        Ok(())
    }
}
