//! The data access contract every backend implements.
//!
//! Each method is exactly one round trip to the store. Failures come back
//! as [`Error::Store`](crate::error::Error::Store) with no retry and no
//! partial result; the caller decides what to show and keeps its previous
//! state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateUpdate, NewCandidate};
use crate::models::payment::{NewPayment, Payment, PaymentUpdate};
use crate::models::session::{NewSession, Session};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// All sessions, most recent date first.
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    async fn create_session(&self, session: NewSession) -> Result<Session>;

    /// Candidates of one session, or of every session when `session_id` is
    /// `None`. Newest first.
    async fn list_candidates(&self, session_id: Option<Uuid>) -> Result<Vec<Candidate>>;

    async fn create_candidate(&self, candidate: NewCandidate) -> Result<Candidate>;

    async fn update_candidate(&self, id: Uuid, update: CandidateUpdate) -> Result<Candidate>;

    async fn delete_candidate(&self, id: Uuid) -> Result<()>;

    /// Payments of one candidate, or all payments. Most recent date first.
    async fn list_payments(&self, candidate_id: Option<Uuid>) -> Result<Vec<Payment>>;

    async fn create_payment(&self, payment: NewPayment) -> Result<Payment>;

    async fn update_payment(&self, id: Uuid, update: PaymentUpdate) -> Result<Payment>;

    async fn delete_payment(&self, id: Uuid) -> Result<()>;

    /// Short name used in logs.
    fn backend_name(&self) -> &'static str;
}
