use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::store::Store;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateUpdate, NewCandidate};
use crate::models::payment::{NewPayment, Payment, PaymentUpdate};
use crate::models::session::{NewSession, Session};
use crate::utils::time::now;

#[derive(Debug, Default)]
struct Tables {
    sessions: Vec<Session>,
    candidates: Vec<Candidate>,
    payments: Vec<Payment>,
}

/// In-process store with the hosted store's ordering, filtering and
/// foreign-key behaviour. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> Result<T>) -> Result<T> {
        let guard = self
            .tables
            .read()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut guard = self
            .tables
            .write()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;
        f(&mut guard)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.read(|t| {
            let mut sessions = t.sessions.clone();
            sessions.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(sessions)
        })
    }

    async fn create_session(&self, session: NewSession) -> Result<Session> {
        self.write(|t| {
            let created = Session {
                id: Uuid::new_v4(),
                name: session.name,
                date: session.date,
                created_at: now(),
            };
            t.sessions.push(created.clone());
            Ok(created)
        })
    }

    async fn list_candidates(&self, session_id: Option<Uuid>) -> Result<Vec<Candidate>> {
        self.read(|t| {
            let mut candidates: Vec<Candidate> = t
                .candidates
                .iter()
                .filter(|c| session_id.map_or(true, |id| c.session_id == id))
                .cloned()
                .collect();
            candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(candidates)
        })
    }

    async fn create_candidate(&self, candidate: NewCandidate) -> Result<Candidate> {
        self.write(|t| {
            if !t.sessions.iter().any(|s| s.id == candidate.session_id) {
                return Err(Error::Store(format!(
                    "foreign key violation: session {} does not exist",
                    candidate.session_id
                )));
            }
            let created = Candidate {
                id: Uuid::new_v4(),
                session_id: candidate.session_id,
                last_name: candidate.last_name,
                first_name: candidate.first_name,
                birth_date: candidate.birth_date,
                birth_place: candidate.birth_place,
                sex: candidate.sex,
                cnaps_number: candidate.cnaps_number,
                education_level: candidate.education_level,
                professional_situation: candidate.professional_situation,
                created_at: now(),
            };
            t.candidates.push(created.clone());
            Ok(created)
        })
    }

    async fn update_candidate(&self, id: Uuid, update: CandidateUpdate) -> Result<Candidate> {
        self.write(|t| {
            if let Some(session_id) = update.session_id {
                if !t.sessions.iter().any(|s| s.id == session_id) {
                    return Err(Error::Store(format!(
                        "foreign key violation: session {} does not exist",
                        session_id
                    )));
                }
            }
            let candidate = t
                .candidates
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| {
                    Error::Store(format!("update of candidates matched no row for id {}", id))
                })?;
            candidate.apply(&update);
            Ok(candidate.clone())
        })
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<()> {
        self.write(|t| {
            t.candidates.retain(|c| c.id != id);
            t.payments.retain(|p| p.candidate_id != id);
            Ok(())
        })
    }

    async fn list_payments(&self, candidate_id: Option<Uuid>) -> Result<Vec<Payment>> {
        self.read(|t| {
            let mut payments: Vec<Payment> = t
                .payments
                .iter()
                .filter(|p| candidate_id.map_or(true, |id| p.candidate_id == id))
                .cloned()
                .collect();
            payments.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(payments)
        })
    }

    async fn create_payment(&self, payment: NewPayment) -> Result<Payment> {
        self.write(|t| {
            if !t.candidates.iter().any(|c| c.id == payment.candidate_id) {
                return Err(Error::Store(format!(
                    "foreign key violation: candidate {} does not exist",
                    payment.candidate_id
                )));
            }
            if payment.amount.is_sign_negative() {
                return Err(Error::Store("check violation: amount must be >= 0".to_string()));
            }
            let created = Payment {
                id: Uuid::new_v4(),
                candidate_id: payment.candidate_id,
                amount: payment.amount,
                payment_type: payment.payment_type,
                mode: payment.mode,
                date: payment.date,
                status: payment.status,
                notes: payment.notes,
                created_at: now(),
            };
            t.payments.push(created.clone());
            Ok(created)
        })
    }

    async fn update_payment(&self, id: Uuid, update: PaymentUpdate) -> Result<Payment> {
        self.write(|t| {
            let payment = t
                .payments
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| {
                    Error::Store(format!("update of payments matched no row for id {}", id))
                })?;
            payment.apply(&update);
            Ok(payment.clone())
        })
    }

    async fn delete_payment(&self, id: Uuid) -> Result<()> {
        self.write(|t| {
            t.payments.retain(|p| p.id != id);
            Ok(())
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
