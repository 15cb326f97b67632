use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::database::store::Store;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateUpdate, NewCandidate};
use crate::models::payment::{NewPayment, Payment, PaymentUpdate};
use crate::models::session::{NewSession, Session};

const SESSION_COLUMNS: &str = "id, name, date, created_at";
const CANDIDATE_COLUMNS: &str = "id, session_id, nom, prenom, date_naissance, lieu_naissance, sexe, \
     numero_cnaps, niveau_etudes, situation_professionnelle, created_at";
const PAYMENT_COLUMNS: &str =
    "id, candidate_id, amount, payment_type, mode, date, status, notes, created_at";

// Enum columns are plain text in the hosted schema; rows are decoded as
// strings and parsed on the way out.
#[derive(Debug, sqlx::FromRow)]
struct CandidateRow {
    id: Uuid,
    session_id: Uuid,
    nom: String,
    prenom: String,
    date_naissance: NaiveDate,
    lieu_naissance: String,
    sexe: String,
    numero_cnaps: String,
    niveau_etudes: String,
    situation_professionnelle: String,
    created_at: DateTime<Utc>,
}

impl CandidateRow {
    fn into_candidate(self) -> Result<Candidate> {
        Ok(Candidate {
            id: self.id,
            session_id: self.session_id,
            last_name: self.nom,
            first_name: self.prenom,
            birth_date: self.date_naissance,
            birth_place: self.lieu_naissance,
            sex: self.sexe.parse().map_err(Error::Store)?,
            cnaps_number: self.numero_cnaps,
            education_level: self.niveau_etudes,
            professional_situation: self.situation_professionnelle,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    candidate_id: Uuid,
    amount: Decimal,
    payment_type: String,
    mode: String,
    date: NaiveDate,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_payment(self) -> Result<Payment> {
        Ok(Payment {
            id: self.id,
            candidate_id: self.candidate_id,
            amount: self.amount,
            payment_type: self.payment_type.parse().map_err(Error::Store)?,
            mode: self.mode.parse().map_err(Error::Store)?,
            date: self.date,
            status: self.status.parse().map_err(Error::Store)?,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

/// Direct connection to the store's Postgres database.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self), fields(backend = "postgres"))]
    async fn list_sessions(&self) -> Result<Vec<Session>> {
        let sql = format!("SELECT {} FROM sessions ORDER BY date DESC", SESSION_COLUMNS);
        let sessions = sqlx::query_as::<_, Session>(&sql)
            .fetch_all(&self.pool)
            .await?;
        debug!(rows = sessions.len(), "sessions fetched");
        Ok(sessions)
    }

    #[instrument(skip(self), fields(backend = "postgres"))]
    async fn create_session(&self, session: NewSession) -> Result<Session> {
        let sql = format!(
            "INSERT INTO sessions (name, date) VALUES ($1, $2) RETURNING {}",
            SESSION_COLUMNS
        );
        let created = sqlx::query_as::<_, Session>(&sql)
            .bind(&session.name)
            .bind(session.date)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    #[instrument(skip(self), fields(backend = "postgres"))]
    async fn list_candidates(&self, session_id: Option<Uuid>) -> Result<Vec<Candidate>> {
        let sql = format!(
            "SELECT {} FROM candidates WHERE ($1::uuid IS NULL OR session_id = $1) \
             ORDER BY created_at DESC",
            CANDIDATE_COLUMNS
        );
        let rows = sqlx::query_as::<_, CandidateRow>(&sql)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await?;
        debug!(rows = rows.len(), "candidates fetched");
        rows.into_iter().map(CandidateRow::into_candidate).collect()
    }

    #[instrument(skip(self, candidate), fields(backend = "postgres"))]
    async fn create_candidate(&self, candidate: NewCandidate) -> Result<Candidate> {
        let sql = format!(
            r#"
            INSERT INTO candidates (
                session_id, nom, prenom, date_naissance, lieu_naissance, sexe,
                numero_cnaps, niveau_etudes, situation_professionnelle
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        );
        let row = sqlx::query_as::<_, CandidateRow>(&sql)
            .bind(candidate.session_id)
            .bind(&candidate.last_name)
            .bind(&candidate.first_name)
            .bind(candidate.birth_date)
            .bind(&candidate.birth_place)
            .bind(candidate.sex.as_str())
            .bind(&candidate.cnaps_number)
            .bind(&candidate.education_level)
            .bind(&candidate.professional_situation)
            .fetch_one(&self.pool)
            .await?;
        row.into_candidate()
    }

    #[instrument(skip(self, update), fields(backend = "postgres"))]
    async fn update_candidate(&self, id: Uuid, update: CandidateUpdate) -> Result<Candidate> {
        let sql = format!(
            r#"
            UPDATE candidates
            SET
                session_id = COALESCE($2, session_id),
                nom = COALESCE($3, nom),
                prenom = COALESCE($4, prenom),
                date_naissance = COALESCE($5, date_naissance),
                lieu_naissance = COALESCE($6, lieu_naissance),
                sexe = COALESCE($7, sexe),
                numero_cnaps = COALESCE($8, numero_cnaps),
                niveau_etudes = COALESCE($9, niveau_etudes),
                situation_professionnelle = COALESCE($10, situation_professionnelle)
            WHERE id = $1
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        );
        let row = sqlx::query_as::<_, CandidateRow>(&sql)
            .bind(id)
            .bind(update.session_id)
            .bind(update.last_name)
            .bind(update.first_name)
            .bind(update.birth_date)
            .bind(update.birth_place)
            .bind(update.sex.map(|s| s.as_str()))
            .bind(update.cnaps_number)
            .bind(update.education_level)
            .bind(update.professional_situation)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Store(format!("update of candidates matched no row for id {}", id)))?;
        row.into_candidate()
    }

    #[instrument(skip(self), fields(backend = "postgres"))]
    async fn delete_candidate(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "postgres"))]
    async fn list_payments(&self, candidate_id: Option<Uuid>) -> Result<Vec<Payment>> {
        let sql = format!(
            "SELECT {} FROM payments WHERE ($1::uuid IS NULL OR candidate_id = $1) \
             ORDER BY date DESC",
            PAYMENT_COLUMNS
        );
        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(candidate_id)
            .fetch_all(&self.pool)
            .await?;
        debug!(rows = rows.len(), "payments fetched");
        rows.into_iter().map(PaymentRow::into_payment).collect()
    }

    #[instrument(skip(self, payment), fields(backend = "postgres"))]
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment> {
        let sql = format!(
            r#"
            INSERT INTO payments (candidate_id, amount, payment_type, mode, date, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PAYMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(payment.candidate_id)
            .bind(payment.amount)
            .bind(payment.payment_type.as_str())
            .bind(payment.mode.as_str())
            .bind(payment.date)
            .bind(payment.status.as_str())
            .bind(&payment.notes)
            .fetch_one(&self.pool)
            .await?;
        row.into_payment()
    }

    #[instrument(skip(self, update), fields(backend = "postgres"))]
    async fn update_payment(&self, id: Uuid, update: PaymentUpdate) -> Result<Payment> {
        let sql = format!(
            r#"
            UPDATE payments
            SET
                amount = COALESCE($2, amount),
                payment_type = COALESCE($3, payment_type),
                mode = COALESCE($4, mode),
                date = COALESCE($5, date),
                status = COALESCE($6, status),
                notes = CASE WHEN $7 THEN $8 ELSE notes END
            WHERE id = $1
            RETURNING {}
            "#,
            PAYMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(id)
            .bind(update.amount)
            .bind(update.payment_type.map(|t| t.as_str()))
            .bind(update.mode.map(|m| m.as_str()))
            .bind(update.date)
            .bind(update.status.map(|s| s.as_str()))
            .bind(update.notes.is_some())
            .bind(update.notes.flatten())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Store(format!("update of payments matched no row for id {}", id)))?;
        row.into_payment()
    }

    #[instrument(skip(self), fields(backend = "postgres"))]
    async fn delete_payment(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
