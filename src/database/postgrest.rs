use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::database::store::Store;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateUpdate, NewCandidate};
use crate::models::payment::{NewPayment, Payment, PaymentUpdate};
use crate::models::session::{NewSession, Session};

const SESSIONS: &str = "sessions";
const CANDIDATES: &str = "candidates";
const PAYMENTS: &str = "payments";

/// Client for the hosted store's REST interface (PostgREST dialect).
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: Url,
}

impl PostgrestStore {
    pub fn new(base_url: &Url, api_key: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| Error::Config(format!("Invalid SUPABASE_ANON_KEY: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| Error::Config(format!("Invalid SUPABASE_ANON_KEY: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build store client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.clone(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        table_url(&self.base_url, table)
    }

    #[instrument(skip(self), fields(backend = "postgrest"))]
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        order: &str,
        filter: Option<(&str, Uuid)>,
    ) -> Result<Vec<T>> {
        let url = self.table_url(table)?;
        let response = self
            .client
            .get(url)
            .query(&list_params(order, filter))
            .send()
            .await?;
        let rows = ensure_success(response).await?.json::<Vec<T>>().await?;
        debug!(rows = rows.len(), "select completed");
        Ok(rows)
    }

    #[instrument(skip(self, body), fields(backend = "postgrest"))]
    async fn insert<B, T>(&self, table: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.table_url(table)?;
        let response = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(&[body])
            .send()
            .await?;
        let rows = ensure_success(response).await?.json::<Vec<T>>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::Store(format!("insert into {} returned no row", table)))
    }

    #[instrument(skip(self, body), fields(backend = "postgrest"))]
    async fn patch<B, T>(&self, table: &str, id: Uuid, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.table_url(table)?;
        let response = self
            .client
            .patch(url)
            .query(&[id_filter(id)])
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let rows = ensure_success(response).await?.json::<Vec<T>>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::Store(format!("update of {} matched no row for id {}", table, id)))
    }

    #[instrument(skip(self), fields(backend = "postgrest"))]
    async fn remove(&self, table: &str, id: Uuid) -> Result<()> {
        let url = self.table_url(table)?;
        let response = self.client.delete(url).query(&[id_filter(id)]).send().await?;
        ensure_success(response).await?;
        debug!("delete completed");
        Ok(())
    }
}

fn table_url(base_url: &Url, table: &str) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("SUPABASE_URL cannot be a base: {}", base_url)))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);
    Ok(url)
}

fn list_params(order: &str, filter: Option<(&str, Uuid)>) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), "*".to_string()),
        ("order".to_string(), format!("{}.desc", order)),
    ];
    if let Some((column, id)) = filter {
        params.push((column.to_string(), format!("eq.{}", id)));
    }
    params
}

fn id_filter(id: Uuid) -> (String, String) {
    ("id".to_string(), format!("eq.{}", id))
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Store(format!("store responded {}: {}", status, body)))
}

#[async_trait]
impl Store for PostgrestStore {
    async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.select(SESSIONS, "date", None).await
    }

    async fn create_session(&self, session: NewSession) -> Result<Session> {
        self.insert(SESSIONS, &session).await
    }

    async fn list_candidates(&self, session_id: Option<Uuid>) -> Result<Vec<Candidate>> {
        self.select(
            CANDIDATES,
            "created_at",
            session_id.map(|id| ("session_id", id)),
        )
        .await
    }

    async fn create_candidate(&self, candidate: NewCandidate) -> Result<Candidate> {
        self.insert(CANDIDATES, &candidate).await
    }

    async fn update_candidate(&self, id: Uuid, update: CandidateUpdate) -> Result<Candidate> {
        self.patch(CANDIDATES, id, &update).await
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<()> {
        self.remove(CANDIDATES, id).await
    }

    async fn list_payments(&self, candidate_id: Option<Uuid>) -> Result<Vec<Payment>> {
        self.select(PAYMENTS, "date", candidate_id.map(|id| ("candidate_id", id)))
            .await
    }

    async fn create_payment(&self, payment: NewPayment) -> Result<Payment> {
        self.insert(PAYMENTS, &payment).await
    }

    async fn update_payment(&self, id: Uuid, update: PaymentUpdate) -> Result<Payment> {
        self.patch(PAYMENTS, id, &update).await
    }

    async fn delete_payment(&self, id: Uuid) -> Result<()> {
        self.remove(PAYMENTS, id).await
    }

    fn backend_name(&self) -> &'static str {
        "postgrest"
    }
}
