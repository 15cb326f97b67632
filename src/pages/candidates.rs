use uuid::Uuid;

use crate::database::store::Store;
use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateUpdate, NewCandidate};
use crate::models::session::{NewSession, Session};
use crate::pages::load_state::PageStatus;

pub const SESSIONS_LOAD_FAILED: &str = "Erreur lors du chargement des sessions";
pub const CANDIDATES_LOAD_FAILED: &str = "Erreur lors du chargement des candidats";
pub const SESSION_CREATE_FAILED: &str = "Erreur lors de la création de la session";
pub const CANDIDATE_ADD_FAILED: &str = "Erreur lors de l'ajout du candidat";
pub const CANDIDATE_UPDATE_FAILED: &str = "Erreur lors de la mise à jour du candidat";
pub const CANDIDATE_DELETE_FAILED: &str = "Erreur lors de la suppression du candidat";

/// Session picker plus the candidate list of the selected session.
#[derive(Debug, Clone, Default)]
pub struct CandidatesPage {
    sessions: Vec<Session>,
    candidates: Vec<Candidate>,
    status: PageStatus,
}

impl CandidatesPage {
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    /// Loads the sessions, then the candidates when a session is selected.
    pub async fn mount(&mut self, store: &dyn Store, session_id: Option<Uuid>) -> Result<()> {
        self.status.begin();
        let sessions = store
            .list_sessions()
            .await
            .map_err(|e| self.status.fail(SESSIONS_LOAD_FAILED, e))?;
        self.sessions = sessions;

        if let Some(id) = session_id {
            self.fetch_candidates(store, id).await?;
        }
        self.status.finish();
        Ok(())
    }

    /// Reloads the candidate list after the selected session changed.
    /// Without a session the list is left as is.
    pub async fn load_candidates(&mut self, store: &dyn Store, session_id: Option<Uuid>) -> Result<()> {
        let Some(id) = session_id else {
            return Ok(());
        };
        self.status.begin();
        self.fetch_candidates(store, id).await?;
        self.status.finish();
        Ok(())
    }

    async fn fetch_candidates(&mut self, store: &dyn Store, session_id: Uuid) -> Result<()> {
        let candidates = store
            .list_candidates(Some(session_id))
            .await
            .map_err(|e| self.status.fail(CANDIDATES_LOAD_FAILED, e))?;
        self.candidates = candidates;
        Ok(())
    }

    /// Creates a session and puts it at the top of the picker. Selecting it
    /// is up to the caller.
    pub async fn create_session(&mut self, store: &dyn Store, session: NewSession) -> Result<Session> {
        let created = store
            .create_session(session)
            .await
            .map_err(|e| self.status.report(SESSION_CREATE_FAILED, e))?;
        self.sessions.insert(0, created.clone());
        Ok(created)
    }

    pub async fn add_candidate(&mut self, store: &dyn Store, candidate: NewCandidate) -> Result<Candidate> {
        let created = store
            .create_candidate(candidate)
            .await
            .map_err(|e| self.status.report(CANDIDATE_ADD_FAILED, e))?;
        self.candidates.insert(0, created.clone());
        Ok(created)
    }

    pub async fn update_candidate(
        &mut self,
        store: &dyn Store,
        id: Uuid,
        update: CandidateUpdate,
    ) -> Result<Candidate> {
        let updated = store
            .update_candidate(id, update)
            .await
            .map_err(|e| self.status.report(CANDIDATE_UPDATE_FAILED, e))?;
        if let Some(slot) = self.candidates.iter_mut().find(|c| c.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Deletes on the store first; the list only changes once that succeeded.
    pub async fn delete_candidate(&mut self, store: &dyn Store, id: Uuid) -> Result<()> {
        store
            .delete_candidate(id)
            .await
            .map_err(|e| self.status.report(CANDIDATE_DELETE_FAILED, e))?;
        self.candidates.retain(|c| c.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::MockStore;
    use crate::error::Error;
    use crate::pages::load_state::LoadState;
    use crate::services::aggregation::fixtures::candidate;
    use chrono::{NaiveDate, TimeZone, Utc};
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn session(name: &str) -> Session {
        Session {
            id: Uuid::new_v4(),
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn mount_loads_sessions_then_candidates() {
        let g1 = session("G1");
        let listed = vec![candidate(g1.id, "Roux"), candidate(g1.id, "Blanc")];

        let mut store = MockStore::new();
        let sessions = vec![g1.clone()];
        store
            .expect_list_sessions()
            .times(1)
            .returning(move || Ok(sessions.clone()));
        let returned = listed.clone();
        store
            .expect_list_candidates()
            .with(eq(Some(g1.id)))
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let mut page = CandidatesPage::default();
        assert_ok!(page.mount(&store, Some(g1.id)).await);
        assert_eq!(page.sessions().len(), 1);
        assert_eq!(page.candidates(), listed.as_slice());
        assert_eq!(page.status().state(), LoadState::Loaded);
        assert!(!page.status().is_loading());
    }

    #[tokio::test]
    async fn mount_without_selection_skips_candidates() {
        let mut store = MockStore::new();
        store.expect_list_sessions().returning(|| Ok(vec![]));
        store.expect_list_candidates().never();

        let mut page = CandidatesPage::default();
        assert_ok!(page.mount(&store, None).await);
        assert!(page.candidates().is_empty());
    }

    #[tokio::test]
    async fn failed_session_load_keeps_previous_list() {
        let mut store = MockStore::new();
        let first = vec![session("G1")];
        store
            .expect_list_sessions()
            .times(1)
            .returning(move || Ok(first.clone()));
        let mut page = CandidatesPage::default();
        assert_ok!(page.mount(&store, None).await);

        store.checkpoint();
        store
            .expect_list_sessions()
            .times(1)
            .returning(|| Err(Error::Store("connection reset".into())));

        let err = assert_err!(page.mount(&store, None).await);
        assert!(matches!(err, Error::Remote(ref msg) if msg == SESSIONS_LOAD_FAILED));
        assert_eq!(page.sessions().len(), 1);
        assert_eq!(page.status().error(), Some(SESSIONS_LOAD_FAILED));
        assert_eq!(page.status().state(), LoadState::Failed);
        assert!(!page.status().is_loading());
    }

    #[tokio::test]
    async fn created_session_goes_first() {
        let older = session("G1");
        let created = session("G2");

        let mut store = MockStore::new();
        let listed = vec![older.clone()];
        store.expect_list_sessions().returning(move || Ok(listed.clone()));
        let returned = created.clone();
        store
            .expect_create_session()
            .withf(|s| s.name == "G2")
            .returning(move |_| Ok(returned.clone()));

        let mut page = CandidatesPage::default();
        assert_ok!(page.mount(&store, None).await);
        let session = assert_ok!(
            page.create_session(
                &store,
                NewSession {
                    name: "G2".into(),
                    date: created.date,
                },
            )
            .await
        );
        assert_eq!(session.id, created.id);
        assert_eq!(page.sessions()[0].id, created.id);
        assert_eq!(page.sessions()[1].id, older.id);
    }

    #[tokio::test]
    async fn update_replaces_in_place_and_delete_filters() {
        let session_id = Uuid::new_v4();
        let a = candidate(session_id, "Alpha");
        let b = candidate(session_id, "Bravo");

        let mut store = MockStore::new();
        let listed = vec![a.clone(), b.clone()];
        store.expect_list_sessions().returning(|| Ok(vec![]));
        store
            .expect_list_candidates()
            .returning(move |_| Ok(listed.clone()));
        let mut renamed = b.clone();
        renamed.last_name = "Bravo-Martin".into();
        let returned = renamed.clone();
        store
            .expect_update_candidate()
            .with(eq(b.id), mockall::predicate::always())
            .returning(move |_, _| Ok(returned.clone()));
        store
            .expect_delete_candidate()
            .with(eq(a.id))
            .returning(|_| Ok(()));

        let mut page = CandidatesPage::default();
        assert_ok!(page.mount(&store, Some(session_id)).await);
        assert_ok!(
            page.update_candidate(
                &store,
                b.id,
                CandidateUpdate {
                    last_name: Some("Bravo-Martin".into()),
                    ..Default::default()
                },
            )
            .await
        );
        assert_eq!(page.candidates()[1].last_name, "Bravo-Martin");

        assert_ok!(page.delete_candidate(&store, a.id).await);
        assert_eq!(page.candidates().len(), 1);
        assert_eq!(page.candidates()[0].id, b.id);
    }

    #[tokio::test]
    async fn deleting_an_unlisted_candidate_leaves_list_unchanged() {
        let session_id = Uuid::new_v4();
        let listed = vec![candidate(session_id, "Alpha")];

        let mut store = MockStore::new();
        store.expect_list_sessions().returning(|| Ok(vec![]));
        let returned = listed.clone();
        store
            .expect_list_candidates()
            .returning(move |_| Ok(returned.clone()));
        store.expect_delete_candidate().returning(|_| Ok(()));

        let mut page = CandidatesPage::default();
        assert_ok!(page.mount(&store, Some(session_id)).await);
        assert_ok!(page.delete_candidate(&store, Uuid::new_v4()).await);
        assert_eq!(page.candidates(), listed.as_slice());
    }

    #[tokio::test]
    async fn failed_add_reports_message_and_keeps_list() {
        let session_id = Uuid::new_v4();
        let mut store = MockStore::new();
        store
            .expect_create_candidate()
            .returning(|_| Err(Error::Store("insert rejected".into())));

        let mut page = CandidatesPage::default();
        let new = NewCandidate {
            session_id,
            last_name: "Roux".into(),
            first_name: "Camille".into(),
            birth_date: NaiveDate::from_ymd_opt(2001, 7, 21).unwrap(),
            birth_place: "Marseille".into(),
            sex: Default::default(),
            cnaps_number: String::new(),
            education_level: String::new(),
            professional_situation: String::new(),
        };
        let err = assert_err!(page.add_candidate(&store, new).await);
        assert!(matches!(err, Error::Remote(ref msg) if msg == CANDIDATE_ADD_FAILED));
        assert!(page.candidates().is_empty());
        assert_eq!(page.status().error(), Some(CANDIDATE_ADD_FAILED));
    }
}
