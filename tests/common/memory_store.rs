use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use scoreboard_admin::db::{MatchStore, MatchStoreError};
use scoreboard_admin::models::matches::{MatchPatch, MatchWithTeams};

/// Match store double holding its rows in memory, with switches to make
/// fetches or updates fail the way a dropped backend connection would.
#[derive(Default)]
pub struct InMemoryMatchStore {
    records: Mutex<Vec<MatchWithTeams>>,
    fail_fetches: AtomicBool,
    fail_updates: AtomicBool,
    update_calls: AtomicUsize,
}

impl InMemoryMatchStore {
    pub fn new(records: Vec<MatchWithTeams>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Current stored row, bypassing the failure switches.
    pub fn stored(&self, id: Uuid) -> Option<MatchWithTeams> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    fn connection_reset() -> sqlx::Error {
        sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ))
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn list_matches(&self) -> Result<Vec<MatchWithTeams>, MatchStoreError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(MatchStoreError::Fetch(Self::connection_reset()));
        }
        let mut records = self.records.lock().unwrap().clone();
        // Stable sort: ties keep insertion order, no secondary key
        records.sort_by_key(|record| record.schedule_key());
        Ok(records)
    }

    async fn get_match(&self, id: Uuid) -> Result<MatchWithTeams, MatchStoreError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(MatchStoreError::Fetch(Self::connection_reset()));
        }
        self.stored(id).ok_or(MatchStoreError::NotFound(id))
    }

    async fn update_match(&self, id: Uuid, patch: &MatchPatch) -> Result<MatchWithTeams, MatchStoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(MatchStoreError::Update(Self::connection_reset()));
        }

        {
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or(MatchStoreError::NotFound(id))?;
            record.fixture.home_score = patch.home_score;
            record.fixture.away_score = patch.away_score;
            record.fixture.status = patch.status;
            record.fixture.updated_at = Utc::now();
        }

        self.get_match(id).await
    }
}
