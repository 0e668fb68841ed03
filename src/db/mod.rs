use async_trait::async_trait;
use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::models::matches::{MatchPatch, MatchWithTeams};

pub mod match_queries;

pub use match_queries::PgMatchStore;

#[derive(Debug, ThisError)]
pub enum MatchStoreError {
    #[error("Failed to fetch matches: {0}")]
    Fetch(#[source] sqlx::Error),

    #[error("Failed to update match: {0}")]
    Update(#[source] sqlx::Error),

    #[error("Match {0} not found")]
    NotFound(Uuid),

    #[error("Failed to decode match row: {0}")]
    Decode(String),
}

/// Read/update access to match records joined with their teams.
///
/// Updates are last-write-wins: there is no version check and no transaction
/// spanning the write and the re-read that follows it.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// All matches ordered by `(match_date, match_time)` ascending.
    async fn list_matches(&self) -> Result<Vec<MatchWithTeams>, MatchStoreError>;

    async fn get_match(&self, id: Uuid) -> Result<MatchWithTeams, MatchStoreError>;

    /// Writes the patch with a fresh `updated_at`, then returns the record as
    /// re-read from the backend.
    async fn update_match(&self, id: Uuid, patch: &MatchPatch) -> Result<MatchWithTeams, MatchStoreError>;
}
