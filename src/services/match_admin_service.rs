use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::db::{MatchStore, MatchStoreError};
use crate::models::inference::{ConfigurationError, InferredResult};
use crate::models::matches::{
    group_by_date, MatchDay, MatchPatch, MatchPatchForm, MatchStatus, MatchWithTeams, ValidationError,
};
use crate::services::inference_service::ResultInferenceAdapter;

/// Errors an operator gets to see. Inference failures are not among them,
/// they collapse into "no suggestion".
#[derive(Debug, ThisError)]
pub enum AdminError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Store(#[from] MatchStoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct MatchListFilter {
    #[serde(default = "include_finished_by_default")]
    pub include_finished: bool,
}

impl Default for MatchListFilter {
    fn default() -> Self {
        Self { include_finished: include_finished_by_default() }
    }
}

fn include_finished_by_default() -> bool {
    true
}

#[derive(Debug)]
pub enum AutoUpdateOutcome {
    /// The inferred result was written; carries the re-fetched record.
    Updated(MatchWithTeams),
    /// Nothing usable came back from the model, nothing was written.
    NoSuggestion,
}

/// Admin use cases on top of an injected match store and inference adapter.
pub struct MatchAdminService {
    store: Arc<dyn MatchStore>,
    inference: ResultInferenceAdapter,
}

impl MatchAdminService {
    pub fn new(store: Arc<dyn MatchStore>, inference: ResultInferenceAdapter) -> Self {
        Self { store, inference }
    }

    pub async fn list_matches(&self, filter: MatchListFilter) -> Result<Vec<MatchWithTeams>, AdminError> {
        let mut matches = self.store.list_matches().await?;
        if !filter.include_finished {
            matches.retain(|record| record.fixture.status != MatchStatus::Finished);
        }
        Ok(matches)
    }

    pub async fn list_match_days(&self, filter: MatchListFilter) -> Result<Vec<MatchDay>, AdminError> {
        Ok(group_by_date(self.list_matches(filter).await?))
    }

    pub async fn get_match(&self, id: Uuid) -> Result<MatchWithTeams, AdminError> {
        Ok(self.store.get_match(id).await?)
    }

    /// Validates the operator's form before anything reaches the store.
    pub async fn update_match(&self, id: Uuid, form: &MatchPatchForm) -> Result<MatchWithTeams, AdminError> {
        let patch = form.normalize()?;
        self.apply_patch(id, patch).await
    }

    async fn apply_patch(&self, id: Uuid, patch: MatchPatch) -> Result<MatchWithTeams, AdminError> {
        tracing::info!("Applying patch to match {}: {:?}", id, patch);
        let updated = self.store.update_match(id, &patch).await.map_err(|e| {
            tracing::error!("❌ Update of match {} failed: {}", id, e);
            e
        })?;
        Ok(updated)
    }

    /// Suggest a result for a stored match. Nothing is persisted.
    pub async fn suggest_result(&self, id: Uuid) -> Result<Option<InferredResult>, AdminError> {
        self.inference.ensure_configured()?;
        let record = self.store.get_match(id).await?;
        Ok(self.inference.infer(&describe_match(&record)).await?)
    }

    pub async fn suggest_from_description(&self, description: &str) -> Result<Option<InferredResult>, AdminError> {
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
        Ok(self.inference.infer(description).await?)
    }

    /// Infer a result for a stored match and persist it through the same path
    /// as a manual edit.
    pub async fn auto_update(&self, id: Uuid) -> Result<AutoUpdateOutcome, AdminError> {
        self.inference.ensure_configured()?;
        let record = self.store.get_match(id).await?;
        let description = describe_match(&record);

        match self.inference.infer(&description).await? {
            Some(result) => {
                let updated = self.apply_patch(id, MatchPatch::from(result)).await?;
                Ok(AutoUpdateOutcome::Updated(updated))
            }
            None => {
                tracing::info!("No suggestion for match {}, leaving it unchanged", id);
                Ok(AutoUpdateOutcome::NoSuggestion)
            }
        }
    }
}

/// `"{home} vs {away} - {date} {time}"`, the description sent for inference.
pub fn describe_match(record: &MatchWithTeams) -> String {
    format!(
        "{} vs {} - {} {}",
        record.home_team.name, record.away_team.name, record.fixture.match_date, record.fixture.match_time
    )
}
