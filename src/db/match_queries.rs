use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{MatchStore, MatchStoreError};
use crate::models::matches::{Match, MatchPatch, MatchStatus, MatchWithTeams, Team};

const SELECT_MATCH_WITH_TEAMS: &str = r#"
    SELECT
        m.id,
        m.group_id,
        m.home_team_id,
        m.away_team_id,
        m.match_date,
        m.match_time,
        m.status,
        m.home_score,
        m.away_score,
        m.created_at,
        m.updated_at,
        home_team.name AS home_team_name,
        home_team.country AS home_team_country,
        home_team.logo_url AS home_team_logo_url,
        away_team.name AS away_team_name,
        away_team.country AS away_team_country,
        away_team.logo_url AS away_team_logo_url
    FROM matches m
    JOIN teams home_team ON home_team.id = m.home_team_id
    JOIN teams away_team ON away_team.id = m.away_team_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct MatchRow {
    id: Uuid,
    group_id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    match_date: NaiveDate,
    match_time: NaiveTime,
    status: String,
    home_score: Option<i32>,
    away_score: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    home_team_name: String,
    home_team_country: String,
    home_team_logo_url: Option<String>,
    away_team_name: String,
    away_team_country: String,
    away_team_logo_url: Option<String>,
}

impl TryFrom<MatchRow> for MatchWithTeams {
    type Error = MatchStoreError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let status = MatchStatus::try_from(row.status.as_str())
            .map_err(|e| MatchStoreError::Decode(format!("match {}: {}", row.id, e)))?;

        Ok(MatchWithTeams {
            fixture: Match {
                id: row.id,
                group_id: row.group_id,
                home_team_id: row.home_team_id,
                away_team_id: row.away_team_id,
                match_date: row.match_date,
                match_time: row.match_time,
                status,
                home_score: row.home_score,
                away_score: row.away_score,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            home_team: Team {
                id: row.home_team_id,
                name: row.home_team_name,
                country: row.home_team_country,
                logo_url: row.home_team_logo_url,
            },
            away_team: Team {
                id: row.away_team_id,
                name: row.away_team_name,
                country: row.away_team_country,
                logo_url: row.away_team_logo_url,
            },
        })
    }
}

/// Postgres-backed match repository.
#[derive(Debug, Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    #[tracing::instrument(name = "List matches", skip(self))]
    async fn list_matches(&self) -> Result<Vec<MatchWithTeams>, MatchStoreError> {
        let sql = format!("{} ORDER BY m.match_date ASC, m.match_time ASC", SELECT_MATCH_WITH_TEAMS);

        let rows = sqlx::query_as::<_, MatchRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(MatchStoreError::Fetch)?;

        debug!("Fetched {} matches", rows.len());

        rows.into_iter().map(MatchWithTeams::try_from).collect()
    }

    #[tracing::instrument(name = "Get match", skip(self))]
    async fn get_match(&self, id: Uuid) -> Result<MatchWithTeams, MatchStoreError> {
        let sql = format!("{} WHERE m.id = $1", SELECT_MATCH_WITH_TEAMS);

        let row = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(MatchStoreError::Fetch)?
            .ok_or(MatchStoreError::NotFound(id))?;

        MatchWithTeams::try_from(row)
    }

    #[tracing::instrument(name = "Update match", skip(self))]
    async fn update_match(&self, id: Uuid, patch: &MatchPatch) -> Result<MatchWithTeams, MatchStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE matches
            SET
                home_score = $1,
                away_score = $2,
                status = $3,
                updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(patch.home_score)
        .bind(patch.away_score)
        .bind(patch.status.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(MatchStoreError::Update)?;

        if result.rows_affected() == 0 {
            return Err(MatchStoreError::NotFound(id));
        }

        info!("Updated match {} to {} ({:?} x {:?})", id, patch.status, patch.home_score, patch.away_score);

        // The write result is not returned; callers get the joined record as stored.
        self.get_match(id).await
    }
}
