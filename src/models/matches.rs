use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Status of a single fixture. Any transition between the three values is
/// allowed, a finished match can be re-opened.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 3] = [MatchStatus::Upcoming, MatchStatus::Live, MatchStatus::Finished];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
        }
    }
}

impl TryFrom<&str> for MatchStatus {
    type Error = ValidationError;

    /// Exact match only: no trimming, no case folding.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        MatchStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

impl Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: Uuid,
    pub group_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A match joined with both of its teams. Serializes flat, with the teams
/// nested under `home_team` and `away_team`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MatchWithTeams {
    #[serde(flatten)]
    pub fixture: Match,
    pub home_team: Team,
    pub away_team: Team,
}

impl MatchWithTeams {
    pub fn id(&self) -> Uuid {
        self.fixture.id
    }

    pub fn schedule_key(&self) -> (NaiveDate, NaiveTime) {
        (self.fixture.match_date, self.fixture.match_time)
    }
}

/// Validated partial update. `None` means no score recorded, which is not the
/// same as a score of zero.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MatchPatch {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: MatchStatus,
}

/// A score as typed by an operator: either a JSON number or the raw text of a
/// form field.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScoreInput {
    Number(serde_json::Number),
    Text(String),
}

/// Raw patch body as submitted by the admin UI.
#[derive(Debug, Deserialize, Clone)]
pub struct MatchPatchForm {
    #[serde(default)]
    pub home_score: Option<ScoreInput>,
    #[serde(default)]
    pub away_score: Option<ScoreInput>,
    pub status: String,
}

impl MatchPatchForm {
    pub fn normalize(&self) -> Result<MatchPatch, ValidationError> {
        Ok(MatchPatch {
            home_score: normalize_score("home_score", self.home_score.as_ref())?,
            away_score: normalize_score("away_score", self.away_score.as_ref())?,
            status: MatchStatus::try_from(self.status.as_str())?,
        })
    }
}

/// Blank input becomes `None`; only non-negative whole numbers that fit an
/// `i32` are accepted.
pub fn normalize_score(field: &'static str, input: Option<&ScoreInput>) -> Result<Option<i32>, ValidationError> {
    let invalid = |value: String| ValidationError::InvalidScore { field, value };

    match input {
        None => Ok(None),
        Some(ScoreInput::Number(number)) => number
            .as_u64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(number.to_string())),
        Some(ScoreInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(text.clone()));
            }
            trimmed
                .parse::<i32>()
                .map(Some)
                .map_err(|_| invalid(text.clone()))
        }
    }
}

/// All listed matches sharing one calendar date.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MatchDay {
    pub match_date: NaiveDate,
    pub matches: Vec<MatchWithTeams>,
}

/// Groups matches by date, days ascending, keeping the incoming order within a day.
pub fn group_by_date(matches: Vec<MatchWithTeams>) -> Vec<MatchDay> {
    let mut days: BTreeMap<NaiveDate, Vec<MatchWithTeams>> = BTreeMap::new();
    for record in matches {
        days.entry(record.fixture.match_date).or_default().push(record);
    }

    days.into_iter()
        .map(|(match_date, matches)| MatchDay { match_date, matches })
        .collect()
}

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {value:?} is not a non-negative whole number")]
    InvalidScore { field: &'static str, value: String },

    #[error("Invalid status {0:?}: expected one of upcoming, live, finished")]
    InvalidStatus(String),

    #[error("Match description must not be empty")]
    EmptyDescription,
}
