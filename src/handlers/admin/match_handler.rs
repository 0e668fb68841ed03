use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::MatchStoreError;
use crate::models::common::ApiResponse;
use crate::models::matches::MatchPatchForm;
use crate::services::{AdminError, AutoUpdateOutcome, MatchAdminService, MatchListFilter};

pub const NO_SUGGESTION_MESSAGE: &str = "No suggestion available, enter the result manually";

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub description: String,
}

impl ResponseError for AdminError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            AdminError::Store(MatchStoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AdminError::Store(_) => StatusCode::BAD_GATEWAY,
            AdminError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AdminError::Validation(_) => "Invalid match data",
            AdminError::Store(MatchStoreError::NotFound(_)) => "Match not found",
            AdminError::Store(MatchStoreError::Update(_)) => "Could not update the match",
            AdminError::Store(_) => "Could not load matches",
            AdminError::Configuration(_) => "Configuration error",
        };

        HttpResponse::build(self.status_code())
            .json(ApiResponse::<()>::error_with_message(message, self.to_string()))
    }
}

/// GET /admin/matches - All matches ordered by date and time
pub async fn list_matches(
    service: web::Data<MatchAdminService>,
    query: web::Query<MatchListFilter>,
) -> Result<HttpResponse, AdminError> {
    let matches = service.list_matches(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} matches", matches.len()),
        matches,
    )))
}

/// GET /admin/matches/by-date - Matches grouped into match days
pub async fn list_match_days(
    service: web::Data<MatchAdminService>,
    query: web::Query<MatchListFilter>,
) -> Result<HttpResponse, AdminError> {
    let days = service.list_match_days(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} match days", days.len()),
        days,
    )))
}

// GET /admin/matches/{id}
pub async fn get_match(
    service: web::Data<MatchAdminService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AdminError> {
    let record = service.get_match(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match retrieved", record)))
}

/// PATCH /admin/matches/{id} - Apply an operator edit
///
/// Returns the record as re-read after the write.
pub async fn update_match(
    service: web::Data<MatchAdminService>,
    path: web::Path<Uuid>,
    body: web::Json<MatchPatchForm>,
) -> Result<HttpResponse, AdminError> {
    let record = service.update_match(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match updated successfully", record)))
}

/// POST /admin/matches/{id}/suggestion - Inferred result for a stored match, not persisted
pub async fn suggest_result(
    service: web::Data<MatchAdminService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AdminError> {
    Ok(match service.suggest_result(path.into_inner()).await? {
        Some(result) => HttpResponse::Ok().json(ApiResponse::success("Suggestion available", result)),
        None => HttpResponse::Ok().json(ApiResponse::<()>::success_message(NO_SUGGESTION_MESSAGE)),
    })
}

/// POST /admin/matches/suggestion - Inferred result for free text
pub async fn suggest_from_description(
    service: web::Data<MatchAdminService>,
    body: web::Json<SuggestionRequest>,
) -> Result<HttpResponse, AdminError> {
    Ok(match service.suggest_from_description(&body.description).await? {
        Some(result) => HttpResponse::Ok().json(ApiResponse::success("Suggestion available", result)),
        None => HttpResponse::Ok().json(ApiResponse::<()>::success_message(NO_SUGGESTION_MESSAGE)),
    })
}

/// POST /admin/matches/{id}/auto-update - Infer and persist in one go
pub async fn auto_update_match(
    service: web::Data<MatchAdminService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AdminError> {
    Ok(match service.auto_update(path.into_inner()).await? {
        AutoUpdateOutcome::Updated(record) => {
            HttpResponse::Ok().json(ApiResponse::success("Match updated automatically", record))
        }
        AutoUpdateOutcome::NoSuggestion => {
            HttpResponse::Ok().json(ApiResponse::<()>::success_message(NO_SUGGESTION_MESSAGE))
        }
    })
}
