use actix_web::{error, web, HttpResponse};

use crate::handlers::admin::match_handler;
use crate::models::common::ApiResponse;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .app_data(json_config())
            .app_data(query_config())
            // Fixed paths first so they are not captured by `/matches/{id}`
            .service(
                web::resource("/matches")
                    .route(web::get().to(match_handler::list_matches))
            )
            .service(
                web::resource("/matches/by-date")
                    .route(web::get().to(match_handler::list_match_days))
            )
            .service(
                web::resource("/matches/suggestion")
                    .route(web::post().to(match_handler::suggest_from_description))
            )
            .service(
                web::resource("/matches/{id}")
                    .route(web::get().to(match_handler::get_match))
                    .route(web::patch().to(match_handler::update_match))
            )
            .service(
                web::resource("/matches/{id}/suggestion")
                    .route(web::post().to(match_handler::suggest_result))
            )
            .service(
                web::resource("/matches/{id}/auto-update")
                    .route(web::post().to(match_handler::auto_update_match))
            )
    );
}

/// Malformed bodies get the same envelope as every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ApiResponse::<()>::error_with_message("Invalid request body", detail)),
        )
        .into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ApiResponse::<()>::error_with_message("Invalid query string", detail)),
        )
        .into()
    })
}
