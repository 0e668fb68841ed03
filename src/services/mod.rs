pub mod inference_service;
pub mod match_admin_service;

pub use inference_service::ResultInferenceAdapter;
pub use match_admin_service::{AdminError, AutoUpdateOutcome, MatchAdminService, MatchListFilter};
