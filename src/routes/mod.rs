mod analytics;
mod calendar;
mod emails;
mod health_check;
mod home;
mod newsletters;
mod session;
mod users;

pub(crate) use analytics::analytics_summary;
pub(crate) use calendar::list_calendar_events;
pub(crate) use emails::list_emails;
pub(crate) use health_check::health_check;
pub(crate) use home::home;
pub(crate) use newsletters::list_newsletters;
pub(crate) use session::current_session;
pub(crate) use users::{check_access, check_credits};

use actix_web::http::StatusCode;
use actix_web::ResponseError;

use crate::utils::error_chain_fmt;

// Shared error type for the thin read-only endpoints: everything that can go
// wrong in them is a database failure the caller gets an opaque 500 for.
#[derive(thiserror::Error)]
pub(crate) enum ApiError {
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
