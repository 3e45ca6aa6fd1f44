use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{HttpMessage, HttpResponse};
use actix_web_lab::middleware::Next;
use secrecy::Secret;

use crate::authentication::{SessionVerifier, VerifyError};
use crate::utils::{err500, error_chain_fmt};

/// Stateless authentication gate wrapped around every protected scope.
///
/// Extracts the bearer token, asks the identity authority to verify it and,
/// on success, attaches the resolved `Session` to the request extensions
/// before invoking the downstream handler. Every failure mode collapses to
/// the same opaque `401` so callers cannot distinguish a missing header from
/// an expired token or an unreachable authority; the actual reason is kept
/// for the logs.
pub(crate) async fn require_session(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let verifier = req
        .app_data::<Data<SessionVerifier>>()
        .cloned()
        .ok_or_else(|| err500(anyhow::anyhow!("SessionVerifier is not registered")))?;

    let outcome = match bearer_token(&req) {
        Ok(token) => verifier.verify(&token).await.map_err(GateError::from),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.call(req).await
        }
        Err(err) => {
            tracing::warn!(err.cause_chain = ?err, "Rejecting unauthenticated request");
            let response = HttpResponse::Unauthorized()
                .json(serde_json::json!({ "detail": "Invalid authentication" }));
            Err(InternalError::from_response(err, response).into())
        }
    }
}

// Pull the token out of `Authorization: Bearer <token>`. The scheme is
// case-insensitive per RFC 7235; anything else, including an empty token or
// a non-UTF8 header value, counts as a missing credential.
fn bearer_token(req: &ServiceRequest) -> Result<Secret<String>, GateError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(GateError::MissingCredential)?
        .to_str()
        .map_err(|_| GateError::MissingCredential)?;

    let (scheme, token) = header_value
        .split_once(' ')
        .ok_or(GateError::MissingCredential)?;
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return Err(GateError::MissingCredential);
    }

    Ok(Secret::new(token.to_string()))
}

#[derive(thiserror::Error)]
pub(crate) enum GateError {
    #[error("Missing or malformed `Authorization` header")]
    MissingCredential,
    #[error("The session token was rejected")]
    VerificationRejected(#[source] anyhow::Error),
    #[error("The identity authority could not be consulted")]
    VerificationUnavailable(#[source] anyhow::Error),
}

impl std::fmt::Debug for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<VerifyError> for GateError {
    fn from(err: VerifyError) -> GateError {
        match err {
            VerifyError::Rejected(source) => GateError::VerificationRejected(source),
            VerifyError::Unavailable(source) => GateError::VerificationUnavailable(source),
        }
    }
}
