mod middleware;
mod verifier;

pub(crate) use middleware::require_session;
pub(crate) use verifier::{SessionVerifier, VerifyError};
