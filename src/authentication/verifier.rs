use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::session::Session;
use crate::utils::error_chain_fmt;

/// Client for the external identity authority's session-verification
/// endpoint. Holds a pooled `reqwest::Client` with a bounded timeout, so it
/// is cheap to share and safe for concurrent use; a slow authority cannot
/// stall a request beyond the configured timeout.
#[derive(Clone)]
pub(crate) struct SessionVerifier {
    http_client: reqwest::Client,
    verify_url: Url,
    api_key: Secret<String>,
}

impl SessionVerifier {
    pub(crate) fn new(base_url: Url, api_key: Secret<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the HTTP client for the identity authority");
        let verify_url = base_url
            .join("v1/sessions/verify")
            .expect("Failed to build the session verification URL");

        Self {
            http_client,
            verify_url,
            api_key,
        }
    }

    /// Exchange a bearer token for the session it identifies. A non-success
    /// status from the authority is a rejection; a transport failure or
    /// timeout means the authority could not be consulted.
    #[tracing::instrument(name = "Verifying session token", skip(self, token))]
    pub(crate) async fn verify(&self, token: &Secret<String>) -> Result<Session, VerifyError> {
        let body = VerifyRequestBody {
            token: token.expose_secret(),
        };

        let response = self
            .http_client
            .post(self.verify_url.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| VerifyError::Unavailable(err.into()))?;

        if !response.status().is_success() {
            return Err(VerifyError::Rejected(anyhow::anyhow!(
                "the identity authority answered with {}",
                response.status()
            )));
        }

        response
            .json::<Session>()
            .await
            .map_err(|err| VerifyError::Unavailable(err.into()))
    }
}

#[derive(serde::Serialize)]
struct VerifyRequestBody<'a> {
    token: &'a str,
}

#[derive(thiserror::Error)]
pub(crate) enum VerifyError {
    #[error("The identity authority rejected the session token")]
    Rejected(#[source] anyhow::Error),
    #[error("Failed to get a verdict from the identity authority")]
    Unavailable(#[source] anyhow::Error),
}

impl std::fmt::Debug for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
