use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The identity record resolved by the external identity authority for one
/// verified bearer token. Request-scoped: the authentication middleware
/// inserts it into the request extensions and handlers borrow it through
/// `web::ReqData<Session>`. Never persisted locally.
#[derive(Clone, Debug, serde::Deserialize)]
pub(crate) struct Session {
    pub(crate) user_id: Uuid,
    pub(crate) expires_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) claims: serde_json::Value,
}
