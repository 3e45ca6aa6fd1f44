use actix_web::web::ReqData;
use actix_web::HttpResponse;

use crate::session::Session;

/// Echo the identity the gate resolved for this request. Useful for clients
/// probing whether their token is still good.
pub(crate) async fn current_session(session: ReqData<Session>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "user_id": session.user_id,
        "expires_at": session.expires_at,
        "claims": &session.claims,
    }))
}
