use actix_web::web::{Data, ReqData};
use actix_web::HttpResponse;
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::routes::ApiError;
use crate::session::Session;

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub(crate) struct EventCount {
    event_type: String,
    count: i64,
}

/// Per-user readout of recorded email events (opens, clicks, sends), grouped
/// by type. The heavy lifting happens wherever the events are written; this
/// endpoint only reports.
#[tracing::instrument(
    name = "Summarizing email events",
    skip(session, db_pool),
    fields(user_id = %session.user_id)
)]
pub(crate) async fn analytics_summary(
    session: ReqData<Session>,
    db_pool: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let events = fetch_event_counts(session.user_id, &db_pool)
        .await
        .context("Querying the database for the user's email events")?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "events": events })))
}

async fn fetch_event_counts(
    user_id: Uuid,
    db_pool: &PgPool,
) -> Result<Vec<EventCount>, sqlx::Error> {
    sqlx::query_as::<_, EventCount>(
        r#"
        SELECT event_type, COUNT(*) AS count
        FROM email_events
        WHERE user_id = $1
        GROUP BY event_type
        ORDER BY event_type
        "#,
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await
}
