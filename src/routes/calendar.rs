use actix_web::web::{Data, ReqData};
use actix_web::HttpResponse;
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::routes::ApiError;
use crate::session::Session;

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub(crate) struct CalendarEvent {
    id: Uuid,
    title: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    location: Option<String>,
}

#[tracing::instrument(
    name = "Listing calendar events",
    skip(session, db_pool),
    fields(user_id = %session.user_id)
)]
pub(crate) async fn list_calendar_events(
    session: ReqData<Session>,
    db_pool: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let events = fetch_events(session.user_id, &db_pool)
        .await
        .context("Querying the database for the user's calendar events")?;

    Ok(HttpResponse::Ok().json(events))
}

async fn fetch_events(user_id: Uuid, db_pool: &PgPool) -> Result<Vec<CalendarEvent>, sqlx::Error> {
    sqlx::query_as::<_, CalendarEvent>(
        r#"
        SELECT id, title, starts_at, ends_at, location
        FROM calendar_events
        WHERE user_id = $1
        ORDER BY starts_at
        "#,
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await
}
