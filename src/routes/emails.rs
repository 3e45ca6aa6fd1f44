use actix_web::web::{Data, ReqData};
use actix_web::HttpResponse;
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::routes::ApiError;
use crate::session::Session;

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub(crate) struct EmailRecord {
    id: Uuid,
    sender: String,
    subject: String,
    snippet: String,
    received_at: DateTime<Utc>,
    is_read: bool,
}

#[tracing::instrument(
    name = "Listing inbox emails",
    skip(session, db_pool),
    fields(user_id = %session.user_id)
)]
pub(crate) async fn list_emails(
    session: ReqData<Session>,
    db_pool: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let emails = fetch_emails(session.user_id, &db_pool)
        .await
        .context("Querying the database for the user's inbox")?;

    Ok(HttpResponse::Ok().json(emails))
}

async fn fetch_emails(user_id: Uuid, db_pool: &PgPool) -> Result<Vec<EmailRecord>, sqlx::Error> {
    sqlx::query_as::<_, EmailRecord>(
        r#"
        SELECT id, sender, subject, snippet, received_at, is_read
        FROM emails
        WHERE user_id = $1
        ORDER BY received_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await
}
