use actix_web::web::{Data, ReqData};
use actix_web::HttpResponse;
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::routes::ApiError;
use crate::session::Session;

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub(crate) struct Newsletter {
    id: Uuid,
    sender: String,
    title: String,
    issue_count: i64,
    last_received_at: DateTime<Utc>,
}

#[tracing::instrument(
    name = "Listing detected newsletters",
    skip(session, db_pool),
    fields(user_id = %session.user_id)
)]
pub(crate) async fn list_newsletters(
    session: ReqData<Session>,
    db_pool: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let newsletters = fetch_newsletters(session.user_id, &db_pool)
        .await
        .context("Querying the database for the user's newsletters")?;

    Ok(HttpResponse::Ok().json(newsletters))
}

async fn fetch_newsletters(
    user_id: Uuid,
    db_pool: &PgPool,
) -> Result<Vec<Newsletter>, sqlx::Error> {
    sqlx::query_as::<_, Newsletter>(
        r#"
        SELECT id, sender, title, issue_count, last_received_at
        FROM newsletters
        WHERE user_id = $1
        ORDER BY last_received_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await
}
