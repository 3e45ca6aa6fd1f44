use actix_web::web::{Data, ReqData};
use actix_web::HttpResponse;
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::routes::ApiError;
use crate::session::Session;

// Sentinel stored in `users.credits` for accounts with no send limit.
const UNLIMITED_CREDITS: i64 = 999_999;

#[derive(Debug, sqlx::FromRow)]
struct Account {
    has_payment_method: bool,
    subscription_status: String,
    trial_ends_at: Option<DateTime<Utc>>,
    credits: i64,
}

impl Account {
    /// A user may access the product while their trial is running or their
    /// subscription is paid up, and only with a payment method on file.
    fn access_granted(&self, now: DateTime<Utc>) -> bool {
        let trial_active = self.trial_ends_at.map_or(false, |ends_at| ends_at > now);
        let paid_active = matches!(self.subscription_status.as_str(), "active" | "trialing");

        self.has_payment_method && (trial_active || paid_active)
    }
}

#[tracing::instrument(
    name = "Checking product access",
    skip(session, db_pool),
    fields(user_id = %session.user_id)
)]
pub(crate) async fn check_access(
    session: ReqData<Session>,
    db_pool: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let account = fetch_account(session.user_id, &db_pool)
        .await
        .context("Querying the database for the user's account")?;

    let body = match account {
        Some(account) => {
            serde_json::json!({ "can_access": account.access_granted(Utc::now()) })
        }
        // An authenticated identity without a local account record is not an
        // error, it just has nothing to access yet.
        None => serde_json::json!({ "can_access": false, "reason": "User not found" }),
    };

    Ok(HttpResponse::Ok().json(body))
}

#[tracing::instrument(
    name = "Checking remaining credits",
    skip(session, db_pool),
    fields(user_id = %session.user_id)
)]
pub(crate) async fn check_credits(
    session: ReqData<Session>,
    db_pool: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let account = fetch_account(session.user_id, &db_pool)
        .await
        .context("Querying the database for the user's account")?;

    let credits = account.map_or(0, |account| account.credits);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "credits": credits,
        "can_access": credits > 0,
        "unlimited": credits == UNLIMITED_CREDITS,
    })))
}

async fn fetch_account(user_id: Uuid, db_pool: &PgPool) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT has_payment_method, subscription_status, trial_ends_at, credits
        FROM users
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await
}
