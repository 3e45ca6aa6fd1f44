use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::helpers::{mount_session, seed_user, spawn_app};

async fn seed_email(db_pool: &PgPool, user_id: Uuid, subject: &str, age: Duration) {
    sqlx::query(
        "INSERT INTO emails (id, user_id, sender, subject, snippet, received_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind("sender@example.com")
    .bind(subject)
    .bind("...")
    .bind(Utc::now() - age)
    .execute(db_pool)
    .await
    .expect("Failed to seed an email");
}

#[tokio::test]
async fn the_inbox_lists_only_the_callers_emails_newest_first() {
    let test_app = spawn_app().await;
    let token = Uuid::new_v4().to_string();
    let user_id = Uuid::new_v4();
    mount_session(&test_app, &token, user_id).await;
    seed_user(&test_app.db_pool, user_id).await;

    seed_email(&test_app.db_pool, user_id, "Older", Duration::hours(2)).await;
    seed_email(&test_app.db_pool, user_id, "Newer", Duration::hours(1)).await;

    // Another account's mail must never show up.
    let other_user = Uuid::new_v4();
    seed_user(&test_app.db_pool, other_user).await;
    seed_email(&test_app.db_pool, other_user, "Not yours", Duration::hours(1)).await;

    let response = test_app
        .get("/api/emails")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    let inbox = body.as_array().expect("The inbox should be an array");
    assert_eq!(2, inbox.len());
    assert_eq!("Newer", inbox[0]["subject"]);
    assert_eq!("Older", inbox[1]["subject"]);
}
