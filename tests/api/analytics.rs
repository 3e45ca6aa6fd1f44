use chrono::Utc;
use uuid::Uuid;

use crate::helpers::{mount_session, seed_user, spawn_app};

#[tokio::test]
async fn event_counts_are_grouped_by_type() {
    let test_app = spawn_app().await;
    let token = Uuid::new_v4().to_string();
    let user_id = Uuid::new_v4();
    mount_session(&test_app, &token, user_id).await;
    seed_user(&test_app.db_pool, user_id).await;

    for event_type in ["open", "open", "click"] {
        sqlx::query(
            "INSERT INTO email_events (id, user_id, event_type, occurred_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(event_type)
        .bind(Utc::now())
        .execute(&test_app.db_pool)
        .await
        .expect("Failed to seed an email event");
    }

    let response = test_app
        .get("/api/analytics/summary")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(
        serde_json::json!({
            "events": [
                { "event_type": "click", "count": 1 },
                { "event_type": "open", "count": 2 },
            ]
        }),
        body
    );
}
