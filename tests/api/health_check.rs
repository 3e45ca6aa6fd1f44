use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let test_app = spawn_app().await;

    let response = test_app
        .get("/health_check")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn the_root_greets_without_authentication() {
    let test_app = spawn_app().await;

    let response = test_app
        .get("/")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!("Welcome to PDGmail API", body["message"]);
}
