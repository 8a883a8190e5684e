use crate::helpers::{TEST_PASSWORD, error_message, spawn_app};

#[tokio::test]
async fn signup_returns_201_and_the_public_profile() {
    let app = spawn_app().await;

    let response = app.post_signup("new-user@example.com").await;

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "new-user@example.com");
    assert_eq!(body["user"]["name"], "Test User");
    assert!(body["user"]["id"].as_str().is_some());
}

#[tokio::test]
async fn signup_rejects_duplicate_email_with_409() {
    let app = spawn_app().await;

    app.post_signup("taken@example.com").await;
    let response = app.post_signup("taken@example.com").await;

    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(error_message(response).await, "Email already exists");
}

#[tokio::test]
async fn signup_rejects_malformed_email() {
    let app = spawn_app().await;

    let response = app
        .http_client
        .post(format!("{}/signup", app.address))
        .json(&serde_json::json!({
            "email": "not-an-email",
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn signup_rejects_short_password() {
    let app = spawn_app().await;

    let response = app
        .http_client
        .post(format!("{}/signup", app.address))
        .json(&serde_json::json!({
            "email": "short-pass@example.com",
            "password": "seven77",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}
