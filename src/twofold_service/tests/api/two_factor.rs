use crate::helpers::{TEST_PASSWORD, current_totp_code, error_message, spawn_app};

#[tokio::test]
async fn status_requires_a_session_token() {
    let app = spawn_app().await;

    let response = app
        .http_client
        .get(format!("{}/two-factor/status", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn status_reports_absent_record_as_disabled() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("no-2fa@example.com").await;

    let response = app.get_status(&session_token).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["isEnabled"], false);
    assert_eq!(body["method"], serde_json::Value::Null);
}

#[tokio::test]
async fn email_enrollment_walks_through_configuring_to_active() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("enroll@example.com").await;

    let response = app.post_enable(&session_token, "EMAIL").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["method"], "EMAIL");

    // Configured but not yet confirmed
    let status: serde_json::Value = app.get_status(&session_token).await.json().await.unwrap();
    assert_eq!(status["isEnabled"], false);
    assert_eq!(status["method"], "EMAIL");

    let code = app.email_client.last_code().await.unwrap();
    let response = app.post_verify_enable(&session_token, &code).await;
    assert_eq!(response.status().as_u16(), 200);

    let status: serde_json::Value = app.get_status(&session_token).await.json().await.unwrap();
    assert_eq!(status["isEnabled"], true);
    assert_eq!(status["method"], "EMAIL");
}

#[tokio::test]
async fn verify_enable_with_wrong_code_leaves_record_disabled() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("wrong-enable@example.com").await;

    app.post_enable(&session_token, "EMAIL").await;
    let response = app.post_verify_enable(&session_token, "000000").await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "Invalid code");

    let status: serde_json::Value = app.get_status(&session_token).await.json().await.unwrap();
    assert_eq!(status["isEnabled"], false);
}

#[tokio::test]
async fn verify_enable_without_configuration_is_rejected() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("unconfigured@example.com").await;

    let response = app.post_verify_enable(&session_token, "123456").await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        error_message(response).await,
        "Two-factor authentication is not set up"
    );
}

#[tokio::test]
async fn totp_enrollment_returns_one_time_setup_material() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("totp@example.com").await;

    let response = app.post_enable(&session_token, "TOTP").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(body["method"], "TOTP");
    assert!(body["secret"].as_str().is_some());
    assert!(
        body["provisioningUri"]
            .as_str()
            .unwrap()
            .starts_with("otpauth://totp/")
    );
    assert!(
        body["qrCode"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );

    let backup_codes = body["backupCodes"].as_array().unwrap();
    assert_eq!(backup_codes.len(), 10);
    for code in backup_codes {
        let code = code.as_str().unwrap();
        assert_eq!(code.len(), 8);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}

#[tokio::test]
async fn totp_login_accepts_authenticator_code() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("totp-login@example.com").await;
    let (secret, _) = app.enable_totp_two_factor(&session_token).await;

    let response = app.post_login("totp-login@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 206);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["method"], "TOTP");
    let pending_token = body["pendingToken"].as_str().unwrap().to_string();

    let response = app
        .post_verify_otp(&pending_token, &current_totp_code(&secret))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["sessionToken"].as_str().is_some());
}

#[tokio::test]
async fn backup_code_works_exactly_once() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("backup@example.com").await;
    let (_, backup_codes) = app.enable_totp_two_factor(&session_token).await;
    let backup_code = backup_codes[0].clone();

    let response = app.post_login("backup@example.com", TEST_PASSWORD).await;
    let body: serde_json::Value = response.json().await.unwrap();
    let pending_token = body["pendingToken"].as_str().unwrap().to_string();

    let response = app.post_verify_otp(&pending_token, &backup_code).await;
    assert_eq!(response.status().as_u16(), 200);

    // The pending token is stateless, so a second attempt is possible - but
    // the consumed backup code is gone
    let response = app.post_verify_otp(&pending_token, &backup_code).await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "Invalid code");
}

#[tokio::test]
async fn concurrent_redemptions_of_one_backup_code_have_one_winner() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("race@example.com").await;
    let (_, backup_codes) = app.enable_totp_two_factor(&session_token).await;
    let backup_code = backup_codes[0].clone();

    let response = app.post_login("race@example.com", TEST_PASSWORD).await;
    let body: serde_json::Value = response.json().await.unwrap();
    let pending_token = body["pendingToken"].as_str().unwrap().to_string();

    let (a, b) = tokio::join!(
        app.post_verify_otp(&pending_token, &backup_code),
        app.post_verify_otp(&pending_token, &backup_code),
    );

    let statuses = [a.status().as_u16(), b.status().as_u16()];
    assert_eq!(
        statuses.iter().filter(|&&status| status == 200).count(),
        1,
        "exactly one redemption may succeed, got {statuses:?}"
    );
    assert_eq!(
        statuses.iter().filter(|&&status| status == 401).count(),
        1,
        "the loser must see an invalid-code outcome, got {statuses:?}"
    );
}

#[tokio::test]
async fn send_email_otp_replaces_the_pending_code() {
    let app = spawn_app().await;
    let (user, session_token) = app.signed_up_user("resend@example.com").await;
    app.enable_email_two_factor(&session_token).await;

    // Authenticated resend
    let response = app.post_send_email_otp(Some(&session_token), None).await;
    assert_eq!(response.status().as_u16(), 200);
    let first_code = app.email_client.last_code().await.unwrap();

    // Pending-token resend replaces it again
    let pending_token = app.token_issuer.issue_pending(&user).unwrap();
    let response = app.post_send_email_otp(None, Some(&pending_token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let second_code = app.email_client.last_code().await.unwrap();

    // Only the latest code is accepted
    if first_code != second_code {
        let response = app.post_verify_otp(&pending_token, &first_code).await;
        assert_eq!(response.status().as_u16(), 401);
    }
    let response = app.post_verify_otp(&pending_token, &second_code).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn send_email_otp_requires_email_method() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("totp-resend@example.com").await;
    app.enable_totp_two_factor(&session_token).await;

    let response = app.post_send_email_otp(Some(&session_token), None).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        error_message(response).await,
        "Email two-factor authentication is not configured"
    );
}

#[tokio::test]
async fn disable_requires_the_correct_password() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("disable@example.com").await;
    app.enable_email_two_factor(&session_token).await;

    let response = app.post_disable(&session_token, "wrong-password").await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "Invalid password");

    // Record untouched
    let status: serde_json::Value = app.get_status(&session_token).await.json().await.unwrap();
    assert_eq!(status["isEnabled"], true);

    let response = app.post_disable(&session_token, TEST_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 200);

    // Record fully removed, logins are plain again
    let status: serde_json::Value = app.get_status(&session_token).await.json().await.unwrap();
    assert_eq!(status["isEnabled"], false);
    assert_eq!(status["method"], serde_json::Value::Null);

    let response = app.post_login("disable@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn enable_overwrites_the_previous_method() {
    let app = spawn_app().await;
    let (_, session_token) = app.signed_up_user("switch@example.com").await;
    app.enable_totp_two_factor(&session_token).await;

    // Switching to email puts the record back into the configuring state
    let response = app.post_enable(&session_token, "EMAIL").await;
    assert_eq!(response.status().as_u16(), 200);

    let status: serde_json::Value = app.get_status(&session_token).await.json().await.unwrap();
    assert_eq!(status["isEnabled"], false);
    assert_eq!(status["method"], "EMAIL");
}
