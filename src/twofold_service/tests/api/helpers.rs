use std::sync::Arc;

use secrecy::Secret;
use tokio::sync::RwLock;
use twofold_adapters::{
    HashMapTwoFactorStore, HashMapUserStore, TokenIssuer, TotpRsEngine,
    authentication::TokenConfig, config::test,
};
use twofold_core::{Email, EmailClient, User, UserId};
use twofold_service::TwofoldService;

pub const TEST_PASSWORD: &str = "password123";

/// Email client that captures every outbound message so tests can read the
/// OTP codes that "went out".
#[derive(Default, Clone)]
pub struct CapturingEmailClient {
    sent: Arc<RwLock<Vec<String>>>,
}

impl CapturingEmailClient {
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    pub async fn last_code(&self) -> Option<String> {
        self.sent.read().await.last().cloned()
    }
}

#[async_trait::async_trait]
impl EmailClient for CapturingEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        _subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.sent.write().await.push(content.to_string());
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub email_client: CapturingEmailClient,
    pub token_issuer: TokenIssuer,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_token_config(TokenConfig::new(Secret::from("test-secret".to_owned()))).await
}

pub async fn spawn_app_with_token_config(token_config: TokenConfig) -> TestApp {
    let email_client = CapturingEmailClient::default();
    let token_issuer = TokenIssuer::new(token_config);

    let service = TwofoldService::new(
        HashMapUserStore::new(),
        HashMapTwoFactorStore::new(),
        email_client.clone(),
        TotpRsEngine::new("twofold-test".to_string()),
        token_issuer.clone(),
    );

    let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(service.run(listener, None));

    TestApp {
        address,
        http_client: reqwest::Client::new(),
        email_client,
        token_issuer,
    }
}

impl TestApp {
    pub async fn post_signup(&self, email: &str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/signup", self.address))
            .json(&serde_json::json!({
                "email": email,
                "password": TEST_PASSWORD,
                "displayName": "Test User",
            }))
            .send()
            .await
            .expect("Failed to execute signup request")
    }

    pub async fn post_login(&self, email: &str, password: &str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/login", self.address))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute login request")
    }

    pub async fn post_verify_otp(&self, pending_token: &str, code: &str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/verify-otp", self.address))
            .json(&serde_json::json!({
                "pendingToken": pending_token,
                "code": code,
            }))
            .send()
            .await
            .expect("Failed to execute verify-otp request")
    }

    pub async fn post_enable(&self, session_token: &str, method: &str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/two-factor/enable", self.address))
            .bearer_auth(session_token)
            .json(&serde_json::json!({ "method": method }))
            .send()
            .await
            .expect("Failed to execute enable request")
    }

    pub async fn post_verify_enable(&self, session_token: &str, code: &str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/two-factor/verify-enable", self.address))
            .bearer_auth(session_token)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await
            .expect("Failed to execute verify-enable request")
    }

    pub async fn post_disable(&self, session_token: &str, password: &str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/two-factor/disable", self.address))
            .bearer_auth(session_token)
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await
            .expect("Failed to execute disable request")
    }

    pub async fn get_status(&self, session_token: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/two-factor/status", self.address))
            .bearer_auth(session_token)
            .send()
            .await
            .expect("Failed to execute status request")
    }

    pub async fn post_send_email_otp(
        &self,
        session_token: Option<&str>,
        pending_token: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self
            .http_client
            .post(format!("{}/two-factor/send-email-otp", self.address));

        if let Some(token) = session_token {
            request = request.bearer_auth(token);
        }
        let body = match pending_token {
            Some(token) => serde_json::json!({ "pendingToken": token }),
            None => serde_json::json!({}),
        };

        request
            .json(&body)
            .send()
            .await
            .expect("Failed to execute send-email-otp request")
    }

    /// Registers a user and returns `(user, session_token)` from a plain
    /// password login.
    pub async fn signed_up_user(&self, email: &str) -> (User, String) {
        let response = self.post_signup(email).await;
        assert_eq!(response.status().as_u16(), 201);

        let response = self.post_login(email, TEST_PASSWORD).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.unwrap();

        let session_token = body["sessionToken"].as_str().unwrap().to_string();
        let user = user_from_body(&body["user"]);

        (user, session_token)
    }

    /// Takes a user through email-method enrollment to the enabled state.
    pub async fn enable_email_two_factor(&self, session_token: &str) {
        let response = self.post_enable(session_token, "EMAIL").await;
        assert_eq!(response.status().as_u16(), 200);

        let code = self.email_client.last_code().await.unwrap();
        let response = self.post_verify_enable(session_token, &code).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    /// Takes a user through TOTP enrollment; returns the shared secret and
    /// the issued backup codes.
    pub async fn enable_totp_two_factor(&self, session_token: &str) -> (String, Vec<String>) {
        let response = self.post_enable(session_token, "TOTP").await;
        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.unwrap();

        let secret = body["secret"].as_str().unwrap().to_string();
        let backup_codes = body["backupCodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|code| code.as_str().unwrap().to_string())
            .collect();

        let code = current_totp_code(&secret);
        let response = self.post_verify_enable(session_token, &code).await;
        assert_eq!(response.status().as_u16(), 200);

        (secret, backup_codes)
    }
}

pub fn user_from_body(body: &serde_json::Value) -> User {
    User::new(
        UserId::parse(body["id"].as_str().unwrap()).unwrap(),
        Email::try_from(Secret::from(body["email"].as_str().unwrap().to_string())).unwrap(),
        body["name"].as_str().map(String::from),
    )
}

/// Computes the code an authenticator app would currently show for
/// `secret_base32`.
pub fn current_totp_code(secret_base32: &str) -> String {
    let totp = totp_rs::TOTP::new(
        totp_rs::Algorithm::SHA1,
        6,
        1,
        30,
        totp_rs::Secret::Encoded(secret_base32.to_string())
            .to_bytes()
            .unwrap(),
        Some("twofold-test".to_string()),
        String::new(),
    )
    .unwrap();

    totp.generate_current().unwrap()
}

pub async fn error_message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.unwrap();
    body["error"].as_str().unwrap_or_default().to_string()
}
