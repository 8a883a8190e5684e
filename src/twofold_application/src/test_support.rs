//! In-memory fakes shared by the use-case tests.

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use twofold_core::{
    Email, EmailClient, Password, PendingOtp, TotpEngine, TotpEngineError, TotpSecret, TotpSetup,
    TwoFactorRecord, TwoFactorStore, TwoFactorStoreError, User, UserId, UserStore, UserStoreError,
};

pub fn email(s: &str) -> Email {
    Email::try_from(Secret::from(s.to_string())).unwrap()
}

pub fn password(s: &str) -> Password {
    Password::try_from(Secret::from(s.to_string())).unwrap()
}

#[derive(Default, Clone)]
pub struct FakeUserStore {
    users: Arc<RwLock<HashMap<Email, (User, String)>>>,
}

impl FakeUserStore {
    pub async fn with_user(self, email: &Email, password: &Password) -> (Self, User) {
        let user = User::new(UserId::new(), email.clone(), None);
        self.users.write().await.insert(
            email.clone(),
            (user.clone(), password.as_ref().expose_secret().clone()),
        );
        (self, user)
    }
}

#[async_trait::async_trait]
impl UserStore for FakeUserStore {
    async fn add_user(
        &self,
        email: Email,
        password: Password,
        display_name: Option<String>,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let user = User::new(UserId::new(), email.clone(), display_name);
        users.insert(
            email,
            (user.clone(), password.as_ref().expose_secret().clone()),
        );
        Ok(user)
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let (user, stored) = users.get(email).ok_or(UserStoreError::UserNotFound)?;
        if stored != password.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(user.clone())
    }

    async fn verify_password(
        &self,
        user_id: UserId,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let users = self.users.read().await;
        let (_, stored) = users
            .values()
            .find(|(user, _)| user.id() == user_id)
            .ok_or(UserStoreError::UserNotFound)?;
        if stored != password.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(())
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|(user, _)| user.id() == user_id)
            .map(|(user, _)| user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }
}

#[derive(Default, Clone)]
pub struct FakeTwoFactorStore {
    records: Arc<RwLock<HashMap<UserId, TwoFactorRecord>>>,
}

impl FakeTwoFactorStore {
    pub async fn record(&self, user_id: UserId) -> Option<TwoFactorRecord> {
        self.records.read().await.get(&user_id).cloned()
    }
}

#[async_trait::async_trait]
impl TwoFactorStore for FakeTwoFactorStore {
    async fn upsert(&self, record: TwoFactorRecord) -> Result<(), TwoFactorStoreError> {
        self.records.write().await.insert(record.user_id(), record);
        Ok(())
    }

    async fn get(&self, user_id: UserId) -> Result<TwoFactorRecord, TwoFactorStoreError> {
        self.records
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(TwoFactorStoreError::RecordNotFound)
    }

    async fn delete(&self, user_id: UserId) -> Result<(), TwoFactorStoreError> {
        self.records
            .write()
            .await
            .remove(&user_id)
            .map(|_| ())
            .ok_or(TwoFactorStoreError::RecordNotFound)
    }

    async fn mark_enabled(&self, user_id: UserId) -> Result<(), TwoFactorStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorStoreError::RecordNotFound)?;
        record.enable();
        Ok(())
    }

    async fn set_pending_otp(
        &self,
        user_id: UserId,
        otp: PendingOtp,
    ) -> Result<(), TwoFactorStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorStoreError::RecordNotFound)?;
        record.set_pending_otp(otp);
        Ok(())
    }

    async fn clear_pending_otp(&self, user_id: UserId) -> Result<(), TwoFactorStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorStoreError::RecordNotFound)?;
        record.clear_pending_otp();
        Ok(())
    }

    async fn consume_backup_code(
        &self,
        user_id: UserId,
        submitted: &str,
    ) -> Result<bool, TwoFactorStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorStoreError::RecordNotFound)?;
        Ok(record.take_backup_code(submitted))
    }
}

/// Email client that records every message instead of sending it.
#[derive(Default, Clone)]
pub struct CapturingEmailClient {
    sent: Arc<RwLock<Vec<(String, String, String)>>>,
    fail: bool,
}

impl CapturingEmailClient {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.read().await.clone()
    }

    pub async fn last_content(&self) -> Option<String> {
        self.sent.read().await.last().map(|(_, _, c)| c.clone())
    }
}

#[async_trait::async_trait]
impl EmailClient for CapturingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("email transport unavailable".to_string());
        }
        self.sent.write().await.push((
            recipient.as_ref().expose_secret().clone(),
            subject.to_string(),
            content.to_string(),
        ));
        Ok(())
    }
}

/// TOTP engine that accepts a single hard-wired code.
#[derive(Clone)]
pub struct FakeTotpEngine {
    accepted: String,
}

impl FakeTotpEngine {
    pub fn accepting(code: &str) -> Self {
        Self {
            accepted: code.to_string(),
        }
    }
}

impl TotpEngine for FakeTotpEngine {
    fn provision(&self, account: &Email) -> Result<TotpSetup, TotpEngineError> {
        Ok(TotpSetup {
            secret: TotpSecret::from("JBSWY3DPEHPK3PXP".to_string()),
            provisioning_uri: format!(
                "otpauth://totp/twofold:{}?secret=JBSWY3DPEHPK3PXP",
                account.as_ref().expose_secret()
            ),
            qr_code: "data:image/png;base64,TEST".to_string(),
        })
    }

    fn verify(&self, _secret: &TotpSecret, code: &str) -> Result<bool, TotpEngineError> {
        Ok(code == self.accepted)
    }
}
