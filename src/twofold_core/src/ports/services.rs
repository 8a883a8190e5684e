use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, totp_secret::TotpSecret};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum TotpEngineError {
    #[error("Invalid TOTP secret")]
    InvalidSecret,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Material handed to the user once, at TOTP enrollment.
#[derive(Debug, Clone)]
pub struct TotpSetup {
    pub secret: TotpSecret,
    pub provisioning_uri: String,
    /// PNG data URI, ready to render as a scannable enrollment code.
    pub qr_code: String,
}

/// Port trait for time-based one-time password computation. Pure (no I/O
/// beyond the system clock), so the trait is synchronous.
pub trait TotpEngine: Send + Sync {
    /// Generates a fresh shared secret and provisioning material for the
    /// given account label.
    fn provision(&self, account: &Email) -> Result<TotpSetup, TotpEngineError>;

    /// Checks `code` against `secret` at the current time, tolerating the
    /// configured clock-skew window.
    fn verify(&self, secret: &TotpSecret, code: &str) -> Result<bool, TotpEngineError>;
}
