use serde::{Deserialize, Serialize};

use super::backup_code::BackupCode;
use super::otp_code::PendingOtp;
use super::totp_secret::TotpSecret;
use super::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TwoFactorMethod {
    Email,
    Totp,
}

/// Per-user two-factor configuration. At most one record exists per user;
/// enabling a method always replaces the previous record wholesale.
///
/// Lifecycle: created with `is_enabled = false` (configuring), flipped to
/// enabled by a successful verification of the fresh configuration, removed
/// entirely on disable.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoFactorRecord {
    user_id: UserId,
    method: TwoFactorMethod,
    is_enabled: bool,
    totp_secret: Option<TotpSecret>,
    backup_codes: Vec<BackupCode>,
    pending_otp: Option<PendingOtp>,
}

impl TwoFactorRecord {
    pub fn new_totp(user_id: UserId, secret: TotpSecret, backup_codes: Vec<BackupCode>) -> Self {
        Self {
            user_id,
            method: TwoFactorMethod::Totp,
            is_enabled: false,
            totp_secret: Some(secret),
            backup_codes,
            pending_otp: None,
        }
    }

    pub fn new_email(user_id: UserId) -> Self {
        Self {
            user_id,
            method: TwoFactorMethod::Email,
            is_enabled: false,
            totp_secret: None,
            backup_codes: Vec::new(),
            pending_otp: None,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn method(&self) -> TwoFactorMethod {
        self.method
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn totp_secret(&self) -> Option<&TotpSecret> {
        self.totp_secret.as_ref()
    }

    pub fn backup_codes(&self) -> &[BackupCode] {
        &self.backup_codes
    }

    pub fn pending_otp(&self) -> Option<&PendingOtp> {
        self.pending_otp.as_ref()
    }

    /// Marks the configured method as confirmed. Pending email-OTP material
    /// is cleared in the same transition.
    pub fn enable(&mut self) {
        self.is_enabled = true;
        self.pending_otp = None;
    }

    pub fn set_pending_otp(&mut self, otp: PendingOtp) {
        self.pending_otp = Some(otp);
    }

    pub fn clear_pending_otp(&mut self) {
        self.pending_otp = None;
    }

    /// Removes `submitted` from the backup-code set. Returns true only when
    /// the code was present; a consumed code can never match again.
    pub fn take_backup_code(&mut self, submitted: &str) -> bool {
        match self.backup_codes.iter().position(|c| c.matches(submitted)) {
            Some(idx) => {
                self.backup_codes.remove(idx);
                true
            }
            None => false,
        }
    }
}
