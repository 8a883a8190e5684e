use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    otp_code::PendingOtp,
    password::Password,
    two_factor_record::TwoFactorRecord,
    user::{User, UserId},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Registers a new user. The store owns the password hashing.
    async fn add_user(
        &self,
        email: Email,
        password: Password,
        display_name: Option<String>,
    ) -> Result<User, UserStoreError>;

    /// Verifies email + password and returns the matching user.
    async fn authenticate(&self, email: &Email, password: &Password)
    -> Result<User, UserStoreError>;

    /// Re-checks the password of an already-identified user, for
    /// confirmation of sensitive operations.
    async fn verify_password(
        &self,
        user_id: UserId,
        password: &Password,
    ) -> Result<(), UserStoreError>;

    async fn get_user(&self, user_id: UserId) -> Result<User, UserStoreError>;
}

// TwoFactorStore port trait and errors
#[derive(Debug, Error)]
pub enum TwoFactorStoreError {
    #[error("No two-factor record for user")]
    RecordNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for TwoFactorStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::RecordNotFound, Self::RecordNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistence for the per-user two-factor record.
///
/// Every mutating method is a single read-modify-write step and MUST be
/// serialized per user by the implementation, so that concurrent calls
/// cannot interleave on one record (e.g. two redemptions of the same backup
/// code).
#[async_trait]
pub trait TwoFactorStore: Send + Sync {
    /// Inserts or wholesale-replaces the record for `record.user_id()`.
    async fn upsert(&self, record: TwoFactorRecord) -> Result<(), TwoFactorStoreError>;

    async fn get(&self, user_id: UserId) -> Result<TwoFactorRecord, TwoFactorStoreError>;

    async fn delete(&self, user_id: UserId) -> Result<(), TwoFactorStoreError>;

    /// Flips the record to enabled and clears pending OTP material.
    async fn mark_enabled(&self, user_id: UserId) -> Result<(), TwoFactorStoreError>;

    async fn set_pending_otp(
        &self,
        user_id: UserId,
        otp: PendingOtp,
    ) -> Result<(), TwoFactorStoreError>;

    async fn clear_pending_otp(&self, user_id: UserId) -> Result<(), TwoFactorStoreError>;

    /// Atomically removes `submitted` from the user's backup codes.
    /// Returns true iff the code was present and is now consumed; at most
    /// one concurrent caller can observe true for the same code.
    async fn consume_backup_code(
        &self,
        user_id: UserId,
        submitted: &str,
    ) -> Result<bool, TwoFactorStoreError>;
}
