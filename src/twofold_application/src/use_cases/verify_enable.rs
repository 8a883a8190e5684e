use twofold_core::{
    TotpEngine, TotpEngineError, TwoFactorMethod, TwoFactorStore, TwoFactorStoreError, UserId,
};

/// Error types for the verify-enable use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyEnableError {
    #[error("Two-factor authentication is not set up")]
    NotConfigured,
    #[error("Code has expired")]
    Expired,
    #[error("Invalid code")]
    InvalidCode,
    #[error("Two-factor store error: {0}")]
    TwoFactorStoreError(TwoFactorStoreError),
    #[error("TOTP engine error: {0}")]
    TotpEngineError(#[from] TotpEngineError),
}

impl From<TwoFactorStoreError> for VerifyEnableError {
    fn from(error: TwoFactorStoreError) -> Self {
        match error {
            TwoFactorStoreError::RecordNotFound => VerifyEnableError::NotConfigured,
            other => VerifyEnableError::TwoFactorStoreError(other),
        }
    }
}

/// Verify-enable use case - confirms a freshly configured method and flips
/// the record to enabled.
///
/// Works on records in any state, so a user can re-confirm a replaced
/// configuration; a failed attempt leaves the record exactly as it was.
pub struct VerifyEnableUseCase<T, G>
where
    T: TwoFactorStore,
    G: TotpEngine,
{
    two_factor_store: T,
    totp_engine: G,
}

impl<T, G> VerifyEnableUseCase<T, G>
where
    T: TwoFactorStore,
    G: TotpEngine,
{
    pub fn new(two_factor_store: T, totp_engine: G) -> Self {
        Self {
            two_factor_store,
            totp_engine,
        }
    }

    #[tracing::instrument(name = "VerifyEnableUseCase::execute", skip(self, code))]
    pub async fn execute(&self, user_id: UserId, code: &str) -> Result<(), VerifyEnableError> {
        let record = self.two_factor_store.get(user_id).await?;

        match record.method() {
            TwoFactorMethod::Totp => {
                let secret = record.totp_secret().ok_or(VerifyEnableError::NotConfigured)?;
                if !self.totp_engine.verify(secret, code)? {
                    return Err(VerifyEnableError::InvalidCode);
                }
            }
            TwoFactorMethod::Email => {
                let pending = record.pending_otp().ok_or(VerifyEnableError::InvalidCode)?;
                if pending.is_expired() {
                    return Err(VerifyEnableError::Expired);
                }
                if !pending.code().matches(code) {
                    return Err(VerifyEnableError::InvalidCode);
                }
            }
        }

        self.two_factor_store.mark_enabled(user_id).await?;

        Ok(())
    }
}
