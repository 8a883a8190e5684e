use twofold_core::{
    EmailClient, PendingOtp, TotpEngine, TotpEngineError, TwoFactorMethod, TwoFactorStore,
    TwoFactorStoreError, User,
};

/// An OTP minted mid-login is expected to be entered immediately, so it gets
/// a much tighter window than a deliberate resend.
const LOGIN_RETRY_OTP_TTL_SECONDS: i64 = 30;

/// Error types for the login-time code verification use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyLoginCodeError {
    #[error("Two-factor authentication is not enabled")]
    NotEnabled,
    /// Soft outcome: no usable email OTP existed, so one was just sent.
    /// The caller should prompt for the fresh code, not treat this as a
    /// failed attempt.
    #[error("A new code has been sent to your email")]
    OtpJustSent,
    #[error("Invalid code")]
    InvalidCode,
    #[error("Two-factor store error: {0}")]
    TwoFactorStoreError(TwoFactorStoreError),
    #[error("TOTP engine error: {0}")]
    TotpEngineError(#[from] TotpEngineError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

impl From<TwoFactorStoreError> for VerifyLoginCodeError {
    fn from(error: TwoFactorStoreError) -> Self {
        match error {
            TwoFactorStoreError::RecordNotFound => VerifyLoginCodeError::NotEnabled,
            other => VerifyLoginCodeError::TwoFactorStoreError(other),
        }
    }
}

/// Verify-login-code use case - the second half of a 2FA-gated login.
///
/// The caller has already verified the pending token and resolved its
/// subject; this use case only judges the submitted code against the user's
/// enabled record.
pub struct VerifyLoginCodeUseCase<T, E, G>
where
    T: TwoFactorStore,
    E: EmailClient,
    G: TotpEngine,
{
    two_factor_store: T,
    email_client: E,
    totp_engine: G,
}

impl<T, E, G> VerifyLoginCodeUseCase<T, E, G>
where
    T: TwoFactorStore,
    E: EmailClient,
    G: TotpEngine,
{
    pub fn new(two_factor_store: T, email_client: E, totp_engine: G) -> Self {
        Self {
            two_factor_store,
            email_client,
            totp_engine,
        }
    }

    #[tracing::instrument(name = "VerifyLoginCodeUseCase::execute", skip(self, code))]
    pub async fn execute(&self, user: &User, code: &str) -> Result<(), VerifyLoginCodeError> {
        let record = self.two_factor_store.get(user.id()).await?;

        if !record.is_enabled() {
            return Err(VerifyLoginCodeError::NotEnabled);
        }

        match record.method() {
            TwoFactorMethod::Totp => {
                let secret = record.totp_secret().ok_or(VerifyLoginCodeError::NotEnabled)?;
                if self.totp_engine.verify(secret, code)? {
                    return Ok(());
                }
                // Fall back to the one-shot backup codes; consumption is
                // atomic so the same code cannot authenticate twice.
                if self
                    .two_factor_store
                    .consume_backup_code(user.id(), code)
                    .await?
                {
                    return Ok(());
                }
                Err(VerifyLoginCodeError::InvalidCode)
            }
            TwoFactorMethod::Email => {
                let usable = record.pending_otp().filter(|otp| !otp.is_expired());

                let Some(pending) = usable else {
                    return Err(self.dispatch_fresh_otp(user).await);
                };

                if !pending.code().matches(code) {
                    return Err(VerifyLoginCodeError::InvalidCode);
                }

                self.two_factor_store.clear_pending_otp(user.id()).await?;
                Ok(())
            }
        }
    }

    /// No valid OTP was on file, so mint one with the short login window and
    /// report the soft `OtpJustSent` outcome (or a hard error if either step
    /// fails).
    async fn dispatch_fresh_otp(&self, user: &User) -> VerifyLoginCodeError {
        let otp = PendingOtp::issue(LOGIN_RETRY_OTP_TTL_SECONDS);
        let code = otp.code().clone();

        if let Err(e) = self.two_factor_store.set_pending_otp(user.id(), otp).await {
            return e.into();
        }

        match self
            .email_client
            .send_email(user.email(), "Your verification code", code.as_str())
            .await
        {
            Ok(()) => VerifyLoginCodeError::OtpJustSent,
            Err(e) => VerifyLoginCodeError::EmailError(e),
        }
    }
}
