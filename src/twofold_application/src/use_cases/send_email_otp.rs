use twofold_core::{
    EmailClient, PendingOtp, TwoFactorMethod, TwoFactorStore, TwoFactorStoreError, UserId,
    UserStore, UserStoreError,
};

const RESEND_OTP_TTL_SECONDS: i64 = 60;

/// Error types for the send-email-OTP use case
#[derive(Debug, thiserror::Error)]
pub enum SendEmailOtpError {
    #[error("Email two-factor authentication is not configured")]
    NotConfigured,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Two-factor store error: {0}")]
    TwoFactorStoreError(TwoFactorStoreError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

impl From<TwoFactorStoreError> for SendEmailOtpError {
    fn from(error: TwoFactorStoreError) -> Self {
        match error {
            TwoFactorStoreError::RecordNotFound => SendEmailOtpError::NotConfigured,
            other => SendEmailOtpError::TwoFactorStoreError(other),
        }
    }
}

/// Send-email-OTP use case - the explicit, caller-invoked resend path.
/// Always replaces whatever pending code was on file.
pub struct SendEmailOtpUseCase<U, T, E>
where
    U: UserStore,
    T: TwoFactorStore,
    E: EmailClient,
{
    user_store: U,
    two_factor_store: T,
    email_client: E,
}

impl<U, T, E> SendEmailOtpUseCase<U, T, E>
where
    U: UserStore,
    T: TwoFactorStore,
    E: EmailClient,
{
    pub fn new(user_store: U, two_factor_store: T, email_client: E) -> Self {
        Self {
            user_store,
            two_factor_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "SendEmailOtpUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<(), SendEmailOtpError> {
        let record = self.two_factor_store.get(user_id).await?;
        if record.method() != TwoFactorMethod::Email {
            return Err(SendEmailOtpError::NotConfigured);
        }

        let user = self.user_store.get_user(user_id).await?;

        let otp = PendingOtp::issue(RESEND_OTP_TTL_SECONDS);
        let code = otp.code().clone();
        self.two_factor_store.set_pending_otp(user_id, otp).await?;

        self.email_client
            .send_email(user.email(), "Your verification code", code.as_str())
            .await
            .map_err(SendEmailOtpError::EmailError)?;

        Ok(())
    }
}
