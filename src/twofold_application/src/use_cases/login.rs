use twofold_core::{
    Email, EmailClient, Password, PendingOtp, TwoFactorMethod, TwoFactorStore, TwoFactorStoreError,
    User, UserStore, UserStoreError,
};

/// Validity window for the OTP dispatched automatically when an email-method
/// user passes the password check.
const LOGIN_OTP_TTL_SECONDS: i64 = 60;

/// Response from login use case
#[derive(Debug, PartialEq)]
pub enum LoginResponse {
    /// User authenticated successfully without 2FA
    Success(User),
    /// Password verified, but a second factor is still required
    RequiresOtp {
        user: User,
        method: TwoFactorMethod,
    },
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Two-factor store error: {0}")]
    TwoFactorStoreError(#[from] TwoFactorStoreError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

/// Login use case - handles password authentication and the hand-off into
/// the two-factor flow
pub struct LoginUseCase<U, T, E>
where
    U: UserStore,
    T: TwoFactorStore,
    E: EmailClient,
{
    user_store: U,
    two_factor_store: T,
    email_client: E,
}

impl<U, T, E> LoginUseCase<U, T, E>
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

    /// Execute the login use case
    ///
    /// # Returns
    /// LoginResponse indicating whether the session is complete or an OTP
    /// verification must follow
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<LoginResponse, LoginError> {
        let user = self.user_store.authenticate(&email, &password).await?;

        let record = match self.two_factor_store.get(user.id()).await {
            Ok(record) => record,
            Err(TwoFactorStoreError::RecordNotFound) => return Ok(LoginResponse::Success(user)),
            Err(e) => return Err(e.into()),
        };

        if !record.is_enabled() {
            return Ok(LoginResponse::Success(user));
        }

        if record.method() == TwoFactorMethod::Email {
            self.dispatch_otp(&user).await?;
        }

        Ok(LoginResponse::RequiresOtp {
            method: record.method(),
            user,
        })
    }

    async fn dispatch_otp(&self, user: &User) -> Result<(), LoginError> {
        let otp = PendingOtp::issue(LOGIN_OTP_TTL_SECONDS);
        let code = otp.code().clone();

        self.two_factor_store
            .set_pending_otp(user.id(), otp)
            .await?;

        self.email_client
            .send_email(user.email(), "Your verification code", code.as_str())
            .await
            .map_err(LoginError::EmailError)?;

        Ok(())
    }
}
