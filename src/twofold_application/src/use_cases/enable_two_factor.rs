use twofold_core::{
    BackupCode, EmailClient, PendingOtp, TotpEngine, TotpEngineError, TotpSecret, TwoFactorMethod,
    TwoFactorRecord, TwoFactorStore, TwoFactorStoreError, UserId, UserStore, UserStoreError,
};

/// An enrollment OTP is deliberate (the user just asked for it), so it gets
/// the long window.
const ENABLE_OTP_TTL_SECONDS: i64 = 600;

/// Response from the enable use case. TOTP material is returned exactly once
/// so the caller can display it; it is never retrievable afterwards.
#[derive(Debug)]
pub enum EnableResponse {
    Totp {
        secret: TotpSecret,
        provisioning_uri: String,
        qr_code: String,
        backup_codes: Vec<BackupCode>,
    },
    Email,
}

/// Error types for enable two-factor use case
#[derive(Debug, thiserror::Error)]
pub enum EnableTwoFactorError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Two-factor store error: {0}")]
    TwoFactorStoreError(#[from] TwoFactorStoreError),
    #[error("TOTP engine error: {0}")]
    TotpEngineError(#[from] TotpEngineError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

/// Enable two-factor use case - starts enrollment for a method.
///
/// The record is written with `is_enabled = false`; only a successful
/// verify-enable confirms it. Enabling always replaces whatever record was
/// there before, so methods never stack.
pub struct EnableTwoFactorUseCase<U, T, E, G>
where
    U: UserStore,
    T: TwoFactorStore,
    E: EmailClient,
    G: TotpEngine,
{
    user_store: U,
    two_factor_store: T,
    email_client: E,
    totp_engine: G,
}

impl<U, T, E, G> EnableTwoFactorUseCase<U, T, E, G>
where
    U: UserStore,
    T: TwoFactorStore,
    E: EmailClient,
    G: TotpEngine,
{
    pub fn new(user_store: U, two_factor_store: T, email_client: E, totp_engine: G) -> Self {
        Self {
            user_store,
            two_factor_store,
            email_client,
            totp_engine,
        }
    }

    #[tracing::instrument(name = "EnableTwoFactorUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: UserId,
        method: TwoFactorMethod,
    ) -> Result<EnableResponse, EnableTwoFactorError> {
        let user = self.user_store.get_user(user_id).await?;

        match method {
            TwoFactorMethod::Totp => {
                let setup = self.totp_engine.provision(user.email())?;
                let backup_codes = BackupCode::generate_set();

                let record =
                    TwoFactorRecord::new_totp(user_id, setup.secret.clone(), backup_codes.clone());
                self.two_factor_store.upsert(record).await?;

                Ok(EnableResponse::Totp {
                    secret: setup.secret,
                    provisioning_uri: setup.provisioning_uri,
                    qr_code: setup.qr_code,
                    backup_codes,
                })
            }
            TwoFactorMethod::Email => {
                self.two_factor_store
                    .upsert(TwoFactorRecord::new_email(user_id))
                    .await?;

                let otp = PendingOtp::issue(ENABLE_OTP_TTL_SECONDS);
                let code = otp.code().clone();
                self.two_factor_store.set_pending_otp(user_id, otp).await?;

                self.email_client
                    .send_email(user.email(), "Your verification code", code.as_str())
                    .await
                    .map_err(EnableTwoFactorError::EmailError)?;

                Ok(EnableResponse::Email)
            }
        }
    }
}
