use twofold_core::{
    Password, TwoFactorStore, TwoFactorStoreError, UserId, UserStore, UserStoreError,
};

/// Error types for the disable use case
#[derive(Debug, thiserror::Error)]
pub enum DisableTwoFactorError {
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Two-factor authentication is not set up")]
    NotConfigured,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Two-factor store error: {0}")]
    TwoFactorStoreError(TwoFactorStoreError),
}

impl From<UserStoreError> for DisableTwoFactorError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::IncorrectPassword => DisableTwoFactorError::InvalidPassword,
            other => DisableTwoFactorError::UserStoreError(other),
        }
    }
}

impl From<TwoFactorStoreError> for DisableTwoFactorError {
    fn from(error: TwoFactorStoreError) -> Self {
        match error {
            TwoFactorStoreError::RecordNotFound => DisableTwoFactorError::NotConfigured,
            other => DisableTwoFactorError::TwoFactorStoreError(other),
        }
    }
}

/// Disable two-factor use case - requires a fresh password check, then
/// removes the record entirely. Re-enabling later starts from scratch.
pub struct DisableTwoFactorUseCase<U, T>
where
    U: UserStore,
    T: TwoFactorStore,
{
    user_store: U,
    two_factor_store: T,
}

impl<U, T> DisableTwoFactorUseCase<U, T>
where
    U: UserStore,
    T: TwoFactorStore,
{
    pub fn new(user_store: U, two_factor_store: T) -> Self {
        Self {
            user_store,
            two_factor_store,
        }
    }

    #[tracing::instrument(name = "DisableTwoFactorUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        user_id: UserId,
        password: Password,
    ) -> Result<(), DisableTwoFactorError> {
        self.user_store.verify_password(user_id, &password).await?;

        self.two_factor_store.delete(user_id).await?;

        Ok(())
    }
}
