use twofold_core::{TwoFactorMethod, TwoFactorStore, TwoFactorStoreError, UserId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoFactorStatus {
    pub is_enabled: bool,
    pub method: Option<TwoFactorMethod>,
}

/// Two-factor status use case - read-only; an absent record reports as
/// disabled with no method.
pub struct TwoFactorStatusUseCase<T>
where
    T: TwoFactorStore,
{
    two_factor_store: T,
}

impl<T> TwoFactorStatusUseCase<T>
where
    T: TwoFactorStore,
{
    pub fn new(two_factor_store: T) -> Self {
        Self { two_factor_store }
    }

    #[tracing::instrument(name = "TwoFactorStatusUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<TwoFactorStatus, TwoFactorStoreError> {
        match self.two_factor_store.get(user_id).await {
            Ok(record) => Ok(TwoFactorStatus {
                is_enabled: record.is_enabled(),
                method: Some(record.method()),
            }),
            Err(TwoFactorStoreError::RecordNotFound) => Ok(TwoFactorStatus {
                is_enabled: false,
                method: None,
            }),
            Err(e) => Err(e),
        }
    }
}
