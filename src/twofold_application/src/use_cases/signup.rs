use twofold_core::{Email, Password, User, UserStore, UserStoreError};

/// Error types specific to signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Signup use case - handles user registration
pub struct SignupUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> SignupUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Execute the signup use case
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Validated password
    /// * `display_name` - Optional display name
    ///
    /// # Returns
    /// The created user, or SignupError if the email is already taken
    #[tracing::instrument(name = "SignupUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        display_name: Option<String>,
    ) -> Result<User, SignupError> {
        let user = self.user_store.add_user(email, password, display_name).await?;

        Ok(user)
    }
}
