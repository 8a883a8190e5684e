use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use twofold_core::{Email, Password, User, UserId, UserStore, UserStoreError};

struct StoredUser {
    user: User,
    password_hash: Secret<String>,
}

/// In-memory credential store. Passwords are argon2id-hashed on the way in,
/// exactly like a database-backed store would.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, StoredUser>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    #[tracing::instrument(name = "Adding user to store", skip_all)]
    async fn add_user(
        &self,
        email: Email,
        password: Password,
        display_name: Option<String>,
    ) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let user = User::new(UserId::new(), email.clone(), display_name);
        users.insert(
            email,
            StoredUser {
                user: user.clone(),
                password_hash,
            },
        );

        Ok(user)
    }

    #[tracing::instrument(name = "Validating user credentials", skip_all)]
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let (user, password_hash) = {
            let users = self.users.read().await;
            let stored = users.get(email).ok_or(UserStoreError::UserNotFound)?;
            (stored.user.clone(), stored.password_hash.clone())
        };

        verify_password_hash(password_hash, password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }

    #[tracing::instrument(name = "Re-verifying user password", skip_all)]
    async fn verify_password(
        &self,
        user_id: UserId,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = {
            let users = self.users.read().await;
            users
                .values()
                .find(|stored| stored.user.id() == user_id)
                .map(|stored| stored.password_hash.clone())
                .ok_or(UserStoreError::UserNotFound)?
        };

        verify_password_hash(password_hash, password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    #[tracing::instrument(name = "Retrieving user from store", skip_all)]
    async fn get_user(&self, user_id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|stored| stored.user.id() == user_id)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }
}

async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(15_000, 2, 1, None).map_err(|e| e.to_string())?,
        )
        .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
        .map_err(|e| e.to_string())?
        .to_string();

        Ok(Secret::from(hash))
    })
    .await
    .map_err(|e| e.to_string())?
}

async fn verify_password_hash(
    expected_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    tokio::task::spawn_blocking(move || {
        let expected_hash =
            PasswordHash::new(expected_hash.expose_secret()).map_err(|e| e.to_string())?;

        Argon2::default()
            .verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_hash,
            )
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| e.to_string())?
}
