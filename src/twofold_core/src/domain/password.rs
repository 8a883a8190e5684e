use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

const MIN_PASSWORD_LENGTH: usize = 8;

/// Validated plaintext password, prior to hashing.
///
/// Only the credential-store adapter ever exposes the inner secret, to hash
/// or verify it.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(password: Secret<String>) -> Result<Self, UserError> {
        if password.expose_secret().len() >= MIN_PASSWORD_LENGTH {
            Ok(Self(password))
        } else {
            Err(UserError::PasswordTooShort)
        }
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(password: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(password)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
