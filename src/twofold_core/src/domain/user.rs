use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use super::email::Email;

#[derive(Debug, Error, PartialEq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Invalid user id")]
    InvalidUserId,
}

/// Opaque user identifier, assigned by the credential store at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(id: &str) -> Result<Self, UserError> {
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserError::InvalidUserId)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public identity record. The password hash stays inside the credential
/// store and is never part of this type.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    email: Email,
    display_name: Option<String>,
}

impl User {
    pub fn new(id: UserId, email: Email, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
