use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use twofold_application::{
    DisableTwoFactorError, EnableTwoFactorError, LoginError, SendEmailOtpError, SignupError,
    VerifyEnableError, VerifyLoginCodeError,
};
use twofold_core::{TotpEngineError, TwoFactorStoreError, UserError, UserStoreError};

use crate::authentication::TokenError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown email and wrong password share this variant so responses
    /// cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Two-factor authentication is not set up")]
    NotConfigured,

    #[error("Two-factor authentication is not enabled")]
    NotEnabled,

    #[error("Code has expired")]
    Expired,

    #[error("Invalid code")]
    InvalidCode,

    #[error("A new code has been sent to your email")]
    OtpJustSent,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::InvalidInput(_)
            | ApiError::NotConfigured
            | ApiError::Expired
            | ApiError::OtpJustSent => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),

            ApiError::InvalidCredentials
            | ApiError::InvalidToken
            | ApiError::NotEnabled
            | ApiError::InvalidCode
            | ApiError::InvalidPassword => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::UnexpectedError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidToken => ApiError::InvalidToken,
            TokenError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            // Merged on purpose - see InvalidCredentials
            UserStoreError::UserNotFound | UserStoreError::IncorrectPassword => {
                ApiError::InvalidCredentials
            }
            UserStoreError::UserAlreadyExists => ApiError::DuplicateEmail,
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<TwoFactorStoreError> for ApiError {
    fn from(error: TwoFactorStoreError) -> Self {
        match error {
            TwoFactorStoreError::RecordNotFound => ApiError::NotConfigured,
            TwoFactorStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<TotpEngineError> for ApiError {
    fn from(error: TotpEngineError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserStoreError(e) => e.into(),
            LoginError::TwoFactorStoreError(e) => e.into(),
            LoginError::EmailError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<EnableTwoFactorError> for ApiError {
    fn from(error: EnableTwoFactorError) -> Self {
        match error {
            // The caller is authenticated, so an unknown user is a stale
            // token rather than an enumeration risk
            EnableTwoFactorError::UserStoreError(UserStoreError::UserNotFound) => {
                ApiError::InvalidToken
            }
            EnableTwoFactorError::UserStoreError(e) => e.into(),
            EnableTwoFactorError::TwoFactorStoreError(e) => e.into(),
            EnableTwoFactorError::TotpEngineError(e) => e.into(),
            EnableTwoFactorError::EmailError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<VerifyEnableError> for ApiError {
    fn from(error: VerifyEnableError) -> Self {
        match error {
            VerifyEnableError::NotConfigured => ApiError::NotConfigured,
            VerifyEnableError::Expired => ApiError::Expired,
            VerifyEnableError::InvalidCode => ApiError::InvalidCode,
            VerifyEnableError::TwoFactorStoreError(e) => e.into(),
            VerifyEnableError::TotpEngineError(e) => e.into(),
        }
    }
}

impl From<VerifyLoginCodeError> for ApiError {
    fn from(error: VerifyLoginCodeError) -> Self {
        match error {
            VerifyLoginCodeError::NotEnabled => ApiError::NotEnabled,
            VerifyLoginCodeError::OtpJustSent => ApiError::OtpJustSent,
            VerifyLoginCodeError::InvalidCode => ApiError::InvalidCode,
            VerifyLoginCodeError::TwoFactorStoreError(e) => e.into(),
            VerifyLoginCodeError::TotpEngineError(e) => e.into(),
            VerifyLoginCodeError::EmailError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<SendEmailOtpError> for ApiError {
    fn from(error: SendEmailOtpError) -> Self {
        match error {
            SendEmailOtpError::NotConfigured => ApiError::NotConfigured,
            SendEmailOtpError::UserStoreError(e) => e.into(),
            SendEmailOtpError::TwoFactorStoreError(e) => e.into(),
            SendEmailOtpError::EmailError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<DisableTwoFactorError> for ApiError {
    fn from(error: DisableTwoFactorError) -> Self {
        match error {
            DisableTwoFactorError::InvalidPassword => ApiError::InvalidPassword,
            DisableTwoFactorError::NotConfigured => ApiError::NotConfigured,
            DisableTwoFactorError::UserStoreError(e) => e.into(),
            DisableTwoFactorError::TwoFactorStoreError(e) => e.into(),
        }
    }
}
