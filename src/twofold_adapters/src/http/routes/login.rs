use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use twofold_application::{LoginResponse, LoginUseCase};
use twofold_core::{Email, EmailClient, Password, TwoFactorMethod, TwoFactorStore, UserStore};

use crate::authentication::TokenIssuer;

use super::{UserBody, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Completed login: the session token grants full access.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBody {
    pub requires_otp: bool,
    pub session_token: String,
    pub user: UserBody,
}

/// Partial login: only `/verify-otp` will accept the pending token.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBody {
    pub requires_otp: bool,
    pub pending_token: String,
    pub method: TwoFactorMethod,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, T, E>(
    State((user_store, two_factor_store, email_client, token_issuer)): State<(
        U,
        T,
        E,
        TokenIssuer,
    )>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TwoFactorStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(user_store, two_factor_store, email_client);
    let login_response = use_case.execute(email, password).await?;

    match login_response {
        LoginResponse::Success(user) => {
            let session_token = token_issuer.issue_session(&user)?;

            let body = SessionBody {
                requires_otp: false,
                session_token,
                user: UserBody::from(&user),
            };
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        LoginResponse::RequiresOtp { user, method } => {
            let pending_token = token_issuer.issue_pending(&user)?;

            let body = PendingBody {
                requires_otp: true,
                pending_token,
                method,
            };
            Ok((StatusCode::PARTIAL_CONTENT, Json(body)).into_response())
        }
    }
}
