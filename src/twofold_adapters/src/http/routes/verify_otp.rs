use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use twofold_application::VerifyLoginCodeUseCase;
use twofold_core::{EmailClient, TotpEngine, TwoFactorStore, UserStore, UserStoreError};

use crate::authentication::TokenIssuer;

use super::{UserBody, error::ApiError, login::SessionBody};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub pending_token: String,
    pub code: String,
}

/// Completes a 2FA-gated login: full verification of the pending token,
/// then the submitted code, then a session token.
#[tracing::instrument(name = "Verify OTP", skip_all)]
pub async fn verify_otp<U, T, E, G>(
    State((user_store, two_factor_store, email_client, totp_engine, token_issuer)): State<(
        U,
        T,
        E,
        G,
        TokenIssuer,
    )>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TwoFactorStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    G: TotpEngine + Clone + 'static,
{
    let claims = token_issuer.verify_pending(&request.pending_token)?;
    let user_id = claims.user_id()?;

    // A subject that no longer resolves is indistinguishable from a bad
    // token on the outside
    let user = user_store.get_user(user_id).await.map_err(|e| match e {
        UserStoreError::UserNotFound => ApiError::InvalidToken,
        other => other.into(),
    })?;

    let use_case = VerifyLoginCodeUseCase::new(two_factor_store, email_client, totp_engine);
    use_case.execute(&user, &request.code).await?;

    let session_token = token_issuer.issue_session(&user)?;

    Ok((
        StatusCode::OK,
        Json(SessionBody {
            requires_otp: false,
            session_token,
            user: UserBody::from(&user),
        }),
    ))
}
