use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use twofold_application::DisableTwoFactorUseCase;
use twofold_core::{Password, TwoFactorStore, UserStore};

use crate::authentication::TokenIssuer;
use crate::http::authenticate_session;

use super::error::ApiError;
use super::verify_enable::MessageBody;

#[derive(Debug, Deserialize)]
pub struct DisableRequest {
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Disable two-factor", skip_all)]
pub async fn disable<U, T>(
    State((user_store, two_factor_store, token_issuer)): State<(U, T, TokenIssuer)>,
    headers: HeaderMap,
    Json(request): Json<DisableRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TwoFactorStore + Clone + 'static,
{
    let claims = authenticate_session(&headers, &token_issuer)?;
    let user_id = claims.user_id()?;

    let password = Password::try_from(request.password)?;

    let use_case = DisableTwoFactorUseCase::new(user_store, two_factor_store);
    use_case.execute(user_id, password).await?;

    Ok(Json(MessageBody {
        message: "Two-factor authentication disabled successfully".to_string(),
    }))
}
