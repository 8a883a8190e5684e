use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use serde::{Deserialize, Serialize};
use twofold_application::VerifyEnableUseCase;
use twofold_core::{TotpEngine, TwoFactorStore};

use crate::authentication::TokenIssuer;
use crate::http::authenticate_session;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyEnableRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[tracing::instrument(name = "Verify enable two-factor", skip_all)]
pub async fn verify_enable<T, G>(
    State((two_factor_store, totp_engine, token_issuer)): State<(T, G, TokenIssuer)>,
    headers: HeaderMap,
    Json(request): Json<VerifyEnableRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    T: TwoFactorStore + Clone + 'static,
    G: TotpEngine + Clone + 'static,
{
    let claims = authenticate_session(&headers, &token_issuer)?;
    let user_id = claims.user_id()?;

    let use_case = VerifyEnableUseCase::new(two_factor_store, totp_engine);
    use_case.execute(user_id, &request.code).await?;

    Ok(Json(MessageBody {
        message: "Two-factor authentication enabled successfully".to_string(),
    }))
}
