use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use serde::{Deserialize, Serialize};
use twofold_application::TwoFactorStatusUseCase;
use twofold_core::{TwoFactorMethod, TwoFactorStore};

use crate::authentication::TokenIssuer;
use crate::http::authenticate_session;

use super::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub is_enabled: bool,
    pub method: Option<TwoFactorMethod>,
}

#[tracing::instrument(name = "Two-factor status", skip_all)]
pub async fn status<T>(
    State((two_factor_store, token_issuer)): State<(T, TokenIssuer)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    T: TwoFactorStore + Clone + 'static,
{
    let claims = authenticate_session(&headers, &token_issuer)?;
    let user_id = claims.user_id()?;

    let use_case = TwoFactorStatusUseCase::new(two_factor_store);
    let status = use_case.execute(user_id).await?;

    Ok(Json(StatusBody {
        is_enabled: status.is_enabled,
        method: status.method,
    }))
}
