use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use twofold_application::{EnableResponse, EnableTwoFactorUseCase};
use twofold_core::{EmailClient, TotpEngine, TwoFactorMethod, TwoFactorStore, UserStore};

use crate::authentication::TokenIssuer;
use crate::http::authenticate_session;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EnableRequest {
    pub method: TwoFactorMethod,
}

/// TOTP setup material, shown exactly once.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpEnableBody {
    pub method: TwoFactorMethod,
    pub secret: String,
    pub provisioning_uri: String,
    pub qr_code: String,
    pub backup_codes: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailEnableBody {
    pub method: TwoFactorMethod,
    pub message: String,
}

#[tracing::instrument(name = "Enable two-factor", skip_all)]
pub async fn enable<U, T, E, G>(
    State((user_store, two_factor_store, email_client, totp_engine, token_issuer)): State<(
        U,
        T,
        E,
        G,
        TokenIssuer,
    )>,
    headers: HeaderMap,
    Json(request): Json<EnableRequest>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TwoFactorStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    G: TotpEngine + Clone + 'static,
{
    let claims = authenticate_session(&headers, &token_issuer)?;
    let user_id = claims.user_id()?;

    let use_case =
        EnableTwoFactorUseCase::new(user_store, two_factor_store, email_client, totp_engine);
    let response = use_case.execute(user_id, request.method).await?;

    match response {
        EnableResponse::Totp {
            secret,
            provisioning_uri,
            qr_code,
            backup_codes,
        } => {
            let body = TotpEnableBody {
                method: TwoFactorMethod::Totp,
                secret: secret.expose_base32().to_string(),
                provisioning_uri,
                qr_code,
                backup_codes: backup_codes
                    .iter()
                    .map(|code| code.as_str().to_string())
                    .collect(),
            };
            Ok(Json(body).into_response())
        }
        EnableResponse::Email => {
            let body = EmailEnableBody {
                method: TwoFactorMethod::Email,
                message: "OTP sent to your email. Please verify to enable 2FA.".to_string(),
            };
            Ok(Json(body).into_response())
        }
    }
}
