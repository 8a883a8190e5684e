use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use twofold_application::SignupUseCase;
use twofold_core::{Email, Password, UserStore};

use super::{UserBody, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserBody,
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U>(
    State(user_store): State<U>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = SignupUseCase::new(user_store);
    let user = use_case
        .execute(email, password, request.display_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully".to_string(),
            user: UserBody::from(&user),
        }),
    ))
}
