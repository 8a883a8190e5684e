pub mod routes;

use http::HeaderMap;

use crate::authentication::{Claims, TokenError, TokenIssuer};

/// Pulls the bearer credential out of the Authorization header and verifies
/// it as a full session token. Missing header, malformed scheme, and failed
/// verification all collapse into the same `InvalidToken` outcome.
pub fn authenticate_session(
    headers: &HeaderMap,
    token_issuer: &TokenIssuer,
) -> Result<Claims, TokenError> {
    let token = bearer_token(headers).ok_or(TokenError::InvalidToken)?;
    token_issuer.verify_session(token)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
