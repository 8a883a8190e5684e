use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};
use thiserror::Error;
use twofold_core::{User, UserId};

/// Signing secret and lifetimes for the two token classes. Injected at
/// construction so business logic never reads ambient environment.
#[derive(Clone)]
pub struct TokenConfig {
    pub jwt_secret: Secret<String>,
    /// Full session lifetime, 7 days by default.
    pub session_ttl_seconds: i64,
    /// Pending-auth lifetime, 10 minutes by default.
    pub pending_ttl_seconds: i64,
}

impl TokenConfig {
    pub fn new(jwt_secret: Secret<String>) -> Self {
        Self {
            jwt_secret,
            session_ttl_seconds: 60 * 60 * 24 * 7,
            pending_ttl_seconds: 60 * 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Single outcome for every verification failure - signature, expiry,
    /// shape, or wrong trust level. Callers cannot tell them apart.
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Shared payload of both token classes. `requires_otp` is the trust level:
/// true marks a pending-auth token that only authorizes OTP verification,
/// false a full session.
#[derive(Debug, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: Secret<String>,
    pub requires_otp: bool,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        UserId::parse(&self.sub).map_err(|_| TokenError::InvalidToken)
    }
}

impl Serialize for Claims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Claims", 4)?;
        state.serialize_field("sub", &self.sub)?;
        state.serialize_field("email", &self.email.expose_secret())?;
        state.serialize_field("requires_otp", &self.requires_otp)?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}

/// Mints and validates the signed, self-contained bearer tokens. Stateless:
/// expiry is the only revocation mechanism.
#[derive(Clone)]
pub struct TokenIssuer {
    config: TokenConfig,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Full-access token, issued after a completed authentication.
    pub fn issue_session(&self, user: &User) -> Result<String, TokenError> {
        self.issue(user, false, self.config.session_ttl_seconds)
    }

    /// Short-lived token issued after the password check when 2FA is
    /// enabled. Authorizes only OTP-verification calls.
    pub fn issue_pending(&self, user: &User) -> Result<String, TokenError> {
        self.issue(user, true, self.config.pending_ttl_seconds)
    }

    fn issue(&self, user: &User, requires_otp: bool, ttl_seconds: i64) -> Result<String, TokenError> {
        let delta = chrono::Duration::try_seconds(ttl_seconds).ok_or(
            TokenError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let exp: usize = exp
            .try_into()
            .map_err(|_| TokenError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

        let claims = Claims {
            sub: user.id().to_string(),
            email: user.email().as_ref().clone(),
            requires_otp,
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )
        .map_err(|e| TokenError::UnexpectedError(e.to_string()))
    }

    /// Checks signature and expiry. Fails closed: every failure collapses
    /// into the same `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::InvalidToken)
    }

    /// `verify` plus the pending trust level. A session token presented
    /// here is just as invalid as a forged one.
    pub fn verify_pending(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        if !claims.requires_otp {
            return Err(TokenError::InvalidToken);
        }
        Ok(claims)
    }

    /// `verify` plus the full-session trust level.
    pub fn verify_session(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        if claims.requires_otp {
            return Err(TokenError::InvalidToken);
        }
        Ok(claims)
    }

    /// Reads the payload without signature or expiry checks. Only for flows
    /// that never grant privileged results from the decoded claims, such as
    /// the email-OTP resend keyed by a pending token.
    pub fn decode_unverified(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .ok()
    }

    fn secret_bytes(&self) -> &[u8] {
        self.config.jwt_secret.expose_secret().as_bytes()
    }
}
