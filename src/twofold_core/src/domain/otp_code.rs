use chrono::{DateTime, Utc};
use rand::Rng;

/// Six-digit numeric one-time code delivered out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draws uniformly from the full six-digit range. `rand::rng()` is a
    /// CSPRNG, which these codes require.
    pub fn generate() -> Self {
        let code = rand::rng().random_range(100_000..=999_999);
        Self(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verbatim comparison against a submitted code string.
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

/// An issued email OTP together with its validity deadline. Stored on the
/// user's two-factor record and cleared after use or replaced on re-issue.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOtp {
    code: OtpCode,
    expires_at: DateTime<Utc>,
}

impl PendingOtp {
    pub fn new(code: OtpCode, expires_at: DateTime<Utc>) -> Self {
        Self { code, expires_at }
    }

    /// Issues a fresh code valid for `ttl_seconds` from now.
    pub fn issue(ttl_seconds: i64) -> Self {
        Self {
            code: OtpCode::generate(),
            expires_at: Utc::now() + chrono::Duration::seconds(ttl_seconds),
        }
    }

    pub fn code(&self) -> &OtpCode {
        &self.code
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
