use secrecy::{ExposeSecret, Secret};

/// Base32-encoded shared secret for an authenticator app.
///
/// Exposed once at enrollment so the user can type it in manually; treated
/// as a secret everywhere else.
#[derive(Debug, Clone)]
pub struct TotpSecret(Secret<String>);

impl TotpSecret {
    pub fn new(base32: Secret<String>) -> Self {
        Self(base32)
    }

    pub fn expose_base32(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for TotpSecret {
    fn from(base32: String) -> Self {
        Self(Secret::from(base32))
    }
}

impl PartialEq for TotpSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
