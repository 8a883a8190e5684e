use secrecy::ExposeSecret;
use totp_rs::{Algorithm, Secret, TOTP};

use twofold_core::{Email, TotpEngine, TotpEngineError, TotpSecret, TotpSetup};

const DIGITS: usize = 6;
const STEP_SECONDS: u64 = 30;
/// Steps accepted before/after the current one. Six 30-second steps each
/// side gives the 3-minute clock-skew tolerance authenticator apps expect
/// from this service.
const SKEW_STEPS: u8 = 6;

/// RFC 6238 TOTP engine backed by the `totp-rs` crate (SHA1, 6 digits,
/// 30-second step - the parameters every mainstream authenticator app
/// defaults to).
#[derive(Clone)]
pub struct TotpRsEngine {
    issuer: String,
}

impl TotpRsEngine {
    pub fn new(issuer: String) -> Self {
        Self { issuer }
    }

    fn totp(&self, secret: &TotpSecret, account_name: String) -> Result<TOTP, TotpEngineError> {
        let secret_bytes = Secret::Encoded(secret.expose_base32().to_string())
            .to_bytes()
            .map_err(|_| TotpEngineError::InvalidSecret)?;

        TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW_STEPS,
            STEP_SECONDS,
            secret_bytes,
            Some(self.issuer.clone()),
            account_name,
        )
        .map_err(|e| TotpEngineError::UnexpectedError(e.to_string()))
    }
}

impl TotpEngine for TotpRsEngine {
    fn provision(&self, account: &Email) -> Result<TotpSetup, TotpEngineError> {
        let secret = TotpSecret::from(Secret::generate_secret().to_encoded().to_string());

        let totp = self.totp(&secret, account.as_ref().expose_secret().clone())?;

        let provisioning_uri = totp.get_url();
        let qr_code = totp
            .get_qr_base64()
            .map(|png| format!("data:image/png;base64,{png}"))
            .map_err(TotpEngineError::UnexpectedError)?;

        Ok(TotpSetup {
            secret,
            provisioning_uri,
            qr_code,
        })
    }

    fn verify(&self, secret: &TotpSecret, code: &str) -> Result<bool, TotpEngineError> {
        // Account name plays no part in code verification
        let totp = self.totp(secret, String::new())?;

        totp.check_current(code)
            .map_err(|e| TotpEngineError::UnexpectedError(e.to_string()))
    }
}
