pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    backup_code::BackupCode,
    email::Email,
    otp_code::{OtpCode, PendingOtp},
    password::Password,
    totp_secret::TotpSecret,
    two_factor_record::{TwoFactorMethod, TwoFactorRecord},
    user::{User, UserError, UserId},
};

pub use ports::{
    repositories::{TwoFactorStore, TwoFactorStoreError, UserStore, UserStoreError},
    services::{EmailClient, TotpEngine, TotpEngineError, TotpSetup},
};
