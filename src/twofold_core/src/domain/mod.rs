pub mod backup_code;
pub mod email;
pub mod otp_code;
pub mod password;
pub mod totp_secret;
pub mod two_factor_record;
pub mod user;
