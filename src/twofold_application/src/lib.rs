pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use use_cases::{
    disable_two_factor::{DisableTwoFactorError, DisableTwoFactorUseCase},
    enable_two_factor::{EnableResponse, EnableTwoFactorError, EnableTwoFactorUseCase},
    login::{LoginError, LoginResponse, LoginUseCase},
    send_email_otp::{SendEmailOtpError, SendEmailOtpUseCase},
    signup::{SignupError, SignupUseCase},
    two_factor_status::{TwoFactorStatus, TwoFactorStatusUseCase},
    verify_enable::{VerifyEnableError, VerifyEnableUseCase},
    verify_login_code::{VerifyLoginCodeError, VerifyLoginCodeUseCase},
};
