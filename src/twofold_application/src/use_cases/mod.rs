pub mod disable_two_factor;
pub mod enable_two_factor;
pub mod login;
pub mod send_email_otp;
pub mod signup;
pub mod two_factor_status;
pub mod verify_enable;
pub mod verify_login_code;
