//! Axum route handlers, generic over the port traits. Each route receives
//! exactly the state it needs as a tuple supplied via `with_state`.

pub mod disable;
pub mod enable;
pub mod error;
pub mod login;
pub mod send_email_otp;
pub mod signup;
pub mod status;
pub mod verify_enable;
pub mod verify_otp;

pub use disable::disable;
pub use enable::enable;
pub use error::{ApiError, ErrorResponse};
pub use login::login;
pub use send_email_otp::send_email_otp;
pub use signup::signup;
pub use status::status;
pub use verify_enable::verify_enable;
pub use verify_otp::verify_otp;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use twofold_core::User;

/// Public profile shape returned next to freshly minted session tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserBody {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().as_ref().expose_secret().clone(),
            name: user.display_name().map(String::from),
        }
    }
}
