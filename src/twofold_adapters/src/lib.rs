pub mod authentication;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
pub mod totp;

pub use authentication::{Claims, TokenConfig, TokenError, TokenIssuer};
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use persistence::{HashMapTwoFactorStore, HashMapUserStore};
pub use totp::TotpRsEngine;
