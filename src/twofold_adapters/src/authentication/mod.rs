pub mod token_issuer;

pub use token_issuer::{Claims, TokenConfig, TokenError, TokenIssuer};
