//! # Twofold - Two-Factor Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the twofold service components.
//! Use this crate to get access to the full two-factor authentication core in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `TwoFactorRecord`, `OtpCode`, etc.
//! - **Port traits**: `UserStore`, `TwoFactorStore`, `EmailClient`, `TotpEngine`
//! - **Use cases**: `LoginUseCase`, `VerifyLoginCodeUseCase`, `EnableTwoFactorUseCase`, etc.
//! - **Adapters**: `HashMapUserStore`, `HashMapTwoFactorStore`, `TokenIssuer`, `TotpRsEngine`,
//!   `PostmarkEmailClient`, etc.
//! - **Service**: `TwofoldService` - The main entry point for the HTTP surface

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use twofold_core::*;
}

// Re-export most commonly used core types at the root level
pub use twofold_core::{
    BackupCode, Email, OtpCode, Password, PendingOtp, TotpSecret, TwoFactorMethod,
    TwoFactorRecord, User, UserError, UserId,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use twofold_core::{
        EmailClient, TotpEngine, TotpEngineError, TotpSetup, TwoFactorStore, TwoFactorStoreError,
        UserStore, UserStoreError,
    };
}

// Re-export port traits at root level
pub use twofold_core::{
    EmailClient, TotpEngine, TotpEngineError, TotpSetup, TwoFactorStore, TwoFactorStoreError,
    UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use twofold_application::*;
}

// Re-export use cases at root level
pub use twofold_application::{
    DisableTwoFactorUseCase, EnableTwoFactorUseCase, LoginUseCase, SendEmailOtpUseCase,
    SignupUseCase, TwoFactorStatusUseCase, VerifyEnableUseCase, VerifyLoginCodeUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use twofold_adapters::*;
}

// Re-export common adapters at root level
pub use twofold_adapters::{
    HashMapTwoFactorStore, HashMapUserStore, MockEmailClient, PostmarkEmailClient, TokenIssuer,
    TotpRsEngine, authentication::TokenConfig,
};

// ============================================================================
// Service
// ============================================================================

/// Service composition
pub mod service {
    pub use twofold_service::*;
}

pub use twofold_service::TwofoldService;

// ============================================================================
// Key third-party re-exports
// ============================================================================

pub use secrecy::{ExposeSecret, Secret};
