use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use twofold_adapters::{
    TokenIssuer,
    config::AllowedOrigins,
    http::routes::{
        disable, enable, login, send_email_otp, signup, status, verify_enable, verify_otp,
    },
};
use twofold_core::{EmailClient, TotpEngine, TwoFactorStore, UserStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main two-factor authentication service exposing the full HTTP surface
pub struct TwofoldService {
    router: Router,
}

impl TwofoldService {
    /// Create a new TwofoldService from the provided stores and capabilities
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal Arc<RwLock> for thread-safe
    /// sharing. Each route is given its specific state requirements,
    /// avoiding unnecessary cloning.
    pub fn new<U, T, E, G>(
        user_store: U,
        two_factor_store: T,
        email_client: E,
        totp_engine: G,
        token_issuer: TokenIssuer,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        T: TwoFactorStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        G: TotpEngine + Clone + 'static,
    {
        let router = Router::new()
            // Signup only needs the user store
            .route("/signup", post(signup::<U>))
            .with_state(user_store.clone())
            // Login needs everything but the TOTP engine
            .route("/login", post(login::<U, T, E>))
            .with_state((
                user_store.clone(),
                two_factor_store.clone(),
                email_client.clone(),
                token_issuer.clone(),
            ))
            // Verify OTP judges codes for both methods
            .route("/verify-otp", post(verify_otp::<U, T, E, G>))
            .with_state((
                user_store.clone(),
                two_factor_store.clone(),
                email_client.clone(),
                totp_engine.clone(),
                token_issuer.clone(),
            ))
            .route("/two-factor/enable", post(enable::<U, T, E, G>))
            .with_state((
                user_store.clone(),
                two_factor_store.clone(),
                email_client.clone(),
                totp_engine.clone(),
                token_issuer.clone(),
            ))
            .route("/two-factor/verify-enable", post(verify_enable::<T, G>))
            .with_state((
                two_factor_store.clone(),
                totp_engine,
                token_issuer.clone(),
            ))
            .route("/two-factor/disable", post(disable::<U, T>))
            .with_state((
                user_store.clone(),
                two_factor_store.clone(),
                token_issuer.clone(),
            ))
            .route("/two-factor/status", get(status::<T>))
            .with_state((two_factor_store.clone(), token_issuer.clone()))
            .route("/two-factor/send-email-otp", post(send_email_otp::<U, T, E>))
            .with_state((user_store, two_factor_store, email_client, token_issuer));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be nested into another
    /// application
    pub fn as_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_router(allowed_origins);

        tracing::info!("Twofold service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
