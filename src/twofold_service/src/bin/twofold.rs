use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use twofold_adapters::{
    HashMapTwoFactorStore, HashMapUserStore, PostmarkEmailClient, TokenIssuer, TotpRsEngine,
    authentication::TokenConfig, config::Settings,
};
use twofold_core::Email;
use twofold_service::TwofoldService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let config = Settings::load();

    // Create stores
    let user_store = HashMapUserStore::new();
    let two_factor_store = HashMapTwoFactorStore::new();

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(config.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        config.email_client.base_url.clone(),
        Email::try_from(Secret::from(config.email_client.sender.clone()))?,
        config.email_client.auth_token.clone(),
        http_client,
    );

    // Create the TOTP engine and token issuer
    let totp_engine = TotpRsEngine::new(config.totp.issuer.clone());
    let token_issuer = TokenIssuer::new(TokenConfig {
        jwt_secret: config.auth.jwt_secret.clone(),
        session_ttl_seconds: config.auth.session_ttl_seconds,
        pending_ttl_seconds: config.auth.pending_ttl_seconds,
    });

    let service = TwofoldService::new(
        user_store,
        two_factor_store,
        email_client,
        totp_engine,
        token_issuer,
    );

    let allowed_origins = config.app.allowed_origins.clone();

    let listener = tokio::net::TcpListener::bind(&config.app.address).await?;
    tracing::info!("Starting twofold service...");

    service.run(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
