use std::sync::Arc;

use auth::Authenticator;
use auth::EncryptedTokenMaker;
use bank_service::config::Config;
use bank_service::domain::user::service::UserService;
use bank_service::inbound::http::router::create_router;
use bank_service::outbound::repositories::InMemoryUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "bank-service",
        version = env!("CARGO_PKG_VERSION"),
        "Starting up"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_minutes = config.token.access_token_minutes,
        "Configuration ready"
    );

    // A key of the wrong length aborts startup here, not on the first request
    let token_maker = EncryptedTokenMaker::new(config.token.symmetric_key.as_bytes())?;
    let authenticator = Arc::new(Authenticator::new(Arc::new(token_maker)));

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let user_service = Arc::new(UserService::new(user_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(address = %http_address, "Listening for http traffic");

    let http_application = create_router(
        user_service,
        authenticator,
        config.token.access_token_duration(),
    );
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
