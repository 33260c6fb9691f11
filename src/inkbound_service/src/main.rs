use inkbound_adapters::{
    Argon2PasswordHasher, HttpMediaClient, JwtConfig, PostgresComicStore, PostgresUserStore,
    PostgresVerificationStore, PostmarkEmailClient, Settings,
};
use inkbound_core::Email;
use inkbound_service::{tracing as service_tracing, ComicService};
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    service_tracing::init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let config = Settings::load()?;

    // Setup database connection pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.postgres.url.expose_secret())
        .await?;

    // Run migrations
    sqlx::migrate!().run(&pg_pool).await?;

    // Create stores
    let user_store = PostgresUserStore::new(pg_pool.clone());
    let token_store = PostgresVerificationStore::new(pg_pool.clone());
    let comic_store = PostgresComicStore::new(pg_pool);

    let password_hasher = Argon2PasswordHasher;

    // Create external-service clients
    let email_http_client = HttpClient::builder()
        .timeout(config.email_client.timeout())
        .build()?;
    let email_client = PostmarkEmailClient::new(
        config.email_client.base_url.clone(),
        Email::try_from(Secret::from(config.email_client.sender.clone()))?,
        config.email_client.auth_token.clone(),
        email_http_client,
    );

    let media_http_client = HttpClient::builder()
        .timeout(config.media_client.timeout())
        .build()?;
    let media_client = HttpMediaClient::new(
        config.media_client.base_url.clone(),
        config.media_client.api_key.clone(),
        media_http_client,
    );

    // Signing configuration, validated before anything listens
    let jwt_config = JwtConfig {
        access_secret: config.auth.jwt.secret.clone(),
        refresh_secret: config.auth.jwt.refresh_secret.clone(),
        token_ttl_seconds: config.auth.jwt.token_ttl_seconds,
        require_distinct_secrets: config.auth.jwt.require_distinct_secrets,
    };
    jwt_config.validate()?;

    let service = ComicService::new(
        user_store,
        token_store,
        comic_store.clone(),
        comic_store,
        password_hasher,
        email_client,
        media_client,
        jwt_config,
        config.application.base_url.clone(),
    );

    let listener = tokio::net::TcpListener::bind(config.application.address()).await?;
    tracing::info!("Comic service listening on {}", listener.local_addr()?);

    service
        .run_standalone(listener, config.application.allowed_origins.clone())
        .await?;

    Ok(())
}
