use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tripmate::adapters::ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
use tripmate::adapters::auth::{GoogleConfig, GoogleIdentityVerifier, JwtTokenService};
use tripmate::adapters::http::{router, AppState, HttpSettings};
use tripmate::adapters::postgres;
use tripmate::config::AppConfig;
use tripmate::ports::{AIProvider, CompletionParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config);
    config.validate().context("Invalid configuration")?;

    info!(
        app = %config.server.app_name,
        environment = ?config.server.environment,
        "Starting TripMate API server"
    );

    let ai_provider: Arc<dyn AIProvider> = match OpenAIConfig::from_app_config(&config.ai) {
        Some(openai) => {
            info!(model = %config.ai.model, "Using OpenAI-compatible completion provider");
            Arc::new(OpenAIProvider::new(openai)?)
        }
        None => {
            warn!("OPENAI_API_KEY not set, assistant replies come from the mock provider");
            Arc::new(MockAIProvider::new())
        }
    };

    let tokens = Arc::new(JwtTokenService::from_config(&config.auth));
    let identity = Arc::new(GoogleIdentityVerifier::new(GoogleConfig::new(
        config.auth.google_client_id.clone(),
    ))?);

    let state = if config.database.is_in_memory() {
        warn!("Using in-memory storage, data is lost on restart");
        AppState::in_memory(ai_provider, tokens, identity)
    } else {
        let pool = postgres::connect(&config.database)
            .await
            .context("Failed to connect to the database")?;
        if config.database.run_migrations {
            postgres::migrate(&pool).await?;
        }
        AppState::postgres(pool, ai_provider, tokens, identity)
    };
    let state = state
        .with_completion(CompletionParams {
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
        })
        .with_channel_capacity(config.ai.channel_capacity);

    let app = router(state, HttpSettings::from_config(&config.server));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_logging(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
