// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use ecoquest::config::Config;
use ecoquest::generator::{OpenAiGenerator, SharedGenerator, seed_store};
use ecoquest::routes;
use ecoquest::state::AppState;
use ecoquest::storage::{MemoryStore, PgStore, SharedStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env included)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let store: SharedStore = match &config.database_url {
        Some(url) => Arc::new(PgStore::connect(url).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
            Arc::new(MemoryStore::new())
        }
    };

    let generator: Option<SharedGenerator> = match OpenAiGenerator::from_config(&config) {
        Some(generator) => {
            tracing::info!(model = %config.openai_model, "Content generation enabled");
            Some(Arc::new(generator))
        }
        None => {
            tracing::info!("OPENAI_API_KEY not set, generation uses the built-in catalog");
            None
        }
    };

    if config.seed_on_startup {
        if let Err(e) = seed_store(store.as_ref(), config.content_rng_seed).await {
            tracing::error!("Failed to seed initial data: {}", e);
        }
    }

    let state = AppState {
        store,
        generator,
        config: config.clone(),
    };

    let app = routes::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
