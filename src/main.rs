//! Community Path server.
//!
//! Loads configuration from the environment, wires the adapters into the
//! application handlers and serves the HTTP API.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use community_path::adapters::ai::{
    GeminiConfig, GeminiLanguageModel, OfflineLanguageModel, RetryingLanguageModel,
};
use community_path::adapters::http::{api_router, GenerateHandlers, SessionHandlers};
use community_path::adapters::storage::{FileDocumentStore, InMemoryDocumentStore};
use community_path::application::{GenerateTextHandler, SessionRegistry, SessionStoreAdapter};
use community_path::config::{AiConfig, AppConfig, ServerConfig, StorageBackend, StorageConfig};
use community_path::domain::conversation::ConversationMachine;
use community_path::domain::scaffolding::{InterventionPolicy, RandomPicker};
use community_path::ports::{DocumentStore, LanguageModel, SystemClock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    if let Err(err) = config.validate() {
        error!(error = %err, "Invalid configuration");
        return Err(err.into());
    }

    let model = build_model(&config.ai);
    let machine = Arc::new(ConversationMachine::new(
        model.clone(),
        InterventionPolicy::new(config.conversation.thresholds()),
        Arc::new(RandomPicker),
        Arc::new(SystemClock),
    ));
    let store = Arc::new(SessionStoreAdapter::new(build_store(&config.storage)));

    let sessions = SessionHandlers::wire(machine, store, SessionRegistry::new());
    let generate = GenerateHandlers::new(Arc::new(GenerateTextHandler::new(model)));
    let app = api_router(sessions, generate, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await.map_err(|err| {
        error!(error = %err, %addr, "Failed to bind");
        err
    })?;
    info!(%addr, environment = ?config.server.environment, "Community Path listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            error!(error = %err, "Server error");
            err
        })?;

    info!("Server stopped");
    Ok(())
}

/// JSON logs in production, compact logs elsewhere. `RUST_LOG` overrides
/// the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}

fn build_model(ai: &AiConfig) -> Arc<dyn LanguageModel> {
    let Some(key) = ai.api_key() else {
        warn!("No Gemini API key configured, model replies will use fallbacks");
        return Arc::new(OfflineLanguageModel);
    };

    let gemini = GeminiLanguageModel::new(
        GeminiConfig::new(key)
            .with_model(ai.model.clone())
            .with_base_url(ai.base_url.clone())
            .with_timeout(ai.timeout()),
    );
    info!(model = %ai.model, "Using Gemini");
    Arc::new(
        RetryingLanguageModel::new(Arc::new(gemini))
            .with_max_attempts(ai.max_attempts)
            .with_initial_backoff(ai.initial_backoff()),
    )
}

fn build_store(storage: &StorageConfig) -> Arc<dyn DocumentStore> {
    match storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory session storage, sessions are lost on restart");
            Arc::new(InMemoryDocumentStore::new())
        }
        StorageBackend::File => {
            info!(data_dir = %storage.data_dir.display(), "Using file session storage");
            Arc::new(FileDocumentStore::new(&storage.data_dir))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
