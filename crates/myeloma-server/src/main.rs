use myeloma_engine::Engine;
use myeloma_server::config::{LogFormat, ServerConfig};
use myeloma_server::state::AppState;
use myeloma_storage::MemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServerConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let store = match &config.data_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "opening snapshot store");
            MemoryStore::open(path)?
        }
        None => {
            tracing::info!("no MYELOMA_DATA_PATH set, records are kept in memory only");
            MemoryStore::new()
        }
    };

    let app = myeloma_server::router(AppState::new(Engine::new(store)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
