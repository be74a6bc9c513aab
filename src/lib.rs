pub mod config;
pub mod error;
pub mod observability;
pub mod pipeline;
pub mod server;
pub mod state;
pub mod tabular;

pub use config::Config;
pub use error::AppError;
pub use pipeline::{process_files, InputFile, ProcessRequest, ProcessedArchive};
pub use state::AppState;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Initializes logging and serves HTTP until shutdown.
pub async fn run(config: Config) -> std::io::Result<()> {
    observability::init_logging(config.log_format);

    match config.api_key {
        None => tracing::warn!("API_KEY is empty; /process accepts unauthenticated requests"),
        Some(_) if config.uses_default_api_key() => {
            tracing::warn!("API_KEY not set; using the built-in placeholder secret")
        }
        Some(_) => {}
    }

    server::serve(config).await
}
