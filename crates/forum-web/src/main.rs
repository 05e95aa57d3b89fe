//! Forum server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p forum-web
//! ```
//!
//! Configuration is loaded from environment variables (a `.env` file is honoured).

use forum_common::{init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first; it picks the log format
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        "Configuration loaded"
    );

    // Run the server
    if let Err(e) = forum_web::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
