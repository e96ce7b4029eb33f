//! Wikiscout HTTP server
//!
//! Starts an Axum web server exposing the chat passthrough and the
//! Wikipedia-grounded research endpoint.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use wikiscout::{
    cli::{Cli, Command, generate_config_template},
    config::{ApiKey, Config},
    handlers, telemetry,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Template generation runs without a config file or API key
    if let Some(Command::Config { output }) = cli.command {
        match output {
            Some(path) => {
                std::fs::write(&path, generate_config_template())?;
                println!("Wrote configuration template to {}", path);
            }
            None => print!("{}", generate_config_template()),
        }
        return Ok(());
    }

    // Load configuration
    let config = Config::from_file(&cli.config)?;

    // Initialize telemetry
    telemetry::init(&config.observability.log_level);

    // A missing API key refuses startup, it never degrades silently
    let api_key = ApiKey::from_env()?;

    tracing::info!(
        "Starting Wikiscout server on {}:{}",
        config.server.host,
        config.server.port
    );

    // Create socket address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([127, 0, 0, 1])),
        config.server.port,
    ));

    // Build router over the real collaborators
    let state = handlers::AppState::new(Arc::new(config), api_key)?;
    let app = handlers::router(state);

    tracing::info!("Listening on {}", addr);
    tracing::info!("Research endpoint available at http://{}/research", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
