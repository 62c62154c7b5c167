use std::net::SocketAddr;

use anyhow::anyhow;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use voicenest_gateway::{ServerConfig, routes, state::AppState};

/// VoiceNest Gateway - empathetic voice companion server
#[derive(Parser, Debug)]
#[command(name = "voicenest-gateway")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Override the listen host
    #[arg(long = "host")]
    host: Option<String>,

    /// Override the listen port
    #[arg(long = "port")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let address = config.address();
    info!("Starting server on {address}");

    // Create application state (process-wide collaborator clients)
    let app_state = AppState::new(config).await;

    let app = routes::api::create_api_router().with_state(app_state);

    // Parse socket address
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    println!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
