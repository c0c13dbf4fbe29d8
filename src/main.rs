use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use job_radar::routes::{create_page_router, create_proxy_router};
use job_radar::{config::Config, proxy, utils::init_logger, AppState};

#[derive(Parser)]
#[command(name = "job-radar", about = "Careerjet job board and JSON proxy")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the rendered job board (default)
    Serve,
    /// Serve the JSON proxy over HTTP
    Proxy,
    /// Run the proxy function once and print its response envelope
    Invoke {
        /// Event JSON file; read from stdin when omitted
        #[arg(long)]
        event: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    let state = AppState::new(config.clone())?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, create_page_router(state)).await,
        Command::Proxy => serve(&config, create_proxy_router(state)).await,
        Command::Invoke { event } => {
            let event = read_event(event)?;
            let response = proxy::handle(&state.api, &event).await;
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
    }
}

async fn serve(config: &Config, app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.server.host, config.server.port))?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

fn read_event(path: Option<PathBuf>) -> anyhow::Result<serde_json::Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };

    if raw.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(&raw).context("Event is not valid JSON")
}
