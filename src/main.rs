use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use premed_rag::connector::http::start_server;
use premed_rag::{AppConfig, Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "premed-rag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use deterministic offline embeddings; no API key needed
    #[arg(long, global = true)]
    mock_embeddings: bool,

    /// Keep vectors in process memory instead of Qdrant
    #[arg(long, global = true)]
    memory_storage: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut app = AppConfig::from_env(!cli.mock_embeddings)?;

    if let Commands::Serve { host, port } = &cli.command {
        if let Some(host) = host {
            app.server_host = host.clone();
        }
        if let Some(port) = port {
            app.server_port = *port;
        }
    }

    let container = Container::new(ContainerConfig {
        app,
        mock_embeddings: cli.mock_embeddings,
        memory_storage: cli.memory_storage,
    })
    .await?;

    match cli.command {
        Commands::Serve { .. } => {
            let addr = container.config().server_addr();
            info!(
                "Starting PreMed RAG API on {} (collection {})",
                addr,
                container.collection_name()
            );
            start_server(Arc::new(container), &addr).await
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
            Ok(())
        }
    }
}
