use anyhow::{Context, Result};
use call_intent::{create_router, AppState, BatchPipeline, Config};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "call-intent", version, about = "Extract customer intent from call transcriptions")]
struct Cli {
    /// Config file (extension optional; missing file means defaults)
    #[arg(long, default_value = "config/call-intent")]
    config: String,

    /// Override the HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override the call IDs input file
    #[arg(long)]
    input: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Process the input file once and print the JSON report
    Process,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut cfg = Config::load(&cli.config)?;
    if let Some(port) = cli.port {
        cfg.service.http.port = port;
    }
    if let Some(input) = cli.input {
        cfg.input.call_ids_path = input;
    }

    info!("Loaded config: {}", cfg.service.name);

    let pipeline = BatchPipeline::from_config(&cfg)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg, pipeline).await,
        Command::Process => {
            let report = pipeline.process_batch().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

async fn serve(cfg: Config, pipeline: BatchPipeline) -> Result<()> {
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let app = create_router(AppState::new(pipeline, cfg.service.name.clone()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on {}", addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
