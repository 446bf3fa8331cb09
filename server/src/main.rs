use anyhow::Result;
use clap::Parser;
use jobmatch_server::{build_app, AppState};
use jobmatch_sources::{load_recommender, Settings};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let settings = Settings::from_env()?;
    let recommender = load_recommender(&settings).await?;
    tracing::info!(num_postings = recommender.postings().len(), "corpus fitted");

    let state = AppState::new(recommender, settings, std::env::var("ADMIN_TOKEN").ok());
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
