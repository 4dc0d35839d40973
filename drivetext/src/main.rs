use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drivetext::api::{create_router, AppState};
use drivetext::config::Config;

#[derive(Parser)]
#[command(name = "drivetext")]
#[command(about = "Extracts plain text from OneDrive documents for vectorization")]
struct Args {
    /// Override the listen port from the environment
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drivetext=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.graph.client_id.is_empty() {
        tracing::warn!(
            "GRAPH_CLIENT_ID is not set; requests must carry their own access token"
        );
    }

    let state = AppState::from_config(&config);
    let app = create_router(state);

    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.host, port);
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
