use anyhow::{Context, Result};
use clap::Parser;
use object_undelete::{
    app::{UndeleteConfig, create_app},
    domain::value_objects::DEFAULT_TRASH_PREFIX,
    InMemoryBackend,
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "undelete-server")]
#[command(about = "Object storage server that keeps a trash copy of deleted objects", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Prefix prepended to a container name to form its trash container
    #[arg(long, env = "UNDELETE_TRASH_PREFIX", default_value = DEFAULT_TRASH_PREFIX)]
    trash_prefix: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_undelete_config(&self) -> UndeleteConfig {
        UndeleteConfig::new(self.trash_prefix.clone())
    }

    fn init_logging(&self) -> Result<()> {
        let level = LevelFilter::from_str(&self.log_level)
            .with_context(|| format!("Unknown log level: {}", self.log_level))?;

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(level)
            .init();

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting undelete server");
    info!("Trash prefix: {}", cli.trash_prefix);

    let config = cli.to_undelete_config();
    let router = create_app(Arc::new(InMemoryBackend::new()), &config)
        .context("Failed to build application")?
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
