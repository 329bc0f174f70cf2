use clipboard_core::{Store, StoreConfig};
use clipboard_server::serve;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipboard_server=info,clipboard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration from environment variables
    let host = std::env::var("CLIPBOARD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("CLIPBOARD_PORT").unwrap_or_else(|_| "8080".to_string());
    let ttl_secs: u64 = std::env::var("CLIPBOARD_TTL_SECS")
        .unwrap_or_else(|_| "86400".to_string())
        .parse()
        .unwrap_or(86400);
    let sweep_secs: u64 = std::env::var("CLIPBOARD_SWEEP_INTERVAL_SECS")
        .unwrap_or_else(|_| "3600".to_string())
        .parse()
        .unwrap_or(3600);

    // Create the store with configuration
    let config = StoreConfig::default()
        .with_ttl(Duration::from_secs(ttl_secs))
        .with_sweep_interval(Duration::from_secs(sweep_secs));
    let store = Store::with_config(config);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Clipboard server listening on {}", addr);
    tracing::info!("   TTL: {}s, sweep interval: {}s", ttl_secs, sweep_secs);

    serve(listener, store).await
}
