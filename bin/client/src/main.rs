use cito_client::{ClientConfig, relay_lines};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env().expect("failed to load configuration");

    match relay_lines(BufReader::new(tokio::io::stdin()), &config).await {
        Ok(summary) => tracing::info!(sent = summary.sent, "done"),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
