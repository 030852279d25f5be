use anyhow::Result;
use clap::Parser;
use job_tracker::cli::{handle_command, Cli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so terminal sessions and CLI output stay readable
    Registry::default()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_tracker=info,rocket=warn")),
        )
        .init();

    let cli = Cli::parse();
    handle_command(cli).await
}
