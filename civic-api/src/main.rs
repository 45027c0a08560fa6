use clap::Parser;
use tracing::debug;

use civic_api::config::Settings;
use civic_api::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let settings = Settings::parse();
    debug!(
        backend = %settings.backend,
        environment = ?settings.environment,
        "starting civic-api"
    );

    civic_api::run(settings).await
}
