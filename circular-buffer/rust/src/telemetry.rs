use anyhow::Result;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs a stderr fmt subscriber, stdout is reserved for the retained lines
pub(crate) fn init(log_level: &str) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(EnvFilter::try_new(log_level)?)
        .try_init()?;

    info!("telemetry initialized");
    Ok(())
}
