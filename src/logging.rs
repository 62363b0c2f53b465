use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Console logging filtered by `level` (a `RUST_LOG` style directive).
pub fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()?;

    Ok(())
}
