//! Battery host
//!
//! Serves the battery method channel to an application shell over stdio.
//!
//! Startup sequence:
//! 1. Load configuration
//! 2. Initialize logging (stderr, stdout carries the channel)
//! 3. Locate the battery power supply
//! 4. Register the battery handler and serve calls until EOF

mod serve;

use anyhow::{Context, Result};
use battery_channel::{BatteryLevelHandler, MethodChannel};
use battery_config::{ConfigSource, HostConfig};
use battery_hal::{BatteryLevelProvider, PowerSupply};
use std::io;
use tracing::{debug, info, warn};

fn main() -> Result<()> {
    let (config, source) = HostConfig::load_default().context("Failed to load configuration")?;

    setup_logging(&config.logging.level);

    match &source {
        ConfigSource::Defaults => warn!("No configuration file found, using defaults"),
        source => info!("Configuration loaded from {}", source),
    }
    info!("Battery host starting on channel {}", config.channel.name);

    let supply = match &config.power.battery_path {
        Some(path) => PowerSupply::at_path(path),
        None => PowerSupply::with_root(&config.power.power_supply_root),
    };
    debug!(
        "Initial reading: {:?}, status {}",
        supply.battery_level(),
        supply.status().as_str()
    );

    let mut channel = MethodChannel::new(config.channel.name.clone());
    channel.set_method_call_handler(BatteryLevelHandler::new(supply));

    let stdin = io::stdin();
    let stats = serve::serve(&channel, stdin.lock(), io::stdout().lock())
        .context("Channel transport failed")?;

    info!(
        "Input closed after {} calls ({} malformed)",
        stats.handled + stats.malformed,
        stats.malformed
    );
    Ok(())
}

fn setup_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(io::stderr),
        )
        .init();
}
