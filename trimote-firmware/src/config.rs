//! Configuration loading
//!
//! The configuration is compiled in from trimote.toml. A file that fails to
//! parse or validate falls back to the built-in defaults.

use defmt::*;

use trimote_core::config::{parse_config, ControllerConfig};

/// Embedded configuration (validated by build.rs)
const EMBEDDED_CONFIG: &str = include_str!("../trimote.toml");

/// Parse and validate the embedded configuration
pub fn load_config() -> ControllerConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            return ControllerConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Embedded config rejected: {:?}", e);
        error!("Using built-in defaults");
        return ControllerConfig::default();
    }

    log_config_summary(&config);
    config
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ControllerConfig) {
    info!("Configuration loaded successfully");
    debug!(
        "  tick {} us, heartbeat every {} ticks, wrap at {}",
        config.timer.tick_period_us,
        config.timer.heartbeat_period_ticks,
        config.timer.reset_horizon_ticks
    );
    debug!(
        "  {} speeds, default index {}",
        config.speed.table.len(),
        config.speed.default_index
    );
    debug!("  {} peers", config.peers.len());
}
