/// `load_config` module: reads the repos YAML file and turns it into a validated
/// [`AggregateConfig`].
///
/// This is the only place the CLI touches the configuration file. Decoding of loosely
/// shaped entries and validation live in the core crate; this layer adds file context
/// to every failure so the operator sees which file was wrong.
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use docs_aggregator_core::config::AggregateConfig;
use tracing::{error, info};

/// Loads, parses and validates the configuration file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AggregateConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(e).with_context(|| format!("Failed to read config file {}", path_ref.display()));
        }
    };

    let config = match AggregateConfig::from_yaml_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = %e, config_path = ?path_ref, "Failed to load config YAML");
            return Err(e).with_context(|| format!("Invalid config file {}", path_ref.display()));
        }
    };

    config.trace_loaded();
    Ok(config)
}
