// src/config/loader.rs

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{
    AwsSettings, DeployConfig, FileConfig, WaitSettings, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_WAIT_TIMEOUT_SECS,
};
use crate::config::validate::validate_request;
use crate::errors::{DeployError, Result};

/// Load the optional TOML tuning file.
///
/// This only deserializes; CLI layering and validation happen in [`resolve`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<FileConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        DeployError::Config(format!("reading config file at {}: {e}", path.display()))
    })?;
    let config: FileConfig = toml::from_str(&contents)?;
    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Build the run's [`DeployConfig`] from CLI flags layered over the file.
///
/// Required inputs come only from flags. For tuning values the flag wins,
/// then the file, then the built-in default.
pub fn resolve(args: &CliArgs, file: FileConfig) -> Result<DeployConfig> {
    let request = validate_request(&args.raw_request())?;

    let timeout_secs = args
        .wait_timeout
        .or(file.wait.timeout_secs)
        .unwrap_or(DEFAULT_WAIT_TIMEOUT_SECS);
    let poll_interval_secs = args
        .poll_interval
        .or(file.wait.poll_interval_secs)
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
    if poll_interval_secs == 0 {
        return Err(DeployError::Config(
            "wait poll interval must be >= 1 second (got 0)".to_string(),
        ));
    }
    if timeout_secs < poll_interval_secs {
        return Err(DeployError::Config(format!(
            "wait timeout ({timeout_secs}s) must be at least one poll interval ({poll_interval_secs}s)"
        )));
    }

    let mut wait = WaitSettings::from_timeout(
        Duration::from_secs(timeout_secs),
        Duration::from_secs(poll_interval_secs),
    );
    wait.enabled = !args.no_wait && file.wait.enabled.unwrap_or(true);

    let aws = AwsSettings {
        region: request.region.clone(),
        profile: args.profile.clone().or(file.aws.profile),
    };

    Ok(DeployConfig { request, aws, wait })
}
