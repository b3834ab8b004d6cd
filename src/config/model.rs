// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::deploy::ImageSpec;

/// Default delay between stability polls, matching the provider's stock
/// services-stable waiter.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Default overall wait, 40 polls at the default interval.
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 600;

/// Deployment inputs exactly as supplied, before validation.
///
/// Empty strings and absent flags are treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    pub cluster: Option<String>,
    pub service: Option<String>,
    pub task_family: Option<String>,
    pub images: Option<String>,
    pub region: Option<String>,
}

/// Validated deployment inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub cluster: String,
    pub service: String,
    pub task_family: String,
    pub images: Vec<ImageSpec>,
    pub region: String,
}

impl DeployRequest {
    /// The `-v` value as it was given, comma-joined.
    pub fn images_display(&self) -> String {
        self.images
            .iter()
            .map(ImageSpec::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: String,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitSettings {
    pub enabled: bool,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl WaitSettings {
    /// Derive the attempt budget from an overall timeout.
    pub fn from_timeout(timeout: Duration, poll_interval: Duration) -> Self {
        let max_attempts = if poll_interval.is_zero() {
            1
        } else {
            let polls = (timeout.as_secs() / poll_interval.as_secs().max(1)).max(1);
            u32::try_from(polls).unwrap_or(u32::MAX)
        };
        Self {
            enabled: true,
            poll_interval,
            max_attempts,
        }
    }
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self::from_timeout(
            Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        )
    }
}

/// Everything a run needs, built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub request: DeployRequest,
    pub aws: AwsSettings,
    pub wait: WaitSettings,
}

impl DeployConfig {
    /// Config with default AWS and wait settings for a validated request.
    pub fn new(request: DeployRequest) -> Self {
        let aws = AwsSettings {
            region: request.region.clone(),
            profile: None,
        };
        Self {
            request,
            aws,
            wait: WaitSettings::default(),
        }
    }
}

/// Optional TOML tuning file.
///
/// ```toml
/// [aws]
/// profile = "deploy"
///
/// [wait]
/// enabled = true
/// timeout_secs = 600
/// poll_interval_secs = 15
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub aws: AwsSection,

    #[serde(default)]
    pub wait: WaitSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsSection {
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaitSection {
    pub enabled: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_follow_timeout_over_interval() {
        let wait = WaitSettings::from_timeout(Duration::from_secs(95), Duration::from_secs(10));
        assert_eq!(wait.max_attempts, 9);

        let wait = WaitSettings::from_timeout(Duration::from_secs(5), Duration::from_secs(10));
        assert_eq!(wait.max_attempts, 1);
    }

    #[test]
    fn huge_timeout_saturates_instead_of_wrapping() {
        let wait =
            WaitSettings::from_timeout(Duration::from_secs(1 << 32), Duration::from_secs(1));
        assert_eq!(wait.max_attempts, u32::MAX);
    }
}
