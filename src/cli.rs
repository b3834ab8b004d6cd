// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The five deployment flags are optional at the clap layer so that a
//! missing one is reported with its own usage hint by
//! [`validate_request`](crate::config::validate_request) instead of clap's
//! generic message.

use clap::{Parser, ValueEnum};

use crate::config::RawRequest;

/// Command-line arguments for `ecs-deploy`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ecs-deploy",
    version,
    about = "Roll new container images onto an ECS service and wait for it to settle.",
    long_about = None
)]
pub struct CliArgs {
    /// Cluster name.
    #[arg(short = 'c', long = "cluster", value_name = "NAME")]
    pub cluster: Option<String>,

    /// Service name.
    #[arg(short = 's', long = "service", value_name = "NAME")]
    pub service: Option<String>,

    /// Task definition family name.
    #[arg(short = 't', long = "task-family", value_name = "FAMILY")]
    pub task_family: Option<String>,

    /// New container versions, comma separated `<image path>:<tag>` entries.
    #[arg(short = 'v', long = "images", value_name = "IMAGES")]
    pub images: Option<String>,

    /// Region.
    #[arg(short = 'r', long = "region", value_name = "REGION")]
    pub region: Option<String>,

    /// Optional TOML file with AWS profile and wait settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Named profile from the shared AWS config files.
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Give up waiting for a stable service after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub wait_timeout: Option<u64>,

    /// Seconds between stability checks.
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Submit the service update but don't wait for it to become stable.
    #[arg(long)]
    pub no_wait: bool,

    /// Validate inputs and print the plan without contacting ECS.
    #[arg(long)]
    pub dry_run: bool,

    /// Exit 0 on every failure, as older releases did.
    #[arg(long)]
    pub legacy_exit_status: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ECS_DEPLOY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// The deployment inputs, unvalidated.
    pub fn raw_request(&self) -> RawRequest {
        RawRequest {
            cluster: self.cluster.clone(),
            service: self.service.clone(),
            task_family: self.task_family.clone(),
            images: self.images.clone(),
            region: self.region.clone(),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
