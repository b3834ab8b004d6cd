// src/lib.rs

pub mod cli;
pub mod config;
pub mod deploy;
pub mod ecs;
pub mod errors;
pub mod logging;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{load_from_path, resolve, DeployConfig, FileConfig};
use crate::deploy::{DeployOutcome, Deployer};
use crate::ecs::AwsEcsBackend;
use crate::errors::Result;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the optional config file and CLI flags into one [`DeployConfig`]
/// - the AWS-backed ECS client
/// - the [`Deployer`] sequence
///
/// Returns `None` for a dry run.
pub async fn run(args: CliArgs) -> Result<Option<DeployOutcome>> {
    let file = match args.config.as_deref() {
        Some(path) => load_from_path(path)?,
        None => FileConfig::default(),
    };
    let config = resolve(&args, file)?;

    if args.dry_run {
        print_dry_run(&config);
        return Ok(None);
    }

    let backend = AwsEcsBackend::connect(&config.aws).await;
    Deployer::new(&config, &backend).run().await.map(Some)
}

/// Print what a real run would do.
fn print_dry_run(config: &DeployConfig) {
    let request = &config.request;
    println!("ecs-deploy dry-run");
    println!("  cluster = {}", request.cluster);
    println!("  service = {}", request.service);
    println!("  task family = {}", request.task_family);
    println!("  region = {}", request.region);
    if let Some(profile) = &config.aws.profile {
        println!("  profile = {profile}");
    }
    println!("  images:");
    for spec in &request.images {
        println!("    - {} -> {}", spec.path(), spec.reference());
    }
    if config.wait.enabled {
        println!(
            "  wait: every {:?}, up to {} attempts",
            config.wait.poll_interval, config.wait.max_attempts
        );
    } else {
        println!("  wait: disabled");
    }

    debug!("dry-run complete (no remote calls)");
}
