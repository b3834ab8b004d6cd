// src/deploy/driver.rs

//! Sequential rollout: fetch, rewrite, register, update, wait.
//!
//! Each remote call happens exactly once and in that order. A failure stops
//! the run where it happened; earlier side effects (a registered revision,
//! a submitted service update) are left in place.

use aws_sdk_ecs::types::TaskDefinition;
use chrono::Local;
use tracing::{info, instrument};

use crate::config::{DeployConfig, DeployRequest};
use crate::deploy::image::{rewrite_images, ImageRewrite};
use crate::deploy::revision::{RevisionRequest, TaskDefinitionRef};
use crate::deploy::wait::wait_until_stable;
use crate::ecs::EcsBackend;
use crate::errors::{DeployError, Result};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub task_definition: TaskDefinitionRef,
    pub rewrites: Vec<ImageRewrite>,
    /// Polls it took to see the service stable, `None` when waiting was off.
    pub stable_after: Option<u32>,
}

pub struct Deployer<'a, B: ?Sized> {
    config: &'a DeployConfig,
    backend: &'a B,
}

impl<'a, B> Deployer<'a, B>
where
    B: EcsBackend + ?Sized,
{
    pub fn new(config: &'a DeployConfig, backend: &'a B) -> Self {
        Self { config, backend }
    }

    pub async fn run(&self) -> Result<DeployOutcome> {
        let request = &self.config.request;
        print_request(request);

        let current = self.fetch(&request.task_family).await?;

        let mut containers = current.container_definitions().to_vec();
        let rewrites = rewrite_images(&mut containers, &request.images);
        info!(rewritten = rewrites.len(), containers = containers.len(), "container images rewritten");

        let revision = RevisionRequest::from_task_definition(&request.task_family, &current, containers);
        let task_definition = self.register(revision).await?;
        println!("Task Definition registered: {task_definition}");

        println!("Started updating service({}): {}", request.service, timestamp());
        self.update(&request.cluster, &request.service, &task_definition)
            .await?;

        let stable_after = if self.config.wait.enabled {
            let attempts = wait_until_stable(
                self.backend,
                &request.cluster,
                &request.service,
                &self.config.wait,
            )
            .await?;
            info!(attempts, "service is stable");
            Some(attempts)
        } else {
            info!("not waiting for the service to become stable");
            None
        };

        println!("Done: {}", timestamp());

        Ok(DeployOutcome {
            task_definition,
            rewrites,
            stable_after,
        })
    }

    #[instrument(skip(self))]
    async fn fetch(&self, family: &str) -> Result<TaskDefinition> {
        let current = self
            .backend
            .describe_task_definition(family)
            .await
            .map_err(DeployError::Fetch)?;
        info!(revision = current.revision(), "fetched latest task definition");
        Ok(current)
    }

    #[instrument(skip_all, fields(family = %request.family))]
    async fn register(&self, request: RevisionRequest) -> Result<TaskDefinitionRef> {
        let family = request.family.clone();
        let registered = self
            .backend
            .register_task_definition(request)
            .await
            .map_err(DeployError::Register)?;
        Ok(TaskDefinitionRef {
            family: registered.family().map(str::to_owned).unwrap_or(family),
            revision: registered.revision(),
        })
    }

    #[instrument(skip(self, task_definition), fields(task_definition = %task_definition))]
    async fn update(
        &self,
        cluster: &str,
        service: &str,
        task_definition: &TaskDefinitionRef,
    ) -> Result<()> {
        let updated = self
            .backend
            .update_service(cluster, service, &task_definition.to_string())
            .await
            .map_err(DeployError::Update)?;

        println!("Update service result:");
        match updated {
            Some(service) => println!("{service:#?}"),
            None => println!("(no service in response)"),
        }
        Ok(())
    }
}

fn print_request(request: &DeployRequest) {
    println!("Cluster name: {}", request.cluster);
    println!("Service name: {}", request.service);
    println!("Task family name: {}", request.task_family);
    println!("New container image version: {}", request.images_display());
    println!("Region: {}", request.region);
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.9f %z").to_string()
}
