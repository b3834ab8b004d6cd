// src/ecs/client.rs

//! `EcsBackend` implementation over `aws-sdk-ecs`.

use aws_config::BehaviorVersion;
use aws_sdk_ecs::Client as EcsClient;
use aws_sdk_ecs::config::Region;
use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ecs::types::{Service, TaskDefinition};
use tracing::{debug, warn};

use super::backend::{BackendFuture, EcsBackend, EcsOperation, ServiceSnapshot};
use super::errors::ProviderError;
use crate::config::AwsSettings;
use crate::deploy::RevisionRequest;

/// Real backend used in production.
#[derive(Debug, Clone)]
pub struct AwsEcsBackend {
    client: EcsClient,
}

impl AwsEcsBackend {
    /// Build a client for the configured region.
    ///
    /// Credentials come from the SDK's default provider chain, optionally
    /// pinned to a named profile.
    pub async fn connect(settings: &AwsSettings) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(settings.region.clone()));
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;
        debug!(region = %settings.region, profile = ?settings.profile, "ECS client configured");
        Self::from_client(EcsClient::new(&sdk_config))
    }

    pub fn from_client(client: EcsClient) -> Self {
        Self { client }
    }
}

impl EcsBackend for AwsEcsBackend {
    fn describe_task_definition(&self, family: &str) -> BackendFuture<'_, TaskDefinition> {
        let family = family.to_owned();
        Box::pin(async move {
            let output = self
                .client
                .describe_task_definition()
                .task_definition(&family)
                .send()
                .await
                .map_err(|e| provider_error(EcsOperation::DescribeTaskDefinition, e))?;

            output.task_definition.ok_or_else(|| {
                ProviderError::unclassified(format!(
                    "DescribeTaskDefinition returned no task definition for {family}"
                ))
            })
        })
    }

    fn register_task_definition(
        &self,
        request: RevisionRequest,
    ) -> BackendFuture<'_, TaskDefinition> {
        Box::pin(async move {
            let output = self
                .client
                .register_task_definition()
                .family(request.family)
                .set_container_definitions(non_empty(request.container_definitions))
                .set_execution_role_arn(request.execution_role_arn)
                .set_task_role_arn(request.task_role_arn)
                .set_network_mode(request.network_mode)
                .set_volumes(non_empty(request.volumes))
                .set_placement_constraints(non_empty(request.placement_constraints))
                .set_requires_compatibilities(non_empty(request.requires_compatibilities))
                .set_cpu(request.cpu)
                .set_memory(request.memory)
                .send()
                .await
                .map_err(|e| provider_error(EcsOperation::RegisterTaskDefinition, e))?;

            output.task_definition.ok_or_else(|| {
                ProviderError::unclassified("RegisterTaskDefinition returned no task definition")
            })
        })
    }

    fn update_service(
        &self,
        cluster: &str,
        service: &str,
        task_definition: &str,
    ) -> BackendFuture<'_, Option<Service>> {
        let (cluster, service, task_definition) =
            (cluster.to_owned(), service.to_owned(), task_definition.to_owned());
        Box::pin(async move {
            let output = self
                .client
                .update_service()
                .cluster(cluster)
                .service(service)
                .task_definition(task_definition)
                .send()
                .await
                .map_err(|e| provider_error(EcsOperation::UpdateService, e))?;
            Ok(output.service)
        })
    }

    fn describe_service(&self, cluster: &str, service: &str) -> BackendFuture<'_, ServiceSnapshot> {
        let (cluster, service) = (cluster.to_owned(), service.to_owned());
        Box::pin(async move {
            let output = self
                .client
                .describe_services()
                .cluster(&cluster)
                .services(&service)
                .send()
                .await
                .map_err(|e| provider_error(EcsOperation::DescribeServices, e))?;

            if output.failures().iter().any(|f| f.reason() == Some("MISSING")) {
                return Ok(ServiceSnapshot {
                    missing: true,
                    ..ServiceSnapshot::default()
                });
            }

            match output.services().first() {
                Some(svc) => Ok(ServiceSnapshot {
                    missing: false,
                    status: svc.status().map(str::to_owned),
                    desired_count: svc.desired_count(),
                    running_count: svc.running_count(),
                    deployments: svc.deployments().len(),
                }),
                None => {
                    warn!(%cluster, %service, "DescribeServices returned neither service nor failure");
                    Ok(ServiceSnapshot {
                        missing: true,
                        ..ServiceSnapshot::default()
                    })
                }
            }
        })
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

/// Convert an SDK failure into a classified [`ProviderError`].
///
/// Service errors keep their code and message; transport and dispatch
/// failures have no code and end up unclassified with the full error chain
/// as their message.
fn provider_error<E>(operation: EcsOperation, err: SdkError<E>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let service_err = err.as_service_error();
    let code = service_err.and_then(|e| e.code()).map(str::to_owned);
    let message = service_err
        .and_then(|e| e.message())
        .map(str::to_owned)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    debug!(%operation, ?code, %message, "provider call failed");
    ProviderError::new(code.as_deref(), message)
}
