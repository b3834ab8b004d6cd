use std::time::Duration;

use aws_sdk_ecs::types::{
    Compatibility, ContainerDefinition, NetworkMode, TaskDefinition,
    TaskDefinitionPlacementConstraint, TaskDefinitionPlacementConstraintType, Volume,
};
use ecs_deploy::config::{DeployConfig, RawRequest, WaitSettings, validate_request};

pub const CLUSTER: &str = "ctrade-TEST-cluster";
pub const SERVICE: &str = "bff";
pub const FAMILY: &str = "bff-TEST";
pub const REGION: &str = "us-west-2";

pub fn container(name: &str, image: &str) -> ContainerDefinition {
    ContainerDefinition::builder()
        .name(name)
        .image(image)
        .essential(true)
        .memory_reservation(128)
        .build()
}

/// Builder for a fetched `TaskDefinition` with every carried field populated.
pub struct TaskDefinitionBuilder {
    revision: i32,
    containers: Vec<ContainerDefinition>,
}

impl TaskDefinitionBuilder {
    pub fn new(revision: i32) -> Self {
        Self {
            revision,
            containers: Vec::new(),
        }
    }

    pub fn with_container(mut self, name: &str, image: &str) -> Self {
        self.containers.push(container(name, image));
        self
    }

    pub fn build(self) -> TaskDefinition {
        TaskDefinition::builder()
            .family(FAMILY)
            .revision(self.revision)
            .task_definition_arn(format!(
                "arn:aws:ecs:{REGION}:123456789012:task-definition/{FAMILY}:{}",
                self.revision
            ))
            .set_container_definitions(Some(self.containers))
            .execution_role_arn("arn:aws:iam::123456789012:role/ecsTaskExecutionRole")
            .task_role_arn("arn:aws:iam::123456789012:role/bff-task")
            .network_mode(NetworkMode::Awsvpc)
            .volumes(Volume::builder().name("scratch").build())
            .placement_constraints(
                TaskDefinitionPlacementConstraint::builder()
                    .r#type(TaskDefinitionPlacementConstraintType::MemberOf)
                    .expression("attribute:ecs.availability-zone in [us-west-2a]")
                    .build(),
            )
            .requires_compatibilities(Compatibility::Fargate)
            .cpu("256")
            .memory("512")
            .build()
    }
}

/// A validated config for the standard fixture names, polling without delay.
pub fn deploy_config(images: &str) -> DeployConfig {
    let request = validate_request(&RawRequest {
        cluster: Some(CLUSTER.to_string()),
        service: Some(SERVICE.to_string()),
        task_family: Some(FAMILY.to_string()),
        images: Some(images.to_string()),
        region: Some(REGION.to_string()),
    })
    .expect("fixture request should validate");

    let mut config = DeployConfig::new(request);
    config.wait = WaitSettings {
        enabled: true,
        poll_interval: Duration::ZERO,
        max_attempts: 5,
    };
    config
}
