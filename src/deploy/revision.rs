// src/deploy/revision.rs

use std::fmt;

use aws_sdk_ecs::types::{
    Compatibility, ContainerDefinition, NetworkMode, TaskDefinition,
    TaskDefinitionPlacementConstraint, Volume,
};

/// Fields submitted when registering a new task definition revision.
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionRequest {
    pub family: String,
    pub container_definitions: Vec<ContainerDefinition>,
    pub execution_role_arn: Option<String>,
    pub task_role_arn: Option<String>,
    pub network_mode: Option<NetworkMode>,
    pub volumes: Vec<Volume>,
    pub placement_constraints: Vec<TaskDefinitionPlacementConstraint>,
    pub requires_compatibilities: Vec<Compatibility>,
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

impl RevisionRequest {
    /// Carry `current` forward with new container definitions.
    ///
    /// Roles, network mode, volumes, placement constraints, compatibilities,
    /// cpu and memory are copied as-is; whatever `current` lacks stays unset.
    pub fn from_task_definition(
        family: &str,
        current: &TaskDefinition,
        container_definitions: Vec<ContainerDefinition>,
    ) -> Self {
        Self {
            family: family.to_string(),
            container_definitions,
            execution_role_arn: current.execution_role_arn().map(str::to_owned),
            task_role_arn: current.task_role_arn().map(str::to_owned),
            network_mode: current.network_mode().cloned(),
            volumes: current.volumes().to_vec(),
            placement_constraints: current.placement_constraints().to_vec(),
            requires_compatibilities: current.requires_compatibilities().to_vec(),
            cpu: current.cpu().map(str::to_owned),
            memory: current.memory().map(str::to_owned),
        }
    }
}

/// `family:revision`, the reference a service is pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinitionRef {
    pub family: String,
    pub revision: i32,
}

impl fmt::Display for TaskDefinitionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.revision)
    }
}
