// src/ecs/backend.rs

//! Pluggable orchestration backend.
//!
//! The deploy driver talks to an `EcsBackend` instead of the SDK client
//! directly, so tests can swap in a fake that records calls and scripts
//! failures while production uses [`AwsEcsBackend`](super::AwsEcsBackend).

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use aws_sdk_ecs::types::{Service, TaskDefinition};

use super::errors::ProviderError;
use crate::deploy::RevisionRequest;

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = ProviderResult<T>> + Send + 'a>>;

/// The four remote operations a deployment needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcsOperation {
    DescribeTaskDefinition,
    RegisterTaskDefinition,
    UpdateService,
    DescribeServices,
}

impl fmt::Display for EcsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EcsOperation::DescribeTaskDefinition => "DescribeTaskDefinition",
            EcsOperation::RegisterTaskDefinition => "RegisterTaskDefinition",
            EcsOperation::UpdateService => "UpdateService",
            EcsOperation::DescribeServices => "DescribeServices",
        };
        f.write_str(name)
    }
}

/// Trait abstracting the container-orchestration control plane.
pub trait EcsBackend: Send + Sync {
    /// Latest active revision of `family`.
    fn describe_task_definition(&self, family: &str) -> BackendFuture<'_, TaskDefinition>;

    /// Register a new revision and return it as the provider stored it.
    fn register_task_definition(&self, request: RevisionRequest)
        -> BackendFuture<'_, TaskDefinition>;

    /// Point `service` in `cluster` at `task_definition` (`family:revision`).
    fn update_service(
        &self,
        cluster: &str,
        service: &str,
        task_definition: &str,
    ) -> BackendFuture<'_, Option<Service>>;

    /// Current rollout state of `service`.
    fn describe_service(&self, cluster: &str, service: &str)
        -> BackendFuture<'_, ServiceSnapshot>;
}

/// The parts of a described service that decide stability.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceSnapshot {
    /// The provider reported the service as `MISSING`.
    pub missing: bool,
    pub status: Option<String>,
    pub desired_count: i32,
    pub running_count: i32,
    pub deployments: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stability {
    Stable,
    Pending,
    /// The service can never become stable from here.
    Failed(String),
}

impl ServiceSnapshot {
    /// A steady service: one deployment, every desired task running.
    pub fn steady(count: i32) -> Self {
        Self {
            missing: false,
            status: Some("ACTIVE".to_string()),
            desired_count: count,
            running_count: count,
            deployments: 1,
        }
    }

    pub fn stability(&self) -> Stability {
        if self.missing {
            return Stability::Failed("service is MISSING".to_string());
        }
        match self.status.as_deref() {
            Some(status @ ("DRAINING" | "INACTIVE")) => {
                return Stability::Failed(format!("service is {status}"));
            }
            _ => {}
        }
        if self.deployments == 1 && self.running_count == self.desired_count {
            Stability::Stable
        } else {
            Stability::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_snapshot_is_stable() {
        assert_eq!(ServiceSnapshot::steady(3).stability(), Stability::Stable);
    }

    #[test]
    fn rollout_in_progress_is_pending() {
        let mut snap = ServiceSnapshot::steady(2);
        snap.deployments = 2;
        assert_eq!(snap.stability(), Stability::Pending);

        let mut snap = ServiceSnapshot::steady(2);
        snap.running_count = 1;
        assert_eq!(snap.stability(), Stability::Pending);
    }

    #[test]
    fn draining_inactive_and_missing_fail() {
        let mut snap = ServiceSnapshot::steady(1);
        snap.status = Some("DRAINING".into());
        assert!(matches!(snap.stability(), Stability::Failed(_)));

        snap.status = Some("INACTIVE".into());
        assert_eq!(snap.stability(), Stability::Failed("service is INACTIVE".into()));

        let snap = ServiceSnapshot {
            missing: true,
            ..ServiceSnapshot::default()
        };
        assert!(matches!(snap.stability(), Stability::Failed(_)));
    }
}
