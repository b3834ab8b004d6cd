// tests/deploy_sequence.rs

mod common;
use crate::common::builders::{deploy_config, TaskDefinitionBuilder, CLUSTER, FAMILY, SERVICE};
use crate::common::{init_tracing, with_timeout, EcsCall, FakeEcs};

use std::error::Error;

use aws_sdk_ecs::types::{Compatibility, NetworkMode};
use ecs_deploy::deploy::Deployer;
use ecs_deploy::ecs::{EcsOperation, ServiceSnapshot};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn phases_run_once_each_in_order() -> TestResult {
    with_timeout(async {
        init_tracing();

        let current = TaskDefinitionBuilder::new(4)
            .with_container("bff", "registry.example.com/bff:1.0")
            .build();
        let ecs = FakeEcs::new(current);
        let config = deploy_config("registry.example.com/bff:2.0");

        Deployer::new(&config, &ecs).run().await?;

        assert_eq!(
            ecs.operations(),
            vec![
                EcsOperation::DescribeTaskDefinition,
                EcsOperation::RegisterTaskDefinition,
                EcsOperation::UpdateService,
                EcsOperation::DescribeServices,
            ]
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn single_container_end_to_end() -> TestResult {
    with_timeout(async {
        init_tracing();

        let current = TaskDefinitionBuilder::new(11)
            .with_container("img", "old/img:1.0")
            .build();
        let ecs = FakeEcs::new(current.clone());
        let config = deploy_config("old/img:2.0");

        let outcome = Deployer::new(&config, &ecs).run().await?;

        let registered = ecs.registered();
        assert_eq!(registered.len(), 1);
        let req = &registered[0];
        assert_eq!(req.container_definitions.len(), 1);
        assert_eq!(req.container_definitions[0].image(), Some("old/img:2.0"));
        // Everything but the image is untouched.
        assert_eq!(
            req.container_definitions[0].memory_reservation(),
            current.container_definitions()[0].memory_reservation()
        );
        assert_eq!(req.container_definitions[0].name(), Some("img"));

        assert_eq!(req.family, FAMILY);
        assert_eq!(req.execution_role_arn.as_deref(), current.execution_role_arn());
        assert_eq!(req.task_role_arn.as_deref(), current.task_role_arn());
        assert_eq!(req.network_mode, Some(NetworkMode::Awsvpc));
        assert_eq!(req.volumes, current.volumes().to_vec());
        assert_eq!(req.placement_constraints, current.placement_constraints().to_vec());
        assert_eq!(req.requires_compatibilities, vec![Compatibility::Fargate]);
        assert_eq!(req.cpu.as_deref(), Some("256"));
        assert_eq!(req.memory.as_deref(), Some("512"));

        assert_eq!(outcome.task_definition.to_string(), format!("{FAMILY}:12"));
        assert!(ecs.calls().contains(&EcsCall::UpdateService {
            cluster: CLUSTER.to_string(),
            service: SERVICE.to_string(),
            task_definition: format!("{FAMILY}:12"),
        }));
        assert_eq!(outcome.stable_after, Some(1));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn fetch_uses_the_unversioned_family() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ecs = FakeEcs::new(TaskDefinitionBuilder::new(1).with_container("a", "repo/a:1").build());
        let config = deploy_config("repo/a:2");

        Deployer::new(&config, &ecs).run().await?;

        assert_eq!(
            ecs.calls()[0],
            EcsCall::DescribeTaskDefinition {
                family: FAMILY.to_string()
            }
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn only_matching_images_change_in_registered_revision() -> TestResult {
    with_timeout(async {
        init_tracing();

        let current = TaskDefinitionBuilder::new(2)
            .with_container("a", "repo/a:1.0")
            .with_container("b", "repo/b:1.0")
            .build();
        let ecs = FakeEcs::new(current);
        let config = deploy_config("repo/a:2.0");

        let outcome = Deployer::new(&config, &ecs).run().await?;

        let images: Vec<_> = ecs.registered()[0]
            .container_definitions
            .iter()
            .map(|c| c.image().unwrap_or_default().to_string())
            .collect();
        assert_eq!(images, ["repo/a:2.0", "repo/b:1.0"]);
        assert_eq!(outcome.rewrites.len(), 1);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn unmatched_image_still_registers_and_updates() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ecs = FakeEcs::new(TaskDefinitionBuilder::new(3).with_container("a", "repo/a:1").build());
        let config = deploy_config("elsewhere/x:5");

        let outcome = Deployer::new(&config, &ecs).run().await?;

        assert!(outcome.rewrites.is_empty());
        assert_eq!(ecs.registered()[0].container_definitions[0].image(), Some("repo/a:1"));
        assert_eq!(ecs.operations().len(), 4);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn waits_through_rollout_until_stable() -> TestResult {
    with_timeout(async {
        init_tracing();

        let rolling = ServiceSnapshot {
            deployments: 2,
            ..ServiceSnapshot::steady(2)
        };
        let draining_old = ServiceSnapshot {
            running_count: 1,
            ..ServiceSnapshot::steady(2)
        };
        let ecs = FakeEcs::new(TaskDefinitionBuilder::new(1).with_container("a", "repo/a:1").build())
            .with_snapshots([rolling, draining_old, ServiceSnapshot::steady(2)]);
        let config = deploy_config("repo/a:2");

        let outcome = Deployer::new(&config, &ecs).run().await?;

        assert_eq!(outcome.stable_after, Some(3));
        let describes = ecs
            .operations()
            .into_iter()
            .filter(|op| *op == EcsOperation::DescribeServices)
            .count();
        assert_eq!(describes, 3);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn disabled_wait_skips_describe_services() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ecs = FakeEcs::new(TaskDefinitionBuilder::new(1).with_container("a", "repo/a:1").build());
        let mut config = deploy_config("repo/a:2");
        config.wait.enabled = false;

        let outcome = Deployer::new(&config, &ecs).run().await?;

        assert_eq!(outcome.stable_after, None);
        assert_eq!(
            ecs.operations().last(),
            Some(&EcsOperation::UpdateService)
        );
        Ok(())
    })
    .await
}
