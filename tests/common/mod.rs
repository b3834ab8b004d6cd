#![allow(dead_code)]

pub use ecs_deploy_test_utils::builders;
pub use ecs_deploy_test_utils::fake_ecs::{EcsCall, FakeEcs};
pub use ecs_deploy_test_utils::{init_tracing, with_timeout};
