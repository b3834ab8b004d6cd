use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use aws_sdk_ecs::types::{Service, TaskDefinition};
use ecs_deploy::deploy::RevisionRequest;
use ecs_deploy::ecs::{
    BackendFuture, EcsBackend, EcsOperation, ProviderError, ServiceSnapshot,
};
use tracing::debug;

/// One call the driver made, in the order it made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcsCall {
    DescribeTaskDefinition { family: String },
    RegisterTaskDefinition { family: String },
    UpdateService { cluster: String, service: String, task_definition: String },
    DescribeServices { cluster: String, service: String },
}

impl EcsCall {
    pub fn operation(&self) -> EcsOperation {
        match self {
            EcsCall::DescribeTaskDefinition { .. } => EcsOperation::DescribeTaskDefinition,
            EcsCall::RegisterTaskDefinition { .. } => EcsOperation::RegisterTaskDefinition,
            EcsCall::UpdateService { .. } => EcsOperation::UpdateService,
            EcsCall::DescribeServices { .. } => EcsOperation::DescribeServices,
        }
    }
}

#[derive(Default)]
struct State {
    calls: Vec<EcsCall>,
    registered: Vec<RevisionRequest>,
    snapshots: VecDeque<ServiceSnapshot>,
    failures: HashMap<EcsOperation, ProviderError>,
}

/// A fake control plane that:
/// - serves a fixed task definition
/// - assigns revision `current + 1` on register
/// - replays scripted service snapshots, then reports steady
/// - fails any operation with a scripted provider error
#[derive(Clone)]
pub struct FakeEcs {
    task_definition: TaskDefinition,
    state: Arc<Mutex<State>>,
}

impl FakeEcs {
    pub fn new(task_definition: TaskDefinition) -> Self {
        Self {
            task_definition,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Make `operation` fail with the given provider code and message.
    pub fn failing(self, operation: EcsOperation, code: &str, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(operation, ProviderError::new(Some(code), message));
        self
    }

    /// Queue snapshots returned by successive `describe_service` calls.
    pub fn with_snapshots(self, snapshots: impl IntoIterator<Item = ServiceSnapshot>) -> Self {
        self.state.lock().unwrap().snapshots.extend(snapshots);
        self
    }

    pub fn calls(&self) -> Vec<EcsCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn operations(&self) -> Vec<EcsOperation> {
        self.calls().iter().map(EcsCall::operation).collect()
    }

    pub fn registered(&self) -> Vec<RevisionRequest> {
        self.state.lock().unwrap().registered.clone()
    }

    fn record(&self, call: EcsCall) -> Result<(), ProviderError> {
        let mut state = self.state.lock().unwrap();
        let operation = call.operation();
        let outcome = match state.failures.get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        };
        debug!(?call, failed = outcome.is_err(), "fake ECS call");
        state.calls.push(call);
        outcome
    }
}

impl EcsBackend for FakeEcs {
    fn describe_task_definition(&self, family: &str) -> BackendFuture<'_, TaskDefinition> {
        let call = EcsCall::DescribeTaskDefinition { family: family.to_string() };
        Box::pin(async move {
            self.record(call)?;
            Ok(self.task_definition.clone())
        })
    }

    fn register_task_definition(
        &self,
        request: RevisionRequest,
    ) -> BackendFuture<'_, TaskDefinition> {
        let call = EcsCall::RegisterTaskDefinition { family: request.family.clone() };
        Box::pin(async move {
            self.record(call)?;
            let registered = TaskDefinition::builder()
                .family(&request.family)
                .revision(self.task_definition.revision() + 1)
                .set_container_definitions(Some(request.container_definitions.clone()))
                .build();
            self.state.lock().unwrap().registered.push(request);
            Ok(registered)
        })
    }

    fn update_service(
        &self,
        cluster: &str,
        service: &str,
        task_definition: &str,
    ) -> BackendFuture<'_, Option<Service>> {
        let call = EcsCall::UpdateService {
            cluster: cluster.to_string(),
            service: service.to_string(),
            task_definition: task_definition.to_string(),
        };
        let service = Service::builder()
            .service_name(service)
            .task_definition(task_definition)
            .build();
        Box::pin(async move {
            self.record(call)?;
            Ok(Some(service))
        })
    }

    fn describe_service(&self, cluster: &str, service: &str) -> BackendFuture<'_, ServiceSnapshot> {
        let call = EcsCall::DescribeServices {
            cluster: cluster.to_string(),
            service: service.to_string(),
        };
        Box::pin(async move {
            self.record(call)?;
            let next = self.state.lock().unwrap().snapshots.pop_front();
            Ok(next.unwrap_or_else(|| ServiceSnapshot::steady(1)))
        })
    }
}
