//! In-memory fakes of the service traits for unit tests

use async_trait::async_trait;
use iris_client::{ClientError, DeployStackService, Operation, WorkflowService};
use iris_core::domain::deploy::DeployRequest;
use iris_core::domain::stack::StackDescriptor;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Scripted answer to a describe call
#[derive(Debug, Clone)]
pub enum Describe {
    Found(StackDescriptor),
    NotFound,
    Fault(String),
}

/// Scripted answer to a create or update call
#[derive(Debug, Clone)]
pub enum Change {
    Started,
    NoUpdates,
    Fault(String),
}

fn fault(operation: Operation, subject: &str, message: &str) -> ClientError {
    ClientError::Service {
        operation,
        subject: subject.to_string(),
        code: Some("AccessDenied".to_string()),
        message: message.to_string(),
    }
}

fn stack_id(stack_name: &str) -> String {
    format!("arn:aws:cloudformation:test:1:stack/{}/1", stack_name)
}

/// Fake infrastructure service
///
/// Describe answers are consumed in order; the last one repeats. Unscripted
/// stacks do not exist, and unscripted creates/updates start.
#[derive(Default)]
pub struct FakeStackService {
    describes: Mutex<HashMap<String, VecDeque<Describe>>>,
    creates: HashMap<String, Change>,
    updates: HashMap<String, Change>,
    calls: Mutex<Vec<String>>,
    requests: Mutex<Vec<DeployRequest>>,
}

impl FakeStackService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_describe(self, stack_name: &str, answers: Vec<Describe>) -> Self {
        self.describes
            .lock()
            .unwrap()
            .insert(stack_name.to_string(), answers.into());
        self
    }

    pub fn with_create(mut self, stack_name: &str, change: Change) -> Self {
        self.creates.insert(stack_name.to_string(), change);
        self
    }

    pub fn with_update(mut self, stack_name: &str, change: Change) -> Self {
        self.updates.insert(stack_name.to_string(), change);
        self
    }

    /// Calls made so far, as `operation:stack` strings
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Create and update requests received so far
    pub fn requests(&self) -> Vec<DeployRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn apply(
        &self,
        operation: Operation,
        change: Option<&Change>,
        request: &DeployRequest,
    ) -> iris_client::Result<Option<String>> {
        self.requests.lock().unwrap().push(request.clone());
        match change.unwrap_or(&Change::Started) {
            Change::Started => Ok(Some(stack_id(&request.stack_name))),
            Change::NoUpdates => Err(ClientError::NoUpdates(request.stack_name.clone())),
            Change::Fault(msg) => Err(fault(operation, &request.stack_name, msg)),
        }
    }
}

#[async_trait]
impl DeployStackService for FakeStackService {
    async fn describe_stack(&self, stack_name: &str) -> iris_client::Result<StackDescriptor> {
        self.record(format!("describe:{}", stack_name));

        let answer = {
            let mut describes = self.describes.lock().unwrap();
            match describes.get_mut(stack_name) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match answer.unwrap_or(Describe::NotFound) {
            Describe::Found(desc) => Ok(desc),
            Describe::NotFound => Err(ClientError::StackNotFound(stack_name.to_string())),
            Describe::Fault(msg) => Err(fault(Operation::DescribeStacks, stack_name, &msg)),
        }
    }

    async fn create_stack(&self, request: &DeployRequest) -> iris_client::Result<Option<String>> {
        self.record(format!("create:{}", request.stack_name));
        self.apply(Operation::CreateStack, self.creates.get(&request.stack_name), request)
    }

    async fn update_stack(&self, request: &DeployRequest) -> iris_client::Result<Option<String>> {
        self.record(format!("update:{}", request.stack_name));
        self.apply(Operation::UpdateStack, self.updates.get(&request.stack_name), request)
    }
}

/// A start request received by [`FakeWorkflowService`]
#[derive(Debug, Clone)]
pub struct StartedExecution {
    pub workflow_id: String,
    pub name: String,
    pub input: serde_json::Value,
}

/// Fake workflow service recording every start request
#[derive(Default)]
pub struct FakeWorkflowService {
    fault: Option<String>,
    started: Mutex<Vec<StartedExecution>>,
}

impl FakeWorkflowService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fault: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn started(&self) -> Vec<StartedExecution> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowService for FakeWorkflowService {
    async fn start_execution(
        &self,
        workflow_id: &str,
        name: &str,
        input: &str,
    ) -> iris_client::Result<String> {
        if let Some(msg) = &self.fault {
            return Err(fault(Operation::StartExecution, workflow_id, msg));
        }

        self.started.lock().unwrap().push(StartedExecution {
            workflow_id: workflow_id.to_string(),
            name: name.to_string(),
            input: serde_json::from_str(input).unwrap(),
        });

        Ok(format!("{}:execution:{}", workflow_id, name))
    }
}

/// Descriptor of a stack in `raw_status` carrying `outputs`
pub fn stack(stack_name: &str, raw_status: &str, outputs: &[(&str, &str)]) -> StackDescriptor {
    outputs.iter().fold(
        StackDescriptor::new(stack_name, raw_status).with_stack_id(stack_id(stack_name)),
        |desc, (key, value)| desc.with_output(*key, *value),
    )
}
