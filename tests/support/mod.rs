// ABOUTME: In-memory fake cluster implementing the cluster API traits.
// ABOUTME: Programmable responses plus a call log for ordering assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use stolos::cluster::{
    ClusterError, ContainerState, Failure, RunTaskOutput, ServiceOps, ServiceUpdate, Task,
    TaskDefinition, TaskDefinitionOps, TaskOps,
};
use stolos::types::{TaskArn, TaskDefinitionArn};

/// One recorded API call, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RegisterTaskDefinition(String),
    RunTask(String),
    DescribeTask(String),
    ListRunningTasks,
    DescribeTasks(usize),
    UpdateService(String),
    CreateService(String),
}

#[derive(Debug, Clone)]
pub struct ServiceRecord {
    pub task_definition: TaskDefinitionArn,
    pub desired_count: u32,
}

#[derive(Default)]
struct FakeState {
    next_revision: u64,
    next_task: u64,
    registered: Vec<TaskDefinition>,
    launched: HashMap<String, u32>,
    services: HashMap<String, ServiceRecord>,
    running_definitions: Vec<TaskDefinitionArn>,
    calls: Vec<Call>,
}

/// Deterministic stand-in for the cluster controller.
///
/// ARNs are minted predictably (`arn:stolos:task-definition/{family}:{rev}`)
/// so tests can assert on them. By default every service upsert makes a
/// task with that definition appear as running, so convergence succeeds
/// on the first probe; `without_auto_converge` turns that off.
pub struct FakeCluster {
    state: Mutex<FakeState>,
    inactive_services: Vec<String>,
    broken_services: Vec<String>,
    scheduling_failures: Vec<Failure>,
    one_off_exit_code: Option<i64>,
    polls_until_stopped: u32,
    vanishing_tasks: bool,
    fail_register: bool,
    auto_converge: bool,
}

impl Default for FakeCluster {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeCluster {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
            inactive_services: Vec::new(),
            broken_services: Vec::new(),
            scheduling_failures: Vec::new(),
            one_off_exit_code: Some(0),
            polls_until_stopped: 0,
            vanishing_tasks: false,
            fail_register: false,
            auto_converge: true,
        }
    }

    /// Make the named service pre-exist so updates succeed.
    pub fn with_existing_service(self, name: &str, definition: &str, desired_count: u32) -> Self {
        self.state.lock().unwrap().services.insert(
            name.to_string(),
            ServiceRecord {
                task_definition: TaskDefinitionArn::new(definition),
                desired_count,
            },
        );
        self
    }

    /// Make updates to the named service fail as not-active.
    pub fn with_inactive_service(mut self, name: &str) -> Self {
        self.inactive_services.push(name.to_string());
        self
    }

    /// Make updates to the named service fail with a server error.
    pub fn with_broken_service(mut self, name: &str) -> Self {
        self.broken_services.push(name.to_string());
        self
    }

    /// Every launch reports this placement failure and schedules nothing.
    pub fn with_scheduling_failure(mut self, reason: &str) -> Self {
        self.scheduling_failures.push(Failure {
            arn: None,
            reason: reason.to_string(),
        });
        self
    }

    /// Exit code one-off tasks stop with (`None` = container reports none).
    pub fn with_one_off_exit(mut self, code: Option<i64>) -> Self {
        self.one_off_exit_code = code;
        self
    }

    /// How many describe polls report RUNNING before STOPPED.
    pub fn with_polls_until_stopped(mut self, polls: u32) -> Self {
        self.polls_until_stopped = polls;
        self
    }

    /// Launched tasks are never discoverable again.
    pub fn with_vanishing_tasks(mut self) -> Self {
        self.vanishing_tasks = true;
        self
    }

    /// Reject every registration attempt.
    pub fn with_failing_registration(mut self) -> Self {
        self.fail_register = true;
        self
    }

    /// Upserts no longer make tasks appear as running.
    pub fn without_auto_converge(mut self) -> Self {
        self.auto_converge = false;
        self
    }

    /// Mark a definition ARN as running on the cluster right now.
    pub fn set_running_definition(&self, arn: &str) {
        self.state
            .lock()
            .unwrap()
            .running_definitions
            .push(TaskDefinitionArn::new(arn));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn describe_task_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::DescribeTask(_)))
            .count()
    }

    pub fn registered_definitions(&self) -> Vec<TaskDefinition> {
        self.state.lock().unwrap().registered.clone()
    }

    pub fn service_record(&self, name: &str) -> Option<ServiceRecord> {
        self.state.lock().unwrap().services.get(name).cloned()
    }
}

#[async_trait]
impl TaskDefinitionOps for FakeCluster {
    async fn register_task_definition(
        &self,
        definition: &TaskDefinition,
    ) -> Result<TaskDefinitionArn, ClusterError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::RegisterTaskDefinition(definition.family.to_string()));

        if self.fail_register {
            return Err(ClusterError::api(
                "ClientException",
                "task definition rejected",
            ));
        }

        state.next_revision += 1;
        let arn = TaskDefinitionArn::new(format!(
            "arn:stolos:task-definition/{}:{}",
            definition.family, state.next_revision
        ));
        state.registered.push(definition.clone());
        Ok(arn)
    }
}

#[async_trait]
impl TaskOps for FakeCluster {
    async fn run_task(
        &self,
        _cluster: &str,
        definition: &TaskDefinitionArn,
        _container: &str,
        _command: &[String],
        _started_by: &str,
    ) -> Result<RunTaskOutput, ClusterError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::RunTask(definition.to_string()));

        if !self.scheduling_failures.is_empty() {
            return Ok(RunTaskOutput {
                tasks: Vec::new(),
                failures: self.scheduling_failures.clone(),
            });
        }

        state.next_task += 1;
        let arn = format!("arn:stolos:task/one-off-{}", state.next_task);
        state.launched.insert(arn.clone(), self.polls_until_stopped);

        Ok(RunTaskOutput {
            tasks: vec![Task {
                task_arn: TaskArn::new(arn),
                task_definition_arn: Some(definition.clone()),
                last_status: "PENDING".to_string(),
                containers: Vec::new(),
            }],
            failures: Vec::new(),
        })
    }

    async fn describe_task(
        &self,
        _cluster: &str,
        task: &TaskArn,
    ) -> Result<Option<Task>, ClusterError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DescribeTask(task.to_string()));

        if self.vanishing_tasks {
            return Ok(None);
        }

        let remaining = match state.launched.get_mut(task.as_str()) {
            Some(remaining) => remaining,
            None => return Ok(None),
        };

        if *remaining > 0 {
            *remaining -= 1;
            return Ok(Some(Task {
                task_arn: task.clone(),
                task_definition_arn: None,
                last_status: "RUNNING".to_string(),
                containers: Vec::new(),
            }));
        }

        Ok(Some(Task {
            task_arn: task.clone(),
            task_definition_arn: None,
            last_status: "STOPPED".to_string(),
            containers: vec![ContainerState {
                name: "app".to_string(),
                exit_code: self.one_off_exit_code,
                reason: None,
            }],
        }))
    }

    async fn list_running_tasks(&self, _cluster: &str) -> Result<Vec<TaskArn>, ClusterError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListRunningTasks);

        Ok((0..state.running_definitions.len())
            .map(|i| TaskArn::new(format!("arn:stolos:task/running-{i}")))
            .collect())
    }

    async fn describe_tasks(
        &self,
        _cluster: &str,
        tasks: &[TaskArn],
    ) -> Result<Vec<Task>, ClusterError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DescribeTasks(tasks.len()));

        Ok(state
            .running_definitions
            .iter()
            .enumerate()
            .map(|(i, definition)| Task {
                task_arn: TaskArn::new(format!("arn:stolos:task/running-{i}")),
                task_definition_arn: Some(definition.clone()),
                last_status: "RUNNING".to_string(),
                containers: Vec::new(),
            })
            .collect())
    }
}

#[async_trait]
impl ServiceOps for FakeCluster {
    async fn update_service(
        &self,
        _cluster: &str,
        update: &ServiceUpdate,
    ) -> Result<(), ClusterError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::UpdateService(update.name.to_string()));

        if self.broken_services.contains(&update.name.to_string()) {
            return Err(ClusterError::api("ServerException", "internal error"));
        }

        if self.inactive_services.contains(&update.name.to_string()) {
            return Err(ClusterError::api(
                "ServiceNotActiveException",
                format!("service {} is not active", update.name),
            ));
        }

        if !state.services.contains_key(update.name.as_str()) {
            return Err(ClusterError::api(
                "ServiceNotFoundException",
                format!("service {} not found", update.name),
            ));
        }

        apply_service(&mut state, update, self.auto_converge);
        Ok(())
    }

    async fn create_service(
        &self,
        _cluster: &str,
        update: &ServiceUpdate,
    ) -> Result<(), ClusterError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateService(update.name.to_string()));

        apply_service(&mut state, update, self.auto_converge);
        Ok(())
    }
}

fn apply_service(state: &mut FakeState, update: &ServiceUpdate, auto_converge: bool) {
    state.services.insert(
        update.name.to_string(),
        ServiceRecord {
            task_definition: update.task_definition.clone(),
            desired_count: update.desired_count,
        },
    );

    if auto_converge && !state.running_definitions.contains(&update.task_definition) {
        state.running_definitions.push(update.task_definition.clone());
    }
}
