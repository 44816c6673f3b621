// ABOUTME: Task launch and inspection trait.
// ABOUTME: Run one-off tasks, describe them, and enumerate running ones.

use super::shared_types::{Failure, Task};
use crate::cluster::error::ClusterError;
use crate::types::{TaskArn, TaskDefinitionArn};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a launch call produced: scheduled tasks plus any placement
/// failures. Both lists can be non-empty on the same call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunTaskOutput {
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub failures: Vec<Failure>,
}

/// Task lifecycle operations.
#[async_trait]
pub trait TaskOps: Send + Sync {
    /// Launch exactly one task from the given definition, overriding the
    /// named container's command. `started_by` tags the launch for
    /// operator visibility.
    async fn run_task(
        &self,
        cluster: &str,
        definition: &TaskDefinitionArn,
        container: &str,
        command: &[String],
        started_by: &str,
    ) -> Result<RunTaskOutput, ClusterError>;

    /// Describe a single task. `Ok(None)` when the cluster no longer
    /// knows the ARN.
    async fn describe_task(
        &self,
        cluster: &str,
        task: &TaskArn,
    ) -> Result<Option<Task>, ClusterError>;

    /// ARNs of tasks whose desired status is RUNNING.
    async fn list_running_tasks(&self, cluster: &str) -> Result<Vec<TaskArn>, ClusterError>;

    /// Full descriptions for a batch of task ARNs.
    async fn describe_tasks(
        &self,
        cluster: &str,
        tasks: &[TaskArn],
    ) -> Result<Vec<Task>, ClusterError>;
}
