// ABOUTME: One-off runner stage: bounded tasks run to completion, in order.
// ABOUTME: A non-zero exit aborts the rollout before any service is touched.

use crate::cluster::TaskOps;
use crate::output::Output;
use crate::types::TaskArn;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use super::Rollout;
use super::error::RolloutError;
use super::state::{CommandsFinished, Registered};

/// Fixed interval between cluster queries while waiting.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Marker tagged onto every launch for operator visibility.
pub const STARTED_BY: &str = "stolos";

/// How a watched one-off task left the polling loop.
enum TaskOutcome {
    /// The cluster no longer knows the ARN; treated as finished.
    Gone,
    /// The task reported STOPPED, with the first container's exit code.
    Stopped(Option<i64>),
}

impl Rollout<Registered> {
    /// Run every declared one-off command to completion, in order.
    ///
    /// Each command launches exactly one task from its family's freshly
    /// registered definition, overriding the first container's command.
    /// Placement failures abort immediately without polling; a non-zero
    /// exit code aborts before the service stage can run.
    #[must_use = "rollout state must be used"]
    pub async fn run_commands<C: TaskOps>(
        self,
        cluster_api: &C,
        output: &Output,
    ) -> Result<Rollout<CommandsFinished>, RolloutError> {
        for command in &self.config.one_off_commands {
            let registered = self
                .state
                .definitions
                .get(&command.task_family)
                .ok_or_else(|| RolloutError::UnknownFamily(command.task_family.clone()))?;

            // Config validation rejects templates without containers.
            let container = registered
                .definition
                .container_definitions
                .first()
                .map(|c| c.name.as_str())
                .expect("registered definition must have containers");

            let argv = command.command.to_argv();
            output.progress(&format!(
                "  → Running [{}] on {}...",
                argv.join(" "),
                command.task_family
            ));

            let launched = cluster_api
                .run_task(
                    &self.config.cluster,
                    &registered.arn,
                    container,
                    &argv,
                    STARTED_BY,
                )
                .await?;

            if !launched.failures.is_empty() {
                let reasons = launched
                    .failures
                    .iter()
                    .map(|f| f.reason.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(RolloutError::SchedulingFailed {
                    family: command.task_family.clone(),
                    reasons,
                });
            }

            let task_arn = match launched.tasks.first() {
                Some(task) => task.task_arn.clone(),
                None => {
                    return Err(RolloutError::SchedulingFailed {
                        family: command.task_family.clone(),
                        reasons: "launch reported neither tasks nor failures".to_string(),
                    });
                }
            };

            info!(family = %command.task_family, task = %task_arn, "one-off task launched");

            match self.wait_for_task(cluster_api, &task_arn).await? {
                TaskOutcome::Gone => {
                    debug!(task = %task_arn, "task no longer reported; treating as finished");
                    output.progress("  ✓ Command finished");
                }
                TaskOutcome::Stopped(Some(0)) => {
                    output.progress("  ✓ Command exited 0");
                }
                TaskOutcome::Stopped(code) => {
                    return Err(RolloutError::TaskFailed {
                        family: command.task_family.clone(),
                        code,
                    });
                }
            }
        }

        let definitions = self.state.definitions.clone();
        Ok(self.transition(CommandsFinished { definitions }))
    }

    /// Poll the task until it is gone or stopped, within the wait budget.
    ///
    /// Elapsed time is accumulated as a sum of per-iteration deltas, so
    /// the effective deadline can overshoot the budget by up to one poll
    /// interval plus one API round trip.
    async fn wait_for_task<C: TaskOps>(
        &self,
        cluster_api: &C,
        task_arn: &TaskArn,
    ) -> Result<TaskOutcome, RolloutError> {
        let budget = self.wait_time();
        let mut waited = Duration::ZERO;

        loop {
            let iteration = Instant::now();

            match cluster_api.describe_task(&self.config.cluster, task_arn).await? {
                None => return Ok(TaskOutcome::Gone),
                Some(task) if task.is_stopped() => {
                    return Ok(TaskOutcome::Stopped(task.primary_exit_code()));
                }
                Some(task) => {
                    debug!(task = %task_arn, status = %task.last_status, "one-off task still running");
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
            waited += iteration.elapsed();

            if waited > budget {
                return Err(RolloutError::WaitTimeExceeded {
                    phase: "one-off task",
                    budget,
                });
            }
        }
    }
}
