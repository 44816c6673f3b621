// ABOUTME: Convergence stage: wait until the cluster runs the new ARNs.
// ABOUTME: Presence check only; application-level health is out of scope.

use crate::cluster::TaskOps;
use crate::output::Output;
use crate::types::TaskDefinitionArn;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use super::Rollout;
use super::error::RolloutError;
use super::oneoff::POLL_INTERVAL;
use super::state::{Converged, ServicesUpserted};

impl Rollout<ServicesUpserted> {
    /// Poll the cluster's running tasks until every rolled-out ARN is
    /// represented, bounded by the wait-time budget.
    ///
    /// This confirms that each ARN appears among the running tasks'
    /// definitions; it does not compare running counts against each
    /// service's desired_count, and a task counted here can still be
    /// failing application-level health checks.
    #[must_use = "rollout state must be used"]
    pub async fn await_running<C: TaskOps>(
        self,
        cluster_api: &C,
        output: &Output,
    ) -> Result<Rollout<Converged>, RolloutError> {
        let budget = self.wait_time();
        let mut waited = Duration::ZERO;

        loop {
            let iteration = Instant::now();

            if self.check_running(cluster_api).await? {
                output.progress("  ✓ All services are running the new task definitions");
                let rolled_out = self.state.rolled_out.clone();
                return Ok(self.transition(Converged { rolled_out }));
            }

            debug!(
                waited_secs = waited.as_secs(),
                "new task definitions not yet running"
            );
            tokio::time::sleep(POLL_INTERVAL).await;
            waited += iteration.elapsed();

            if waited > budget {
                return Err(RolloutError::WaitTimeExceeded {
                    phase: "service convergence",
                    budget,
                });
            }
        }
    }

    /// One convergence probe: list running tasks, resolve their
    /// definitions, check that every rolled-out ARN is present.
    async fn check_running<C: TaskOps>(&self, cluster_api: &C) -> Result<bool, RolloutError> {
        let task_arns = cluster_api.list_running_tasks(&self.config.cluster).await?;

        let tasks = if task_arns.is_empty() {
            Vec::new()
        } else {
            cluster_api
                .describe_tasks(&self.config.cluster, &task_arns)
                .await?
        };

        let running: HashSet<&TaskDefinitionArn> = tasks
            .iter()
            .filter_map(|t| t.task_definition_arn.as_ref())
            .collect();

        Ok(self
            .state
            .rolled_out
            .iter()
            .all(|arn| running.contains(arn)))
    }
}
