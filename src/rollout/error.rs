// ABOUTME: Error types for rollout stages.
// ABOUTME: Every variant is fatal to the whole rollout; nothing retries.

use crate::cluster::ClusterError;
use crate::types::{FamilyName, ServiceName};
use std::time::Duration;

/// Errors that can occur during rollout state transitions.
#[derive(Debug, thiserror::Error)]
pub enum RolloutError {
    /// A one-off command or service names a family nobody declared.
    #[error("unknown task family: {0}")]
    UnknownFamily(FamilyName),

    /// The cluster rejected a task-definition template.
    #[error("failed to register task definition for family {family}: {source}")]
    RegistrationFailed {
        family: FamilyName,
        source: ClusterError,
    },

    /// A one-off task could not be scheduled at all.
    #[error("one-off task for family {family} could not be scheduled: {reasons}")]
    SchedulingFailed { family: FamilyName, reasons: String },

    /// A one-off task stopped with a non-zero (or missing) exit code.
    #[error(
        "one-off task for family {family} stopped with {}: aborting",
        match .code {
            Some(code) => format!("exit code {code}"),
            None => "no exit code".to_string(),
        }
    )]
    TaskFailed {
        family: FamilyName,
        code: Option<i64>,
    },

    /// A polling stage exhausted the configured wait-time budget.
    #[error("exceeded wait time of {}s waiting for {phase}", .budget.as_secs())]
    WaitTimeExceeded {
        phase: &'static str,
        budget: Duration,
    },

    /// A service update/create failed for a reason other than the
    /// recognized not-found/not-active fallback trigger.
    #[error("failed to upsert service {service}: {source}")]
    UpsertFailed {
        service: ServiceName,
        source: ClusterError,
    },

    /// Any other cluster API failure.
    #[error("cluster API failure: {0}")]
    Cluster(#[from] ClusterError),
}
