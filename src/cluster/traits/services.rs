// ABOUTME: Service update and creation trait.
// ABOUTME: The upsert decision (update, fall back to create) lives upstream.

use crate::cluster::error::ClusterError;
use crate::types::{ServiceName, TaskDefinitionArn};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters shared by service update and creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub name: ServiceName,
    pub desired_count: u32,
    pub task_definition: TaskDefinitionArn,

    /// Opaque pass-through options (rollout rates etc.), handed to the
    /// cluster verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_configuration: Option<serde_json::Value>,
}

/// Service lifecycle operations.
#[async_trait]
pub trait ServiceOps: Send + Sync {
    /// Point an existing service at a new task definition. Fails with
    /// `ClusterErrorKind::ServiceNotFound` or `ServiceNotActive` when
    /// there is nothing to update.
    async fn update_service(
        &self,
        cluster: &str,
        update: &ServiceUpdate,
    ) -> Result<(), ClusterError>;

    /// Create a service with the same parameters, using the name as the
    /// creation-time identity.
    async fn create_service(
        &self,
        cluster: &str,
        update: &ServiceUpdate,
    ) -> Result<(), ClusterError>;
}
