// ABOUTME: Task-definition registration trait.
// ABOUTME: Registration always mints a new revision under the family.

use super::shared_types::TaskDefinition;
use crate::cluster::error::ClusterError;
use crate::types::TaskDefinitionArn;
use async_trait::async_trait;

/// Task-definition registration.
#[async_trait]
pub trait TaskDefinitionOps: Send + Sync {
    /// Register a template as a new revision of its family, returning the
    /// ARN the cluster assigned to it.
    async fn register_task_definition(
        &self,
        definition: &TaskDefinition,
    ) -> Result<TaskDefinitionArn, ClusterError>;
}
