// ABOUTME: Registrar stage: register one new revision per family.
// ABOUTME: Applies the deploy's image override before registration.

use crate::cluster::{TaskDefinition, TaskDefinitionOps};
use crate::output::Output;
use crate::types::{FamilyName, TaskDefinitionArn};
use tracing::info;

use super::Rollout;
use super::error::RolloutError;
use super::state::{Initialized, Registered};

/// A template the cluster accepted, with the ARN it minted.
/// One per family per rollout; revisions are never reused.
#[derive(Debug, Clone)]
pub struct RegisteredTaskDefinition {
    pub family: FamilyName,
    pub definition: TaskDefinition,
    pub arn: TaskDefinitionArn,
}

/// Registered definitions in registration order, looked up by family.
#[derive(Debug, Clone, Default)]
pub struct RegisteredDefinitions {
    entries: Vec<RegisteredTaskDefinition>,
}

impl RegisteredDefinitions {
    pub fn get(&self, family: &FamilyName) -> Option<&RegisteredTaskDefinition> {
        self.entries.iter().find(|e| &e.family == family)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTaskDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: RegisteredTaskDefinition) {
        self.entries.push(entry);
    }
}

impl Rollout<Initialized> {
    /// Register every template, in declared order, as a new revision of
    /// its family. Any registration failure aborts the rollout;
    /// already-registered revisions are left in place since the platform
    /// versions them.
    #[must_use = "rollout state must be used"]
    pub async fn register<C: TaskDefinitionOps>(
        self,
        cluster_api: &C,
        output: &Output,
    ) -> Result<Rollout<Registered>, RolloutError> {
        let mut definitions = RegisteredDefinitions::default();

        for template in self.config.task_definitions.iter() {
            let definition = match &self.image {
                Some(image) => template.clone().with_image(image),
                None => template.clone(),
            };

            let arn = cluster_api
                .register_task_definition(&definition)
                .await
                .map_err(|source| RolloutError::RegistrationFailed {
                    family: definition.family.clone(),
                    source,
                })?;

            info!(family = %definition.family, arn = %arn, "registered task definition");
            output.progress(&format!("  → Registered {} as {}", definition.family, arn));

            definitions.push(RegisteredTaskDefinition {
                family: definition.family.clone(),
                definition,
                arn,
            });
        }

        Ok(self.transition(Registered { definitions }))
    }
}
