// ABOUTME: Shared wire types used across cluster trait definitions.
// ABOUTME: TaskDefinition, ContainerDefinition, Task, Failure.

use crate::types::{FamilyName, ImageRef, TaskArn, TaskDefinitionArn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A task-definition template: the set of containers registered together
/// under one family. Registration mints a new immutable revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub family: FamilyName,
    pub container_definitions: Vec<ContainerDefinition>,
}

impl TaskDefinition {
    /// Overwrite every container's image with the deploy's target image.
    pub fn with_image(mut self, image: &ImageRef) -> Self {
        for container in &mut self.container_definitions {
            container.image = Some(image.clone());
        }
        self
    }
}

/// One container within a task definition. Everything except `name` and
/// `image` is passed through to the cluster untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,
}

/// A task as reported by the cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_arn: TaskArn,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_definition_arn: Option<TaskDefinitionArn>,

    /// Free-form status string from the platform (PENDING, RUNNING,
    /// STOPPED, ...).
    pub last_status: String,

    #[serde(default)]
    pub containers: Vec<ContainerState>,
}

/// Terminal status value reported once a task has stopped.
pub const STATUS_STOPPED: &str = "STOPPED";

impl Task {
    pub fn is_stopped(&self) -> bool {
        self.last_status == STATUS_STOPPED
    }

    /// Exit code of the first container, present only once stopped.
    pub fn primary_exit_code(&self) -> Option<i64> {
        self.containers.first().and_then(|c| c.exit_code)
    }
}

/// Runtime state of one container within a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerState {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A task the cluster could not schedule at all, with the platform's
/// reason string (e.g. "RESOURCE:MEMORY").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    pub reason: String,
}
