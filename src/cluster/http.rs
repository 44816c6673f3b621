// ABOUTME: HTTP implementation of the cluster capability traits.
// ABOUTME: JSON POST per action against the cluster controller endpoint.

use crate::cluster::error::{ClusterError, ClusterErrorKind};
use crate::cluster::traits::{
    RunTaskOutput, ServiceOps, ServiceUpdate, Task, TaskDefinition, TaskDefinitionOps, TaskOps,
};
use crate::types::{TaskArn, TaskDefinitionArn};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for the cluster controller's HTTP API.
///
/// Each operation is a `POST {endpoint}/v1/{Action}` with a JSON body and
/// an optional bearer token. Constructed once from resolved configuration
/// and passed by reference into the rollout stages; it holds no mutable
/// state.
#[derive(Debug, Clone)]
pub struct HttpClusterClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

/// Error body the API returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

impl HttpClusterClient {
    pub fn new(endpoint: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn call<Req, Resp>(&self, action: &str, body: &Req) -> Result<Resp, ClusterError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/v1/{}", self.endpoint, action);
        debug!(action, %url, "cluster API call");

        let mut request = self.http.post(&url).json(body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| ClusterError::Transport {
            action: action.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_api_error(action, status, response).await);
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| ClusterError::InvalidResponse {
                action: action.to_string(),
                message: e.to_string(),
            })
    }
}

/// Map a non-2xx response into a coded API error, falling back to the
/// raw body when the error envelope itself does not parse.
async fn map_api_error(
    action: &str,
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> ClusterError {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(err) => ClusterError::Api {
            code: err.code,
            message: err.message,
        },
        Err(_) => ClusterError::InvalidResponse {
            action: action.to_string(),
            message: format!("status {status}: {body}"),
        },
    }
}

// =============================================================================
// Wire payloads
// =============================================================================

#[derive(Debug, Serialize)]
struct RunTaskRequest<'a> {
    cluster: &'a str,
    task_definition: &'a TaskDefinitionArn,
    count: u32,
    started_by: &'a str,
    overrides: TaskOverrides<'a>,
}

#[derive(Debug, Serialize)]
struct TaskOverrides<'a> {
    container_overrides: Vec<ContainerOverride<'a>>,
}

#[derive(Debug, Serialize)]
struct ContainerOverride<'a> {
    name: &'a str,
    command: &'a [String],
}

#[derive(Debug, Serialize)]
struct ClusterScoped<'a> {
    cluster: &'a str,
}

#[derive(Debug, Serialize)]
struct DescribeTaskRequest<'a> {
    cluster: &'a str,
    task: &'a TaskArn,
}

#[derive(Debug, Serialize)]
struct DescribeTasksRequest<'a> {
    cluster: &'a str,
    tasks: &'a [TaskArn],
}

#[derive(Debug, Serialize)]
struct ServiceRequest<'a> {
    cluster: &'a str,
    #[serde(flatten)]
    update: &'a ServiceUpdate,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    task_definition_arn: TaskDefinitionArn,
}

#[derive(Debug, Deserialize)]
struct DescribeTaskResponse {
    #[serde(default)]
    task: Option<Task>,
}

#[derive(Debug, Deserialize)]
struct ListTasksResponse {
    #[serde(default)]
    task_arns: Vec<TaskArn>,
}

#[derive(Debug, Deserialize)]
struct DescribeTasksResponse {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct Empty {}

// =============================================================================
// Trait implementations
// =============================================================================

#[async_trait]
impl TaskDefinitionOps for HttpClusterClient {
    async fn register_task_definition(
        &self,
        definition: &TaskDefinition,
    ) -> Result<TaskDefinitionArn, ClusterError> {
        let response: RegisterResponse = self.call("RegisterTaskDefinition", definition).await?;
        Ok(response.task_definition_arn)
    }
}

#[async_trait]
impl TaskOps for HttpClusterClient {
    async fn run_task(
        &self,
        cluster: &str,
        definition: &TaskDefinitionArn,
        container: &str,
        command: &[String],
        started_by: &str,
    ) -> Result<RunTaskOutput, ClusterError> {
        let request = RunTaskRequest {
            cluster,
            task_definition: definition,
            count: 1,
            started_by,
            overrides: TaskOverrides {
                container_overrides: vec![ContainerOverride {
                    name: container,
                    command,
                }],
            },
        };
        self.call("RunTask", &request).await
    }

    async fn describe_task(
        &self,
        cluster: &str,
        task: &TaskArn,
    ) -> Result<Option<Task>, ClusterError> {
        let request = DescribeTaskRequest { cluster, task };
        match self
            .call::<_, DescribeTaskResponse>("DescribeTask", &request)
            .await
        {
            Ok(response) => Ok(response.task),
            // A task the cluster has already forgotten counts as finished.
            Err(e) if e.kind() == ClusterErrorKind::TaskNotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_running_tasks(&self, cluster: &str) -> Result<Vec<TaskArn>, ClusterError> {
        let request = ClusterScoped { cluster };
        let response: ListTasksResponse = self.call("ListRunningTasks", &request).await?;
        Ok(response.task_arns)
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        tasks: &[TaskArn],
    ) -> Result<Vec<Task>, ClusterError> {
        let request = DescribeTasksRequest { cluster, tasks };
        let response: DescribeTasksResponse = self.call("DescribeTasks", &request).await?;
        Ok(response.tasks)
    }
}

#[async_trait]
impl ServiceOps for HttpClusterClient {
    async fn update_service(
        &self,
        cluster: &str,
        update: &ServiceUpdate,
    ) -> Result<(), ClusterError> {
        let request = ServiceRequest { cluster, update };
        self.call::<_, Empty>("UpdateService", &request).await?;
        Ok(())
    }

    async fn create_service(
        &self,
        cluster: &str,
        update: &ServiceUpdate,
    ) -> Result<(), ClusterError> {
        let request = ServiceRequest { cluster, update };
        self.call::<_, Empty>("CreateService", &request).await?;
        Ok(())
    }
}
