// ABOUTME: Cluster API abstraction: capability traits and the HTTP client.
// ABOUTME: The rollout pipeline only sees the traits, never the transport.

mod error;
mod http;
mod traits;

pub use error::{ClusterError, ClusterErrorKind};
pub use http::HttpClusterClient;
pub use traits::{
    ContainerDefinition, ContainerState, Failure, RunTaskOutput, ServiceOps, ServiceUpdate,
    Task, TaskDefinition, TaskDefinitionOps, TaskOps,
};
