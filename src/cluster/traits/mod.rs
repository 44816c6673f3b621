// ABOUTME: Composable capability traits for the cluster API.
// ABOUTME: Defines TaskDefinitionOps, TaskOps, ServiceOps and wire types.

mod services;
mod shared_types;
mod task_definitions;
mod tasks;

pub use services::{ServiceOps, ServiceUpdate};
pub use shared_types::*;
pub use task_definitions::TaskDefinitionOps;
pub use tasks::{RunTaskOutput, TaskOps};
