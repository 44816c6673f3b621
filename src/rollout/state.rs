// ABOUTME: Rollout state types for the type state pattern.
// ABOUTME: States carry the data each later stage depends on.

use super::register::RegisteredDefinitions;
use crate::types::TaskDefinitionArn;

/// Initial state: configuration resolved, nothing touched yet.
/// Available actions: `register()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Task definitions registered: one new revision per family.
/// Available actions: `run_commands()`
#[derive(Debug)]
pub struct Registered {
    pub(crate) definitions: RegisteredDefinitions,
}

/// One-off commands all exited zero (or none were declared).
/// Available actions: `upsert_services()`
#[derive(Debug)]
pub struct CommandsFinished {
    pub(crate) definitions: RegisteredDefinitions,
}

/// Services point at the new definitions; convergence not yet observed.
/// Available actions: `await_running()`
#[derive(Debug)]
pub struct ServicesUpserted {
    pub(crate) rolled_out: Vec<TaskDefinitionArn>,
}

/// Terminal state: every rolled-out ARN was seen among running tasks.
/// Available actions: `finish()`
#[derive(Debug)]
pub struct Converged {
    pub(crate) rolled_out: Vec<TaskDefinitionArn>,
}
