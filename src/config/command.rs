// ABOUTME: One-off command declarations from configuration.
// ABOUTME: The command accepts a single string or an argument sequence.

use crate::types::FamilyName;
use serde::{Deserialize, Serialize};

/// A bounded task run to completion before any service is touched,
/// e.g. a schema migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOffCommand {
    pub task_family: FamilyName,
    pub command: CommandValue,
}

/// The command itself: either one string split on whitespace, or an
/// explicit argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandValue {
    Line(String),
    Argv(Vec<String>),
}

impl CommandValue {
    pub fn to_argv(&self) -> Vec<String> {
        match self {
            CommandValue::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            CommandValue::Argv(argv) => argv.clone(),
        }
    }
}
