// ABOUTME: Configuration types and parsing for stolos.yml.
// ABOUTME: Handles YAML parsing, validation, and destination merging.

mod command;

pub use command::{CommandValue, OneOffCommand};

use crate::cluster::TaskDefinition;
use crate::error::{Error, Result};
use crate::types::{FamilyName, ServiceName};
use nonempty::NonEmpty;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "stolos.yml";
pub const CONFIG_FILENAME_ALT: &str = "stolos.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stolos/config.yml";

/// Default environment variable consulted for the API bearer token.
pub const DEFAULT_TOKEN_ENV: &str = "STOLOS_TOKEN";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Target cluster name.
    pub cluster: String,

    /// Wait-time budget for one-off tasks and service convergence.
    #[serde(default = "default_wait_time", with = "humantime_serde")]
    pub wait_time: Duration,

    /// Task-definition templates, registered in declared order.
    #[serde(deserialize_with = "deserialize_task_definitions")]
    pub task_definitions: NonEmpty<TaskDefinition>,

    /// Commands run to completion before services are touched, in order.
    #[serde(default)]
    pub one_off_commands: Vec<OneOffCommand>,

    /// Long-running services to upsert, in order.
    #[serde(default)]
    pub services: Vec<ServiceSpec>,

    #[serde(default)]
    pub api: Option<ApiConfig>,

    #[serde(default)]
    pub destinations: HashMap<String, Destination>,
}

/// A long-running service pointed at a family's newest definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSpec {
    pub name: ServiceName,
    pub task_family: FamilyName,
    pub desired_count: u32,

    /// Opaque pass-through options, handed to the cluster verbatim.
    #[serde(default)]
    pub deployment_configuration: Option<serde_json::Value>,
}

/// How to reach the cluster controller.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,

    /// Environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

/// Per-destination overrides merged on top of the base configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Destination {
    #[serde(default)]
    pub cluster: Option<String>,

    #[serde(default, with = "humantime_serde::option")]
    pub wait_time: Option<Duration>,

    #[serde(default)]
    pub api: Option<ApiConfig>,
}

fn default_wait_time() -> Duration {
    Duration::from_secs(300)
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn for_destination(&self, name: &str) -> Result<Config> {
        let dest = self
            .destinations
            .get(name)
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;

        let mut merged = self.clone();

        if let Some(ref cluster) = dest.cluster {
            merged.cluster = cluster.clone();
        }

        if let Some(wait_time) = dest.wait_time {
            merged.wait_time = wait_time;
        }

        if dest.api.is_some() {
            merged.api = dest.api.clone();
        }

        Ok(merged)
    }

    /// Cross-reference checks that the type system cannot express: every
    /// referenced family must be declared (exactly once), and every
    /// template must declare at least one container.
    fn validate(&self) -> Result<()> {
        let mut families: HashSet<&FamilyName> = HashSet::new();
        for definition in self.task_definitions.iter() {
            if !families.insert(&definition.family) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate task definition family: {}",
                    definition.family
                )));
            }
            if definition.container_definitions.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "task definition family {} declares no containers",
                    definition.family
                )));
            }
        }

        for command in &self.one_off_commands {
            if !families.contains(&command.task_family) {
                return Err(Error::InvalidConfig(format!(
                    "one-off command references unknown task family: {}",
                    command.task_family
                )));
            }
        }

        for service in &self.services {
            if !families.contains(&service.task_family) {
                return Err(Error::InvalidConfig(format!(
                    "service {} references unknown task family: {}",
                    service.name, service.task_family
                )));
            }
        }

        Ok(())
    }

    /// Environment variable holding the API bearer token.
    pub fn token_env(&self) -> &str {
        self.api
            .as_ref()
            .map(|a| a.token_env.as_str())
            .unwrap_or(DEFAULT_TOKEN_ENV)
    }
}

pub fn init_config(dir: &Path, cluster: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(cluster.unwrap_or("my-cluster"));
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(cluster: &str) -> String {
    format!(
        r#"cluster: {cluster}
wait_time: 5m

api:
  endpoint: https://controller.example.com

task_definitions:
  - family: my-app
    containers:
      - name: app
        image: my-registry/my-app:latest

one_off_commands: []

services:
  - name: my-app
    task_family: my-app
    desired_count: 1
"#
    )
}

// Custom deserializers

fn deserialize_task_definitions<'de, D>(
    deserializer: D,
) -> std::result::Result<NonEmpty<TaskDefinition>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries: Vec<TaskDefinitionEntry> = Vec::deserialize(deserializer)?;
    let definitions = entries.into_iter().map(|e| e.into_definition()).collect();

    NonEmpty::from_vec(definitions)
        .ok_or_else(|| serde::de::Error::custom("at least one task definition is required"))
}

/// Config-file spelling of a task definition: `containers` rather than
/// the wire field `container_definitions`.
#[derive(Debug, Deserialize)]
struct TaskDefinitionEntry {
    family: FamilyName,
    #[serde(default)]
    containers: Vec<crate::cluster::ContainerDefinition>,
}

impl TaskDefinitionEntry {
    fn into_definition(self) -> TaskDefinition {
        TaskDefinition {
            family: self.family,
            container_definitions: self.containers,
        }
    }
}
