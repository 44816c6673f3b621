// ABOUTME: Generic rollout struct parameterized by state marker.
// ABOUTME: State types carry their own data for compile-time guarantees.

use crate::config::Config;
use crate::types::{ImageRef, TaskDefinitionArn};

use super::register::RegisteredDefinitions;
use super::state::{Converged, Initialized, Registered, ServicesUpserted};

/// A rollout in progress, parameterized by its current state.
///
/// The state type parameter `S` carries stage-specific data (registered
/// definitions, updated ARNs) directly in the state type, so a stage can
/// only run once everything it reads actually exists. In particular the
/// one-off runner can never be skipped on the way to the upserter.
#[derive(Debug)]
pub struct Rollout<S> {
    pub(crate) config: Config,
    pub(crate) image: Option<ImageRef>,
    pub(crate) state: S,
}

impl Rollout<Initialized> {
    /// Create a new rollout. `image` overrides every container image in
    /// every template when supplied; templates register unchanged
    /// otherwise.
    pub fn new(config: Config, image: Option<ImageRef>) -> Self {
        Rollout {
            config,
            image,
            state: Initialized,
        }
    }
}

impl<S> Rollout<S> {
    /// Target cluster name.
    pub fn cluster(&self) -> &str {
        &self.config.cluster
    }

    /// Wait-time budget shared by the polling stages.
    pub fn wait_time(&self) -> std::time::Duration {
        self.config.wait_time
    }

    /// Get the config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Internal helper to transition to a new state.
    pub(crate) fn transition<T>(self, state: T) -> Rollout<T> {
        Rollout {
            config: self.config,
            image: self.image,
            state,
        }
    }
}

impl Rollout<Registered> {
    /// Definitions registered by this rollout, keyed by family.
    pub fn definitions(&self) -> &RegisteredDefinitions {
        &self.state.definitions
    }
}

impl Rollout<ServicesUpserted> {
    /// ARNs the services were pointed at, one per service, in order.
    pub fn rolled_out(&self) -> &[TaskDefinitionArn] {
        &self.state.rolled_out
    }
}

impl Rollout<Converged> {
    /// ARNs confirmed present among the cluster's running tasks.
    pub fn rolled_out(&self) -> &[TaskDefinitionArn] {
        &self.state.rolled_out
    }

    /// Consume the rollout and return the config.
    pub fn finish(self) -> Config {
        self.config
    }
}
