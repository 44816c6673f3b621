// ABOUTME: Rollout orchestration using the type state pattern.
// ABOUTME: Registrar, one-off runner, upserter, and waiter run in a fixed order.

mod converge;
mod error;
mod oneoff;
mod register;
mod rollout;
mod services;
mod state;

pub use error::RolloutError;
pub use oneoff::{POLL_INTERVAL, STARTED_BY};
pub use register::{RegisteredDefinitions, RegisteredTaskDefinition};
pub use rollout::Rollout;
pub use state::{CommandsFinished, Converged, Initialized, Registered, ServicesUpserted};
