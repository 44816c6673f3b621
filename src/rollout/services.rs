// ABOUTME: Upserter stage: point every declared service at its new definition.
// ABOUTME: Update first; create only on the not-found/not-active error kinds.

use crate::cluster::{ClusterErrorKind, ServiceOps, ServiceUpdate};
use crate::output::Output;
use tracing::{debug, info};

use super::Rollout;
use super::error::RolloutError;
use super::state::{CommandsFinished, ServicesUpserted};

impl Rollout<CommandsFinished> {
    /// Upsert every declared service, in order.
    ///
    /// The decision is explicit: call update, classify the error kind.
    /// `ServiceNotFound` and `ServiceNotActive` retry as create with the
    /// same parameters; anything else is fatal. Re-running against an
    /// already-converged service is a no-op update, so the stage is
    /// idempotent.
    #[must_use = "rollout state must be used"]
    pub async fn upsert_services<C: ServiceOps>(
        self,
        cluster_api: &C,
        output: &Output,
    ) -> Result<Rollout<ServicesUpserted>, RolloutError> {
        let mut rolled_out = Vec::with_capacity(self.config.services.len());

        for spec in &self.config.services {
            let registered = self
                .state
                .definitions
                .get(&spec.task_family)
                .ok_or_else(|| RolloutError::UnknownFamily(spec.task_family.clone()))?;

            let update = ServiceUpdate {
                name: spec.name.clone(),
                desired_count: spec.desired_count,
                task_definition: registered.arn.clone(),
                deployment_configuration: spec.deployment_configuration.clone(),
            };

            match cluster_api.update_service(&self.config.cluster, &update).await {
                Ok(()) => {
                    info!(service = %spec.name, arn = %registered.arn, "service updated");
                    output.progress(&format!("  → Updated service {}", spec.name));
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        ClusterErrorKind::ServiceNotFound | ClusterErrorKind::ServiceNotActive
                    ) =>
                {
                    debug!(service = %spec.name, kind = ?e.kind(), "update not applicable, creating");
                    cluster_api
                        .create_service(&self.config.cluster, &update)
                        .await
                        .map_err(|source| RolloutError::UpsertFailed {
                            service: spec.name.clone(),
                            source,
                        })?;
                    info!(service = %spec.name, arn = %registered.arn, "service created");
                    output.progress(&format!("  → Created service {}", spec.name));
                }
                Err(source) => {
                    return Err(RolloutError::UpsertFailed {
                        service: spec.name.clone(),
                        source,
                    });
                }
            }

            rolled_out.push(registered.arn.clone());
        }

        Ok(self.transition(ServicesUpserted { rolled_out }))
    }
}
